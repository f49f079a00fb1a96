//! Loose version ordering
//!
//! Registry and metadata version fields are not guaranteed to be semver
//! shaped. Extensions published to the registry usually carry a plain
//! integer (`"12"`), while hand-written metadata may use dotted or
//! suffixed strings (`"1.10"`, `"2.0rc1"`).
//!
//! A [`LooseVersion`] splits the string into alternating numeric and
//! text components and compares them one by one:
//!
//! - numeric vs numeric compares numerically (`"10" > "9"`)
//! - text vs text compares lexically
//! - text sorts below numeric (`"1.0rc1" < "1.0"`)
//! - a shorter sequence is padded with numeric zero (`"1.2" == "1.2.0"`)
//!
//! # Examples
//!
//! ```
//! use gext_core::LooseVersion;
//!
//! assert!(LooseVersion::parse("1.10") > LooseVersion::parse("1.9"));
//! assert_eq!(LooseVersion::parse("1.2"), LooseVersion::parse("1.2.0"));
//! ```

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+|[^\d.\-_+\s]+").expect("component pattern is valid"));

/// A single version component
#[derive(Debug, Clone)]
pub enum Component {
    /// Run of ASCII digits, leading zeros stripped (`"0"` for zero)
    Numeric(String),
    /// Run of anything else that is not a separator
    Text(String),
}

impl Component {
    fn numeric(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Component::Numeric("0".to_string())
        } else {
            Component::Numeric(trimmed.to_string())
        }
    }

    fn cmp_component(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Canonical digit strings of any length order by (len, lexical)
            (Component::Numeric(a), Component::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Component::Text(a), Component::Text(b)) => a.cmp(b),
            (Component::Text(_), Component::Numeric(_)) => Ordering::Less,
            (Component::Numeric(_), Component::Text(_)) => Ordering::Greater,
        }
    }

    /// Ordering against the implicit zero used to pad the shorter version
    fn cmp_zero(&self) -> Ordering {
        match self {
            Component::Numeric(d) if d == "0" => Ordering::Equal,
            Component::Numeric(_) => Ordering::Greater,
            Component::Text(_) => Ordering::Less,
        }
    }
}

/// Permissively parsed, totally ordered version value
#[derive(Debug, Clone)]
pub struct LooseVersion {
    raw: String,
    components: Vec<Component>,
}

impl LooseVersion {
    /// Parse a version string. Never fails; an empty string yields no components.
    pub fn parse(raw: &str) -> Self {
        let components = COMPONENT_RE
            .find_iter(raw)
            .map(|m| {
                let s = m.as_str();
                if s.bytes().all(|b| b.is_ascii_digit()) {
                    Component::numeric(s)
                } else {
                    Component::Text(s.to_string())
                }
            })
            .collect();

        Self {
            raw: raw.to_string(),
            components,
        }
    }

    /// The original string this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed components
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

impl Ord for LooseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let ordering = match (self.components.get(i), other.components.get(i)) {
                (Some(a), Some(b)) => a.cmp_component(b),
                (Some(a), None) => a.cmp_zero(),
                (None, Some(b)) => b.cmp_zero().reverse(),
                (None, None) => Ordering::Equal,
            };
            match ordering {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for LooseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LooseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LooseVersion {}

impl fmt::Display for LooseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for LooseVersion {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn v(s: &str) -> LooseVersion {
        LooseVersion::parse(s)
    }

    #[test_case("10", "9" ; "integers compare numerically")]
    #[test_case("1.10", "1.9" ; "dotted minor numerically")]
    #[test_case("4", "3" ; "registry integer bump")]
    #[test_case("2.0", "1.99.99" ; "major wins")]
    #[test_case("1.0", "1.0rc1" ; "text suffix sorts below release")]
    #[test_case("1.0b", "1.0a" ; "text compares lexically")]
    #[test_case("1.2.1", "1.2" ; "longer with nonzero tail")]
    #[test_case("1.99999999999999999999", "1.1" ; "component wider than u64")]
    #[test_case("123456789012345678901234", "123456789012345678901233" ; "wide components compare by value")]
    fn test_greater(high: &str, low: &str) {
        assert!(v(high) > v(low), "{high} should be > {low}");
        assert!(v(low) < v(high));
    }

    #[test_case("1.2", "1.2.0" ; "zero padding")]
    #[test_case("3", "3.0.0" ; "integer padding")]
    #[test_case("1-2", "1.2" ; "dash separator")]
    #[test_case("", "0" ; "empty equals zero")]
    #[test_case("1.01", "1.1" ; "leading zeros ignored")]
    #[test_case("2.000000000000000000000", "2" ; "wide zero pads equal")]
    fn test_equal(a: &str, b: &str) {
        assert_eq!(v(a), v(b));
        assert!(!(v(a) > v(b)));
    }

    #[test]
    fn test_unlike_string_comparison() {
        assert!("1.10" < "1.9");
        assert!(v("1.10") > v("1.9"));
    }

    #[test]
    fn test_components() {
        let parsed = v("2.0rc1");
        let kinds: Vec<String> = parsed
            .components()
            .iter()
            .map(|c| match c {
                Component::Numeric(n) => n.clone(),
                Component::Text(t) => format!("'{t}'"),
            })
            .collect();
        assert_eq!(kinds, vec!["2", "0", "'rc'", "1"]);
    }

    #[test]
    fn test_display_keeps_raw() {
        assert_eq!(v("1.2.0-beta").to_string(), "1.2.0-beta");
    }

    proptest! {
        #[test]
        fn prop_ordering_is_antisymmetric(a in "[0-9a-c.]{0,8}", b in "[0-9a-c.]{0,8}") {
            let (va, vb) = (v(&a), v(&b));
            prop_assert_eq!(va.cmp(&vb), vb.cmp(&va).reverse());
        }

        #[test]
        fn prop_trailing_zero_is_equal(a in "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}") {
            let padded = format!("{a}.0");
            prop_assert_eq!(v(&a), v(&padded));
        }
    }
}
