//! Enabled-set store
//!
//! The shell reads the list of enabled extension identifiers from a
//! settings key. The store is only ever read whole and written whole.

use async_trait::async_trait;
use gext_core::{Error, Result};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::debug;

/// Persistent set of enabled extension identifiers
#[async_trait]
pub trait EnabledSetStore: Send + Sync {
    /// Read the current set
    async fn get(&self) -> Result<BTreeSet<String>>;

    /// Replace the whole set
    async fn set(&self, uuids: &BTreeSet<String>) -> Result<()>;
}

/// Store backed by the `gsettings` command line tool
#[derive(Debug, Clone)]
pub struct GSettingsStore {
    schema: String,
    key: String,
}

impl GSettingsStore {
    pub fn new(schema: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            key: key.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        debug!("gsettings {}", args.join(" "));

        let output = Command::new("gsettings")
            .args(args)
            .output()
            .await
            .map_err(|e| Error::store(format!("Failed to run gsettings: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::store(format!(
                "gsettings {} failed: {}",
                args.first().copied().unwrap_or_default(),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl EnabledSetStore for GSettingsStore {
    async fn get(&self) -> Result<BTreeSet<String>> {
        let stdout = self.run(&["get", &self.schema, &self.key]).await?;
        Ok(parse_string_array(&stdout)?.into_iter().collect())
    }

    async fn set(&self, uuids: &BTreeSet<String>) -> Result<()> {
        let value = format_string_array(uuids);
        self.run(&["set", &self.schema, &self.key, &value]).await?;
        Ok(())
    }
}

/// Parse a GVariant text-form string array such as `['a', "b"]` or `@as []`
pub fn parse_string_array(text: &str) -> Result<Vec<String>> {
    let text = text.trim();
    let body = text.strip_prefix("@as").map(str::trim_start).unwrap_or(text);

    let inner = body
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| Error::store(format!("Unexpected settings value: {}", text)))?;

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == ',').is_some() {}

        let Some(quote) = chars.next() else { break };
        if quote != '\'' && quote != '"' {
            return Err(Error::store(format!(
                "Unexpected character '{}' in settings value",
                quote
            )));
        }

        let mut item = String::new();
        let mut closed = false;
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => item.push('\n'),
                    Some('t') => item.push('\t'),
                    Some('r') => item.push('\r'),
                    Some(other) => item.push(other),
                    None => break,
                },
                c if c == quote => {
                    closed = true;
                    break;
                }
                c => item.push(c),
            }
        }

        if !closed {
            return Err(Error::store("Unterminated string in settings value"));
        }
        items.push(item);
    }

    Ok(items)
}

/// Format identifiers as a GVariant string array
pub fn format_string_array<'a, I>(uuids: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let quoted: Vec<String> = uuids
        .into_iter()
        .map(|uuid| {
            let escaped = uuid.replace('\\', "\\\\").replace('\'', "\\'");
            format!("'{}'", escaped)
        })
        .collect();

    if quoted.is_empty() {
        "@as []".to_string()
    } else {
        format!("[{}]", quoted.join(", "))
    }
}

/// Process-local store, for tests and dry runs
///
/// Clones share state, so a handle kept by the caller observes every write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    uuids: Arc<Mutex<BTreeSet<String>>>,
    fail_writes: Arc<AtomicBool>,
    writes: Arc<Mutex<Vec<BTreeSet<String>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with identifiers
    pub fn with_uuids<I, S>(uuids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::default();
        if let Ok(mut set) = store.uuids.lock() {
            set.extend(uuids.into_iter().map(Into::into));
        }
        store
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current contents
    pub fn snapshot(&self) -> BTreeSet<String> {
        self.uuids.lock().map(|set| set.clone()).unwrap_or_default()
    }

    /// Every successful write, in order
    pub fn writes(&self) -> Vec<BTreeSet<String>> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EnabledSetStore for InMemoryStore {
    async fn get(&self) -> Result<BTreeSet<String>> {
        self.uuids
            .lock()
            .map(|set| set.clone())
            .map_err(|_| Error::store("In-memory store poisoned"))
    }

    async fn set(&self, uuids: &BTreeSet<String>) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::store("Write rejected"));
        }

        let mut set = self
            .uuids
            .lock()
            .map_err(|_| Error::store("In-memory store poisoned"))?;
        set.clone_from(uuids);
        drop(set);

        if let Ok(mut writes) = self.writes.lock() {
            writes.push(uuids.clone());
        }
        Ok(())
    }
}
