//! Running shell integration: version detection and reload notification

use async_trait::async_trait;
use gext_core::utils::parse_shell_version;
use gext_core::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Asks the running shell to pick up extension changes
#[async_trait]
pub trait ShellReload: Send + Sync {
    async fn notify(&self) -> Result<()>;
}

/// Reload through the shell's session bus interface
#[derive(Debug, Clone, Default)]
pub struct DbusShellReload;

#[async_trait]
impl ShellReload for DbusShellReload {
    async fn notify(&self) -> Result<()> {
        let output = Command::new("dbus-send")
            .args([
                "--session",
                "--type=method_call",
                "--dest=org.gnome.Shell",
                "/org/gnome/Shell",
                "org.gnome.Shell.Eval",
                "string:global.reexec_self()",
            ])
            .output()
            .await
            .map_err(|e| Error::transport(format!("Failed to run dbus-send: {}", e)))?;

        if !output.status.success() {
            return Err(Error::transport(format!(
                "Shell reload request failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Reload that does nothing
#[derive(Debug, Clone, Default)]
pub struct NoReload;

#[async_trait]
impl ShellReload for NoReload {
    async fn notify(&self) -> Result<()> {
        Ok(())
    }
}

/// Detect the running shell version from `gnome-shell --version`
pub async fn detect_shell_version() -> Result<String> {
    let output = Command::new("gnome-shell")
        .arg("--version")
        .output()
        .await
        .map_err(|e| {
            Error::configuration(format!(
                "Could not run gnome-shell to detect its version ({}); set GEXT_SHELL_VERSION",
                e
            ))
        })?;

    version_from_output(&output)
}

fn version_from_output(output: &std::process::Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::configuration(format!(
            "gnome-shell --version failed ({}): {}; set GEXT_SHELL_VERSION",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    debug!("gnome-shell --version: {}", stdout.trim());

    parse_shell_version(&stdout).ok_or_else(|| {
        Error::configuration(format!(
            "Unrecognised gnome-shell version output '{}'; set GEXT_SHELL_VERSION",
            stdout.trim()
        ))
    })
}
