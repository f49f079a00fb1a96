//! Collaborators shared by every extension operation

use crate::directory::LocalDirectory;
use crate::installer::ArchiveInstaller;
use crate::registry::RemoteRegistry;
use crate::shell::{NoReload, ShellReload};
use crate::store::EnabledSetStore;

/// Everything an [`Extension`](crate::Extension) or
/// [`ExtensionManager`](crate::ExtensionManager) talks to
pub struct ExtensionContext {
    pub directory: LocalDirectory,
    pub store: Box<dyn EnabledSetStore>,
    pub registry: Box<dyn RemoteRegistry>,
    pub installer: Box<dyn ArchiveInstaller>,
    pub reload: Box<dyn ShellReload>,
    /// Version string sent with every registry query
    pub shell_version: String,
}

impl ExtensionContext {
    pub fn new(
        directory: LocalDirectory,
        store: impl EnabledSetStore + 'static,
        registry: impl RemoteRegistry + 'static,
        installer: impl ArchiveInstaller + 'static,
        shell_version: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            store: Box::new(store),
            registry: Box::new(registry),
            installer: Box::new(installer),
            reload: Box::new(NoReload),
            shell_version: shell_version.into(),
        }
    }

    /// Replace the reload trigger
    pub fn with_reload(mut self, reload: impl ShellReload + 'static) -> Self {
        self.reload = Box::new(reload);
        self
    }
}
