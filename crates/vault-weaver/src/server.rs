use std::path::PathBuf;
use vault_core::Vault;

/// Shared state handed to every tool call.
pub struct Server {
    vault: Vault,
}

impl Server {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            vault: Vault::new(vault_root),
        }
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }
}
