use clap::Parser;
use std::path::PathBuf;

/// MCP server for note search, backlinks and link graphs over a markdown vault.
#[derive(Debug, Clone, Parser)]
#[command(name = "vault-weaver", version, about)]
pub struct Config {
    /// Absolute path of the vault root directory.
    #[arg(long, env = "OBSIDIAN_VAULT_PATH")]
    pub vault_path: PathBuf,
}
