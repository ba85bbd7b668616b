use std::path::PathBuf;

use schematic::Config;

/// The environment variable that overrides the storage directory.
pub const STORAGE_DIR_ENV: &str = "THINKCHAT_STORAGE_DIR";

/// Where and when conversations are stored.
#[derive(Debug, Clone, PartialEq, Config)]
#[config(rename_all = "snake_case")]
pub struct StorageConfig {
    /// The directory holding the conversation files.
    #[setting(default = "conversation_history", env = "THINKCHAT_STORAGE_DIR")]
    pub dir: String,

    /// Save the conversation after every turn.
    #[setting(default = true)]
    pub autosave: bool,
}

impl StorageConfig {
    #[must_use]
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.dir)
    }
}
