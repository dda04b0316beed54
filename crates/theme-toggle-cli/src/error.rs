//! CLI errors.

use theme_toggle::{ConfigError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot determine a storage location; pass --store")]
    NoStoreLocation,

    #[error("the system exposes no color-scheme preference")]
    NoSystemScheme,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("cannot encode report: {0}")]
    Json(#[from] serde_json::Error),
}
