use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::memory::MemoryError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("screen memory: {0}")]
    Memory(#[from] MemoryError),
}
