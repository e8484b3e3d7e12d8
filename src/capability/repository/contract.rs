use crate::capability::domain::Capability;
use crate::error::ApiError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StoredCapability {
    pub capability: Capability,
    /// File the definition was loaded from
    pub path: PathBuf,
}

pub trait CatalogRepository: Send + Sync {
    /// Every well-formed capability definition, in a stable order.
    fn list(&self) -> Result<Vec<StoredCapability>, ApiError>;
    /// Location the repository reads from, for messages.
    fn root(&self) -> &Path;
}
