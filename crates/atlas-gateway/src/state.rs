use atlas_core::{CountryRepository, Mirror};
use std::path::PathBuf;
use std::sync::Arc;

/// Shared handler state: the refresh pipeline, the repository, and where
/// the summary card lives on disk.
#[derive(Clone)]
pub struct AppState {
    pub mirror: Arc<dyn Mirror>,
    pub repository: Arc<dyn CountryRepository>,
    pub image_path: PathBuf,
}

impl AppState {
    pub fn new(
        mirror: Arc<dyn Mirror>,
        repository: Arc<dyn CountryRepository>,
        image_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mirror,
            repository,
            image_path: image_path.into(),
        }
    }
}
