use std::sync::Arc;

use ferry_drive::DriveAdapter;

/// Shared state behind the drive routes
#[derive(Clone)]
pub struct DriveState {
    pub adapter: Arc<DriveAdapter>,
}

impl DriveState {
    pub fn new(adapter: DriveAdapter) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }

    pub fn from_shared(adapter: Arc<DriveAdapter>) -> Self {
        Self { adapter }
    }
}
