/// Configuration for drive operations.
///
/// Injected into [`DriveAdapter`](crate::DriveAdapter) at construction —
/// there is no module-level state.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Parent folder that receives uploads and scopes name lookups
    pub folder_id: String,
}

impl DriveConfig {
    /// Create a config targeting `folder_id`
    pub fn new<S: Into<String>>(folder_id: S) -> Self {
        Self {
            folder_id: folder_id.into(),
        }
    }

    /// Set the target folder
    pub fn with_folder_id<S: Into<String>>(mut self, folder_id: S) -> Self {
        self.folder_id = folder_id.into();
        self
    }
}
