use serde::{Deserialize, Serialize};

/// Outcome of the visualization phase. Both fields absent means the
/// gateway answered successfully but returned no picture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_url: Option<String>,
    pub error: Option<String>,
}

impl GeneratedImage {
    pub fn from_url(image_url: Option<String>) -> Self {
        Self {
            image_url,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            image_url: None,
            error: Some(reason.into()),
        }
    }
}
