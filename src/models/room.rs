use serde::{Deserialize, Serialize};

use super::{AnalysisResult, GeneratedImage, RoomSuggestion};

/// Inbound body of `POST /analyze-room`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRoomRequest {
    #[serde(rename = "imageBase64", default)]
    pub image_base64: Option<String>,
}

impl AnalyzeRoomRequest {
    pub fn new(image_base64: impl Into<String>) -> Self {
        Self {
            image_base64: Some(image_base64.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRoomResponse {
    pub current_layout: String,
    pub suggestions: Vec<RoomSuggestion>,
    pub generated_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

impl AnalyzeRoomResponse {
    pub fn new(analysis: AnalysisResult, image: GeneratedImage) -> Self {
        Self {
            current_layout: analysis.current_layout,
            suggestions: analysis.suggestions,
            generated_image: image.image_url,
            image_error: image.error,
        }
    }

    /// Analysis succeeded but the visualization did not.
    pub fn is_degraded(&self) -> bool {
        self.image_error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
