use serde::{Deserialize, Serialize};

/// Icon tag rendered next to a suggestion card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SuggestionIcon {
    #[default]
    Sparkles,
    Lightbulb,
    Palette,
    Layout,
}

// Models drift outside the tag set now and then; an odd icon is not worth
// failing the whole analysis over.
impl From<String> for SuggestionIcon {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "lightbulb" => SuggestionIcon::Lightbulb,
            "palette" => SuggestionIcon::Palette,
            "layout" => SuggestionIcon::Layout,
            _ => SuggestionIcon::Sparkles,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSuggestion {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: SuggestionIcon,
}

/// Structured critique returned by the vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub current_layout: String,
    pub suggestions: Vec<RoomSuggestion>,
    /// Feeds the visualization phase; never sent to the client.
    pub image_prompt: String,
}
