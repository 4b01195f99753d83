//! Prompt text sent to the gateway.

/// Constrains the vision model to the JSON document `parser::parse_analysis` expects.
pub const CRITIQUE_SYSTEM_PROMPT: &str = r#"You are an experienced interior designer. Study the room in the photo and produce:
1. A detailed description of the furniture currently in the room and how it is arranged.
2. Four creative redesign suggestions, each with concrete furniture placement and decoration ideas.
3. A detailed prompt that an image model could use to render the improved room.

Reply with JSON only, in exactly this shape:
{
  "currentLayout": "description of the room as it is today",
  "suggestions": [
    {
      "title": "Short suggestion title",
      "description": "Detailed description of the arrangement",
      "icon": "sparkles|lightbulb|palette|layout"
    }
  ],
  "imagePrompt": "A detailed prompt for rendering the redesigned room"
}"#;

pub const CRITIQUE_USER_PROMPT: &str = "Analyze this room and suggest furniture arrangements and decoration. \
Focus on practical changes that make the space more functional and more pleasant to look at.";

/// Wraps the model-authored prompt in fixed photographic styling.
pub fn visualization_prompt(image_prompt: &str) -> String {
    format!(
        "Create a beautiful, professional interior design photograph of: {}.\n\n\
         The image must be photorealistic and well-lit, following modern interior design principles. \
         Frame the room from an angle a real estate or interior design photographer would choose. \
         Make it warm, inviting and aspirational. Ultra high resolution.",
        image_prompt.trim().trim_end_matches('.')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_every_field() {
        for field in ["currentLayout", "suggestions", "imagePrompt", "title", "description", "icon"] {
            assert!(CRITIQUE_SYSTEM_PROMPT.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn test_visualization_prompt_wraps_model_prompt() {
        let prompt = visualization_prompt("  a bright Scandinavian living room with oak floors. ");
        assert!(prompt.contains("of: a bright Scandinavian living room with oak floors."));
        assert!(prompt.contains("photorealistic"));
        assert!(prompt.contains("well-lit"));
        assert!(prompt.contains("real estate"));
        assert!(prompt.contains("Ultra high resolution"));
    }
}
