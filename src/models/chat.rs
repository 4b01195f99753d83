//! Wire shapes for the gateway's chat-completion endpoint.
//!
//! Only the fields this service reads or writes are modelled; anything
//! else the gateway sends back is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Image,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// A user turn carrying instructions followed by one image attachment.
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<Modality>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ImageAttachment>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageAttachment {
    pub image_url: ImageUrl,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// `choices[0].message.images[0].image_url.url`
    pub fn first_image_url(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.images.as_ref())
            .and_then(|images| images.first())
            .map(|image| image.image_url.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_with_image_shape() {
        let message = ChatMessage::user_with_image("Look at this", "data:image/png;base64,AAAA");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": "Look at this" },
                    { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                ]
            })
        );
    }

    #[test]
    fn test_modalities_omitted_when_unset() {
        let request = ChatCompletionRequest {
            model: "vision".into(),
            messages: vec![ChatMessage::system("be brief")],
            modalities: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("modalities").is_none());
        assert_eq!(value["messages"][0], json!({ "role": "system", "content": "be brief" }));
    }

    #[test]
    fn test_extracts_content_and_image() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "gen-1",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "Here you go",
                    "images": [{ "type": "image_url", "image_url": { "url": "data:image/png;base64,iVBOR" } }]
                }
            }]
        }))
        .unwrap();
        assert_eq!(response.first_content(), Some("Here you go"));
        assert_eq!(response.first_image_url(), Some("data:image/png;base64,iVBOR"));
    }

    #[test]
    fn test_missing_fields_yield_none() {
        let response: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(response.first_content(), None);
        assert_eq!(response.first_image_url(), None);

        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": null, "images": null } }]
        }))
        .unwrap();
        assert_eq!(response.first_content(), None);
        assert_eq!(response.first_image_url(), None);
    }
}
