use async_trait::async_trait;

use super::ChatTransport;
use crate::{
    error::Result,
    models::{ChatCompletionRequest, ChatMessage, GeneratedImage, Modality},
    prompts::visualization_prompt,
    providers::ImageGenerationProvider,
};

const CONTEXT: &str = "Image generation";

#[derive(Clone)]
pub struct ImageClient {
    transport: ChatTransport,
    model_id: String,
}

impl ImageClient {
    pub fn new(transport: ChatTransport, model_id: impl Into<String>) -> Self {
        Self {
            transport,
            model_id: model_id.into(),
        }
    }

    pub fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model_id.clone(),
            messages: vec![ChatMessage::user(visualization_prompt(prompt))],
            modalities: Some(vec![Modality::Image, Modality::Text]),
        }
    }
}

#[async_trait]
impl ImageGenerationProvider for ImageClient {
    fn check_configured(&self) -> Result<()> {
        self.transport.check_configured()
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = self.build_request(prompt);
        let response = self.transport.complete(&request, CONTEXT).await?;

        let image_url = response.first_image_url().map(String::from);
        if image_url.is_none() {
            log::warn!("Image generation succeeded but returned no image");
        }

        Ok(GeneratedImage::from_url(image_url))
    }
}
