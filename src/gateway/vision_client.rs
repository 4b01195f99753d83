use async_trait::async_trait;

use super::ChatTransport;
use crate::{
    error::{Result, RoomGenError},
    models::{AnalysisResult, ChatCompletionRequest, ChatMessage},
    parser::parse_analysis,
    prompts::{CRITIQUE_SYSTEM_PROMPT, CRITIQUE_USER_PROMPT},
    providers::VisionCritiqueProvider,
};

const CONTEXT: &str = "Analysis";

#[derive(Clone)]
pub struct VisionClient {
    transport: ChatTransport,
    model_id: String,
}

impl VisionClient {
    pub fn new(transport: ChatTransport, model_id: impl Into<String>) -> Self {
        Self {
            transport,
            model_id: model_id.into(),
        }
    }

    pub fn build_request(&self, image: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model_id.clone(),
            messages: vec![
                ChatMessage::system(CRITIQUE_SYSTEM_PROMPT),
                ChatMessage::user_with_image(CRITIQUE_USER_PROMPT, image),
            ],
            modalities: None,
        }
    }
}

#[async_trait]
impl VisionCritiqueProvider for VisionClient {
    fn check_configured(&self) -> Result<()> {
        self.transport.check_configured()
    }

    async fn critique(&self, image: &str) -> Result<AnalysisResult> {
        let request = self.build_request(image);
        let response = self.transport.complete(&request, CONTEXT).await?;

        let content = response.first_content().ok_or_else(|| {
            RoomGenError::ResponseError("Analysis response contained no content".into())
        })?;

        parse_analysis(content)
    }
}
