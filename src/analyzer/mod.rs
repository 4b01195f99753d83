pub mod stage;

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    config::DEFAULT_MAX_IMAGE_BYTES,
    error::{Result, RoomGenError},
    logger,
    models::{AnalyzeRoomRequest, AnalyzeRoomResponse, GeneratedImage},
    providers::{ImageGenerationProvider, VisionCritiqueProvider},
    validation::validate_image_payload,
};

pub use stage::{AnalysisStage, StageTracker};

/// Advisory attached to a response whose visualization phase failed.
pub const IMAGE_ADVISORY: &str = "Could not generate redesign image";

/// Runs the two-phase pipeline: critique the photo, then render a redesign.
///
/// Stateless across requests; a single instance is shared by every worker.
#[derive(Clone)]
pub struct RoomAnalyzer {
    vision: Arc<dyn VisionCritiqueProvider>,
    images: Arc<dyn ImageGenerationProvider>,
    max_image_bytes: usize,
}

impl RoomAnalyzer {
    pub fn new(
        vision: Arc<dyn VisionCritiqueProvider>,
        images: Arc<dyn ImageGenerationProvider>,
    ) -> Self {
        Self {
            vision,
            images,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    pub fn with_max_image_bytes(mut self, max_image_bytes: usize) -> Self {
        self.max_image_bytes = max_image_bytes;
        self
    }

    pub async fn analyze(&self, request: &AnalyzeRoomRequest) -> Result<AnalyzeRoomResponse> {
        let mut stage = StageTracker::new(Uuid::new_v4().to_string());
        let request_id = stage.request_id().to_string();

        if let Err(e) = self.preflight(request) {
            log::error!("[{}] Rejected before analysis: {}", request_id, e);
            stage.advance(AnalysisStage::AnalysisFailed);
            stage.advance(AnalysisStage::Responded);
            return Err(e);
        }
        // preflight guarantees a non-blank payload
        let image = request.image_base64.as_deref().unwrap_or_default().trim();

        log::info!("[{}] Starting room analysis", request_id);
        stage.advance(AnalysisStage::Analyzing);
        let analysis = {
            let _timer = logger::timer("Room analysis");
            self.vision.critique(image).await
        };
        let analysis = match analysis {
            Ok(analysis) => analysis,
            Err(e) => {
                log::error!("[{}] Analysis failed: {}", request_id, e);
                stage.advance(AnalysisStage::AnalysisFailed);
                stage.advance(AnalysisStage::Responded);
                return Err(e);
            }
        };
        stage.advance(AnalysisStage::Analyzed);
        log::info!(
            "[{}] Analysis produced {} suggestions",
            request_id,
            analysis.suggestions.len()
        );

        log::info!("[{}] Generating redesigned room image", request_id);
        stage.advance(AnalysisStage::GeneratingImage);
        let generated = {
            let _timer = logger::timer("Image generation");
            self.images.generate(&analysis.image_prompt).await
        };
        let generated = match generated {
            Ok(image) => {
                stage.advance(AnalysisStage::ImageOk);
                image
            }
            Err(e) => {
                log::warn!(
                    "[{}] Image generation failed, returning analysis only: {}",
                    request_id,
                    e
                );
                stage.advance(AnalysisStage::ImageFailed);
                GeneratedImage::failed(IMAGE_ADVISORY)
            }
        };

        stage.advance(AnalysisStage::Responded);
        Ok(AnalyzeRoomResponse::new(analysis, generated))
    }

    /// Credential and input checks; nothing upstream is touched.
    fn preflight(&self, request: &AnalyzeRoomRequest) -> Result<()> {
        self.vision.check_configured()?;
        self.images.check_configured()?;

        let image = request
            .image_base64
            .as_deref()
            .map(str::trim)
            .filter(|image| !image.is_empty())
            .ok_or_else(|| RoomGenError::input("No image provided"))?;

        let payload = validate_image_payload(image, self.max_image_bytes)?;
        log::debug!("Accepted {}", payload.describe());
        Ok(())
    }
}
