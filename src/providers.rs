use async_trait::async_trait;

use crate::{
    error::Result,
    models::{AnalysisResult, GeneratedImage},
};

/// Turns a room photo into a structured critique.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisionCritiqueProvider: Send + Sync {
    /// Fails when the provider cannot be called at all (e.g. no credential).
    fn check_configured(&self) -> Result<()>;

    /// `image` is a data URI or a remote URL.
    async fn critique(&self, image: &str) -> Result<AnalysisResult>;
}

/// Renders a redesigned room from a text prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerationProvider: Send + Sync {
    fn check_configured(&self) -> Result<()>;

    /// `Ok` with no URL means the model answered without a picture.
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage>;
}
