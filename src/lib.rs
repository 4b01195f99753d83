pub mod analyzer;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod providers;
pub mod server;
pub mod validation;

pub use analyzer::{AnalysisStage, RoomAnalyzer, IMAGE_ADVISORY};
pub use config::{Config, GatewayConfig};
pub use error::{Result, RoomGenError};
pub use gateway::{GatewayClient, ImageClient, VisionClient};
pub use models::*;
pub use parser::{parse_analysis, strip_code_fence};
pub use providers::{ImageGenerationProvider, VisionCritiqueProvider};
