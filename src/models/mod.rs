pub mod analysis;
pub mod chat;
pub mod image;
pub mod room;

pub use analysis::*;
pub use chat::*;
pub use image::*;
pub use room::*;
