//! Facades over the collaborator providers
//!
//! - `VisionAdapter` - capture, matching, OCR and persistence
//! - `NativeAdapter` - pointer, keyboard and clipboard

pub mod native;
pub mod vision;

pub use native::NativeAdapter;
pub use vision::VisionAdapter;
