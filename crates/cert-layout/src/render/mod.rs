//! Render projection for templates
//!
//! This module turns millimeter geometry into what the render consumers need:
//! - Pixel rectangles for fields and the background (canvas and preview)
//! - The fixed, zoom-independent print layout

mod print_job;
mod projector;

pub use print_job::*;
pub use projector::*;
