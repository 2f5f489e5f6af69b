pub mod constants;
pub mod editor;
#[cfg(feature = "serde")]
mod json_store;
mod options;
pub mod ports;
pub mod render;
mod resolve;
mod types;
pub mod units;

pub use editor::{EditorContext, GestureOutcome, PointerPos};
#[cfg(feature = "serde")]
pub use json_store::JsonTemplateStore;
pub use options::*;
pub use ports::*;
pub use render::{PrintField, PrintJob, Projection};
pub use resolve::*;
pub use types::*;
pub use units::RenderScale;
