//! Interactive layout editing
//!
//! Field positions live in a [`FieldPositionStore`]; drags and resizes are
//! short-lived sessions that only touch the store when they finish. The
//! [`EditorContext`] ties them together for one open template.

mod background;
mod context;
mod drag;
mod history;
mod resize;
mod snap;
mod store;

pub use background::*;
pub use context::*;
pub use drag::*;
pub use history::*;
pub use resize::*;
pub use snap::*;
pub use store::*;
