//! Brush system: cell footprints and the paint session that applies tools.

pub mod footprint;
pub mod session;

// Re-exports
pub use footprint::{affected_cells, Brush};
pub use session::PaintSession;
