//! Land-use grid: pixel records and the store that owns them.

pub mod pixel;
pub mod store;

pub use pixel::{DisplayColor, Pixel};
pub use store::{Grid, PixelMap};
