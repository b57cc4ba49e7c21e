//! palmpaint - land-use grid painting for PALM static drivers

pub mod core;
pub mod tool;
pub mod grid;
pub mod brush;
pub mod history;
pub mod codec;
pub mod report;
