//! Widgets

mod circle;
mod text_block;

pub use circle::{fitted_radius, Circle, MAX_SCALE};
pub use text_block::TextBlock;
