//! Force-layout adapter and canvas renderer for the filtered network view.

mod component;
mod render;
mod state;

pub use component::{NetworkCanvas, TooltipInfo};
pub use state::ZoomCommand;
