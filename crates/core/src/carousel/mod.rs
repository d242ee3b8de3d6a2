//! Horizontal project carousel: drag-to-scroll, active-card tracking and
//! arrow navigation with wraparound.

mod active;
mod controller;
mod drag;
pub mod frame;

pub use active::{RailLayout, nearest_to_center};
pub use controller::{Card, CarouselController, NavStep, wrap_index};
pub use drag::{DragSession, DragState, PointerInput};
pub use frame::FrameCoalescer;
