pub mod commands;
pub mod types;

pub use commands::{HostCommand, ScrollBehavior};
pub use types::{Point, Rect};
