//! Peripheral page behaviours. Each is independent of the others and of the
//! carousel.

pub mod anchor;
pub mod email;
pub mod overlay;
pub mod parallax;
pub mod reveal;
pub mod timeline;

pub use email::EmailToggle;
pub use overlay::{DetailOverlay, ProjectDetails};
pub use reveal::{RevealTracker, VisibilityEntry};
