//! Headless state machines behind the folio portfolio page.
//!
//! Every operation consumes plain input facts (pointer coordinates, measured
//! rectangles, key names) and returns a list of
//! [`HostCommand`](folio_protocol::HostCommand)s for the page host to apply.

pub mod carousel;
pub mod config;
pub mod page;

pub use carousel::{CarouselController, NavStep, PointerInput, RailLayout};
pub use config::{ConfigError, PageConfig};
