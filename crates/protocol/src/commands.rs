use serde::{Deserialize, Serialize};

use crate::types::Point;

/// A single, stateless instruction for the page host.
///
/// Core state machines return a `Vec<HostCommand>` from every operation.
/// The host applies them in order; each command carries all the data it
/// needs and refers to elements only by index or section id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostCommand {
    /// Set the rail's horizontal scroll offset immediately.
    SetRailScroll { offset: f64 },

    /// Toggle the rail's "dragging" presentation class.
    SetRailDragging { dragging: bool },

    /// Route all further events of this pointer to the rail.
    CapturePointer { pointer_id: i32 },

    /// Release a previously captured pointer. Hosts must tolerate a pointer
    /// that is no longer captured.
    ReleasePointerCapture { pointer_id: i32 },

    /// Mark or unmark a card as the active one.
    SetCardActive { index: usize, active: bool },

    /// Scroll the rail so the card sits at its horizontal center.
    CenterCard {
        index: usize,
        behavior: ScrollBehavior,
    },

    /// Ask for a callback on the next animation frame, tagged with `id`.
    RequestFrame { id: u64 },

    /// Drop a previously requested frame callback.
    CancelFrame { id: u64 },

    /// Scroll the page so the section's top edge is in view. A missing
    /// section is ignored.
    ScrollToSection { id: String },

    /// Fill the detail overlay.
    SetOverlayContent {
        title: String,
        summary: String,
        href: String,
    },

    ShowOverlay,

    HideOverlay,

    /// Move keyboard focus to the overlay's confirm link.
    FocusOverlayConfirm,

    /// Permanently mark an observed element as revealed.
    MarkRevealed { index: usize },

    /// Stop observing an element for visibility.
    StopObserving { index: usize },

    /// Translate the parallax decoration.
    SetParallax { offset: Point },

    /// Replace the email slot's text.
    SetEmailText { text: String, revealed: bool },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}
