use folio_protocol::{HostCommand, ScrollBehavior};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::active::{RailLayout, nearest_to_center};
use super::drag::{DragState, PointerInput};
use super::frame::FrameCoalescer;
use crate::config::CarouselConfig;

/// A card in the rail. Geometry is never stored here; it is re-measured by
/// the host and passed in as a [`RailLayout`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Id of the detail section the card opens.
    pub target: Option<String>,
}

impl Card {
    pub fn new(target: Option<String>) -> Self {
        Self { target }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStep {
    Prev,
    Next,
}

impl NavStep {
    pub fn delta(self) -> i64 {
        match self {
            Self::Prev => -1,
            Self::Next => 1,
        }
    }
}

/// Index reached by stepping from `current` in a circular rail of `len`
/// cards. `None` for an empty rail.
pub fn wrap_index(current: usize, step: NavStep, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let next = (current as i64 + step.delta()).rem_euclid(len);
    Some(next as usize)
}

/// State behind one carousel rail.
///
/// Owns the drag session, the current index and the pending scroll-driven
/// recompute. Every operation returns the commands the host must apply.
#[derive(Debug)]
pub struct CarouselController {
    cards: Vec<Card>,
    config: CarouselConfig,
    current_index: usize,
    drag: DragState,
    frames: FrameCoalescer,
    /// Set when a drag traveled past the click slop; the next card click is
    /// the tail of that gesture.
    swallow_click: bool,
    /// Card under the last pointer-down. Pointer capture retargets the
    /// following click to the rail, so the card is remembered here.
    pressed_card: Option<usize>,
}

impl CarouselController {
    pub fn new(cards: Vec<Card>, config: CarouselConfig) -> Self {
        Self {
            cards,
            config,
            current_index: 0,
            drag: DragState::Idle,
            frames: FrameCoalescer::new(),
            swallow_click: false,
            pressed_card: None,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Pointer-down on the rail.
    pub fn begin_drag(&mut self, pointer: &PointerInput, scroll_offset: f64) -> Vec<HostCommand> {
        self.swallow_click = false;
        self.pressed_card = pointer.card;
        if pointer.from_interactive {
            return Vec::new();
        }
        if !self.drag.begin(pointer, scroll_offset) {
            return Vec::new();
        }
        debug!(
            pointer_id = pointer.pointer_id,
            x = pointer.x,
            scroll_offset,
            "carousel drag started"
        );
        vec![
            HostCommand::CapturePointer {
                pointer_id: pointer.pointer_id,
            },
            HostCommand::SetRailDragging { dragging: true },
        ]
    }

    /// Pointer-move on the rail.
    pub fn continue_drag(&mut self, pointer: &PointerInput) -> Vec<HostCommand> {
        match self.drag.track(pointer) {
            Some(offset) => vec![HostCommand::SetRailScroll { offset }],
            None => Vec::new(),
        }
    }

    /// Pointer-up, pointer-cancel and pointer-leave all end here. Safe to
    /// call with no open session.
    pub fn end_drag(&mut self, pointer_id: i32) -> Vec<HostCommand> {
        let Some(session) = self.drag.end(pointer_id) else {
            return Vec::new();
        };
        self.swallow_click = session.max_travel > self.config.drag_click_slop;
        debug!(
            pointer_id,
            travel = session.max_travel,
            "carousel drag ended"
        );
        vec![
            HostCommand::ReleasePointerCapture { pointer_id },
            HostCommand::SetRailDragging { dragging: false },
        ]
    }

    /// Mark the card nearest the rail center as active and every other card
    /// as inactive.
    pub fn recompute_active_card(&mut self, layout: &RailLayout) -> Vec<HostCommand> {
        let count = self.cards.len().min(layout.cards.len());
        if count == 0 {
            return Vec::new();
        }
        let measured = RailLayout::new(layout.viewport, layout.cards[..count].to_vec());
        let Some(index) = nearest_to_center(&measured) else {
            return Vec::new();
        };

        if index != self.current_index {
            trace!(from = self.current_index, to = index, "active card changed");
        }
        self.current_index = index;

        (0..self.cards.len())
            .map(|i| HostCommand::SetCardActive {
                index: i,
                active: i == index,
            })
            .collect()
    }

    /// Scroll event: defer the recompute to the next animation frame,
    /// replacing any frame already requested.
    pub fn on_scroll(&mut self) -> Vec<HostCommand> {
        let scheduled = self.frames.schedule();
        let mut commands = Vec::with_capacity(2);
        if let Some(id) = scheduled.cancelled {
            commands.push(HostCommand::CancelFrame { id });
        }
        commands.push(HostCommand::RequestFrame { id: scheduled.id });
        commands
    }

    /// Animation-frame callback for a frame requested by [`Self::on_scroll`].
    /// Stale frames do nothing.
    pub fn on_frame(&mut self, id: u64, layout: &RailLayout) -> Vec<HostCommand> {
        if !self.frames.fire(id) {
            return Vec::new();
        }
        self.recompute_active_card(layout)
    }

    pub fn on_resize(&mut self, layout: &RailLayout) -> Vec<HostCommand> {
        self.recompute_active_card(layout)
    }

    /// Arrow navigation with wraparound. The index is updated immediately;
    /// the next scroll-driven recompute has the final say.
    pub fn navigate(&mut self, step: NavStep) -> Vec<HostCommand> {
        let Some(index) = wrap_index(self.current_index, step, self.cards.len()) else {
            return Vec::new();
        };
        debug!(from = self.current_index, to = index, ?step, "carousel navigate");
        self.current_index = index;
        let behavior = if self.config.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        vec![HostCommand::CenterCard { index, behavior }]
    }

    /// Click on a card body.
    pub fn card_clicked(&mut self, index: usize, from_interactive: bool) -> Vec<HostCommand> {
        if from_interactive {
            return Vec::new();
        }
        if std::mem::take(&mut self.swallow_click) {
            trace!(index, "click after drag swallowed");
            return Vec::new();
        }
        match self.cards.get(index).and_then(|card| card.target.as_deref()) {
            Some(id) if !id.is_empty() => vec![HostCommand::ScrollToSection { id: id.to_string() }],
            _ => Vec::new(),
        }
    }

    /// Click delivered to the rail itself. Resolves to the card that was
    /// under the preceding pointer-down.
    pub fn rail_clicked(&mut self, from_interactive: bool) -> Vec<HostCommand> {
        match self.pressed_card.take() {
            Some(index) => self.card_clicked(index, from_interactive),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_protocol::Rect;
    use proptest::prelude::*;

    fn controller(count: usize) -> CarouselController {
        let cards = (0..count)
            .map(|i| Card::new(Some(format!("project-{i}"))))
            .collect();
        CarouselController::new(cards, CarouselConfig::default())
    }

    fn layout(count: usize, scroll: f64) -> RailLayout {
        RailLayout::new(
            Rect::new(0.0, 0.0, 300.0, 200.0),
            (0..count)
                .map(|i| Rect::new(i as f64 * 120.0 - scroll, 0.0, 100.0, 200.0))
                .collect(),
        )
    }

    fn active_indices(commands: &[HostCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|c| match c {
                HostCommand::SetCardActive {
                    index,
                    active: true,
                } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn drag_moves_scroll_against_pointer() {
        let mut c = controller(3);
        let commands = c.begin_drag(&PointerInput::new(1, 300.0), 100.0);
        assert_eq!(
            commands,
            vec![
                HostCommand::CapturePointer { pointer_id: 1 },
                HostCommand::SetRailDragging { dragging: true },
            ]
        );
        assert!(c.is_dragging());

        let commands = c.continue_drag(&PointerInput::new(1, 280.0));
        assert_eq!(commands, vec![HostCommand::SetRailScroll { offset: 120.0 }]);
    }

    #[test]
    fn pointer_down_on_link_does_not_drag() {
        let mut c = controller(3);
        assert!(c.begin_drag(&PointerInput::new(1, 10.0).interactive(), 0.0).is_empty());
        assert!(!c.is_dragging());
        assert!(c.continue_drag(&PointerInput::new(1, 50.0)).is_empty());
    }

    #[test]
    fn move_without_session_is_noop() {
        let mut c = controller(3);
        assert!(c.continue_drag(&PointerInput::new(1, 50.0)).is_empty());
    }

    #[test]
    fn end_drag_twice_is_harmless() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(4, 0.0), 0.0);
        let first = c.end_drag(4);
        assert_eq!(
            first,
            vec![
                HostCommand::ReleasePointerCapture { pointer_id: 4 },
                HostCommand::SetRailDragging { dragging: false },
            ]
        );
        assert!(!c.is_dragging());
        assert!(c.end_drag(4).is_empty());
        assert!(!c.is_dragging());
    }

    #[test]
    fn recompute_marks_exactly_one_active() {
        let mut c = controller(5);
        let commands = c.recompute_active_card(&layout(5, 240.0));
        assert_eq!(commands.len(), 5);
        assert_eq!(active_indices(&commands), vec![3]);
        assert_eq!(c.current_index(), 3);
    }

    #[test]
    fn empty_rail_ignores_resize_and_navigation() {
        let mut c = controller(0);
        assert!(c.on_resize(&RailLayout::default()).is_empty());
        assert!(c.navigate(NavStep::Next).is_empty());
        assert!(c.navigate(NavStep::Prev).is_empty());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn navigate_wraps_both_ways() {
        let mut c = controller(5);
        assert_eq!(
            c.navigate(NavStep::Prev),
            vec![HostCommand::CenterCard {
                index: 4,
                behavior: ScrollBehavior::Smooth
            }]
        );
        assert_eq!(c.current_index(), 4);
        c.navigate(NavStep::Next);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn instant_navigation_when_smoothing_disabled() {
        let config = CarouselConfig {
            smooth: false,
            ..CarouselConfig::default()
        };
        let mut c = CarouselController::new(vec![Card::default(); 2], config);
        assert_eq!(
            c.navigate(NavStep::Next),
            vec![HostCommand::CenterCard {
                index: 1,
                behavior: ScrollBehavior::Instant
            }]
        );
    }

    #[test]
    fn scroll_recompute_overrides_optimistic_index() {
        let mut c = controller(5);
        c.navigate(NavStep::Next);
        assert_eq!(c.current_index(), 1);
        // Smooth scroll was interrupted before reaching card 1.
        c.recompute_active_card(&layout(5, -200.0));
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn burst_of_scrolls_recomputes_once() {
        let mut c = controller(5);
        let mut requested = Vec::new();
        let mut cancelled = Vec::new();
        for _ in 0..4 {
            for command in c.on_scroll() {
                match command {
                    HostCommand::RequestFrame { id } => requested.push(id),
                    HostCommand::CancelFrame { id } => cancelled.push(id),
                    other => panic!("unexpected command {other:?}"),
                }
            }
        }
        assert_eq!(requested.len(), 4);
        assert_eq!(cancelled, requested[..3].to_vec());

        let recomputes = requested
            .iter()
            .filter(|&&id| !c.on_frame(id, &layout(5, 0.0)).is_empty())
            .count();
        assert_eq!(recomputes, 1);
    }

    #[test]
    fn card_click_opens_target_section() {
        let mut c = controller(3);
        assert_eq!(
            c.card_clicked(2, false),
            vec![HostCommand::ScrollToSection {
                id: "project-2".into()
            }]
        );
        assert!(c.card_clicked(2, true).is_empty());
        assert!(c.card_clicked(9, false).is_empty());
    }

    #[test]
    fn card_without_target_is_inert() {
        let mut c = CarouselController::new(vec![Card::default()], CarouselConfig::default());
        assert!(c.card_clicked(0, false).is_empty());
    }

    #[test]
    fn click_ending_a_long_drag_is_swallowed_once() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(1, 200.0), 0.0);
        c.continue_drag(&PointerInput::new(1, 120.0));
        c.end_drag(1);
        assert!(c.card_clicked(1, false).is_empty());
        assert_eq!(c.card_clicked(1, false).len(), 1);
    }

    #[test]
    fn short_drag_still_clicks() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(1, 200.0), 0.0);
        c.continue_drag(&PointerInput::new(1, 198.0));
        c.end_drag(1);
        assert_eq!(c.card_clicked(1, false).len(), 1);
    }

    #[test]
    fn tap_on_card_opens_section_through_rail_click() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(1, 150.0).on_card(2), 0.0);
        c.end_drag(1);
        assert_eq!(
            c.rail_clicked(false),
            vec![HostCommand::ScrollToSection {
                id: "project-2".into()
            }]
        );
        assert!(c.rail_clicked(false).is_empty());
    }

    #[test]
    fn rail_click_without_pressed_card_is_inert() {
        let mut c = controller(3);
        assert!(c.rail_clicked(false).is_empty());
        c.begin_drag(&PointerInput::new(1, 150.0), 0.0);
        c.end_drag(1);
        assert!(c.rail_clicked(false).is_empty());
    }

    #[test]
    fn rail_click_after_long_drag_is_swallowed() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(1, 200.0).on_card(1), 0.0);
        c.continue_drag(&PointerInput::new(1, 100.0));
        c.end_drag(1);
        assert!(c.rail_clicked(false).is_empty());
    }

    #[test]
    fn rail_click_on_link_inside_card_is_left_to_the_link() {
        let mut c = controller(3);
        c.begin_drag(&PointerInput::new(1, 150.0).interactive().on_card(0), 0.0);
        assert!(c.rail_clicked(true).is_empty());
    }

    proptest! {
        #[test]
        fn wrap_stays_in_range(current in 0usize..64, len in 1usize..64, next in any::<bool>()) {
            let current = current % len;
            let step = if next { NavStep::Next } else { NavStep::Prev };
            let index = wrap_index(current, step, len).unwrap();
            prop_assert!(index < len);
            let back = if next { NavStep::Prev } else { NavStep::Next };
            prop_assert_eq!(wrap_index(index, back, len), Some(current));
        }
    }
}
