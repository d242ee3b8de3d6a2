/// A pointer event reduced to what the carousel needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub pointer_id: i32,
    /// Horizontal client coordinate.
    pub x: f64,
    /// The event originated on a link or button inside the rail.
    pub from_interactive: bool,
    /// Index of the card under the pointer, if any.
    pub card: Option<usize>,
}

impl PointerInput {
    pub fn new(pointer_id: i32, x: f64) -> Self {
        Self {
            pointer_id,
            x,
            from_interactive: false,
            card: None,
        }
    }

    pub fn on_card(mut self, index: usize) -> Self {
        self.card = Some(index);
        self
    }

    pub fn interactive(mut self) -> Self {
        self.from_interactive = true;
        self
    }
}

/// An in-progress pointer-driven scroll gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: i32,
    pub start_x: f64,
    pub start_scroll: f64,
    /// Farthest horizontal distance from `start_x` seen so far.
    pub max_travel: f64,
}

impl DragSession {
    /// Scroll offset for a pointer at `x`. Moving the pointer right reveals
    /// content to the left, so the offset shrinks.
    pub fn scroll_for(&self, x: f64) -> f64 {
        self.start_scroll - (x - self.start_x)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Open a session unless one is already open.
    pub(crate) fn begin(&mut self, pointer: &PointerInput, scroll_offset: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        *self = Self::Dragging(DragSession {
            pointer_id: pointer.pointer_id,
            start_x: pointer.x,
            start_scroll: scroll_offset,
            max_travel: 0.0,
        });
        true
    }

    /// New scroll offset for a move of the session's own pointer.
    pub(crate) fn track(&mut self, pointer: &PointerInput) -> Option<f64> {
        let Self::Dragging(session) = self else {
            return None;
        };
        if session.pointer_id != pointer.pointer_id {
            return None;
        }
        session.max_travel = session.max_travel.max((pointer.x - session.start_x).abs());
        Some(session.scroll_for(pointer.x))
    }

    /// Close the session owned by `pointer_id`, returning it.
    pub(crate) fn end(&mut self, pointer_id: i32) -> Option<DragSession> {
        match *self {
            Self::Dragging(session) if session.pointer_id == pointer_id => {
                *self = Self::Idle;
                Some(session)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_follows_inverted_pointer_delta() {
        let mut state = DragState::default();
        assert!(state.begin(&PointerInput::new(1, 300.0), 100.0));
        assert_eq!(state.track(&PointerInput::new(1, 280.0)), Some(120.0));
        assert_eq!(state.track(&PointerInput::new(1, 350.0)), Some(50.0));
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut state = DragState::default();
        state.begin(&PointerInput::new(1, 0.0), 0.0);
        assert!(!state.begin(&PointerInput::new(2, 0.0), 0.0));
        assert_eq!(state.track(&PointerInput::new(2, 40.0)), None);
        assert_eq!(state.end(2), None);
        assert!(state.is_dragging());
    }

    #[test]
    fn travel_tracks_farthest_excursion() {
        let mut state = DragState::default();
        state.begin(&PointerInput::new(7, 100.0), 0.0);
        state.track(&PointerInput::new(7, 60.0));
        state.track(&PointerInput::new(7, 95.0));
        let session = state.end(7).unwrap();
        assert!((session.max_travel - 40.0).abs() < f64::EPSILON);
        assert_eq!(state, DragState::Idle);
    }
}
