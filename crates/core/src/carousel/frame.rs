/// Collapses bursts of triggers into a single animation-frame callback.
///
/// At most one frame is pending at a time. Scheduling while a frame is
/// pending cancels it and hands out a fresh id, so a callback that fires
/// with a stale id is simply ignored.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    next_id: u64,
    pending: Option<u64>,
}

/// Outcome of [`FrameCoalescer::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub id: u64,
    pub cancelled: Option<u64>,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self) -> Scheduled {
        let cancelled = self.pending.take();
        self.next_id += 1;
        self.pending = Some(self.next_id);
        Scheduled {
            id: self.next_id,
            cancelled,
        }
    }

    /// Consume the pending frame if `id` is it.
    pub fn fire(&mut self, id: u64) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) -> Option<u64> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }
}
