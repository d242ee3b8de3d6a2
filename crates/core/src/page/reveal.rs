use folio_protocol::HostCommand;
use tracing::trace;

/// One intersection report for an observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    pub index: usize,
    pub is_intersecting: bool,
    /// Visible fraction of the element's area.
    pub ratio: f64,
}

/// One-shot reveal bookkeeping for a fixed set of observed elements.
///
/// The ratio is measured against the element's own area, so an element
/// taller than `1 / threshold` viewports can never reach the threshold and
/// stays hidden. Keep reveal targets shorter than that, or lower
/// `reveal_threshold` for pages with tall sections.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; count],
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn pending(&self) -> usize {
        self.revealed.iter().filter(|r| !**r).count()
    }

    pub fn on_intersection(&mut self, entries: &[VisibilityEntry]) -> Vec<HostCommand> {
        let mut commands = Vec::new();
        for entry in entries {
            if !entry.is_intersecting || entry.ratio < self.threshold {
                continue;
            }
            let Some(revealed) = self.revealed.get_mut(entry.index) else {
                continue;
            };
            if *revealed {
                continue;
            }
            *revealed = true;
            trace!(index = entry.index, ratio = entry.ratio, "element revealed");
            commands.push(HostCommand::MarkRevealed { index: entry.index });
            commands.push(HostCommand::StopObserving { index: entry.index });
        }
        commands
    }
}
