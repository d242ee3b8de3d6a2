use folio_protocol::Rect;
use serde::{Deserialize, Serialize};

/// Measured geometry of a rail and its cards, all in the same coordinate
/// space (client coordinates in the browser).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RailLayout {
    pub viewport: Rect,
    pub cards: Vec<Rect>,
}

impl RailLayout {
    pub fn new(viewport: Rect, cards: Vec<Rect>) -> Self {
        Self { viewport, cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Index of the card whose horizontal center is closest to the rail's
/// horizontal center. Ties resolve to the lowest index. Cards whose distance
/// cannot be computed (NaN geometry) are skipped.
pub fn nearest_to_center(layout: &RailLayout) -> Option<usize> {
    let center = layout.viewport.center_x();
    let mut best: Option<(usize, f64)> = None;

    for (index, card) in layout.cards.iter().enumerate() {
        let distance = (card.center_x() - center).abs();
        if distance.is_nan() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Cards of width 100 laid out with a 20px gap, rail shifted by `scroll`.
    fn strip(count: usize, scroll: f64) -> RailLayout {
        let cards = (0..count)
            .map(|i| Rect::new(i as f64 * 120.0 - scroll, 0.0, 100.0, 200.0))
            .collect();
        RailLayout::new(Rect::new(0.0, 0.0, 300.0, 200.0), cards)
    }

    #[test]
    fn picks_card_under_rail_center() {
        // Rail center is 150; card 1 spans 120..220 (center 170).
        assert_eq!(nearest_to_center(&strip(5, 0.0)), Some(1));
        // Scrolling by 240 puts card 3 at 120..220.
        assert_eq!(nearest_to_center(&strip(5, 240.0)), Some(3));
    }

    #[test]
    fn tie_resolves_to_lowest_index() {
        let layout = RailLayout::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            vec![
                Rect::new(50.0, 0.0, 20.0, 100.0),
                Rect::new(130.0, 0.0, 20.0, 100.0),
            ],
        );
        // Both centers sit 40px from the rail center at 100.
        assert_eq!(nearest_to_center(&layout), Some(0));
    }

    #[test]
    fn empty_layout_has_no_nearest() {
        assert_eq!(nearest_to_center(&RailLayout::default()), None);
    }

    #[test]
    fn nan_cards_are_skipped() {
        let layout = RailLayout::new(
            Rect::new(0.0, 0.0, 200.0, 100.0),
            vec![
                Rect::new(f64::NAN, 0.0, 20.0, 100.0),
                Rect::new(500.0, 0.0, 20.0, 100.0),
            ],
        );
        assert_eq!(nearest_to_center(&layout), Some(1));
    }

    proptest! {
        #[test]
        fn nearest_has_minimal_distance(
            xs in prop::collection::vec(-2000.0f64..2000.0, 1..24),
            rail_x in -500.0f64..500.0,
        ) {
            let layout = RailLayout::new(
                Rect::new(rail_x, 0.0, 320.0, 100.0),
                xs.iter().map(|&x| Rect::new(x, 0.0, 80.0, 100.0)).collect(),
            );
            let picked = nearest_to_center(&layout).unwrap();
            let center = layout.viewport.center_x();
            let picked_distance = (layout.cards[picked].center_x() - center).abs();
            for (i, card) in layout.cards.iter().enumerate() {
                let d = (card.center_x() - center).abs();
                prop_assert!(picked_distance <= d);
                if i < picked {
                    prop_assert!(d > picked_distance);
                }
            }
        }
    }
}
