use folio_protocol::{HostCommand, Point, Rect};

/// Translation for the hero decoration given the pointer position inside
/// `viewport`. Each axis ranges over `[-strength/2, strength/2]`, zero at
/// the center.
pub fn offset(pointer: Point, viewport: Rect, strength: f64) -> Point {
    if viewport.is_degenerate() {
        return Point::default();
    }
    let nx = (pointer.x - viewport.x) / viewport.w - 0.5;
    let ny = (pointer.y - viewport.y) / viewport.h - 0.5;
    Point::new(nx * strength, ny * strength)
}

pub fn on_pointer_move(pointer: Point, viewport: Rect, strength: f64) -> HostCommand {
    HostCommand::SetParallax {
        offset: offset(pointer, viewport, strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_at_rest() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(offset(Point::new(400.0, 300.0), viewport, 24.0), Point::new(0.0, 0.0));
    }

    #[test]
    fn corners_reach_half_strength() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(offset(Point::new(0.0, 600.0), viewport, 24.0), Point::new(-12.0, 12.0));
    }

    #[test]
    fn zero_sized_viewport_does_not_move() {
        let cmd = on_pointer_move(Point::new(5.0, 5.0), Rect::default(), 24.0);
        assert_eq!(
            cmd,
            HostCommand::SetParallax {
                offset: Point::default()
            }
        );
    }
}
