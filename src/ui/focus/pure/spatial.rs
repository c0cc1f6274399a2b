// Directional neighbour search over host-reported rects
//
// A target lies in a direction when its center is past the source's leading
// edge. Targets sharing a row (Left/Right) or a column (Up/Down) with the source
// rank by the gap between facing edges alone. Any overlap counts as sharing.
// Targets off that row or column also pay for how far off they sit.

use crate::ui::focus::types::NavDirection;

/// Extra cost per unit a target sits outside the source's row or column
const OFF_AXIS_WEIGHT: f32 = 2.0;

/// A rectangle in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Extent along the axis `direction` travels on
    fn main_span(&self, direction: NavDirection) -> (f32, f32) {
        match direction {
            NavDirection::Left | NavDirection::Right => (self.x, self.right()),
            NavDirection::Up | NavDirection::Down => (self.y, self.bottom()),
        }
    }

    fn cross_span(&self, direction: NavDirection) -> (f32, f32) {
        match direction {
            NavDirection::Left | NavDirection::Right => (self.y, self.bottom()),
            NavDirection::Up | NavDirection::Down => (self.x, self.right()),
        }
    }
}

fn midpoint(span: (f32, f32)) -> f32 {
    (span.0 + span.1) / 2.0
}

/// Distance between two spans on one axis; zero when they overlap or touch
fn span_gap(a: (f32, f32), b: (f32, f32)) -> f32 {
    (a.0.max(b.0) - a.1.min(b.1)).max(0.0)
}

/// Ranking key for `target` seen from `source`, lower is nearer.
///
/// The first value is the edge gap plus the weighted off-axis distance. The
/// second is how far the centers drift apart across the axis, used on ties.
/// Returns `None` when `target` does not lie in `direction`.
pub fn spatial_score(source: Rect, target: Rect, direction: NavDirection) -> Option<(f32, f32)> {
    let (lead_lo, lead_hi) = source.main_span(direction);
    let (near, far) = target.main_span(direction);
    let target_mid = midpoint((near, far));

    let gap = if direction.is_forward() {
        if target_mid <= lead_hi {
            return None;
        }
        (near - lead_hi).max(0.0)
    } else {
        if target_mid >= lead_lo {
            return None;
        }
        (lead_lo - far).max(0.0)
    };

    let (source_cross, target_cross) = (source.cross_span(direction), target.cross_span(direction));
    let off_axis = span_gap(source_cross, target_cross);
    let drift = (midpoint(source_cross) - midpoint(target_cross)).abs();
    Some((gap + OFF_AXIS_WEIGHT * off_axis, drift))
}

/// Find the index of the nearest rect in `direction` from `source`.
///
/// Equal scores resolve to the lowest index, so callers passing rects in tree
/// order get a deterministic answer.
pub fn find_nearest_index(source: Rect, targets: &[Rect], direction: NavDirection) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .filter_map(|(idx, target)| spatial_score(source, *target, direction).map(|score| (idx, score)))
        .min_by(|(_, a), (_, b)| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.center(), (60.0, 45.0));
        assert_eq!((rect.right(), rect.bottom()), (110.0, 70.0));
    }

    #[test]
    fn test_overlap_counts_as_aligned() {
        // A shifted row just below beats a straight one further down
        let source = Rect::new(0.0, 0.0, 100.0, 30.0);
        let targets = vec![
            Rect::new(0.0, 80.0, 100.0, 30.0),
            Rect::new(60.0, 40.0, 100.0, 30.0),
        ];
        assert_eq!(find_nearest_index(source, &targets, NavDirection::Down), Some(1));
    }

    #[test]
    fn test_aligned_beats_nearer_off_axis() {
        let source = Rect::new(0.0, 0.0, 50.0, 50.0);
        let targets = vec![
            Rect::new(60.0, 80.0, 50.0, 50.0), // gap 10, 30 below the row
            Rect::new(100.0, 0.0, 50.0, 50.0), // gap 50, same row
        ];
        assert_eq!(spatial_score(source, targets[0], NavDirection::Right), Some((70.0, 80.0)));
        assert_eq!(find_nearest_index(source, &targets, NavDirection::Right), Some(1));
    }

    #[test]
    fn test_drift_breaks_ties() {
        let source = Rect::new(50.0, 0.0, 100.0, 30.0);
        let targets = vec![Rect::new(0.0, 50.0, 80.0, 30.0), Rect::new(90.0, 50.0, 80.0, 30.0)];
        assert_eq!(find_nearest_index(source, &targets, NavDirection::Down), Some(1));
    }

    #[test]
    fn test_equal_scores_prefer_first() {
        let source = Rect::new(50.0, 0.0, 50.0, 50.0);
        let targets = vec![Rect::new(0.0, 100.0, 50.0, 50.0), Rect::new(100.0, 100.0, 50.0, 50.0)];
        assert_eq!(find_nearest_index(source, &targets, NavDirection::Down), Some(0));
    }

    #[test]
    fn test_nothing_in_direction() {
        let source = Rect::new(0.0, 0.0, 50.0, 50.0);
        let targets = vec![Rect::new(100.0, 0.0, 50.0, 50.0)];
        assert_eq!(find_nearest_index(source, &targets, NavDirection::Left), None);
        assert_eq!(find_nearest_index(source, &[], NavDirection::Right), None);
    }

    #[test]
    fn test_target_centered_inside_source_is_skipped() {
        let source = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inside = Rect::new(60.0, 10.0, 80.0, 20.0);
        assert_eq!(spatial_score(source, inside, NavDirection::Right), None);
        assert!(spatial_score(source, inside, NavDirection::Up).is_none());
    }
}
