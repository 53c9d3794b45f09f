//! Axis-aligned collision detection between the player and obstacles
//!
//! Touching is not overlapping: all comparisons are strict, so a player
//! exactly flush with a bar or gap edge survives, while any positive
//! overlap is a hit.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: shared edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Obstacle {
    /// The two solid bars: above the gap and below it
    pub fn bars(&self, field_height: f32) -> [Rect; 2] {
        [
            Rect::new(self.x, 0.0, self.width, self.gap_start),
            Rect::new(
                self.x,
                self.gap_end(),
                self.width,
                (field_height - self.gap_end()).max(0.0),
            ),
        ]
    }
}

/// Rectangle of the player square
pub fn player_rect(x: f32, y: f32, size: f32) -> Rect {
    Rect::new(x, y, size, size)
}

/// Does the player hit this obstacle?
///
/// A hit needs horizontal overlap and a vertical span that is not fully
/// inside `[gap_start, gap_start + gap_height]`.
pub fn hits_obstacle(player: &Rect, obstacle: &Obstacle) -> bool {
    if !(player.min.x < obstacle.right() && player.max.x > obstacle.x) {
        return false;
    }
    let inside_gap = player.min.y >= obstacle.gap_start && player.max.y <= obstacle.gap_end();
    !inside_gap
}

/// First obstacle (in sequence order) the player hits, if any
pub fn first_collision<'a>(player: &Rect, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| hits_obstacle(player, o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GapPlacement;
    use proptest::prelude::*;

    const SIZE: f32 = 30.0;

    fn obstacle(x: f32, gap_start: f32, gap_height: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            width: 40.0,
            gap_start,
            gap_height,
            placement: GapPlacement::Top,
        }
    }

    #[test]
    fn test_player_inside_gap_is_safe() {
        let o = obstacle(100.0, 200.0, 150.0);
        let p = player_rect(110.0, 250.0, SIZE);
        assert!(!hits_obstacle(&p, &o));
    }

    #[test]
    fn test_flush_with_gap_top_is_not_a_collision() {
        let o = obstacle(100.0, 200.0, 150.0);
        let p = player_rect(110.0, 200.0, SIZE);
        assert!(!hits_obstacle(&p, &o));
    }

    #[test]
    fn test_flush_with_gap_bottom_is_not_a_collision() {
        let o = obstacle(100.0, 200.0, 150.0);
        let p = player_rect(110.0, 350.0 - SIZE, SIZE);
        assert!(!hits_obstacle(&p, &o));
    }

    #[test]
    fn test_one_unit_overlap_is_a_collision() {
        let o = obstacle(100.0, 200.0, 150.0);
        // One pixel into the top bar
        assert!(hits_obstacle(&player_rect(110.0, 199.0, SIZE), &o));
        // One pixel into the bottom bar
        assert!(hits_obstacle(&player_rect(110.0, 350.0 - SIZE + 1.0, SIZE), &o));
    }

    #[test]
    fn test_horizontal_flush_is_not_a_collision() {
        let o = obstacle(100.0, 200.0, 150.0);
        // Player entirely in a bar's rows, but its right edge touches the obstacle's left edge
        let p = player_rect(100.0 - SIZE, 0.0, SIZE);
        assert!(!hits_obstacle(&p, &o));
        // Touching the trailing edge from the right
        let p = player_rect(140.0, 0.0, SIZE);
        assert!(!hits_obstacle(&p, &o));
        // One pixel of horizontal overlap
        let p = player_rect(100.0 - SIZE + 1.0, 0.0, SIZE);
        assert!(hits_obstacle(&p, &o));
    }

    #[test]
    fn test_first_collision_in_sequence_order() {
        let a = Obstacle {
            id: 1,
            ..obstacle(100.0, 0.0, 40.0)
        };
        let b = Obstacle {
            id: 2,
            ..obstacle(110.0, 0.0, 40.0)
        };
        let p = player_rect(120.0, 300.0, SIZE);
        let hit = first_collision(&p, &[a, b]).map(|o| o.id);
        assert_eq!(hit, Some(1));
        assert!(first_collision(&p, &[]).is_none());
    }

    #[test]
    fn test_rect_overlap_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(9.0, 9.0, 10.0, 10.0)));
        assert_eq!(a.center(), Vec2::new(5.0, 5.0));
        assert_eq!(a.size(), Vec2::new(10.0, 10.0));
    }

    proptest! {
        /// Gap containment agrees with overlapping one of the two solid bars
        #[test]
        fn prop_gap_rule_matches_bar_overlap(
            px in 0.0f32..300.0,
            py in 0.0f32..570.0,
            ox in 0.0f32..300.0,
            gap_start in 0.0f32..400.0,
            gap_height in 40.0f32..150.0,
        ) {
            let o = obstacle(ox, gap_start, gap_height);
            let p = player_rect(px, py, SIZE);
            let [top, bottom] = o.bars(600.0);
            let by_bars = p.overlaps(&top) || p.overlaps(&bottom);
            prop_assert_eq!(hits_obstacle(&p, &o), by_bars);
        }
    }
}
