//! Collision detection between the avatar circle and obstacle geometry
//!
//! Obstacles are axis-aligned rectangles, so the closest-point test is exact:
//! clamp the circle center into the rectangle and compare squared distances.

use glam::Vec2;

use super::state::ObstaclePair;
use crate::consts::{FLOOR_Y, OBSTACLE_WIDTH};

/// Axis-aligned rectangle in world space
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

    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Point inside (or on the boundary of) the rectangle nearest to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Check whether a circle overlaps a rectangle
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) < radius * radius
}

/// Top and bottom segments of an obstacle column for a given gap height.
///
/// A gap reaching past the ceiling or floor yields a zero-height segment.
pub fn obstacle_segments(pair: &ObstaclePair, gap: f32) -> [Rect; 2] {
    let top = Rect::from_corners(
        Vec2::new(pair.x, 0.0),
        Vec2::new(pair.x + OBSTACLE_WIDTH, pair.gap_top(gap).clamp(0.0, FLOOR_Y)),
    );
    let bottom = Rect::from_corners(
        Vec2::new(pair.x, pair.gap_bottom(gap).clamp(0.0, FLOOR_Y)),
        Vec2::new(pair.x + OBSTACLE_WIDTH, FLOOR_Y),
    );
    [top, bottom]
}

/// Check the avatar circle against both segments of one obstacle
pub fn avatar_hits_obstacle(center: Vec2, radius: f32, pair: &ObstaclePair, gap: f32) -> bool {
    obstacle_segments(pair, gap)
        .iter()
        .any(|rect| circle_rect_overlap(center, radius, rect))
}

/// Index of the first obstacle (in spawn order) the avatar overlaps
pub fn first_hit(center: Vec2, radius: f32, obstacles: &[ObstaclePair], gap: f32) -> Option<usize> {
    obstacles
        .iter()
        .position(|pair| avatar_hits_obstacle(center, radius, pair, gap))
}
