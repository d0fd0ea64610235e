//! Scene assembly: snapshot in, triangle list out
//!
//! Draw order is back to front: obstacles, ground, avatar. The sky is the
//! pass clear color and all text lives in the DOM HUD.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::game::Snapshot;
use crate::sim::{GamePhase, Rect, obstacle_segments};

/// Height of the cap drawn at each gap edge
const LIP_HEIGHT: f32 = 16.0;
/// Horizontal overhang of the cap on each side
const LIP_OVERHANG: f32 = 4.0;
/// Spacing of the scrolling ground stripes
const STRIPE_SPACING: f32 = 24.0;
const GRASS_HEIGHT: f32 = 8.0;
const CIRCLE_SEGMENTS: u32 = 24;

/// Build the vertex list for one frame
pub fn build(snapshot: &Snapshot<'_>) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(512);

    for pair in snapshot.obstacles {
        let [top, bottom] = obstacle_segments(pair, snapshot.difficulty.gap);
        vertices.extend(shapes::rect(&top, colors::OBSTACLE));
        vertices.extend(shapes::rect(&bottom, colors::OBSTACLE));

        let lip_x = pair.x - LIP_OVERHANG;
        let lip_w = OBSTACLE_WIDTH + LIP_OVERHANG * 2.0;
        let top_lip = Rect::new(lip_x, top.max.y - LIP_HEIGHT, lip_w, LIP_HEIGHT);
        let bottom_lip = Rect::new(lip_x, bottom.min.y, lip_w, LIP_HEIGHT);
        vertices.extend(shapes::rect(&top_lip, colors::OBSTACLE_LIP));
        vertices.extend(shapes::rect(&bottom_lip, colors::OBSTACLE_LIP));
    }

    push_ground(&mut vertices, snapshot.distance);
    push_avatar(&mut vertices, snapshot);

    vertices
}

fn push_ground(vertices: &mut Vec<Vertex>, distance: f32) {
    let ground = Rect::new(0.0, FLOOR_Y, VIEW_WIDTH, GROUND_HEIGHT);
    vertices.extend(shapes::rect(&ground, colors::GROUND));

    // Stripes scroll with the obstacles
    let offset = distance.rem_euclid(STRIPE_SPACING);
    let mut x = -offset;
    while x < VIEW_WIDTH {
        let stripe = Rect::new(x, FLOOR_Y + GRASS_HEIGHT, STRIPE_SPACING / 2.0, 12.0);
        vertices.extend(shapes::rect(&stripe, colors::GROUND_STRIPE));
        x += STRIPE_SPACING;
    }

    let grass = Rect::new(0.0, FLOOR_Y, VIEW_WIDTH, GRASS_HEIGHT);
    vertices.extend(shapes::rect(&grass, colors::GRASS));
}

fn push_avatar(vertices: &mut Vec<Vertex>, snapshot: &Snapshot<'_>) {
    let r = snapshot.avatar_radius;
    let center = Vec2::new(AVATAR_X, snapshot.avatar.y);
    let body = match snapshot.phase {
        GamePhase::Start => colors::AVATAR_IDLE,
        GamePhase::Playing => colors::AVATAR,
        GamePhase::GameOver => colors::AVATAR_DEAD,
    };

    vertices.extend(shapes::circle(
        center + Vec2::new(1.5, 2.0),
        r,
        colors::SHADE,
        CIRCLE_SEGMENTS,
    ));
    vertices.extend(shapes::circle(center, r, body, CIRCLE_SEGMENTS));
    vertices.extend(shapes::circle(
        center + Vec2::new(r * 0.4, -r * 0.3),
        r * 0.22,
        colors::EYE,
        8,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Avatar, DifficultyLevel, ObstaclePair};
    use crate::tuning::Tuning;

    fn snapshot<'a>(phase: GamePhase, obstacles: &'a [ObstaclePair]) -> Snapshot<'a> {
        let tuning = Tuning::default();
        Snapshot {
            phase,
            avatar: Avatar::default(),
            avatar_radius: tuning.avatar_radius,
            obstacles,
            score: 0,
            best_score: 0,
            difficulty: DifficultyLevel::at(&tuning, 0),
            distance: 0.0,
            muted: false,
        }
    }

    #[test]
    fn test_each_obstacle_adds_four_quads() {
        let empty = build(&snapshot(GamePhase::Playing, &[]));
        let pairs = [ObstaclePair::new(200.0, 275.0), ObstaclePair::new(380.0, 200.0)];
        let full = build(&snapshot(GamePhase::Playing, &pairs));
        assert_eq!(full.len() - empty.len(), pairs.len() * 4 * 6);
    }

    #[test]
    fn test_avatar_tint_follows_phase() {
        let over = build(&snapshot(GamePhase::GameOver, &[]));
        assert!(over.iter().any(|v| v.color == colors::AVATAR_DEAD));
        assert!(!over.iter().any(|v| v.color == colors::AVATAR));

        let idle = build(&snapshot(GamePhase::Start, &[]));
        assert!(idle.iter().any(|v| v.color == colors::AVATAR_IDLE));
    }

    #[test]
    fn test_vertex_count_is_triangle_list() {
        let pairs = [ObstaclePair::new(100.0, 300.0)];
        let v = build(&snapshot(GamePhase::Playing, &pairs));
        assert_eq!(v.len() % 3, 0);
    }
}
