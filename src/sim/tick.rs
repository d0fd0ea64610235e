//! Variable timestep simulation tick
//!
//! Advances avatar physics, obstacle spawning/scrolling, scoring and
//! collision for one frame. Does nothing outside the Playing phase.

use glam::Vec2;
use rand::Rng;

use super::collision::first_hit;
use super::difficulty::{pipe_gap, pipe_speed, spawn_interval};
use super::state::{CrashCause, GameEvent, GamePhase, GameState, ObstaclePair};
use crate::consts::*;
use crate::tuning::Tuning;

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, tuning: &Tuning, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let radius = tuning.avatar_radius;

    // Gravity
    state.avatar.vy += tuning.gravity * dt;
    state.avatar.y += state.avatar.vy * dt;

    // Ceiling stops the avatar but is not fatal
    if state.avatar.y < radius {
        state.avatar.y = radius;
        state.avatar.vy = 0.0;
    }

    // Floor ends the run
    let floor_limit = FLOOR_Y - radius;
    if state.avatar.y >= floor_limit {
        state.avatar.y = floor_limit;
        state.crash(CrashCause::Floor);
        log::info!("Hit the floor with score {}", state.score);
        return;
    }

    spawn_obstacles(state, tuning, dt);
    scroll_obstacles(state, tuning, dt);
    score_passed_obstacles(state);
    check_obstacle_collisions(state, tuning);
}

/// Accumulate spawn time and append a new obstacle when it is due
fn spawn_obstacles(state: &mut GameState, tuning: &Tuning, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer < spawn_interval(tuning, state.score) {
        return;
    }
    state.spawn_timer = 0.0;

    let gap = pipe_gap(tuning, state.score);
    let gap_center_y = random_gap_center(&mut state.rng, gap);
    let pair = ObstaclePair::new(VIEW_WIDTH + OBSTACLE_WIDTH, gap_center_y);
    log::debug!("Spawned obstacle, gap center {:.1}", gap_center_y);
    state.obstacles.push(pair);
}

/// Pick a gap center that keeps the whole gap inside the margins
pub fn random_gap_center<R: Rng>(rng: &mut R, gap: f32) -> f32 {
    let lo = GAP_MARGIN + gap / 2.0;
    let hi = FLOOR_Y - GAP_MARGIN - gap / 2.0;
    if lo >= hi {
        return (GAP_MARGIN + (FLOOR_Y - GAP_MARGIN)) / 2.0;
    }
    rng.random_range(lo..=hi)
}

/// Move every obstacle left and drop the ones fully off screen
fn scroll_obstacles(state: &mut GameState, tuning: &Tuning, dt: f32) {
    let dx = pipe_speed(tuning, state.score) * dt;
    state.distance += dx;
    for pair in &mut state.obstacles {
        pair.x -= dx;
    }
    state.obstacles.retain(|pair| pair.trailing_edge() > 0.0);
}

/// Award one point per obstacle whose trailing edge has passed the avatar
fn score_passed_obstacles(state: &mut GameState) {
    for i in 0..state.obstacles.len() {
        let pair = &mut state.obstacles[i];
        if pair.scored || pair.trailing_edge() >= AVATAR_X {
            continue;
        }
        pair.scored = true;
        state.score += 1;
        if state.record_best() {
            log::info!("New best score: {}", state.best_score);
        }
        state.events.push(GameEvent::Scored { score: state.score });
    }
}

/// End the run on the first obstacle the avatar overlaps
fn check_obstacle_collisions(state: &mut GameState, tuning: &Tuning) {
    let center = Vec2::new(AVATAR_X, state.avatar.y);
    let gap = pipe_gap(tuning, state.score);
    if let Some(index) = first_hit(center, tuning.avatar_radius, &state.obstacles, gap) {
        state.crash(CrashCause::Obstacle { index });
        log::info!("Hit obstacle {} with score {}", index, state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 0.016;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, 0);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_no_op_outside_playing() {
        let tuning = Tuning::default();
        for phase in [GamePhase::Start, GamePhase::GameOver] {
            let mut state = GameState::new(1, 0);
            state.phase = phase;
            let before = state.avatar;
            tick(&mut state, &tuning, DT);
            assert_eq!(state.avatar, before);
            assert_eq!(state.spawn_timer, 0.0);
            assert!(state.events.is_empty());
        }
    }

    #[test]
    fn test_gravity_integration() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        state.avatar.vy = -550.0;
        let y0 = state.avatar.y;

        tick(&mut state, &tuning, DT);

        assert!((state.avatar.vy - (-521.2)).abs() < 1e-3);
        assert!(state.avatar.y < y0);
        assert!((state.avatar.y - (y0 - 521.2 * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_ceiling_clamps_without_crash() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        state.avatar.y = tuning.avatar_radius + 1.0;
        state.avatar.vy = -550.0;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.avatar.y, tuning.avatar_radius);
        assert_eq!(state.avatar.vy, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_floor_ends_run() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        state.score = 3;
        state.avatar.y = FLOOR_Y - tuning.avatar_radius;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.avatar.y, FLOOR_Y - tuning.avatar_radius);
        assert_eq!(state.avatar.vy, 0.0);
        assert_eq!(state.best_score, 3);
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed {
                cause: CrashCause::Floor
            }]
        );
        // Remaining steps are skipped on the crash tick
        assert_eq!(state.spawn_timer, 0.0);
    }

    #[test]
    fn test_spawn_after_interval() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        state.spawn_timer = tuning.base_spawn_every - DT / 2.0;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0.0);
        let pair = state.obstacles[0];
        // Spawned at the right edge, then scrolled once
        let expected_x = VIEW_WIDTH + OBSTACLE_WIDTH - tuning.base_speed * DT;
        assert!((pair.x - expected_x).abs() < 1e-3);
        assert!(!pair.scored);
    }

    #[test]
    fn test_gap_center_keeps_gap_in_bounds() {
        let mut rng = Pcg32::seed_from_u64(99);
        let gap = 170.0;
        for _ in 0..1000 {
            let center = random_gap_center(&mut rng, gap);
            assert!(center - gap / 2.0 >= GAP_MARGIN);
            assert!(center + gap / 2.0 <= FLOOR_Y - GAP_MARGIN);
        }
    }

    #[test]
    fn test_oversized_gap_uses_midpoint() {
        let mut rng = Pcg32::seed_from_u64(1);
        let center = random_gap_center(&mut rng, FLOOR_Y);
        assert_eq!(center, FLOOR_Y / 2.0);
    }

    #[test]
    fn test_offscreen_obstacles_pruned() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        state.obstacles.push(ObstaclePair {
            x: -OBSTACLE_WIDTH + 1.0,
            gap_center_y: 300.0,
            scored: true,
        });
        state.obstacles.push(ObstaclePair::new(300.0, 300.0));

        tick(&mut state, &tuning, DT);

        assert_eq!(state.obstacles.len(), 1);
        assert!(state.obstacles.iter().all(|p| p.trailing_edge() > 0.0));
    }

    #[test]
    fn test_scoring_happens_once() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        // Gap centered on the avatar so it cannot collide
        let y = state.avatar.y;
        state.obstacles.push(ObstaclePair::new(AVATAR_X - OBSTACLE_WIDTH + 1.0, y));

        state.avatar.vy = 0.0;
        tick(&mut state, &tuning, DT);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].scored);
        assert_eq!(state.drain_events(), vec![GameEvent::Scored { score: 1 }]);

        state.avatar.y = y;
        state.avatar.vy = 0.0;
        tick(&mut state, &tuning, DT);
        assert_eq!(state.score, 1);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_not_scored_before_trailing_edge_passes() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        let y = state.avatar.y;
        // Trailing edge still well right of the avatar after one tick
        state.obstacles.push(ObstaclePair::new(AVATAR_X, y));

        tick(&mut state, &tuning, DT);

        assert_eq!(state.score, 0);
        assert!(!state.obstacles[0].scored);
    }

    #[test]
    fn test_trailing_edge_on_avatar_does_not_score() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        let y = state.avatar.y;
        // 220 px/s over 1/32 s scrolls exactly 6.875
        state
            .obstacles
            .push(ObstaclePair::new(AVATAR_X - OBSTACLE_WIDTH + 6.875, y));
        state.avatar.vy = 0.0;

        tick(&mut state, &tuning, 1.0 / 32.0);

        assert_eq!(state.obstacles[0].trailing_edge(), AVATAR_X);
        assert_eq!(state.score, 0);
        assert!(!state.obstacles[0].scored);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_score_lands_before_collision_in_same_tick() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        let y = state.avatar.y;
        // First pair is being passed, second pair's top segment covers the avatar
        state
            .obstacles
            .push(ObstaclePair::new(AVATAR_X - OBSTACLE_WIDTH + 1.0, y));
        state.obstacles.push(ObstaclePair::new(AVATAR_X - 10.0, y + 150.0));
        state.avatar.vy = 0.0;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 1);
        assert_eq!(state.best_score, 1);
        assert_eq!(
            state.events,
            vec![
                GameEvent::Scored { score: 1 },
                GameEvent::Crashed {
                    cause: CrashCause::Obstacle { index: 1 }
                },
            ]
        );
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let tuning = Tuning::default();
        let mut state = playing_state();
        let y = state.avatar.y;
        // Gap well below the avatar: the top segment covers it
        state.obstacles.push(ObstaclePair::new(AVATAR_X - 10.0, y + 150.0));
        state.avatar.vy = 0.0;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.avatar.vy, 0.0);
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed {
                cause: CrashCause::Obstacle { index: 0 }
            }]
        );
    }

    #[test]
    fn test_scoring_raises_best_score() {
        let tuning = Tuning::default();
        let mut state = GameState::new(5, 0);
        state.phase = GamePhase::Playing;
        let y = state.avatar.y;
        state.obstacles.push(ObstaclePair::new(AVATAR_X - OBSTACLE_WIDTH, y));
        state.avatar.vy = 0.0;

        tick(&mut state, &tuning, DT);

        assert_eq!(state.score, 1);
        assert_eq!(state.best_score, 1);
    }

    #[test]
    fn test_determinism() {
        let tuning = Tuning::default();
        let mut a = playing_state();
        let mut b = playing_state();

        for i in 0..400 {
            // Flap periodically to stay airborne
            if i % 20 == 0 {
                a.avatar.vy = tuning.flap_velocity;
                b.avatar.vy = tuning.flap_velocity;
            }
            tick(&mut a, &tuning, DT);
            tick(&mut b, &tuning, DT);
        }

        assert_eq!(a.phase, b.phase);
        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.avatar, b.avatar);
    }
}
