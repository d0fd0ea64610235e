//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one `GameState` value so a test can
//! build a state, tick it N times, and assert on the result.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Idle before the first run, waiting for the primary action
    Start,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// The player-controlled avatar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    /// Vertical center position (y grows downward)
    pub y: f32,
    /// Vertical velocity (negative = upward)
    pub vy: f32,
}

impl Default for Avatar {
    fn default() -> Self {
        Self {
            y: AVATAR_START_Y,
            vy: 0.0,
        }
    }
}

/// One obstacle column with a vertical passage gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePair {
    /// Left edge of the column
    pub x: f32,
    /// Vertical center of the gap
    pub gap_center_y: f32,
    /// Set once the trailing edge has passed the avatar
    pub scored: bool,
}

impl ObstaclePair {
    pub fn new(x: f32, gap_center_y: f32) -> Self {
        Self {
            x,
            gap_center_y,
            scored: false,
        }
    }

    /// Right edge of the column
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    /// Bottom of the top segment for the given gap height
    #[inline]
    pub fn gap_top(&self, gap: f32) -> f32 {
        self.gap_center_y - gap / 2.0
    }

    /// Top of the bottom segment for the given gap height
    #[inline]
    pub fn gap_bottom(&self, gap: f32) -> f32 {
        self.gap_center_y + gap / 2.0
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Floor,
    /// Index into the obstacle list at the time of the crash
    Obstacle { index: usize },
}

/// Things that happened during a tick, drained by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An obstacle was passed; `score` is the new total
    Scored { score: u64 },
    /// The run ended
    Crashed { cause: CrashCause },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG (continues across runs within a session)
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub avatar: Avatar,
    /// Live obstacles in spawn order (also left-to-right order)
    pub obstacles: Vec<ObstaclePair>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Current run score
    pub score: u64,
    /// Best score seen across runs (mirrors the persisted value)
    pub best_score: u64,
    /// Horizontal distance scrolled this run, for ground animation
    pub distance: f32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session in the Start phase
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            avatar: Avatar::default(),
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            score: 0,
            best_score,
            distance: 0.0,
            events: Vec::new(),
        }
    }

    /// Put the avatar back at the start and clear the run.
    ///
    /// Phase is left to the caller; the RNG and best score carry over.
    pub fn reset_run(&mut self) {
        self.avatar = Avatar::default();
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.score = 0;
        self.distance = 0.0;
        self.events.clear();
    }

    /// Raise the best score to the current score if it is higher.
    ///
    /// Returns true when the best score changed.
    pub fn record_best(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }

    /// End the run
    pub fn crash(&mut self, cause: CrashCause) {
        self.avatar.vy = 0.0;
        self.phase = GamePhase::GameOver;
        self.record_best();
        self.events.push(GameEvent::Crashed { cause });
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, 12);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.avatar, Avatar::default());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 12);
    }

    #[test]
    fn test_record_best_never_lowers() {
        let mut state = GameState::new(1, 10);
        state.score = 4;
        assert!(!state.record_best());
        assert_eq!(state.best_score, 10);

        state.score = 11;
        assert!(state.record_best());
        assert_eq!(state.best_score, 11);
    }

    #[test]
    fn test_obstacle_gap_edges() {
        let pair = ObstaclePair::new(100.0, 300.0);
        assert_eq!(pair.trailing_edge(), 100.0 + OBSTACLE_WIDTH);
        assert_eq!(pair.gap_top(170.0), 215.0);
        assert_eq!(pair.gap_bottom(170.0), 385.0);
    }
}
