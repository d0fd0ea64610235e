//! Phase/command controller
//!
//! Owns the simulation state and the injected audio and storage backends.
//! The driver feeds it normalized commands and frame deltas, then reads a
//! `Snapshot` back for rendering.

use crate::audio::AudioCues;
use crate::persistence::ScoreStore;
use crate::platform::clock::clamp_dt;
use crate::sim::{
    Avatar, DifficultyLevel, GameEvent, GamePhase, GameState, ObstaclePair, tick,
};
use crate::tuning::Tuning;

/// Normalized input commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Jump / start (tap, click, space)
    PrimaryAction,
    /// Abandon the run and return to the start screen
    Reset,
    ToggleMute,
    /// Forget the persisted best score
    ClearBest,
}

/// Read-only view of everything the renderer and HUD need for one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub avatar: Avatar,
    pub avatar_radius: f32,
    pub obstacles: &'a [ObstaclePair],
    pub score: u64,
    pub best_score: u64,
    pub difficulty: DifficultyLevel,
    /// Distance scrolled this run
    pub distance: f32,
    pub muted: bool,
}

/// Game session
pub struct Game<A: AudioCues, S: ScoreStore> {
    state: GameState,
    tuning: Tuning,
    audio: A,
    store: S,
    /// Last value handed to the store
    saved_best: u64,
}

impl<A: AudioCues, S: ScoreStore> Game<A, S> {
    /// Start a session, reading the best score once from the store
    pub fn new(seed: u64, tuning: Tuning, audio: A, store: S) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning, using defaults: {}", e);
                Tuning::default()
            }
        };
        let best = store.load_best();
        log::info!("Session seed {}, best score {}", seed, best);
        Self {
            state: GameState::new(seed, best),
            tuning,
            audio,
            store,
            saved_best: best,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::PrimaryAction => self.primary_action(),
            Command::Reset => {
                self.state.reset_run();
                self.set_phase(GamePhase::Start);
            }
            Command::ToggleMute => {
                self.audio.toggle_mute();
            }
            Command::ClearBest => {
                self.state.best_score = 0;
                self.store.save_best(0);
                self.saved_best = 0;
                log::info!("Best score cleared");
            }
        }
    }

    fn primary_action(&mut self) {
        // Kick off the unlock first; it completes on its own schedule
        self.audio.unlock();

        match self.state.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.state.reset_run();
                self.set_phase(GamePhase::Playing);
                self.flap();
            }
            GamePhase::Playing => self.flap(),
        }
    }

    fn flap(&mut self) {
        self.state.avatar.vy = self.tuning.flap_velocity;
        self.audio.jump();
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.state.phase, phase);
        }
        self.state.phase = phase;
    }

    /// Advance the simulation by one frame
    pub fn update(&mut self, dt: f32) {
        tick(&mut self.state, &self.tuning, clamp_dt(dt));

        for event in self.state.drain_events() {
            match event {
                GameEvent::Scored { .. } => self.audio.score(),
                GameEvent::Crashed { cause } => {
                    log::info!("Run over ({:?}), score {}", cause, self.state.score);
                    self.audio.hit();
                }
            }
        }
        self.persist_best();
    }

    /// Hand an improved best score to the store
    fn persist_best(&mut self) {
        if self.state.best_score > self.saved_best {
            self.store.save_best(self.state.best_score);
            self.saved_best = self.state.best_score;
        }
    }

    /// Current difficulty values from the live score
    pub fn difficulty(&self) -> DifficultyLevel {
        DifficultyLevel::at(&self.tuning, self.state.score)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.state.phase,
            avatar: self.state.avatar,
            avatar_radius: self.tuning.avatar_radius,
            obstacles: &self.state.obstacles,
            score: self.state.score,
            best_score: self.state.best_score,
            difficulty: self.difficulty(),
            distance: self.state.distance,
            muted: self.audio.is_muted(),
        }
    }
}
