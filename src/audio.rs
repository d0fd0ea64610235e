//! Audio cues
//!
//! The game only asks for three cues plus mute; how they sound is up to the
//! backend. The Web Audio backend synthesizes everything with oscillators,
//! no external files needed.

/// Progress of the browser's audio unlock (requires a user gesture)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockState {
    Locked,
    /// `resume()` has been requested and not yet settled
    Unlocking,
    Unlocked,
    /// The last attempt was rejected; the next primary action retries
    Failed,
}

/// Cue triggers the controller fires
pub trait AudioCues {
    fn jump(&mut self);
    fn score(&mut self);
    fn hit(&mut self);
    /// Flip mute, returning the new state
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
    /// Start unlocking without blocking; safe to call repeatedly
    fn unlock(&mut self);
    fn unlock_state(&self) -> UnlockState;
}

/// Backend that plays nothing (native builds, headless runs)
#[derive(Debug, Clone)]
pub struct SilentAudio {
    muted: bool,
    state: UnlockState,
}

impl Default for SilentAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl SilentAudio {
    pub fn new() -> Self {
        Self {
            muted: false,
            state: UnlockState::Locked,
        }
    }
}

impl AudioCues for SilentAudio {
    fn jump(&mut self) {}
    fn score(&mut self) {}
    fn hit(&mut self) {}

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn unlock(&mut self) {
        self.state = UnlockState::Unlocked;
    }

    fn unlock_state(&self) -> UnlockState {
        self.state
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCues, UnlockState};

    /// Web Audio backend
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
        status: Rc<Cell<UnlockState>>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            let status = if ctx.is_some() {
                UnlockState::Locked
            } else {
                log::warn!("Failed to create AudioContext - audio disabled");
                UnlockState::Failed
            };
            Self {
                ctx,
                volume: 0.8,
                muted: false,
                status: Rc::new(Cell::new(status)),
            }
        }

        /// Context to play on, if cues are currently audible
        fn live_ctx(&self) -> Option<&AudioContext> {
            if self.muted || self.status.get() != UnlockState::Unlocked {
                return None;
            }
            self.ctx.as_ref()
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Jump - short rising chirp
        fn play_jump(&self, ctx: &AudioContext) {
            let Some((osc, gain)) = self.create_osc(ctx, 420.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();
            let vol = self.volume;

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(420.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(760.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.13).ok();
        }

        /// Score - two-note ding
        fn play_score(&self, ctx: &AudioContext) {
            let t = ctx.current_time();
            let vol = self.volume;

            for (i, freq) in [880.0, 1320.0].iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                    continue;
                };
                let start = t + i as f64 * 0.07;

                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.001, start + 0.18)
                    .ok();

                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.2).ok();
            }
        }

        /// Hit - falling thud
        fn play_hit(&self, ctx: &AudioContext) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();
            let vol = self.volume;

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(45.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.36).ok();
        }
    }

    impl AudioCues for WebAudio {
        fn jump(&mut self) {
            if let Some(ctx) = self.live_ctx() {
                self.play_jump(ctx);
            }
        }

        fn score(&mut self) {
            if let Some(ctx) = self.live_ctx() {
                self.play_score(ctx);
            }
        }

        fn hit(&mut self) {
            if let Some(ctx) = self.live_ctx() {
                self.play_hit(ctx);
            }
        }

        fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            log::info!("Audio muted: {}", self.muted);
            self.muted
        }

        fn is_muted(&self) -> bool {
            self.muted
        }

        fn unlock(&mut self) {
            if matches!(
                self.status.get(),
                UnlockState::Unlocking | UnlockState::Unlocked
            ) {
                return;
            }
            let Some(ctx) = &self.ctx else {
                return;
            };
            if ctx.state() == AudioContextState::Running {
                self.status.set(UnlockState::Unlocked);
                return;
            }

            let promise = match ctx.resume() {
                Ok(promise) => promise,
                Err(e) => {
                    log::warn!("AudioContext.resume() threw: {:?}", e);
                    self.status.set(UnlockState::Failed);
                    return;
                }
            };

            self.status.set(UnlockState::Unlocking);
            let status = self.status.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => {
                        status.set(UnlockState::Unlocked);
                        log::info!("Audio unlocked");
                    }
                    Err(e) => {
                        status.set(UnlockState::Failed);
                        log::warn!("Audio unlock rejected: {:?}", e);
                    }
                }
            });
        }

        fn unlock_state(&self) -> UnlockState {
            self.status.get()
        }
    }
}
