//! Flap Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Element ids the driver expects in `index.html`
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod dom_ids {
    pub const CANVAS: &str = "canvas";
    pub const LOADING: &str = "loading";
    pub const TUNING: &str = "tuning";
    pub const HUD_SCORE: &str = "hud-score";
    pub const HUD_BEST: &str = "hud-best";
    pub const HUD_FPS: &str = "hud-fps";
    pub const HUD_MUTE: &str = "hud-mute";
    pub const START_PROMPT: &str = "start-prompt";
    pub const GAME_OVER: &str = "game-over";
    pub const FINAL_SCORE: &str = "final-score";
    pub const FINAL_BEST: &str = "final-best";
    pub const RESTART_BTN: &str = "restart-btn";
    pub const MUTE_BTN: &str = "mute-btn";
    pub const CLEAR_BEST_BTN: &str = "clear-best-btn";

    pub const ALL: [&str; 14] = [
        CANVAS,
        LOADING,
        TUNING,
        HUD_SCORE,
        HUD_BEST,
        HUD_FPS,
        HUD_MUTE,
        START_PROMPT,
        GAME_OVER,
        FINAL_SCORE,
        FINAL_BEST,
        RESTART_BTN,
        MUTE_BTN,
        CLEAR_BEST_BTN,
    ];
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flap_rush::audio::WebAudio;
    use flap_rush::persistence::LocalStorageStore;
    use flap_rush::platform::{FpsMeter, FrameClock, command_for_key};
    use flap_rush::renderer::{RenderState, scene};
    use flap_rush::sim::GamePhase;
    use flap_rush::{Command, Game, Tuning};

    use crate::dom_ids;

    /// Everything the animation-frame callback touches
    struct App {
        game: Game<WebAudio, LocalStorageStore>,
        render_state: Option<RenderState>,
        clock: FrameClock,
        fps: FpsMeter,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            self.fps.record(time);
            self.game.update(dt);
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = scene::build(&self.game.snapshot());
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = self.game.snapshot();

            set_text(&document, dom_ids::HUD_SCORE, &snap.score.to_string());
            set_text(&document, dom_ids::HUD_BEST, &snap.best_score.to_string());
            set_text(&document, dom_ids::HUD_FPS, &self.fps.fps().to_string());
            set_text(&document, dom_ids::HUD_MUTE, if snap.muted { "muted" } else { "" });

            set_visible(&document, dom_ids::START_PROMPT, snap.phase == GamePhase::Start);
            set_visible(&document, dom_ids::GAME_OVER, snap.phase == GamePhase::GameOver);
            if snap.phase == GamePhase::GameOver {
                set_text(&document, dom_ids::FINAL_SCORE, &snap.score.to_string());
                set_text(&document, dom_ids::FINAL_BEST, &snap.best_score.to_string());
            }
        }
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Optional balance override embedded in the page
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        match document
            .get_element_by_id(dom_ids::TUNING)
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json_or_default(&json),
            _ => Tuning::default(),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Flap Rush starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id(dom_ids::CANVAS)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let game = Game::new(seed, tuning, WebAudio::new(), LocalStorageStore::new());
        let app = Rc::new(RefCell::new(App {
            game,
            render_state: None,
            clock: FrameClock::new(),
            fps: FpsMeter::new(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                match instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await
                {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to set up renderer: {}", e),
                        }
                    }
                    Err(e) => log::error!("No suitable adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        if let Some(loading) = document.get_element_by_id(dom_ids::LOADING) {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(app.clone());
        setup_visibility(app.clone());

        request_animation_frame(app);

        log::info!("Flap Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.handle(Command::PrimaryAction);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch press (prevent the synthetic mousedown that follows)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().game.handle(Command::PrimaryAction);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(command) = command_for_key(&event.key()) {
                    // Keep space/arrow from scrolling the page
                    event.prevent_default();
                    app.borrow_mut().game.handle(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for (id, command) in [
            (dom_ids::RESTART_BTN, Command::Reset),
            (dom_ids::MUTE_BTN, Command::ToggleMute),
            (dom_ids::CLEAR_BEST_BTN, Command::ClearBest),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.stop_propagation();
                    app.borrow_mut().game.handle(command);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_visibility(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                // Next frame after returning starts from a nominal step
                app.borrow_mut().clock.reset();
                log::info!("Tab hidden");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flap Rush (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let score = headless::run_autopilot(0xF1A9, 120.0);
    println!("Autopilot finished with score {}", score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flap_rush::audio::SilentAudio;
    use flap_rush::consts::*;
    use flap_rush::persistence::MemoryStore;
    use flap_rush::sim::GamePhase;
    use flap_rush::{Command, Game, Snapshot, Tuning};

    /// Flap when falling below the next gap's center
    fn wants_flap(snap: &Snapshot<'_>) -> bool {
        let target = snap
            .obstacles
            .iter()
            .find(|pair| pair.x + OBSTACLE_WIDTH + snap.avatar_radius >= AVATAR_X)
            .map(|pair| pair.gap_center_y + snap.difficulty.gap * 0.15)
            .unwrap_or(FLOOR_Y * 0.5);
        snap.avatar.y > target && snap.avatar.vy > 0.0
    }

    /// Play one run at a fixed 60 Hz frame rate, returning the final score
    pub fn run_autopilot(seed: u64, max_seconds: f32) -> u64 {
        let mut game = Game::new(seed, Tuning::default(), SilentAudio::new(), MemoryStore::new());
        game.handle(Command::PrimaryAction);

        let frames = (max_seconds * 60.0) as u32;
        for _ in 0..frames {
            if wants_flap(&game.snapshot()) {
                game.handle(Command::PrimaryAction);
            }
            game.update(NOMINAL_FRAME_DT);
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        let snap = game.snapshot();
        log::info!(
            "Run ended in {:?} with score {} (best {})",
            snap.phase,
            snap.score,
            snap.best_score
        );
        snap.score
    }
}

#[cfg(test)]
mod tests {
    use super::dom_ids;

    const PAGE: &str = include_str!("../index.html");

    #[test]
    fn test_page_defines_every_driver_element() {
        for id in dom_ids::ALL {
            assert!(PAGE.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
    }

    #[test]
    fn test_page_styles_hidden_class() {
        assert!(PAGE.contains(".hidden"));
    }
}
