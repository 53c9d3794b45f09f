//! Gravity Flip entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use gravity_flip::audio::AudioManager;
    use gravity_flip::consts::*;
    use gravity_flip::persistence::{BestScore, BestScoreStore, LocalStorage, record_best};
    use gravity_flip::platform::InputQueue;
    use gravity_flip::renderer::{RenderState, build_scene};
    use gravity_flip::sim::{GamePhase, GameState, TickInput, autopilot_press, tick};
    use gravity_flip::{GameConfig, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: InputQueue,
        audio: AudioManager,
        store: BestScore<LocalStorage>,
        settings: Settings,
        /// Let the autopilot press the button
        idle_mode: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, settings: Settings) -> Self {
            let store = BestScore::new(LocalStorage);
            let best = store.best_score();
            log::info!("Loaded best score: {}", best);
            Self {
                state: GameState::new(config, seed, best),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: InputQueue::new(),
                audio: AudioManager::new(settings.effective_volume()),
                store,
                settings,
                idle_mode: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // A pending press is consumed by the first substep only
                let autopilot = self.idle_mode.then(|| autopilot_press(&self.state));
                let pressed = self.input.next_press(autopilot);
                let input = TickInput::from_press(pressed, self.state.phase);
                let events = tick(&mut self.state, &input, SIM_DT);
                self.audio.play_events(&events);
                record_best(&mut self.store, &events);

                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Don't let a long stall replay as a burst next frame
            if substeps == MAX_SUBSTEPS {
                self.accumulator = self.accumulator.min(SIM_DT);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state.snapshot(), &self.settings);
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
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.round.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.round.best_score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            set_visible(&document, "intro-prompt", self.state.phase == GamePhase::Intro);

            let over = self.state.phase == GamePhase::GameOver;
            set_visible(&document, "game-over", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.round.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&self.state.round.best_score.to_string()));
                }
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.settings.save();
            self.audio.set_volume(self.settings.effective_volume());
            log::info!("Muted: {}", muted);
        }

        /// Any key or click: one flip request, and an unlock for audio
        fn press(&mut self, is_repeat: bool) {
            self.audio.resume();
            self.input.press(is_repeat);
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Gravity Flip starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let config = GameConfig::default();
        if let Err(e) = config.validate() {
            log::error!("Invalid game configuration: {}", e);
            return;
        }

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let field = glam::Vec2::new(config.field_width, config.field_height);
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(config, seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, field).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game.clone());
        setup_mute_button(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Gravity Flip running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse / pointer click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press(false);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: every key is the same button
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Developer toggle, not a game input
                if event.alt_key() && event.code() == "KeyI" {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                    return;
                }
                if event.key() == " " {
                    event.prevent_default();
                }
                g.press(event.repeat());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The mute button sits outside the canvas, so clicking it is not a press
    fn setup_mute_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id("mute-btn") else {
            return;
        };

        let label = |muted: bool| if muted { "Unmute" } else { "Mute" };
        btn.set_text_content(Some(label(game.borrow().settings.muted)));

        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.toggle_mute();
            btn_clone.set_text_content(Some(label(g.settings.muted)));
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Tab hidden: mute; visible again: restore
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                set_focus_muted(&mut game.borrow_mut(), hidden);
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                set_focus_muted(&mut game.borrow_mut(), true);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                set_focus_muted(&mut game.borrow_mut(), false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_focus_muted(game: &mut Game, muted: bool) {
        if !game.settings.mute_on_blur {
            return;
        }
        let volume = if muted {
            0.0
        } else {
            game.settings.effective_volume()
        };
        game.audio.set_volume(volume);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless demo: the autopilot plays a fixed number of ticks.
///
/// Usage: `gravity-flip [config.json] [ticks] [seed]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use gravity_flip::GameConfig;
    use gravity_flip::consts::SIM_DT;
    use gravity_flip::persistence::{BestScore, BestScoreStore, MemoryStorage, record_best};
    use gravity_flip::sim::{GameEvent, GameState, TickInput, autopilot_press, tick};

    env_logger::init();

    log::info!("Gravity Flip (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {}", path))?;
            GameConfig::from_json(&json).with_context(|| format!("parsing config {}", path))?
        }
        _ => GameConfig::default(),
    };
    config.validate().context("invalid game configuration")?;

    let ticks: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("bad tick count {:?}", raw))?,
        None => 60 * 60,
    };
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("bad seed {:?}", raw))?,
        None => 1,
    };

    let mut store = BestScore::new(MemoryStorage::new());
    let mut state = GameState::new(config, seed, store.best_score());
    let mut rounds = 0u32;
    let mut flips = 0u64;

    for _ in 0..ticks {
        let input = TickInput::from_press(autopilot_press(&state), state.phase);
        let events = tick(&mut state, &input, SIM_DT);
        record_best(&mut store, &events);

        for event in &events {
            match event {
                GameEvent::RoundStarted => rounds += 1,
                GameEvent::Flipped { .. } => flips += 1,
                GameEvent::Collided { score } => {
                    log::info!("Round {} over at score {}", rounds, score)
                }
                _ => {}
            }
        }
    }

    println!(
        "{} ticks, {} rounds, {} flips, current score {}, best {} (saved {} times)",
        ticks,
        rounds,
        flips,
        state.round.score,
        store.best_score(),
        store.storage().writes()
    );

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
