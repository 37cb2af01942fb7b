//! Block Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use block_breaker::renderer::{self, RenderState, VertexCanvas};
    use block_breaker::sim::{GameEvent, GameState};
    use block_breaker::{Hud, InputController, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputController,
        render_state: Option<RenderState>,
        canvas: VertexCanvas,
        /// HUD as last written to the DOM
        last_hud: Option<Hud>,
    }

    impl Game {
        fn new(settings: &Settings) -> Self {
            Self {
                state: GameState::new(settings.surface()),
                input: InputController::new(settings.keys.clone()),
                render_state: None,
                canvas: VertexCanvas::default(),
                last_hud: None,
            }
        }

        /// One animation frame: steer, step, then draw
        fn frame(&mut self) {
            self.input.update(&mut self.state);
            for event in self.state.step() {
                if let GameEvent::GameOver { score } = event {
                    log::info!("Final score: {}", score);
                }
            }
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            renderer::draw(&self.state, &mut self.canvas);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.canvas.vertices) {
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

        /// Update HUD elements in DOM (only when something changed)
        fn update_hud(&mut self) {
            let hud = Hud::from_state(&self.state);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score_text()));
            }
            set_visible(&document, "pause-message", hud.show_paused);
            set_visible(&document, "game-over-message", hud.show_game_over);

            self.last_hud = Some(hud);
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();

        if console_log::init_with_level(log::Level::Trace).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }
        let settings = Settings::load();
        log::set_max_level(settings.level_filter());

        log::info!("Block Breaker starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No <canvas id=\"canvas\"> element");
                return;
            }
        };

        // Backing store follows the playfield, CSS handles scaling
        let surface = settings.surface();
        let width = surface.width as u32;
        let height = surface.height as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(&settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match init_renderer(&instance, canvas, width, height, surface).await {
            Some(render_state) => game.borrow_mut().render_state = Some(render_state),
            None => log::warn!("Rendering disabled; simulation continues"),
        }

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Block Breaker running!");
    }

    async fn init_renderer(
        instance: &wgpu::Instance,
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
        playfield: block_breaker::sim::Surface,
    ) -> Option<RenderState> {
        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
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
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, playfield).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Failed to create renderer: {}", e);
                None
            }
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { state, input, .. } = &mut *g;
                if input.key_down(state, &event.key()).is_some() {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Game { state, input, .. } = &mut *g;
                input.key_up(state, &event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use block_breaker::sim::{GameEvent, GameState};
    use block_breaker::{InputController, Settings};

    // Settings pick the log level, so read them before the logger exists
    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let loaded = path.as_deref().map(Settings::load_from_path);
    let settings = match &loaded {
        Some(Ok(settings)) => settings.clone(),
        _ => Settings::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    log::info!("Block Breaker (native) starting...");
    match (&path, loaded) {
        (Some(path), Some(Ok(_))) => log::info!("Loaded settings from {}", path.display()),
        (Some(path), Some(Err(e))) => log::warn!("Ignoring {}: {}", path.display(), e),
        _ => log::info!("Using default settings"),
    }
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut state = GameState::new(settings.surface());
    let mut input = InputController::new(settings.keys.clone());
    input.autopilot.enabled = true;

    let mut ticks = 0;
    let mut blocks_broken = 0;
    while ticks < settings.demo_ticks && !state.is_game_over() {
        input.update(&mut state);
        for event in state.step() {
            if let GameEvent::BlockBroken { .. } = event {
                blocks_broken += 1;
            }
        }
        ticks += 1;
    }

    log::info!(
        "Autoplay finished after {} ticks: score {}, {} blocks broken, {} remaining{}",
        ticks,
        state.score,
        blocks_broken,
        state.blocks.remaining(),
        if state.is_game_over() { " (game over)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
