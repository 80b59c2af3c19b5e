//! Block Sandbox entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use block_sandbox::audio::AudioManager;
    use block_sandbox::consts::*;
    use block_sandbox::persistence;
    use block_sandbox::platform::{
        Action, Command, InputState, LocalStorage, PointerButton, StatusLine, inventory_html,
    };
    use block_sandbox::renderer::{RenderState, VertexBatch, draw_world};
    use block_sandbox::sim::{Viewport, World, tick};
    use block_sandbox::{Settings, rgb_to_f32};

    /// Game instance holding all state
    struct Game {
        world: World,
        viewport: Viewport,
        input: InputState,
        render_state: Option<RenderState>,
        batch: VertexBatch,
        audio: AudioManager,
        store: LocalStorage,
        settings: Settings,
        /// Last pointer position in canvas pixels
        cursor: Vec2,
        status: StatusLine,
        hud_dirty: bool,
    }

    impl Game {
        fn new(settings: Settings, store: LocalStorage, viewport: Viewport, seed: u64) -> Self {
            let world = World::generate(&settings.world.params(), seed);
            Self {
                world,
                viewport,
                input: InputState::new(),
                render_state: None,
                batch: VertexBatch::new(),
                audio: AudioManager::from_settings(&settings),
                store,
                settings,
                cursor: Vec2::ZERO,
                status: StatusLine::default(),
                hud_dirty: true,
            }
        }

        /// One simulation tick; the browser's frame callback sets the pace
        fn update(&mut self) {
            let input = self.input.tick_input();
            tick(&mut self.world, &input, SIM_DT, &mut self.audio);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            self.batch.clear();
            draw_world(&self.world, &self.viewport, &mut self.batch);
            let clear = rgb_to_f32(self.world.sky.tint());

            match render_state.render(&self.batch, self.viewport.size, clear) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn pointer(&mut self, button: PointerButton) {
            self.audio.resume();
            let changed = match button {
                PointerButton::Primary => {
                    self.world
                        .break_at(&self.viewport, self.cursor, &mut self.audio)
                }
                PointerButton::Secondary => {
                    self.world
                        .place_at(&self.viewport, self.cursor, &mut self.audio)
                }
            };
            self.hud_dirty |= changed;
        }

        fn command(&mut self, command: Command, now: f64) {
            match command {
                Command::Select(n) => {
                    self.hud_dirty |= self.world.select_slot(n);
                }
                Command::Save => match persistence::save(&self.world, &mut self.store) {
                    Ok(()) => self.status.show("World saved", now),
                    Err(e) => {
                        log::error!("Save failed: {}", e);
                        self.status.show(format!("Save failed: {}", e), now);
                    }
                },
                Command::Load => {
                    if persistence::load_into(&mut self.world, &self.store) {
                        self.status.show("World loaded", now);
                        self.hud_dirty = true;
                    } else {
                        self.status.show("No saved world", now);
                    }
                }
                Command::ToggleMute => {
                    let result = self.settings.toggle_muted(&mut self.store);
                    self.audio.set_muted(self.settings.muted);
                    match result {
                        Ok(true) => self.status.show("Sound off", now),
                        Ok(false) => self.status.show("Sound on", now),
                        Err(e) => log::warn!("Could not save settings: {}", e),
                    }
                }
            }
        }

        fn blur(&mut self) {
            self.input.release_all();
            if self.settings.mute_on_blur {
                self.audio.set_muted(true);
            }
        }

        fn focus(&mut self) {
            self.audio.set_muted(self.settings.muted);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.hud_dirty {
                if let Some(el) = document.get_element_by_id("inventory") {
                    el.set_inner_html(&inventory_html(
                        &self.world.inventory,
                        &self.world.selection,
                    ));
                }
                self.hud_dirty = false;
            }

            if let Some(el) = document.get_element_by_id("status") {
                match self.status.current(now) {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Block Sandbox starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        // Backing store at device resolution; the world is laid out in CSS pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let viewport = Viewport::new(client_w as f32, client_h as f32);

        let store = LocalStorage::new();
        let settings = Settings::load(&store);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, store, viewport, seed)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err(format!("no adapter: {:?}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        setup_focus_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Block Sandbox running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;

        // Mouse move - track cursor in canvas pixels
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().cursor =
                    Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down - break (primary) or place (secondary)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(button) = PointerButton::from_button(event.button()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                g.cursor = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.pointer(button);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Right click places, never opens the menu
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let modifier = event.ctrl_key() || event.meta_key();
                let mut g = game.borrow_mut();
                let command = g.input.key_down(&key, modifier);
                // Keep the page from scrolling and the browser from saving
                if matches!(command, Some(Command::Save | Command::Load))
                    || (!modifier && Action::from_key(&key).is_some())
                {
                    event.prevent_default();
                }
                if let Some(command) = command {
                    g.command(command, js_sys::Date::now());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    g.blur();
                } else {
                    g.focus();
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside) - keys released elsewhere never reach us
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().blur();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().focus();
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud(js_sys::Date::now());
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Sandbox (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted simulation with an in-memory store, for smoke testing
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::IVec2;

    use block_sandbox::consts::SIM_DT;
    use block_sandbox::persistence;
    use block_sandbox::renderer::{VertexBatch, draw_world};
    use block_sandbox::sim::{SoundCue, TickInput, Viewport, World, break_block, tick};
    use block_sandbox::{MemoryStore, Settings};

    pub fn run() {
        let mut store = MemoryStore::new();
        let settings = Settings::load(&store);
        let seed = settings.seed.unwrap_or(0x5eed);
        let params = settings.world.params();
        let mut world = World::generate(&params, seed);
        let viewport = Viewport::new(800.0, 600.0);
        let mut cues: Vec<SoundCue> = Vec::new();

        // Walk right for two seconds, hopping every half second
        for i in 0..120u32 {
            let input = TickInput {
                right: true,
                jump: i % 30 == 0,
                ..Default::default()
            };
            tick(&mut world, &input, SIM_DT, &mut cues);
        }
        let jumps = cues.iter().filter(|&&c| c == SoundCue::Jump).count();
        log::info!(
            "After {} ticks: actor at ({:.2}, {:.2}), grounded {}, {} jumps, {} cues",
            world.time_ticks,
            world.actor.pos.x,
            world.actor.pos.y,
            world.actor.grounded,
            jumps,
            cues.len()
        );

        // Dig out the block under the stickman's feet
        let below = world.actor_cell() + IVec2::Y;
        let dug = break_block(&mut world, below, &mut cues);
        log::info!(
            "Dig at {:?}: {} (inventory {:?}, {} particles)",
            below,
            dug,
            world.inventory,
            world.particles.len()
        );

        let mut batch = VertexBatch::new();
        let blocks = draw_world(&world, &viewport, &mut batch);
        log::info!(
            "Frame: {} blocks drawn ({:?}), {} vertices",
            blocks,
            world.redraw,
            batch.len()
        );

        if let Err(e) = persistence::save(&world, &mut store) {
            log::error!("Save failed: {}", e);
            return;
        }
        let mut reloaded = World::generate(&params, seed.wrapping_add(1));
        persistence::load_into(&mut reloaded, &store);
        log::info!(
            "Reload matches: grid {}, inventory {}",
            reloaded.grid == world.grid,
            reloaded.inventory == world.inventory
        );
    }
}
