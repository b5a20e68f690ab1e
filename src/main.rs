//! Brickout entry point
//!
//! The browser build wires the simulation to the canvas renderer, the
//! audio graph and the animation-frame scheduler. The native build
//! runs a short headless demo of the same simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use brickout::audio::{AudioManager, SoundEffect};
    use brickout::consts::{LEVEL_RESUME_DELAY_MS, MUSIC_START_DELAY_S, TICK_INTERVAL_MS};
    use brickout::platform::FrameGate;
    use brickout::renderer::CanvasRenderer;
    use brickout::sim::{
        GameEvent, GamePhase, Key, LoopDirective, key_down, key_up, pointer_moved, tick,
    };
    use brickout::{GameState, Tuning};

    /// Browser callback handles currently in flight. Cancelled together
    /// on every restart so a stale callback can never drive a session
    /// it no longer belongs to.
    #[derive(Default)]
    struct PendingHandles {
        frame: Option<i32>,
        resume: Option<i32>,
    }

    /// Everything the browser loop owns
    struct App {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        gate: FrameGate,
        pending: PendingHandles,
    }

    impl App {
        /// Turn one simulation event into sound
        fn handle_event(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::PaddleHit => self.audio.play(SoundEffect::PaddleHit),
                GameEvent::BrickHit { destroyed, .. } => {
                    let fx = if destroyed {
                        SoundEffect::BrickBreak
                    } else {
                        SoundEffect::BrickDamaged
                    };
                    self.audio.play(fx);
                }
                GameEvent::BallLost { .. } => self.audio.play(SoundEffect::BallLost),
                GameEvent::LevelComplete { .. } => {
                    // Music sits out the transition banner and comes
                    // back with the serve
                    self.audio.stop_music();
                    self.audio.play(SoundEffect::LevelComplete);
                }
                GameEvent::GameOver { .. } => {
                    self.audio.stop_music();
                    self.audio.play(SoundEffect::GameOver);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brickout starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = variant_from_location(&window);
        canvas.set_width(tuning.court.x as u32);
        canvas.set_height(tuning.court.y as u32);

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(tuning, seed);
        let renderer = CanvasRenderer::new(&canvas).expect("Failed to init renderer");

        let app = Rc::new(RefCell::new(App {
            state,
            renderer,
            audio: AudioManager::new(),
            gate: FrameGate::new(TICK_INTERVAL_MS),
            pending: PendingHandles::default(),
        }));

        // Splash frame; the loop itself only runs once a game starts
        {
            let a = app.borrow();
            a.renderer.draw(&a.state);
        }

        attach_input(&canvas, app);

        log::info!("Brickout ready (seed {seed})");
    }

    /// Pick the variant preset from the page URL (`?variant=minimal`)
    fn variant_from_location(window: &web_sys::Window) -> Tuning {
        let query = window.location().search().unwrap_or_default();
        if query.contains("variant=minimal") {
            log::info!("Using minimal variant");
            Tuning::minimal()
        } else {
            Tuning::classic()
        }
    }

    fn attach_input(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                match key {
                    Key::Start => {
                        let phase = app.borrow().state.phase;
                        if matches!(phase, GamePhase::Idle | GamePhase::GameOver) {
                            start_game(app.clone());
                        }
                    }
                    Key::MusicToggle => {
                        let mut a = app.borrow_mut();
                        if a.state.phase == GamePhase::Running {
                            let on = a.audio.toggle_music();
                            if on {
                                a.audio.start_music(0.0);
                            }
                            log::info!("Music {}", if on { "on" } else { "off" });
                        }
                    }
                    Key::SfxToggle => {
                        let mut a = app.borrow_mut();
                        if a.state.phase == GamePhase::Running {
                            let on = a.audio.toggle_sfx();
                            log::info!("Sound effects {}", if on { "on" } else { "off" });
                        }
                    }
                    Key::VolumeUp => {
                        let vol = app.borrow_mut().audio.volume_up();
                        log::info!("Volume {vol:.1}");
                    }
                    Key::VolumeDown => {
                        let vol = app.borrow_mut().audio.volume_down();
                        log::info!("Volume {vol:.1}");
                    }
                    Key::Left | Key::Right => key_down(&mut app.borrow_mut().state, key),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard release
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    key_up(&mut app.borrow_mut().state, key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move steers the paddle
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                pointer_moved(&mut app.borrow_mut().state, event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move steers the paddle
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    pointer_moved(&mut app.borrow_mut().state, x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Begin a fresh run from the splash or game-over screen
    fn start_game(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            cancel_pending(&mut a);
            a.state.start();
            a.gate.reset();
            a.audio.resume();
            a.audio.play(SoundEffect::GameStart);
            a.audio.start_music(MUSIC_START_DELAY_S);
            log::info!("Run started (seed {})", a.state.seed);
        }
        schedule_frame(app);
    }

    /// Drop whatever callbacks are still scheduled
    fn cancel_pending(a: &mut App) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(handle) = a.pending.frame.take() {
            window.cancel_animation_frame(handle).ok();
        }
        if let Some(handle) = a.pending.resume.take() {
            window.clear_timeout_with_handle(handle);
        }
    }

    fn schedule_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = {
            let app = app.clone();
            Closure::once(move |now: f64| on_frame(app, now))
        };
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().pending.frame = handle;
    }

    fn on_frame(app: Rc<RefCell<App>>, now: f64) {
        let directive = {
            let mut a = app.borrow_mut();
            a.pending.frame = None;

            if a.gate.ready(now) {
                let report = tick(&mut a.state);
                a.renderer.draw(&a.state);
                for event in &report.events {
                    a.handle_event(event);
                }
                report.directive
            } else {
                // Frame arrived early; keep the loop alive without a tick
                LoopDirective::Continue
            }
        };

        match directive {
            LoopDirective::Continue => schedule_frame(app),
            LoopDirective::ResumeAfterDelay => schedule_resume(app),
            LoopDirective::Halt => {}
        }
    }

    fn schedule_resume(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = {
            let app = app.clone();
            Closure::once(move || on_resume(app))
        };
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                LEVEL_RESUME_DELAY_MS as i32,
            )
            .ok();
        closure.forget();
        app.borrow_mut().pending.resume = handle;
    }

    fn on_resume(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.pending.resume = None;
            a.state.resume_level();
            a.gate.reset();
            a.audio.start_music(0.0);
            log::info!("Level {} live", a.state.level);
        }
        schedule_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brickout::sim::{GamePhase, LoopDirective, tick};
    use brickout::{GameState, Tuning};

    env_logger::init();
    log::info!("Brickout (native) starting...");

    // Headless demo: run a seeded session with a parked paddle until the
    // run ends or the tick cap trips
    let mut state = GameState::new(Tuning::classic(), 0xB1C0);
    state.start();

    let mut ticks = 0u32;
    let mut events = 0usize;
    while ticks < 20_000 {
        let report = tick(&mut state);
        events += report.events.len();
        match report.directive {
            LoopDirective::Continue => {}
            LoopDirective::ResumeAfterDelay => state.resume_level(),
            LoopDirective::Halt => break,
        }
        ticks += 1;
    }

    println!(
        "Headless demo: score {}, level {}, lives {}, {} events in {} ticks",
        state.score, state.level, state.lives, events, ticks
    );
    if state.phase != GamePhase::GameOver {
        println!("Stopped before game over (tick cap reached)");
    }
}
