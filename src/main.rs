//! Corgi Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        HtmlInputElement, KeyboardEvent,
    };

    use corgi_run::audio::WebAudio;
    use corgi_run::input::KeyEdge;
    use corgi_run::render::{DrawCommand, Frame, Renderer, Sprite, draw_list};
    use corgi_run::sim::GamePhase;
    use corgi_run::{Channel, Game, ScoreHistory, Settings};

    /// Assumed delta for the very first frame
    const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

    fn css_color(c: [f32; 4]) -> String {
        format!(
            "rgba({},{},{},{})",
            (c[0] * 255.0).round() as u8,
            (c[1] * 255.0).round() as u8,
            (c[2] * 255.0).round() as u8,
            c[3]
        )
    }

    /// Canvas 2D renderer that replays the draw list
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        sprites: Vec<(Sprite, HtmlImageElement)>,
    }

    impl CanvasRenderer {
        fn new(ctx: CanvasRenderingContext2d, document: &Document) -> Self {
            let sprites = [
                Sprite::Corgi,
                Sprite::Bird,
                Sprite::LogHorizontal,
                Sprite::LogVertical,
                Sprite::Heart,
            ]
            .into_iter()
            .filter_map(|sprite| {
                let img = document
                    .get_element_by_id(sprite.element_id())?
                    .dyn_into::<HtmlImageElement>()
                    .ok();
                if img.is_none() {
                    log::warn!("Missing sprite image #{}", sprite.element_id());
                }
                img.map(|img| (sprite, img))
            })
            .collect();
            Self { ctx, sprites }
        }

        fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
            self.sprites
                .iter()
                .find(|(s, _)| *s == sprite)
                .map(|(_, img)| img)
        }
    }

    impl Renderer for CanvasRenderer {
        fn render(&mut self, frame: &Frame<'_>) {
            let ctx = &self.ctx;
            for command in draw_list(frame) {
                match command {
                    DrawCommand::Gradient { rect, top, bottom } => {
                        let grad = ctx.create_linear_gradient(
                            0.0,
                            rect.top() as f64,
                            0.0,
                            rect.bottom() as f64,
                        );
                        grad.add_color_stop(0.0, &css_color(top)).ok();
                        grad.add_color_stop(1.0, &css_color(bottom)).ok();
                        ctx.set_fill_style_canvas_gradient(&grad);
                        ctx.fill_rect(
                            rect.left() as f64,
                            rect.top() as f64,
                            rect.size.x as f64,
                            rect.size.y as f64,
                        );
                    }
                    DrawCommand::Circle {
                        center,
                        radius,
                        color,
                    } => {
                        ctx.begin_path();
                        ctx.set_fill_style_str(&css_color(color));
                        ctx.arc(
                            center.x as f64,
                            center.y as f64,
                            radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        )
                        .ok();
                        ctx.fill();
                    }
                    DrawCommand::Sprite {
                        sprite,
                        rect,
                        rotation,
                    } => {
                        let Some(img) = self.image(sprite) else {
                            continue;
                        };
                        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
                        ctx.save();
                        ctx.translate(rect.left() as f64 + w / 2.0, rect.top() as f64 + h / 2.0)
                            .ok();
                        ctx.rotate(rotation as f64).ok();
                        ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            -w / 2.0,
                            -h / 2.0,
                            w,
                            h,
                        )
                        .ok();
                        ctx.restore();
                    }
                }
            }
        }
    }

    /// Game instance holding all state
    struct App {
        game: Game<WebAudio>,
        renderer: CanvasRenderer,
        last_time: f64,
        // Track phase/score to touch the DOM only on change
        last_phase: Option<GamePhase>,
        last_score: Option<u32>,
        last_lives: Option<u8>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            self.last_time = time;

            self.game.update(dt);
            let frame = self.game.frame();
            self.renderer.render(&frame);
            self.update_hud();
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let frame = self.game.frame();

            if self.last_score != Some(frame.score) {
                if let Some(el) = document.get_element_by_id("scoreDisplay") {
                    el.set_text_content(Some(&format!("Score: {}", frame.score)));
                }
                self.last_score = Some(frame.score);
            }

            if self.last_lives != Some(frame.lives) {
                if let Ok(hearts) = document.query_selector_all(".life-heart") {
                    for (i, opacity) in frame.heart_opacities().iter().enumerate() {
                        let heart = hearts
                            .item(i as u32)
                            .and_then(|n| n.dyn_into::<HtmlElement>().ok());
                        if let Some(heart) = heart {
                            heart.style().set_property("opacity", &opacity.to_string()).ok();
                        }
                    }
                }
                self.last_lives = Some(frame.lives);
            }

            if self.last_phase == Some(frame.phase) {
                return;
            }
            self.last_phase = Some(frame.phase);

            if let Some(hud) = document
                .get_element_by_id("hud")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let visibility = if frame.show_hud() { "visible" } else { "hidden" };
                hud.style().set_property("visibility", visibility).ok();
            }

            if let Some(panel) = document
                .query_selector(".how-to-play")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if frame.show_instructions() { "" } else { "none" };
                panel.style().set_property("display", display).ok();
            }

            set_active(&document, "startScreen", frame.phase == GamePhase::Start);
            set_active(&document, "gameOverScreen", frame.show_game_over());

            if let Some(el) = document.get_element_by_id("bestScoreText") {
                el.set_text_content(Some(&format!("Best: {}", frame.best_score())));
            }

            if frame.show_game_over() {
                if let Some(el) = document.get_element_by_id("finalScoreText") {
                    el.set_text_content(Some(&format!(
                        "Final score: {}\nBest score: {}",
                        frame.score,
                        frame.best_score()
                    )));
                }
            }

            if let Some(el) = document.get_element_by_id("scoreHistoryList") {
                let lines = frame.history.display_lines();
                let html = if lines.is_empty() {
                    "<p>No runs recorded yet.</p>".to_string()
                } else {
                    let items: String = lines.iter().map(|l| format!("<p>{}</p>", l)).collect();
                    format!("<h3>Recent runs</h3>{}", items)
                };
                el.set_inner_html(&html);
            }
        }
    }

    fn set_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            if active {
                classes.add_1("active").ok();
            } else {
                classes.remove_1("active").ok();
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Corgi Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(corgi_run::consts::FIELD_WIDTH as u32);
        canvas.set_height(corgi_run::consts::FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let audio = WebAudio::new(settings.sfx_volume, settings.music_volume);
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(seed, settings, ScoreHistory::load(), audio);

        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer::new(ctx, &document),
            last_time: 0.0,
            last_phase: None,
            last_score: None,
            last_lives: None,
        }));

        setup_input_handlers(app.clone());
        setup_volume_sliders(&document, app.clone());

        request_animation_frame(app);

        log::info!("Corgi Run running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        for (event_name, edge) in [("keydown", KeyEdge::Down), ("keyup", KeyEdge::Up)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if a.game.handle_key(&event.code(), edge) {
                    // Keep Space/arrows from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_volume_sliders(document: &Document, app: Rc<RefCell<App>>) {
        for (id, channel) in [("sfxSlider", Channel::Effects), ("bgmSlider", Channel::Music)] {
            let Some(slider) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };

            let current = app.borrow().game.settings().volume(channel);
            slider.set_value(&current.to_string());

            let app = app.clone();
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Ok(level) = input.value().parse::<f32>() {
                    app.borrow_mut().game.set_volume(channel, level);
                }
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Corgi Run (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - use the wasm build to play");

    demo::run(3);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless attract mode: the autopilot plays a few runs and logs the scores
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use corgi_run::audio::RecordingAudio;
    use corgi_run::render::{DrawListRenderer, Renderer};
    use corgi_run::sim::autopilot;
    use corgi_run::sim::{GamePhase, TickOutcome};
    use corgi_run::{Cue, Game, ScoreHistory, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Stop a run after this long even if the autopilot is still alive
    const MAX_RUN_SECS: f32 = 180.0;

    pub fn run(runs: u32) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut game = Game::new(
            seed,
            Settings::default(),
            ScoreHistory::load(),
            RecordingAudio::new(),
        );
        let mut renderer = DrawListRenderer::default();

        for run in 1..=runs {
            // Jump starts (or restarts) a run
            game.handle(corgi_run::input::Command::Jump);
            let mut time = 0.0;

            while game.phase() == GamePhase::Playing && time < MAX_RUN_SECS {
                if let Some(command) = autopilot::decide(game.state()) {
                    game.handle(command);
                }
                let outcome = game.update(FRAME_DT);
                renderer.render(&game.frame());
                time += FRAME_DT;
                if outcome == TickOutcome::GameOver {
                    break;
                }
            }

            log::info!(
                "Run {}: score {} in {:.1}s, speed {:.0}, lives {}",
                run,
                game.state().score,
                time,
                game.state().game_speed,
                game.state().lives
            );
        }

        let audio = game.audio();
        println!(
            "Played {} runs ({} frames). Jumps: {}, hits: {}, hearts: {}",
            runs,
            renderer.frames,
            audio.count(Cue::Jump),
            audio.count(Cue::Hit),
            audio.count(Cue::Heart)
        );
        for line in game.history().display_lines() {
            println!("  {}", line);
        }
        println!("Best: {}", game.best_score());
    }
}
