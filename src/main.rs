//! Alien Invasion entry point
//!
//! Web: WebGPU canvas with DOM text overlays, driven by requestAnimationFrame.
//! Native: headless demo run under the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use alien_invasion::consts::FRAME_RATE;
    use alien_invasion::platform::{FixedAdvance, InputEvent, Key};
    use alien_invasion::renderer::pipeline::init_canvas;
    use alien_invasion::renderer::{FrameCanvas, RenderState};
    use alien_invasion::{Flow, Game, Settings};

    /// Simulation steps allowed per animation frame before dropping time
    const MAX_SUBSTEPS: u32 = 4;

    /// Browser monospace glyphs are roughly 0.6em wide
    const WEB_METRICS: FixedAdvance = FixedAdvance {
        advance: 0.6,
        line_height: 1.0,
    };

    struct WebGame {
        game: Game,
        render_state: RenderState,
        frame: FrameCanvas,
        canvas: HtmlCanvasElement,
        overlay: Element,
        /// One div per label slot, with the last text/style written to it
        label_nodes: Vec<(Element, String, String)>,
        /// Events queued by DOM listeners since the last step
        pending: Vec<InputEvent>,
        accumulator: f64,
        last_time: f64,
        /// Timestamp (ms) before which the loop only waits
        frozen_until: f64,
        cursor_hidden: bool,
    }

    impl WebGame {
        /// Step at the fixed frame rate regardless of display refresh
        fn update(&mut self, time: f64) -> Flow {
            let step = 1000.0 / FRAME_RATE as f64;
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).min(250.0)
            } else {
                step
            };
            self.last_time = time;
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= step && substeps < MAX_SUBSTEPS {
                self.accumulator -= step;
                substeps += 1;

                let events = std::mem::take(&mut self.pending);
                match self.game.update(&events) {
                    Flow::Continue => {}
                    flow => {
                        self.accumulator = 0.0;
                        return flow;
                    }
                }
            }
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
            Flow::Continue
        }

        fn render(&mut self) {
            self.game.render(&mut self.frame);
            match self
                .render_state
                .render(self.frame.clear, &self.frame.vertices)
            {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
            self.sync_labels();
            self.sync_cursor();
        }

        /// Mirror this frame's labels into absolutely positioned divs
        fn sync_labels(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            for (i, label) in self.frame.labels.iter().enumerate() {
                if i == self.label_nodes.len() {
                    let Ok(node) = document.create_element("div") else {
                        return;
                    };
                    let _ = self.overlay.append_child(&node);
                    self.label_nodes.push((node, String::new(), String::new()));
                }

                let style = format!(
                    "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
                     font:{}px monospace;line-height:{}px;color:{};background:{};\
                     white-space:pre;text-align:center;",
                    label.rect.x,
                    label.rect.y,
                    label.rect.w,
                    label.rect.h,
                    label.font_size,
                    label.rect.h,
                    label.color.to_css(),
                    label
                        .background
                        .map_or_else(|| "transparent".to_string(), |c| c.to_css()),
                );

                let (node, text, last_style) = &mut self.label_nodes[i];
                if *text != label.text {
                    node.set_text_content(Some(&label.text));
                    *text = label.text.clone();
                }
                if *last_style != style {
                    let _ = node.set_attribute("style", &style);
                    *last_style = style;
                }
            }

            // Hide slots this frame did not use
            for (node, text, style) in self.label_nodes.iter_mut().skip(self.frame.labels.len()) {
                if !text.is_empty() || !style.is_empty() {
                    node.set_text_content(None);
                    let _ = node.set_attribute("style", "display:none;");
                    text.clear();
                    style.clear();
                }
            }
        }

        fn sync_cursor(&mut self) {
            let hide = !self.game.cursor_visible();
            if hide != self.cursor_hidden {
                let _ = self
                    .canvas
                    .style()
                    .set_property("cursor", if hide { "none" } else { "default" });
                self.cursor_hidden = hide;
            }
        }
    }

    fn map_key(event: &KeyboardEvent) -> Key {
        match event.key().as_str() {
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            " " => Key::Space,
            "q" | "Q" => Key::Q,
            other => Key::Other(other.chars().next().map_or(0, u32::from)),
        }
    }

    /// Transparent layer over the canvas that holds label divs
    fn create_overlay(document: &Document, canvas: &HtmlCanvasElement) -> Result<Element, JsValue> {
        let overlay = document.create_element("div")?;
        overlay.set_attribute(
            "style",
            "position:absolute;left:0;top:0;pointer-events:none;",
        )?;
        if let Some(parent) = canvas.parent_element() {
            parent.set_attribute("style", "position:relative;display:inline-block;")?;
            parent.append_child(&overlay)?;
        }
        Ok(overlay)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Alien Invasion starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let screen = settings.screen_rect();
        let (width, height) = (screen.w as u32, screen.h as u32);
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.style().set_property("width", &format!("{width}px"))?;
        canvas.style().set_property("height", &format!("{height}px"))?;

        let render_state = init_canvas(canvas.clone(), width, height)
            .await
            .map_err(|e| JsValue::from_str(&e))?;
        let overlay = create_overlay(&document, &canvas)?;

        let web = Rc::new(RefCell::new(WebGame {
            game: Game::with_metrics(settings, Box::new(WEB_METRICS)),
            render_state,
            frame: FrameCanvas::new(screen),
            canvas: canvas.clone(),
            overlay,
            label_nodes: Vec::new(),
            pending: Vec::new(),
            accumulator: 0.0,
            last_time: 0.0,
            frozen_until: 0.0,
            cursor_hidden: false,
        }));

        setup_input_handlers(&canvas, web.clone())?;
        request_animation_frame(web);

        log::info!("Alien Invasion running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        web: Rc<RefCell<WebGame>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = map_key(&event);
                if matches!(key, Key::Left | Key::Right | Key::Space) {
                    event.prevent_default();
                }
                web.borrow_mut().pending.push(InputEvent::KeyDown(key));
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let web = web.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = map_key(&event);
                web.borrow_mut().pending.push(InputEvent::KeyUp(key));
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse, scaled from CSS pixels to screen pixels
        {
            let web = web.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client_w = target.client_width().max(1) as f64;
                let client_h = target.client_height().max(1) as f64;
                let x = event.offset_x() as f64 * target.width() as f64 / client_w;
                let y = event.offset_y() as f64 * target.height() as f64 / client_h;
                web.borrow_mut().pending.push(InputEvent::MouseDown {
                    x: x as i32,
                    y: y as i32,
                });
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Closing the tab is the window-close request
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                web.borrow_mut().pending.push(InputEvent::Quit);
            });
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(web: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(web, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(web: Rc<RefCell<WebGame>>, time: f64) {
        {
            let mut w = web.borrow_mut();

            if time < w.frozen_until {
                // Keep input queued and the frozen frame on screen
                w.last_time = time;
            } else {
                match w.update(time) {
                    Flow::Exit => {
                        log::info!("Quit requested; stopping the frame loop");
                        return;
                    }
                    Flow::Freeze(pause) => {
                        w.frozen_until = time + pause.as_secs_f64() * 1000.0;
                    }
                    Flow::Continue => {}
                }
                w.render();
            }
        }

        request_animation_frame(web);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// One minute of play at the fixed frame rate
#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * alien_invasion::consts::FRAME_RATE as u64;

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(name = "alien-invasion")]
#[command(about = "Run a headless Alien Invasion session under the autopilot")]
struct DemoArgs {
    /// Frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,

    /// Throttle to the real frame rate instead of virtual time
    #[arg(long)]
    realtime: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use alien_invasion::platform::{HeadlessPlatform, run_frame};
    use alien_invasion::sim::autopilot::Autopilot;
    use alien_invasion::{Flow, Game, Settings};
    use clap::Parser;

    env_logger::init();

    let args = DemoArgs::parse();

    log::info!("Alien Invasion (headless) starting, {} frames", args.frames);

    let mut game = Game::new(Settings::load());
    let mut platform = HeadlessPlatform::new();
    if args.realtime {
        platform = platform.realtime();
    }
    let mut pilot = Autopilot::new();

    for _ in 0..args.frames {
        platform.push_frame(pilot.events(game.state(), game.play_button_rect()));
        if run_frame(&mut game, &mut platform) == Flow::Exit {
            log::info!("Quit requested");
            std::process::exit(0);
        }
    }

    println!(
        "frames {}  active ticks {}  score {}  high score {}  ships left {}  phase {:?}  simulated {:.1}s",
        platform.frames_presented,
        game.state().time_ticks,
        game.score(),
        game.high_score(),
        game.ships_left(),
        game.phase(),
        platform.elapsed.as_secs_f64()
    );
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(list: &[&str]) -> Result<DemoArgs, clap::Error> {
        DemoArgs::try_parse_from(std::iter::once("alien-invasion").chain(list.iter().copied()))
    }

    #[test]
    fn test_demo_args() {
        assert_eq!(
            args(&[]).unwrap(),
            DemoArgs {
                frames: 3600,
                realtime: false
            }
        );
        assert_eq!(
            args(&["--frames", "10", "--realtime"]).unwrap(),
            DemoArgs {
                frames: 10,
                realtime: true
            }
        );
        assert!(args(&["--frames"]).is_err());
        assert!(args(&["--frames", "x"]).is_err());
        assert!(args(&["--fast"]).is_err());
    }
}
