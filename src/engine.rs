use crate::config::SketchConfig;
use crate::input::{Shape, StrokeState, Tool};
use crate::pixels::PixelBuffer;
use crate::preview::{PreviewController, ToolOutcome};
use crate::raster::Point;
use crate::shapes::ShapeRenderer;
use crate::state::SubscriptionId;
use crate::ticker::Ticker;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The pixel buffer changed; present it.
    RenderNeeded,
    /// The active tool changed; refresh any tool label.
    ToolChanged(Tool),
    /// The buffer was frozen as the new committed baseline.
    Committed,
}

/// One drawing surface: pixel buffer, preview state and clock ticker.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Each handler runs to completion and leaves the buffer consistent.
#[derive(Debug)]
pub struct Session {
    buffer: PixelBuffer,
    preview: PreviewController,
    ticker: Ticker,
    config: SketchConfig,
}

impl Session {
    /// A blank session of `width` x `height` pixels with the line tool active.
    #[must_use]
    pub fn new(width: u32, height: u32, config: SketchConfig, now_ms: i64) -> Self {
        let mut ticker = Ticker::new(config.tick_interval_ms, now_ms);
        ticker.cancel();
        Self {
            buffer: PixelBuffer::new(width, height),
            preview: PreviewController::new(ShapeRenderer::from_config(&config)),
            ticker,
            config,
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, x: i32, y: i32) -> Vec<Action> {
        if self.preview.pointer_down(&mut self.buffer, Point::new(x, y)) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_move(&mut self, x: i32, y: i32, now_ms: i64) -> Vec<Action> {
        if self.preview.pointer_move(&mut self.buffer, Point::new(x, y), now_ms) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.preview.pointer_up(&mut self.buffer);
        vec![Action::Committed, Action::RenderNeeded]
    }

    /// Select a tool by its button id. Unknown ids are logged and ignored.
    pub fn on_tool_select(&mut self, tool_id: &str, now_ms: i64) -> Vec<Action> {
        match tool_id.parse::<Tool>() {
            Ok(tool) => self.select_tool(tool, now_ms),
            Err(e) => {
                tracing::warn!(error = %e, "tool selection ignored");
                Vec::new()
            }
        }
    }

    pub fn select_tool(&mut self, tool: Tool, now_ms: i64) -> Vec<Action> {
        match self.preview.select_tool(&mut self.buffer, tool) {
            ToolOutcome::Unchanged => Vec::new(),
            ToolOutcome::Cleared => vec![Action::Committed, Action::RenderNeeded],
            ToolOutcome::Switched { to, .. } => {
                if to == Shape::Clock {
                    self.ticker.resume(now_ms);
                } else {
                    self.ticker.cancel();
                }
                vec![Action::ToolChanged(Tool::from(to)), Action::RenderNeeded]
            }
        }
    }

    /// Drive the clock ticker. Call as often as convenient.
    pub fn poll(&mut self, now_ms: i64) -> Vec<Action> {
        if self.ticker.poll(now_ms) && self.preview.tick(&mut self.buffer, now_ms) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Observers ---

    pub fn subscribe(&mut self, subscriber: impl FnMut(&StrokeState, &StrokeState) + 'static) -> SubscriptionId {
        self.preview.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.preview.unsubscribe(id)
    }

    // --- Queries ---

    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewController {
        &self.preview
    }

    #[must_use]
    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        Tool::from(self.preview.shape())
    }

    /// Text for the host's current-tool label.
    #[must_use]
    pub fn tool_label(&self) -> String {
        format!("Current Shape: {}", self.tool())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::Engine;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::str::FromStr;

    use gloo_timers::callback::Interval;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::{Clamped, JsCast};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

    use super::{Action, Session};
    use crate::config::SketchConfig;
    use crate::ticker::{BrowserTime, TimeSource};

    /// The browser-facing engine. Wraps a shared [`Session`] and the canvas context.
    #[wasm_bindgen]
    pub struct Engine {
        session: Rc<RefCell<Session>>,
        ctx: Rc<CanvasRenderingContext2d>,
        header_height: i32,
        // Dropping the interval cancels it.
        _ticker: Interval,
    }

    #[wasm_bindgen]
    impl Engine {
        /// Size `canvas` to the window, bind a 2D context and start the clock ticker.
        ///
        /// # Errors
        ///
        /// Returns `Err` for an invalid config or when no 2D context is available.
        #[wasm_bindgen(constructor)]
        pub fn new(canvas: HtmlCanvasElement, config_json: Option<String>) -> Result<Engine, JsValue> {
            let config = match config_json {
                Some(raw) => SketchConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))?,
                None => SketchConfig::default(),
            };
            init_logging(&config.log_level);

            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let inner_w = window.inner_width()?.as_f64().unwrap_or(0.0);
            let inner_h = window.inner_height()?.as_f64().unwrap_or(0.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (width, height) = config.canvas_size(inner_w as u32, inner_h as u32);
            canvas.set_width(width);
            canvas.set_height(height);

            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            let ctx = Rc::new(ctx);

            let header_height = config.header_height;
            // Poll well inside the tick period so timer jitter never skips a tick.
            let poll_ms = (config.tick_interval_ms / 4).max(1);
            let session = Rc::new(RefCell::new(Session::new(width, height, config, BrowserTime.now_ms())));

            let tick_session = Rc::clone(&session);
            let tick_ctx = Rc::clone(&ctx);
            let ticker = Interval::new(poll_ms, move || {
                let Ok(mut session) = tick_session.try_borrow_mut() else {
                    tracing::warn!("tick skipped: session busy");
                    return;
                };
                let actions = session.poll(BrowserTime.now_ms());
                if let Err(e) = present_if_needed(&tick_ctx, &session, &actions) {
                    tracing::warn!(error = ?e, "present failed");
                }
            });

            tracing::info!(width, height, "sketchpad engine ready");
            Ok(Engine { session, ctx, header_height, _ticker: ticker })
        }

        /// Pointer pressed at page coordinates.
        ///
        /// # Errors
        ///
        /// Returns `Err` if presenting the buffer fails.
        pub fn on_pointer_down(&self, page_x: i32, page_y: i32) -> Result<(), JsValue> {
            let y = page_y - self.header_height;
            self.dispatch(|s| s.on_pointer_down(page_x, y))
        }

        /// Pointer moved to page coordinates.
        ///
        /// # Errors
        ///
        /// Returns `Err` if presenting the buffer fails.
        pub fn on_pointer_move(&self, page_x: i32, page_y: i32) -> Result<(), JsValue> {
            let y = page_y - self.header_height;
            self.dispatch(|s| s.on_pointer_move(page_x, y, BrowserTime.now_ms()))
        }

        /// Pointer released.
        ///
        /// # Errors
        ///
        /// Returns `Err` if presenting the buffer fails.
        pub fn on_pointer_up(&self) -> Result<(), JsValue> {
            self.dispatch(Session::on_pointer_up)
        }

        /// A toolbar button was clicked.
        ///
        /// # Errors
        ///
        /// Returns `Err` if presenting the buffer fails.
        pub fn on_tool_select(&self, tool_id: &str) -> Result<(), JsValue> {
            self.dispatch(|s| s.on_tool_select(tool_id, BrowserTime.now_ms()))
        }

        /// Text for the current-tool label.
        #[must_use]
        pub fn tool_label(&self) -> String {
            self.session.borrow().tool_label()
        }
    }

    impl Engine {
        fn dispatch(&self, f: impl FnOnce(&mut Session) -> Vec<Action>) -> Result<(), JsValue> {
            let Ok(mut session) = self.session.try_borrow_mut() else {
                tracing::warn!("event dropped: session busy");
                return Ok(());
            };
            let actions = f(&mut session);
            present_if_needed(&self.ctx, &session, &actions)
        }
    }

    /// Blit the whole buffer when any action asks for a render.
    fn present_if_needed(ctx: &CanvasRenderingContext2d, session: &Session, actions: &[Action]) -> Result<(), JsValue> {
        if !actions.contains(&Action::RenderNeeded) {
            return Ok(());
        }
        let buf = session.buffer();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(buf.as_bytes()), buf.width(), buf.height())?;
        ctx.put_image_data(&image, 0.0, 0.0)
    }

    fn init_logging(level: &str) {
        console_error_panic_hook::set_once();
        let level = log::Level::from_str(level).unwrap_or(log::Level::Info);
        if let Err(e) = console_log::init_with_level(level) {
            tracing::debug!(error = %e, "logger already installed");
        }
    }
}
