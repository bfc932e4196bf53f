//! Window shell on [winit](https://crates.io/crates/winit).
//!
//! [`App`] opens one window and drives an [`Engine`] from the winit event
//! loop; an [`AppHandler`] supplies the per-frame logic. The handler is built
//! only once the window exists, and gets [`AppHandler::on_exit`] before the
//! loop shuts down, which is where mount-scoped work should be torn down.
//!
//! ```rust,ignore
//! use myth_avatar::app::winit::{App, AppHandler, Window};
//! use myth_avatar::engine::{Engine, FrameState};
//! use std::sync::Arc;
//!
//! struct Viewer;
//!
//! impl AppHandler for Viewer {
//!     fn init(_engine: &mut Engine, _window: &Arc<Window>) -> Self {
//!         Viewer
//!     }
//! }
//!
//! fn main() -> myth_avatar::errors::Result<()> {
//!     App::new().with_title("Avatar").run::<Viewer>()
//! }
//! ```

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::engine::{Engine, FrameState};
use crate::errors::{Error, Result};
use crate::utils::Timer;

pub mod input_adapter;

/// Application logic driven by [`App`].
///
/// Call order: `init` once, then `on_event` and `update` interleaved as
/// events and frames arrive, then `on_exit` once.
pub trait AppHandler: Sized + 'static {
    fn init(engine: &mut Engine, window: &Arc<Window>) -> Self;

    /// Sees every window event first. Returning `true` stops the event from
    /// reaching input tracking and the default close handling.
    #[allow(unused_variables)]
    fn on_event(&mut self, engine: &mut Engine, window: &Arc<Window>, event: &WindowEvent) -> bool {
        false
    }

    /// Runs once per frame, before the engine propagates transforms.
    #[allow(unused_variables)]
    fn update(&mut self, engine: &mut Engine, window: &Arc<Window>, frame: &FrameState) {}

    #[allow(unused_variables)]
    fn on_exit(&mut self, engine: &mut Engine) {}
}

type InitFn<H> = Box<dyn FnOnce(&mut Engine, &Arc<Window>) -> H>;

/// Window settings and entry point.
pub struct App {
    title: String,
    width: u32,
    height: u32,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Myth Avatar".into(),
            width: 1280,
            height: 720,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial inner size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Blocks on the event loop until the window closes.
    pub fn run<H: AppHandler>(self) -> Result<()> {
        self.run_with(H::init)
    }

    /// Like [`run`](Self::run), but builds the handler with `init`, which may
    /// capture state prepared before the window exists.
    pub fn run_with<H, F>(self, init: F) -> Result<()>
    where
        H: AppHandler,
        F: FnOnce(&mut Engine, &Arc<Window>) -> H + 'static,
    {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut shell = Shell::<H> {
            settings: self,
            init: Some(Box::new(init)),
            session: None,
        };
        event_loop.run_app(&mut shell).map_err(Error::from)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything that exists only while the window is open.
struct Session<H> {
    window: Arc<Window>,
    engine: Engine,
    handler: H,
    clock: Timer,
}

impl<H: AppHandler> Session<H> {
    fn frame(&mut self) {
        self.clock.tick();
        let frame = FrameState::from_clock(&self.clock, self.engine.frame_count());

        self.handler.update(&mut self.engine, &self.window, &frame);
        self.engine.update(frame.dt);

        self.window.request_redraw();
    }
}

struct Shell<H> {
    settings: App,
    init: Option<InitFn<H>>,
    session: Option<Session<H>>,
}

impl<H: AppHandler> ApplicationHandler for Shell<H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        let Some(init) = self.init.take() else {
            return;
        };

        let attributes = Window::default_attributes()
            .with_title(&self.settings.title)
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let mut engine = Engine::new();
        engine.resize(size.width, size.height);
        let handler = init(&mut engine, &window);
        log::info!("Window ready ({}x{})", size.width, size.height);

        self.session = Some(Session {
            window,
            engine,
            handler,
            clock: Timer::new(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(session) = &mut self.session else {
            return;
        };

        let consumed = session
            .handler
            .on_event(&mut session.engine, &session.window, &event);
        if !consumed {
            input_adapter::process_window_event(&mut session.engine.input, &event);
        }

        // Resize and redraw keep the engine consistent even when the handler
        // swallowed the event.
        match event {
            WindowEvent::Resized(size) => session.engine.resize(size.width, size.height),
            WindowEvent::RedrawRequested => session.frame(),
            WindowEvent::CloseRequested if !consumed => event_loop.exit(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &mut self.session {
            session.handler.on_exit(&mut session.engine);
        }
        log::info!("Event loop exiting");
    }
}
