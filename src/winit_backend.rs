//! The desktop [`Backend`]: a `winit` window, with frames put on screen by `wgpu`.
//!
//! The window loop drives the frame rate, so the `winit` event loop is pumped once per frame instead of owning the thread.

use std::sync::Arc;
use std::time::Duration;

use glam::UVec2;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorIcon, Fullscreen, Window as WinitWindow, WindowId as WinitWindowId};

use crate::present::{Presenter, basic_wgpu_init};
use crate::*;

/// How the platform window is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub title: String,
    /// `None` lets the platform pick.
    pub size: Option<UVec2>,
    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        return ScreenConfig {
            title: "touchgui".to_string(),
            size: None,
            fullscreen: true,
        };
    }
}

struct App {
    config: ScreenConfig,
    presenter: Option<Presenter>,
    translator: EventTranslator,
    events: Vec<InputEvent>,
    init_error: Option<Error>,
    torn_down: bool,
}

impl App {
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let mut attributes = WinitWindow::default_attributes().with_title(self.config.title.clone());
        if let Some(size) = self.config.size {
            attributes = attributes.with_inner_size(PhysicalSize::new(size.x, size.y));
        }
        if self.config.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(attributes)?);
        let (instance, device, queue) = basic_wgpu_init()?;
        self.presenter = Some(Presenter::new(&instance, device, queue, window)?);
        return Ok(());
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if self.presenter.is_some() || self.torn_down {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            log::error!("Couldn't open the window: {}", err);
            self.init_error = Some(err);
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WinitWindowId, event: WindowEvent) {
        match &event {
            WindowEvent::RedrawRequested => return,
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(UVec2::new(size.width, size.height));
                }
            }
            _ => {}
        }
        if let Some(input) = self.translator.translate(&event) {
            self.events.push(input);
        }
    }
}

/// A [`Backend`] that opens a real window.
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    app: App,
}

impl WinitBackend {
    /// Opens the window and waits until it can be drawn on.
    pub fn new(config: ScreenConfig) -> Result<Self> {
        let mut event_loop = EventLoop::new()?;
        let mut app = App {
            config,
            presenter: None,
            translator: EventTranslator::default(),
            events: Vec::new(),
            init_error: None,
            torn_down: false,
        };

        // Some platforms only send `resumed` after a few rounds.
        for _ in 0..100 {
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut app) {
                log::warn!("The event loop exited with code {} before the window opened", code);
                break;
            }
            if let Some(err) = app.init_error.take() {
                return Err(err);
            }
            if app.presenter.is_some() {
                break;
            }
        }
        if app.presenter.is_none() {
            return Err(Error::NoWindow);
        }

        return Ok(WinitBackend { event_loop, app });
    }
}

impl Backend for WinitBackend {
    fn size(&self) -> UVec2 {
        match &self.app.presenter {
            Some(presenter) => return presenter.size(),
            None => return UVec2::ONE,
        }
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let Some(err) = self.app.init_error.take() {
            return Err(err);
        }
        let mut events = std::mem::take(&mut self.app.events);
        if let PumpStatus::Exit(_) = status {
            events.push(InputEvent::Quit);
        }
        return Ok(events);
    }

    fn present(&mut self, surface: &Surface) -> Result<()> {
        match &mut self.app.presenter {
            Some(presenter) => return presenter.present(surface),
            None => return Err(Error::NoWindow),
        }
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        let icon = match cursor {
            CursorKind::Default => CursorIcon::Default,
            CursorKind::Pointer => CursorIcon::Pointer,
        };
        if let Some(presenter) = &self.app.presenter {
            presenter.window().set_cursor(icon);
        }
    }

    fn teardown(&mut self) {
        self.app.torn_down = true;
        self.app.presenter = None;
    }
}
