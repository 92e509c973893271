//! A small retained-mode GUI toolkit for touchscreen kiosks.
//!
//! ## Example
//!
//! ```no_run
//! # use touchgui::*;
//! # fn main() -> Result<()> {
//! let backend = WinitBackend::new(ScreenConfig::default())?;
//! let mut screen = Screen::new(backend)?;
//!
//! let mut window = Window::new(Color::hex("#101010")?);
//! window.insert("hello", Label::new(Params::new().position(20, 20).size(200, 40).text("Hello"))?);
//! window.insert("quit", Button::new(
//!     Params::new().position(20, 80).size(120, 50).text("Quit").onclick(Callback::stop()),
//! )?);
//!
//! window.run(&mut screen)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Window loop
//!
//! A [`Window`] owns its widgets, by key. [`Window::run`] then repeats the same frame until the window is stopped:
//!
//! - clear the [`Screen`] to the window's background and draw every widget
//! - feed the frame's input events to every widget
//! - invoke the callbacks of the widgets that were clicked, then the tick callbacks, then the deferred callbacks that are due
//! - present the frame and wait for the next one
//!
//! Callbacks receive a [`Context`], through which they can change the window, or run a second window on the same screen.
//! The first window is suspended until the second one stops, which is how modal screens work.
//!
//! ## Backends
//!
//! A [`Screen`] gets its events from a [`Backend`] and gives it back finished frames. [`WinitBackend`] opens a real window,
//! while [`HeadlessBackend`] replays scripted events, which is what the tests use.

mod error;
pub use error::*;

mod color;
pub use color::*;

mod math;
pub use math::*;

pub mod surface;
pub use surface::{Mask, Surface};

pub mod text;
pub use text::Font;

mod string_edit;

mod input;
pub use input::*;

mod callback;
pub use callback::*;

mod clock;
pub use clock::*;

mod schedule;
pub use schedule::*;

mod params;
pub use params::*;

mod widgets;
pub use widgets::*;

mod window;
pub use window::*;

mod screen;
pub use screen::*;

mod headless;
pub use headless::*;

mod audio;
pub use audio::*;

pub mod assets;
pub use assets::AssetFolders;

mod present;

mod winit_events;
pub use winit_events::*;

mod winit_backend;
pub use winit_backend::*;

/// Sets up `env_logger` with sensible defaults: warnings from everything, info from this crate.
///
/// `RUST_LOG` still overrides both. Calling it twice does nothing.
pub fn basic_env_logger_init() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("touchgui", log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
