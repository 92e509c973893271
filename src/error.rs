use thiserror::Error;

/// Errors returned by widgets, windows and backends.
///
/// None of these are transient: they are programming errors or platform failures, and nothing in the crate retries them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unrecognized widget state {0:?}, expected \"enabled\" or \"disabled\"")]
    InvalidState(String),

    #[error("invalid color {0:?}, expected \"#RRGGBB\" or \"#RRGGBBAA\"")]
    InvalidColor(String),

    #[error("{widget} requires the `{attribute}` attribute")]
    MissingAttribute {
        widget: &'static str,
        attribute: &'static str,
    },

    #[error("{widget} does not support the `{attribute}` attribute")]
    UnsupportedAttribute {
        widget: &'static str,
        attribute: &'static str,
    },

    #[error("invalid geometry for {widget}: {reason}")]
    InvalidGeometry {
        widget: &'static str,
        reason: &'static str,
    },

    #[error("value inserted under {0:?} is not a widget")]
    NotAWidget(String),

    #[error("no widget registered under {0:?}")]
    MissingWidget(String),

    #[error("no sound registered under {0:?}")]
    UnknownSound(String),

    #[error("no music registered under {0:?}")]
    UnknownMusic(String),

    #[error("`{0}` is read-only")]
    ReadOnly(&'static str),

    #[error("this window is already running")]
    AlreadyRunning,

    #[error("font error: {0}")]
    Font(&'static str),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error(transparent)]
    Os(#[from] winit::error::OsError),

    #[error(transparent)]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error(transparent)]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error(transparent)]
    Surface(#[from] wgpu::SurfaceError),

    #[error("no graphics adapter can present to this window")]
    NoAdapter,

    #[error("the platform closed the event loop before a window was created")]
    NoWindow,

    #[error("audio error: {0}")]
    Audio(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad constructor or `configure` input.
    Construction,
    /// Something that isn't a widget was put into a window.
    Type,
    /// A key or name that was never registered.
    Lookup,
    /// An operation that is never allowed.
    Permission,
    /// Window system, GPU or audio device failure.
    Platform,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidState(_)
            | Error::InvalidColor(_)
            | Error::MissingAttribute { .. }
            | Error::UnsupportedAttribute { .. }
            | Error::InvalidGeometry { .. }
            | Error::Font(_)
            | Error::Image(_)
            | Error::Io(_) => return ErrorKind::Construction,
            Error::NotAWidget(_) => return ErrorKind::Type,
            Error::MissingWidget(_) | Error::UnknownSound(_) | Error::UnknownMusic(_) => {
                return ErrorKind::Lookup;
            }
            Error::ReadOnly(_) | Error::AlreadyRunning => return ErrorKind::Permission,
            Error::EventLoop(_)
            | Error::Os(_)
            | Error::CreateSurface(_)
            | Error::RequestDevice(_)
            | Error::Surface(_)
            | Error::NoAdapter
            | Error::NoWindow
            | Error::Audio(_) => return ErrorKind::Platform,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
