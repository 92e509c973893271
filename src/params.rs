use std::{path::PathBuf, str::FromStr};

use glam::{IVec2, UVec2};

use crate::*;

bitflags::bitflags! {
    /// A set of widget attributes. Used to describe which attributes a [`Params`] sets, and which ones a widget supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attrs: u32 {
        const POSITION     = 1 << 0;
        const SIZE         = 1 << 1;
        const TEXT         = 1 << 2;
        const FG           = 1 << 3;
        const BG           = 1 << 4;
        const TEXT_SIZE    = 1 << 5;
        const TEXT_OFFSET  = 1 << 6;
        const TRANSPARENCY = 1 << 7;
        const STATE        = 1 << 8;
        const ONCLICK      = 1 << 9;
        const FONT         = 1 << 10;
        const PATH         = 1 << 11;
        const IMAGE        = 1 << 12;
        const RESIZE       = 1 << 13;
        const START        = 1 << 14;
        const END          = 1 << 15;
        const COLOR        = 1 << 16;
        const WIDTH        = 1 << 17;
        const POINTS       = 1 << 18;
        const FILL         = 1 << 19;
    }
}

impl Attrs {
    const NAMES: &'static [(Attrs, &'static str)] = &[
        (Attrs::POSITION, "position"),
        (Attrs::SIZE, "size"),
        (Attrs::TEXT, "text"),
        (Attrs::FG, "fg"),
        (Attrs::BG, "bg"),
        (Attrs::TEXT_SIZE, "text_size"),
        (Attrs::TEXT_OFFSET, "text_offset"),
        (Attrs::TRANSPARENCY, "transparency"),
        (Attrs::STATE, "state"),
        (Attrs::ONCLICK, "onclick"),
        (Attrs::FONT, "font"),
        (Attrs::PATH, "path"),
        (Attrs::IMAGE, "image"),
        (Attrs::RESIZE, "resize"),
        (Attrs::START, "start"),
        (Attrs::END, "end"),
        (Attrs::COLOR, "color"),
        (Attrs::WIDTH, "width"),
        (Attrs::POINTS, "points"),
        (Attrs::FILL, "fill"),
    ];

    /// The name of the first attribute in the set, in declaration order.
    pub fn first_name(self) -> Option<&'static str> {
        return Self::NAMES.iter().find(|(flag, _)| self.contains(*flag)).map(|(_, name)| *name);
    }
}

/// Whether a clickable widget reacts to input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetState {
    #[default]
    Enabled,
    /// Drawn with a dark veil on top, and never fires its callback.
    Disabled,
}

impl FromStr for WidgetState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enabled" => return Ok(WidgetState::Enabled),
            "disabled" => return Ok(WidgetState::Disabled),
            other => return Err(Error::InvalidState(other.to_string())),
        }
    }
}

/// A partial set of widget attributes.
///
/// Passed to widget constructors, where unset attributes take their defaults, and to `configure`,
/// where unset attributes are left as they are. Setting an attribute the widget doesn't have is an error.
///
/// ```
/// # use touchgui::*;
/// let params = Params::new()
///     .position(400, 0)
///     .size(200, 100)
///     .bg(Color::GREEN)
///     .fg(Color::BLUE)
///     .text_size(50.0);
/// assert!(params.attrs().contains(Attrs::POSITION | Attrs::SIZE));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub position: Option<IVec2>,
    pub size: Option<UVec2>,
    pub text: Option<String>,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub text_size: Option<f32>,
    pub text_offset: Option<IVec2>,
    pub transparency: Option<u8>,
    pub state: Option<WidgetState>,
    pub onclick: Option<Callback>,
    pub font: Option<Font>,
    pub path: Option<PathBuf>,
    pub image: Option<Surface>,
    pub resize: Option<UVec2>,
    pub start: Option<IVec2>,
    pub end: Option<IVec2>,
    pub color: Option<Color>,
    pub width: Option<f32>,
    pub points: Option<Vec<IVec2>>,
    pub fill: Option<bool>,
}

impl Params {
    pub fn new() -> Self {
        return Self::default();
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(IVec2::new(x, y));
        return self;
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some(UVec2::new(width, height));
        return self;
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        return self;
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        return self;
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        return self;
    }

    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);
        return self;
    }

    pub fn text_offset(mut self, x: i32, y: i32) -> Self {
        self.text_offset = Some(IVec2::new(x, y));
        return self;
    }

    /// 0 is fully transparent, 255 fully opaque.
    pub fn transparency(mut self, alpha: u8) -> Self {
        self.transparency = Some(alpha);
        return self;
    }

    pub fn state(mut self, state: WidgetState) -> Self {
        self.state = Some(state);
        return self;
    }

    /// Parses `"enabled"` or `"disabled"`.
    pub fn state_str(self, state: &str) -> Result<Self> {
        return Ok(self.state(state.parse()?));
    }

    pub fn onclick(mut self, callback: Callback) -> Self {
        self.onclick = Some(callback);
        return self;
    }

    pub fn font(mut self, font: &Font) -> Self {
        self.font = Some(font.clone());
        return self;
    }

    /// An image file to load.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        return self;
    }

    /// An already decoded image. Takes priority over `path` if both are set.
    pub fn image(mut self, image: Surface) -> Self {
        self.image = Some(image);
        return self;
    }

    pub fn resize(mut self, width: u32, height: u32) -> Self {
        self.resize = Some(UVec2::new(width, height));
        return self;
    }

    pub fn start(mut self, x: i32, y: i32) -> Self {
        self.start = Some(IVec2::new(x, y));
        return self;
    }

    pub fn end(mut self, x: i32, y: i32) -> Self {
        self.end = Some(IVec2::new(x, y));
        return self;
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        return self;
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        return self;
    }

    pub fn points(mut self, points: impl IntoIterator<Item = (i32, i32)>) -> Self {
        self.points = Some(points.into_iter().map(|(x, y)| IVec2::new(x, y)).collect());
        return self;
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        return self;
    }

    /// Which attributes are set.
    pub fn attrs(&self) -> Attrs {
        let mut attrs = Attrs::empty();
        attrs.set(Attrs::POSITION, self.position.is_some());
        attrs.set(Attrs::SIZE, self.size.is_some());
        attrs.set(Attrs::TEXT, self.text.is_some());
        attrs.set(Attrs::FG, self.fg.is_some());
        attrs.set(Attrs::BG, self.bg.is_some());
        attrs.set(Attrs::TEXT_SIZE, self.text_size.is_some());
        attrs.set(Attrs::TEXT_OFFSET, self.text_offset.is_some());
        attrs.set(Attrs::TRANSPARENCY, self.transparency.is_some());
        attrs.set(Attrs::STATE, self.state.is_some());
        attrs.set(Attrs::ONCLICK, self.onclick.is_some());
        attrs.set(Attrs::FONT, self.font.is_some());
        attrs.set(Attrs::PATH, self.path.is_some());
        attrs.set(Attrs::IMAGE, self.image.is_some());
        attrs.set(Attrs::RESIZE, self.resize.is_some());
        attrs.set(Attrs::START, self.start.is_some());
        attrs.set(Attrs::END, self.end.is_some());
        attrs.set(Attrs::COLOR, self.color.is_some());
        attrs.set(Attrs::WIDTH, self.width.is_some());
        attrs.set(Attrs::POINTS, self.points.is_some());
        attrs.set(Attrs::FILL, self.fill.is_some());
        return attrs;
    }

    pub fn is_empty(&self) -> bool {
        return self.attrs().is_empty();
    }

    /// Fails if any set attribute is outside `supported`.
    pub(crate) fn check(&self, widget: &'static str, supported: Attrs) -> Result<()> {
        let unsupported = self.attrs().difference(supported);
        if let Some(attribute) = unsupported.first_name() {
            return Err(Error::UnsupportedAttribute { widget, attribute });
        }
        return Ok(());
    }
}

pub(crate) fn missing(widget: &'static str, attribute: &'static str) -> Error {
    return Error::MissingAttribute { widget, attribute };
}
