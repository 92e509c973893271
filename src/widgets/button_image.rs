use glam::{IVec2, UVec2};

use crate::input::ClickTracker;
use crate::params::missing;
use crate::widgets::image::ImageSource;
use crate::*;

/// A clickable picture, optionally with a caption drawn on top.
///
/// Clicks only count on the opaque pixels of the picture, so a round button doesn't react in its corners.
#[derive(Clone)]
pub struct ButtonImage {
    position: IVec2,
    source: ImageSource,
    image: Surface,
    mask: Mask,
    text: String,
    fg: Color,
    text_size: f32,
    text_offset: IVec2,
    transparency: u8,
    font: Option<Font>,
    caption: Option<Surface>,
    pub(crate) state: WidgetState,
    pub(crate) onclick: Callback,
    tracker: ClickTracker,
}

impl ButtonImage {
    pub const NAME: &'static str = "ButtonImage";
    pub const ATTRS: Attrs = Attrs::POSITION
        .union(Attrs::PATH)
        .union(Attrs::IMAGE)
        .union(Attrs::TEXT)
        .union(Attrs::FG)
        .union(Attrs::TEXT_SIZE)
        .union(Attrs::TEXT_OFFSET)
        .union(Attrs::TRANSPARENCY)
        .union(Attrs::STATE)
        .union(Attrs::ONCLICK)
        .union(Attrs::FONT);

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let position = params.position.ok_or(missing(Self::NAME, "position"))?;
        let source = ImageSource::from_params(&params).ok_or(missing(Self::NAME, "path"))?;
        let onclick = params.onclick.clone().ok_or(missing(Self::NAME, "onclick"))?;
        let image = source.load(None, Self::NAME)?;

        let mut button = ButtonImage {
            position,
            source,
            mask: Mask::from_surface(&image),
            image,
            text: String::new(),
            fg: Color::WHITE,
            text_size: 20.0,
            text_offset: IVec2::ZERO,
            transparency: 255,
            font: None,
            caption: None,
            state: WidgetState::Enabled,
            onclick,
            tracker: ClickTracker::default(),
        };

        // the picture is already loaded
        let mut rest = params;
        rest.image = None;
        rest.path = None;
        button.configure(rest)?;
        return Ok(button);
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;

        if let Some(source) = ImageSource::from_params(&params) {
            let image = source.load(None, Self::NAME)?;
            self.mask = Mask::from_surface(&image);
            self.image = image;
            self.source = source;
        }

        if let Some(position) = params.position {
            self.position = position;
        }
        if let Some(text) = params.text {
            self.text = text;
        }
        if let Some(fg) = params.fg {
            self.fg = fg;
        }
        if let Some(text_size) = params.text_size {
            self.text_size = text_size;
        }
        if let Some(text_offset) = params.text_offset {
            self.text_offset = text_offset;
        }
        if let Some(transparency) = params.transparency {
            self.transparency = transparency;
        }
        if let Some(state) = params.state {
            self.state = state;
        }
        if let Some(onclick) = params.onclick {
            self.onclick = onclick;
        }
        if let Some(font) = params.font {
            self.font = Some(font);
        }

        self.caption = text::render_text(self.font.as_ref(), &self.text, self.text_size, self.fg);
        return Ok(());
    }

    pub fn rect(&self) -> PixelRect {
        return PixelRect::new(self.position, surface::size_of(&self.image));
    }

    /// Whether `point` lands on an opaque pixel of the picture.
    pub fn hit(&self, point: glam::Vec2) -> bool {
        return self.rect().local_pixel(point).is_some_and(|pixel| self.mask.get(pixel));
    }

    pub fn draw(&self, surface: &mut Surface) {
        surface::blit(surface, &self.image, self.position, self.transparency);
        if let Some(caption) = &self.caption {
            surface::blit(surface, caption, self.position + self.text_offset, self.transparency);
        }
        if self.state == WidgetState::Disabled {
            self.draw_disabled_overlay(surface);
        }
    }

    // The veil follows the picture's shape, like the hit region.
    fn draw_disabled_overlay(&self, surface: &mut Surface) {
        let UVec2 { x: width, y: height } = self.mask.size();
        for y in 0..height {
            let mut x = 0;
            while x < width {
                if self.mask.get(UVec2::new(x, y)) == false {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < width && self.mask.get(UVec2::new(x, y)) {
                    x += 1;
                }
                let run = PixelRect::new(self.position + IVec2::new(start as i32, y as i32), UVec2::new(x - start, 1));
                surface::disabled_overlay(surface, run);
            }
        }
    }

    pub fn feed(&mut self, input: &FrameInput) -> Feedback {
        if self.state == WidgetState::Disabled {
            self.tracker.reset();
            return Feedback::default();
        }

        let rect = self.rect();
        let mask = &self.mask;
        let hit = |p| rect.local_pixel(p).is_some_and(|pixel| mask.get(pixel));

        let clicked = self.tracker.update(input.events, hit);
        let hovered = input.pointer.is_some_and(hit);

        return Feedback {
            fired: clicked.then(|| self.onclick.clone()),
            hovered,
        };
    }

    pub fn state(&self) -> WidgetState {
        return self.state;
    }

    pub fn text(&self) -> &str {
        return &self.text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::{click_at, tap_at};

    // 20x20 at (100, 100). Left half opaque, right half fully transparent.
    fn half_transparent() -> Surface {
        let image = image::RgbaImage::from_fn(20, 20, |x, _| {
            if x < 10 { image::Rgba([200, 30, 30, 255]) } else { image::Rgba([0, 0, 0, 0]) }
        });
        return surface::from_rgba_image(&image, "test").unwrap();
    }

    fn button(state: WidgetState) -> ButtonImage {
        let params = Params::new()
            .position(100, 100)
            .image(half_transparent())
            .onclick(Callback::new(|_| Ok(())))
            .state(state);
        return ButtonImage::new(params).unwrap();
    }

    fn feed(button: &mut ButtonImage, events: &[InputEvent]) -> Feedback {
        let pointer = events.last().and_then(|e| e.position());
        return button.feed(&FrameInput::new(events, pointer, UVec2::new(400, 400)));
    }

    #[test]
    fn test_transparent_pixels_do_not_click() {
        let mut button = button(WidgetState::Enabled);

        // inside the bounding box, over the transparent half
        let feedback = feed(&mut button, &click_at(115.0, 105.0));
        assert!(feedback.fired.is_none());
        assert!(feedback.hovered == false);
        assert!(feed(&mut button, &tap_at(119.0, 119.0)).fired.is_none());

        // over the opaque half
        let feedback = feed(&mut button, &click_at(105.0, 105.0));
        assert!(feedback.fired.is_some());
        assert!(feedback.hovered);
        assert!(feed(&mut button, &tap_at(100.0, 119.0)).fired.is_some());

        // outside altogether
        assert!(feed(&mut button, &click_at(99.0, 105.0)).fired.is_none());
    }

    #[test]
    fn test_press_opaque_release_transparent() {
        let mut button = button(WidgetState::Enabled);
        let mut events = click_at(105.0, 105.0);
        events[1] = InputEvent::PointerReleased {
            position: glam::vec2(115.0, 105.0),
            button: winit::event::MouseButton::Left,
        };
        assert!(feed(&mut button, &events).fired.is_none());
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut button = button(WidgetState::Disabled);
        for events in [click_at(105.0, 105.0), tap_at(101.0, 101.0), click_at(115.0, 105.0)] {
            assert!(feed(&mut button, &events).fired.is_none());
        }

        button.configure(Params::new().state(WidgetState::Enabled)).unwrap();
        assert!(feed(&mut button, &click_at(105.0, 105.0)).fired.is_some());
    }

    #[test]
    fn test_disabled_overlay_follows_mask() {
        let enabled = button(WidgetState::Enabled);
        let disabled = button(WidgetState::Disabled);

        let mut a = surface::new_surface(UVec2::new(200, 200), "test").unwrap();
        surface::fill(&mut a, Color::WHITE);
        let mut b = a.clone();
        enabled.draw(&mut a);
        disabled.draw(&mut b);

        assert_ne!(a.pixel(105, 105), b.pixel(105, 105));
        assert_eq!(a.pixel(115, 105), b.pixel(115, 105));
    }

    #[test]
    fn test_empty_configure_changes_nothing() {
        let mut button = button(WidgetState::Enabled);
        let mut before = surface::new_surface(UVec2::new(200, 200), "test").unwrap();
        button.draw(&mut before);

        button.configure(Params::new()).unwrap();
        let mut after = surface::new_surface(UVec2::new(200, 200), "test").unwrap();
        button.draw(&mut after);

        assert_eq!(before.data(), after.data());
    }

    #[test]
    fn test_unsupported_attribute() {
        let mut button = button(WidgetState::Enabled);
        let err = button.configure(Params::new().bg(Color::RED)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAttribute { widget: "ButtonImage", attribute: "bg" }));
    }
}
