use std::{fmt, path::Path, rc::Rc};

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::FontSettings;
use glam::UVec2;
use tiny_skia::{Paint, Rect, Transform};

use crate::*;

/// A shared handle to a parsed font. Cloning is cheap.
#[derive(Clone)]
pub struct Font {
    inner: Rc<fontdue::Font>,
}

impl Font {
    pub fn from_bytes(bytes: &[u8]) -> Result<Font> {
        let font = fontdue::Font::from_bytes(bytes, FontSettings::default()).map_err(Error::Font)?;
        return Ok(Font { inner: Rc::new(font) });
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Font> {
        let bytes = std::fs::read(path.as_ref())?;
        log::debug!("Loaded font {:?}", path.as_ref());
        return Font::from_bytes(&bytes);
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.inner.name().unwrap_or("unnamed");
        write!(f, "Font({name})")
    }
}

/// Rasterizes a single line of text into a tightly sized surface.
///
/// Returns `None` when there's nothing to draw: no font, empty text, or only whitespace.
pub fn render_text(font: Option<&Font>, text: &str, size: f32, color: Color) -> Option<Surface> {
    let font = font?;
    if text.is_empty() || size <= 0.0 {
        return None;
    }

    let fonts = [&*font.inner];
    let mut layout: Layout = Layout::new(CoordinateSystem::PositiveYDown);
    layout.reset(&LayoutSettings::default());
    layout.append(&fonts, &TextStyle::new(text, size, 0));

    let glyphs = layout.glyphs();
    let width = glyphs.iter().map(|g| (g.x.max(0.0) as u32) + g.width as u32).max()?;
    let height = (layout.height().ceil() as u32).max(glyphs.iter().map(|g| (g.y.max(0.0) as u32) + g.height as u32).max()?);

    let mut surface = surface::new_surface(UVec2::new(width, height), "text").ok()?;
    let mut coverage_mask = tiny_skia::Mask::new(width, height)?;
    let (mask_width, mask_height) = (width as usize, height as usize);
    let coverage_data = coverage_mask.data_mut();

    for glyph in glyphs {
        if glyph.width == 0 || glyph.height == 0 {
            continue;
        }
        let (metrics, coverage) = font.inner.rasterize_config(glyph.key);
        let origin_x = glyph.x.max(0.0) as usize;
        let origin_y = glyph.y.max(0.0) as usize;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let (x, y) = (origin_x + col, origin_y + row);
                if x >= mask_width || y >= mask_height {
                    continue;
                }
                // overlapping glyphs keep the stronger coverage
                let i = y * mask_width + x;
                coverage_data[i] = coverage_data[i].max(coverage[row * metrics.width + col]);
            }
        }
    }

    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    let area = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)?;
    surface.fill_rect(area, &paint, Transform::identity(), Some(&coverage_mask));

    return Some(surface);
}
