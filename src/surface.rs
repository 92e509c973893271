//! CPU pixel surfaces and the compositing primitives the widgets are built from.
//!
//! A [`Surface`] is a premultiplied RGBA [`tiny_skia::Pixmap`]. Widgets render into their own cached surfaces,
//! then composite them onto the window's destination surface with [`blit`].

use std::path::Path;

use glam::{IVec2, UVec2};
use image::RgbaImage;
use tiny_skia::{FilterQuality, Paint, Pixmap, PixmapPaint, Transform};

use crate::*;

pub type Surface = Pixmap;

/// Allocates a transparent surface. Fails for empty sizes.
pub fn new_surface(size: UVec2, widget: &'static str) -> Result<Surface> {
    return Pixmap::new(size.x, size.y).ok_or(Error::InvalidGeometry {
        widget,
        reason: "surface size must be non-zero",
    });
}

pub fn size_of(surface: &Surface) -> UVec2 {
    return UVec2::new(surface.width(), surface.height());
}

pub fn fill(surface: &mut Surface, color: Color) {
    surface.fill(color.to_skia());
}

/// Composites `src` onto `dest` with its top left corner at `at`, scaled by `opacity`.
pub fn blit(dest: &mut Surface, src: &Surface, at: IVec2, opacity: u8) {
    if opacity == 0 {
        return;
    }
    let paint = PixmapPaint {
        opacity: opacity as f32 / 255.0,
        quality: FilterQuality::Nearest,
        ..Default::default()
    };
    dest.draw_pixmap(at.x, at.y, src.as_ref(), &paint, Transform::identity(), None);
}

/// Fills `rect` with a flat color, blending over what's already there.
pub fn fill_rect(dest: &mut Surface, rect: PixelRect, color: Color) {
    let Some(rect) = rect.to_skia() else { return };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    dest.fill_rect(rect, &paint, Transform::identity(), None);
}

/// Draws the semi-opaque veil that marks a widget as disabled.
pub fn disabled_overlay(dest: &mut Surface, rect: PixelRect) {
    fill_rect(dest, rect, Color::DISABLED_OVERLAY);
}

pub fn from_rgba_image(image: &RgbaImage, widget: &'static str) -> Result<Surface> {
    let mut surface = new_surface(UVec2::new(image.width(), image.height()), widget)?;

    let src: &[Color] = bytemuck::cast_slice(image.as_raw());
    for (dest, src) in surface.pixels_mut().iter_mut().zip(src) {
        *dest = src.premultiplied();
    }

    return Ok(surface);
}

/// Decodes an image file, optionally rescaling it to `resize`.
pub fn load_image(path: &Path, resize: Option<UVec2>, widget: &'static str) -> Result<Surface> {
    let mut image = image::open(path)?.to_rgba8();
    log::debug!("Loaded {:?} ({}x{})", path, image.width(), image.height());

    if let Some(size) = resize {
        if size.x == 0 || size.y == 0 {
            return Err(Error::InvalidGeometry { widget, reason: "resize target must be non-zero" });
        }
        image = image::imageops::resize(&image, size.x, size.y, image::imageops::FilterType::Triangle);
    }

    return from_rgba_image(&image, widget);
}

/// Rescales an already decoded surface.
pub fn resize_surface(surface: &Surface, size: UVec2, widget: &'static str) -> Result<Surface> {
    let mut resized = new_surface(size, widget)?;
    let transform = Transform::from_scale(
        size.x as f32 / surface.width() as f32,
        size.y as f32 / surface.height() as f32,
    );
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    resized.draw_pixmap(0, 0, surface.as_ref(), &paint, transform, None);
    return Ok(resized);
}

/// Per-pixel opacity map used for precise hit-testing.
///
/// A pixel counts as opaque when its alpha is above half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    size: UVec2,
    bits: Vec<bool>,
}

impl Mask {
    pub const THRESHOLD: u8 = 127;

    pub fn from_surface(surface: &Surface) -> Self {
        let bits = surface.pixels().iter().map(|p| p.alpha() > Self::THRESHOLD).collect();
        return Self { size: size_of(surface), bits };
    }

    pub fn size(&self) -> UVec2 {
        return self.size;
    }

    /// Out of bounds pixels are transparent.
    pub fn get(&self, pixel: UVec2) -> bool {
        if pixel.x >= self.size.x || pixel.y >= self.size.y {
            return false;
        }
        return self.bits[(pixel.y * self.size.x + pixel.x) as usize];
    }

    pub fn count(&self) -> usize {
        return self.bits.iter().filter(|b| **b).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_transparent(width: u32, height: u32) -> RgbaImage {
        // left half opaque red, right half fully transparent
        return RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 { image::Rgba([255, 0, 0, 255]) } else { image::Rgba([0, 0, 0, 0]) }
        });
    }

    #[test]
    fn test_mask_from_surface() {
        let surface = from_rgba_image(&half_transparent(8, 4), "test").unwrap();
        let mask = Mask::from_surface(&surface);

        assert_eq!(mask.size(), UVec2::new(8, 4));
        assert_eq!(mask.count(), 16);
        assert!(mask.get(UVec2::new(0, 0)));
        assert!(mask.get(UVec2::new(3, 3)));
        assert!(mask.get(UVec2::new(4, 0)) == false);
        assert!(mask.get(UVec2::new(100, 0)) == false);
    }

    #[test]
    fn test_blit_opacity() {
        let mut dest = new_surface(UVec2::new(4, 4), "test").unwrap();
        fill(&mut dest, Color::BLACK);

        let mut src = new_surface(UVec2::new(2, 2), "test").unwrap();
        fill(&mut src, Color::WHITE);

        blit(&mut dest, &src, IVec2::new(1, 1), 0);
        assert!(dest.pixels().iter().all(|p| p.red() == 0));

        blit(&mut dest, &src, IVec2::new(1, 1), 255);
        assert_eq!(dest.pixel(1, 1).unwrap().red(), 255);
        assert_eq!(dest.pixel(2, 2).unwrap().red(), 255);
        assert_eq!(dest.pixel(0, 0).unwrap().red(), 0);
        assert_eq!(dest.pixel(3, 3).unwrap().red(), 0);
    }

    #[test]
    fn test_empty_surface_is_rejected() {
        let err = new_surface(UVec2::new(0, 10), "Label").unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { widget: "Label", .. }));
    }
}
