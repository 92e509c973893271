use std::path::PathBuf;

use glam::{IVec2, UVec2};

use crate::params::missing;
use crate::*;

/// Where an image widget's pixels come from.
#[derive(Clone, Debug)]
pub(crate) enum ImageSource {
    Path(PathBuf),
    Decoded(Surface),
}

impl ImageSource {
    /// `image` takes priority over `path`.
    pub fn from_params(params: &Params) -> Option<ImageSource> {
        if let Some(image) = &params.image {
            return Some(ImageSource::Decoded(image.clone()));
        }
        return params.path.clone().map(ImageSource::Path);
    }

    pub fn load(&self, resize: Option<UVec2>, widget: &'static str) -> Result<Surface> {
        match self {
            ImageSource::Path(path) => return surface::load_image(path, resize, widget),
            ImageSource::Decoded(image) => match resize {
                Some(size) if size != surface::size_of(image) => {
                    return surface::resize_surface(image, size, widget);
                }
                _ => return Ok(image.clone()),
            },
        }
    }
}

/// A static picture.
#[derive(Clone, Debug)]
pub struct Image {
    position: IVec2,
    source: ImageSource,
    resize: Option<UVec2>,
    transparency: u8,
    surface: Surface,
}

impl Image {
    pub const NAME: &'static str = "Image";
    pub const ATTRS: Attrs = Attrs::POSITION
        .union(Attrs::PATH)
        .union(Attrs::IMAGE)
        .union(Attrs::TRANSPARENCY)
        .union(Attrs::RESIZE);

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let position = params.position.ok_or(missing(Self::NAME, "position"))?;
        let source = ImageSource::from_params(&params).ok_or(missing(Self::NAME, "path"))?;
        let surface = source.load(params.resize, Self::NAME)?;

        return Ok(Image {
            position,
            source,
            resize: params.resize,
            transparency: params.transparency.unwrap_or(255),
            surface,
        });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;

        // Decode first, so a bad file leaves the widget untouched.
        let source = ImageSource::from_params(&params);
        if source.is_some() || params.resize.is_some() {
            let source = source.as_ref().unwrap_or(&self.source);
            let resize = params.resize.or(self.resize);
            self.surface = source.load(resize, Self::NAME)?;
        }

        if let Some(source) = source {
            self.source = source;
        }
        if let Some(resize) = params.resize {
            self.resize = Some(resize);
        }
        if let Some(position) = params.position {
            self.position = position;
        }
        if let Some(transparency) = params.transparency {
            self.transparency = transparency;
        }
        return Ok(());
    }

    pub fn draw(&self, surface: &mut Surface) {
        surface::blit(surface, &self.surface, self.position, self.transparency);
    }

    pub fn rect(&self) -> PixelRect {
        return PixelRect::new(self.position, surface::size_of(&self.surface));
    }
}
