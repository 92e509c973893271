use glam::IVec2;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Stroke, Transform};

use crate::params::missing;
use crate::*;

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    return paint;
}

/// A straight segment between two points.
#[derive(Clone, Debug)]
pub struct Line {
    start: IVec2,
    end: IVec2,
    color: Color,
    width: f32,
    path: Path,
}

impl Line {
    pub const NAME: &'static str = "Line";
    pub const ATTRS: Attrs = Attrs::START.union(Attrs::END).union(Attrs::COLOR).union(Attrs::WIDTH);

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let start = params.start.ok_or(missing(Self::NAME, "start"))?;
        let end = params.end.ok_or(missing(Self::NAME, "end"))?;
        let width = params.width.unwrap_or(1.0);
        let path = Self::build(start, end, width)?;

        return Ok(Line {
            start,
            end,
            color: params.color.unwrap_or(Color::WHITE),
            width,
            path,
        });
    }

    fn build(start: IVec2, end: IVec2, width: f32) -> Result<Path> {
        if width <= 0.0 {
            return Err(Error::InvalidGeometry { widget: Self::NAME, reason: "width must be positive" });
        }
        if start == end {
            return Err(Error::InvalidGeometry { widget: Self::NAME, reason: "start and end must differ" });
        }
        let mut builder = PathBuilder::new();
        builder.move_to(start.x as f32, start.y as f32);
        builder.line_to(end.x as f32, end.y as f32);
        return builder.finish().ok_or(Error::InvalidGeometry { widget: Self::NAME, reason: "non-finite coordinates" });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;
        let start = params.start.unwrap_or(self.start);
        let end = params.end.unwrap_or(self.end);
        let width = params.width.unwrap_or(self.width);
        self.path = Self::build(start, end, width)?;

        self.start = start;
        self.end = end;
        self.width = width;
        if let Some(color) = params.color {
            self.color = color;
        }
        return Ok(());
    }

    pub fn draw(&self, surface: &mut Surface) {
        let stroke = Stroke { width: self.width, ..Default::default() };
        surface.stroke_path(&self.path, &paint(self.color), &stroke, Transform::identity(), None);
    }

    pub fn start(&self) -> IVec2 {
        return self.start;
    }

    pub fn end(&self) -> IVec2 {
        return self.end;
    }

    /// The box spanned by the two end points.
    pub fn bounds(&self) -> PixelRect {
        return PixelRect::new(self.start.min(self.end), (self.start - self.end).abs().as_uvec2());
    }
}

/// A closed shape through a list of points, either outlined or filled.
#[derive(Clone, Debug)]
pub struct Polygon {
    points: Vec<IVec2>,
    color: Color,
    width: f32,
    fill: bool,
    path: Path,
}

impl Polygon {
    pub const NAME: &'static str = "Polygon";
    pub const ATTRS: Attrs = Attrs::POINTS.union(Attrs::COLOR).union(Attrs::WIDTH).union(Attrs::FILL);

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let points = params.points.ok_or(missing(Self::NAME, "points"))?;
        let width = params.width.unwrap_or(1.0);
        if width < 0.0 {
            return Err(Error::InvalidGeometry { widget: Self::NAME, reason: "width can't be negative" });
        }
        let path = Self::build(&points)?;

        return Ok(Polygon {
            points,
            color: params.color.unwrap_or(Color::WHITE),
            width,
            fill: params.fill.unwrap_or(false),
            path,
        });
    }

    fn build(points: &[IVec2]) -> Result<Path> {
        if points.len() < 3 {
            log::debug!("A polygon needs at least 3 points, got {}", points.len());
            return Err(missing(Self::NAME, "points"));
        }
        let mut builder = PathBuilder::new();
        builder.move_to(points[0].x as f32, points[0].y as f32);
        for point in &points[1..] {
            builder.line_to(point.x as f32, point.y as f32);
        }
        builder.close();
        return builder
            .finish()
            .ok_or(Error::InvalidGeometry { widget: Self::NAME, reason: "points must not all coincide" });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;
        if let Some(width) = params.width {
            if width < 0.0 {
                return Err(Error::InvalidGeometry { widget: Self::NAME, reason: "width can't be negative" });
            }
        }
        if let Some(points) = params.points {
            self.path = Self::build(&points)?;
            self.points = points;
        }

        if let Some(color) = params.color {
            self.color = color;
        }
        if let Some(width) = params.width {
            self.width = width;
        }
        if let Some(fill) = params.fill {
            self.fill = fill;
        }
        return Ok(());
    }

    /// Filled when `fill` is set or the outline width is 0.
    pub fn is_filled(&self) -> bool {
        return self.fill || self.width == 0.0;
    }

    pub fn draw(&self, surface: &mut Surface) {
        let paint = paint(self.color);
        if self.is_filled() {
            surface.fill_path(&self.path, &paint, FillRule::EvenOdd, Transform::identity(), None);
        } else {
            let stroke = Stroke { width: self.width, ..Default::default() };
            surface.stroke_path(&self.path, &paint, &stroke, Transform::identity(), None);
        }
    }

    pub fn points(&self) -> &[IVec2] {
        return &self.points;
    }

    pub fn bounds(&self) -> PixelRect {
        return PixelRect::bounding(&self.points).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;

    fn canvas() -> Surface {
        return surface::new_surface(UVec2::new(50, 50), "test").unwrap();
    }

    #[test]
    fn test_line() {
        let err = Line::new(Params::new().start(0, 0)).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Line", attribute: "end" }));

        let err = Line::new(Params::new().start(0, 0).end(5, 5).width(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { widget: "Line", .. }));

        let mut line = Line::new(Params::new().start(5, 25).end(45, 25).width(4.0).color(Color::RED)).unwrap();
        assert_eq!(line.bounds(), PixelRect::from_xywh(5, 25, 40, 0));

        let mut surface = canvas();
        line.draw(&mut surface);
        assert_eq!(surface.pixel(25, 25).unwrap().red(), 255);
        assert_eq!(surface.pixel(25, 10).unwrap().alpha(), 0);

        // a failed configure leaves the line as it was
        assert!(line.configure(Params::new().end(5, 25)).is_err());
        assert_eq!(line.end(), IVec2::new(45, 25));
    }

    #[test]
    fn test_polygon_needs_three_points() {
        let err = Polygon::new(Params::new().points([(0, 0), (10, 10)])).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Polygon", attribute: "points" }));

        let mut triangle = Polygon::new(Params::new().points([(0, 0), (10, 0), (0, 10)])).unwrap();
        let err = triangle.configure(Params::new().points([(0, 0)])).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Polygon", attribute: "points" }));
        assert_eq!(triangle.points().len(), 3);

        let err = Polygon::new(Params::new().color(Color::RED)).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Polygon", attribute: "points" }));
    }

    #[test]
    fn test_polygon_fill() {
        let square = [(10, 10), (40, 10), (40, 40), (10, 40)];
        let mut polygon = Polygon::new(Params::new().points(square).color(Color::BLUE).width(2.0)).unwrap();
        assert!(polygon.is_filled() == false);

        let mut outlined = canvas();
        polygon.draw(&mut outlined);
        assert_eq!(outlined.pixel(25, 25).unwrap().alpha(), 0);
        assert_eq!(outlined.pixel(10, 25).unwrap().blue(), 255);

        polygon.configure(Params::new().fill(true)).unwrap();
        let mut filled = canvas();
        polygon.draw(&mut filled);
        assert_eq!(filled.pixel(25, 25).unwrap().blue(), 255);

        polygon.configure(Params::new().fill(false).width(0.0)).unwrap();
        assert!(polygon.is_filled());
    }

    #[test]
    fn test_polygon_rejects_line_attributes() {
        let square = [(0, 0), (4, 0), (4, 4)];
        let mut polygon = Polygon::new(Params::new().points(square)).unwrap();
        let err = polygon.configure(Params::new().start(0, 0)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAttribute { widget: "Polygon", attribute: "start" }));
    }
}
