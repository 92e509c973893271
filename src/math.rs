use glam::{IVec2, UVec2, Vec2};

/// An axis-aligned rectangle in surface pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub position: IVec2,
    pub size: UVec2,
}

impl PixelRect {
    pub const fn new(position: IVec2, size: UVec2) -> Self {
        return Self { position, size };
    }

    pub fn from_xywh(x: i32, y: i32, width: u32, height: u32) -> Self {
        return Self::new(IVec2::new(x, y), UVec2::new(width, height));
    }

    pub fn min(&self) -> IVec2 {
        return self.position;
    }

    pub fn max(&self) -> IVec2 {
        return self.position + self.size.as_ivec2();
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min().as_vec2();
        let max = self.max().as_vec2();
        return point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y;
    }

    /// The pixel under `point`, relative to the rectangle's top left corner.
    pub fn local_pixel(&self, point: Vec2) -> Option<UVec2> {
        if !self.contains(point) {
            return None;
        }
        let local = point.floor().as_ivec2() - self.position;
        return Some(local.as_uvec2());
    }

    /// The smallest rectangle containing every point.
    pub fn bounding(points: &[IVec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        return Some(Self::new(min, (max - min).as_uvec2()));
    }

    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        return tiny_skia::Rect::from_xywh(
            self.position.x as f32,
            self.position.y as f32,
            self.size.x as f32,
            self.size.y as f32,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn test_contains() {
        let rect = PixelRect::from_xywh(10, 20, 30, 40);

        assert!(rect.contains(vec2(10.0, 20.0)));
        assert!(rect.contains(vec2(39.9, 59.9)));
        assert!(rect.contains(vec2(40.0, 20.0)) == false);
        assert!(rect.contains(vec2(10.0, 60.0)) == false);
        assert!(rect.contains(vec2(9.5, 30.0)) == false);

        assert_eq!(rect.local_pixel(vec2(12.7, 21.2)), Some(UVec2::new(2, 1)));
        assert_eq!(rect.local_pixel(vec2(0.0, 0.0)), None);
    }

    #[test]
    fn test_bounding() {
        let points = [IVec2::new(5, 9), IVec2::new(-3, 2), IVec2::new(4, 12)];
        let rect = PixelRect::bounding(&points).unwrap();
        assert_eq!(rect, PixelRect::from_xywh(-3, 2, 8, 10));
        assert_eq!(PixelRect::bounding(&[]), None);
    }
}
