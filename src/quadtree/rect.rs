//! Axis-aligned boxes covered by quadtree nodes.

use geo_traits::{
    GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::quadtree::search::sq_dist;
use crate::r#type::{Coord, IndexableNum};

/// An axis-aligned rectangle, inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<N: IndexableNum> {
    pub(crate) min_x: N,
    pub(crate) min_y: N,
    pub(crate) max_x: N,
    pub(crate) max_y: N,
}

impl<N: IndexableNum> Rect<N> {
    pub(crate) fn new(min_x: N, min_y: N, max_x: N, max_y: N) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Get the minimum `x` value of this box.
    pub fn min_x(&self) -> N {
        self.min_x
    }

    /// Get the minimum `y` value of this box.
    pub fn min_y(&self) -> N {
        self.min_y
    }

    /// Get the maximum `x` value of this box.
    pub fn max_x(&self) -> N {
        self.max_x
    }

    /// Get the maximum `y` value of this box.
    pub fn max_y(&self) -> N {
        self.max_y
    }

    /// Width of this box.
    pub fn width(&self) -> N {
        self.max_x - self.min_x
    }

    /// Height of this box.
    pub fn height(&self) -> N {
        self.max_y - self.min_y
    }

    /// The center of this box.
    #[inline]
    pub fn midpoint(&self) -> (N, N) {
        let two = N::one() + N::one();
        (
            (self.min_x + self.max_x) / two,
            (self.min_y + self.max_y) / two,
        )
    }

    /// Returns `true` if the point lies inside this box or on its boundary.
    ///
    /// Always `false` for NaN coordinates.
    #[inline]
    pub fn contains(&self, x: N, y: N) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Split this box at its midpoint into `[northwest, northeast, southwest, southeast]`.
    ///
    /// Neighbouring quadrants share the midpoint lines.
    pub fn quadrants(&self) -> [Rect<N>; 4] {
        let (mid_x, mid_y) = self.midpoint();
        [
            Rect::new(self.min_x, mid_y, mid_x, self.max_y),
            Rect::new(mid_x, mid_y, self.max_x, self.max_y),
            Rect::new(self.min_x, self.min_y, mid_x, mid_y),
            Rect::new(mid_x, self.min_y, self.max_x, mid_y),
        ]
    }

    /// Returns `true` if the circle centered at `(cx, cy)` with the given radius touches this
    /// box.
    ///
    /// Measures from the circle center to the nearest point of the box. The clamped point is
    /// exact, so a circle centered inside or on the box always reports a hit.
    pub fn intersects_circle(&self, cx: N, cy: N, radius: N) -> bool {
        let nearest_x = cx.max(self.min_x).min(self.max_x);
        let nearest_y = cy.max(self.min_y).min(self.max_y);
        sq_dist(nearest_x, nearest_y, cx, cy) <= radius * radius
    }
}

impl<N: IndexableNum> GeometryTrait for Rect<N> {
    type T = N;
    type PointType<'b>
        = UnimplementedPoint<N>
    where
        Self: 'b;
    type LineStringType<'b>
        = UnimplementedLineString<N>
    where
        Self: 'b;
    type PolygonType<'b>
        = UnimplementedPolygon<N>
    where
        Self: 'b;
    type MultiPointType<'b>
        = UnimplementedMultiPoint<N>
    where
        Self: 'b;
    type MultiLineStringType<'b>
        = UnimplementedMultiLineString<N>
    where
        Self: 'b;
    type MultiPolygonType<'b>
        = UnimplementedMultiPolygon<N>
    where
        Self: 'b;
    type GeometryCollectionType<'b>
        = UnimplementedGeometryCollection<N>
    where
        Self: 'b;
    type RectType<'b>
        = Self
    where
        Self: 'b;
    type TriangleType<'b>
        = UnimplementedTriangle<N>
    where
        Self: 'b;
    type LineType<'b>
        = UnimplementedLine<N>
    where
        Self: 'b;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn as_type(
        &self,
    ) -> GeometryType<
        '_,
        UnimplementedPoint<N>,
        UnimplementedLineString<N>,
        UnimplementedPolygon<N>,
        UnimplementedMultiPoint<N>,
        UnimplementedMultiLineString<N>,
        UnimplementedMultiPolygon<N>,
        UnimplementedGeometryCollection<N>,
        Self,
        UnimplementedTriangle<N>,
        UnimplementedLine<N>,
    > {
        GeometryType::Rect(self)
    }
}

impl<N: IndexableNum> RectTrait for Rect<N> {
    type CoordType<'a>
        = Coord<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.min_x,
            y: self.min_y,
        }
    }

    fn max(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.max_x,
            y: self.max_y,
        }
    }
}

#[cfg(test)]
mod test {
    use super::Rect;

    fn unit() -> Rect<f64> {
        Rect::new(0., 0., 10., 10.)
    }

    #[test]
    fn contains_is_inclusive() {
        let rect = unit();
        assert!(rect.contains(0., 0.));
        assert!(rect.contains(10., 10.));
        assert!(rect.contains(5., 10.));
        assert!(!rect.contains(10.5, 5.));
        assert!(!rect.contains(f64::NAN, 5.));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let rect = unit();
        let [nw, ne, sw, se] = rect.quadrants();

        assert_eq!(nw, Rect::new(0., 5., 5., 10.));
        assert_eq!(ne, Rect::new(5., 5., 10., 10.));
        assert_eq!(sw, Rect::new(0., 0., 5., 5.));
        assert_eq!(se, Rect::new(5., 0., 10., 5.));

        let area: f64 = [nw, ne, sw, se]
            .iter()
            .map(|q| q.width() * q.height())
            .sum();
        assert_eq!(area, rect.width() * rect.height());
    }

    #[test]
    fn circle_intersection() {
        let rect = unit();

        // center inside
        assert!(rect.intersects_circle(5., 5., 0.));
        // overlaps an edge
        assert!(rect.intersects_circle(12., 5., 2.));
        assert!(!rect.intersects_circle(12., 5., 1.9));
        // near a corner, only the corner distance decides
        assert!(rect.intersects_circle(11., 11., 1.5));
        assert!(!rect.intersects_circle(11., 11., 1.4));
        // touching exactly counts
        assert!(rect.intersects_circle(13., 14., 5.));
    }

    #[test]
    fn circle_on_edge_of_tiny_box() {
        // a deep box far from the origin, where half-extents round
        let rect = Rect::new(-0.000113686837721616, 953.6742017657381, 0.0, 953.6743154525757);
        assert!(rect.contains(0.0, 953.6743154525757));
        assert!(rect.intersects_circle(0.0, 953.6743154525757, 0.0));
        assert!(rect.intersects_circle(rect.min_x, rect.min_y, 0.0));

        let (mid_x, mid_y) = rect.midpoint();
        for quadrant in rect.quadrants() {
            assert!(quadrant.intersects_circle(mid_x, mid_y, 0.0));
        }
    }
}
