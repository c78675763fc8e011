use geo_traits::CoordTrait;
use num_traits::NumCast;
use tracing::debug;

use crate::error::{QuadTreeError, Result};
use crate::quadtree::node::Node;
use crate::quadtree::rect::Rect;
use crate::quadtree::QuadTree;
use crate::r#type::IndexableNum;

/// Default number of items a leaf holds before it splits.
pub const DEFAULT_MAX_CAPACITY: usize = 16;

/// Default half extent of the root region, on both axes.
///
/// Large enough to stand in for an unbounded plane in most applications.
pub const DEFAULT_BOUND: f64 = 999_999_999.0;

/// A builder to create a [`QuadTree`].
///
/// ```
/// use quad_index::quadtree::{QuadTree, QuadTreeBuilder};
/// use quad_index::Coord;
///
/// let points = vec![Coord::new(1., 1.), Coord::new(-2., 3.)];
///
/// let mut tree: QuadTree<f64, Coord<f64>> = QuadTreeBuilder::new_with_capacity(4)
///     .bounds(-10., -10., 10., 10.)
///     .finish()
///     .unwrap();
/// tree.extend(&points).unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct QuadTreeBuilder<N: IndexableNum> {
    max_capacity: usize,
    bounds: Option<Rect<N>>,
}

impl<N: IndexableNum> Default for QuadTreeBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: IndexableNum> QuadTreeBuilder<N> {
    /// Create a new builder with the default capacity and root region.
    pub fn new() -> Self {
        Self::new_with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Create a new builder where leaves split once they hold more than `max_capacity` items.
    pub fn new_with_capacity(max_capacity: usize) -> Self {
        Self {
            max_capacity,
            bounds: None,
        }
    }

    /// Override the root region of the tree. Points outside of it are rejected on insert.
    pub fn bounds(mut self, min_x: N, min_y: N, max_x: N, max_y: N) -> Self {
        self.bounds = Some(Rect::new(min_x, min_y, max_x, max_y));
        self
    }

    /// Validate the configuration and create an empty tree.
    pub fn finish<'a, P: CoordTrait<T = N>>(self) -> Result<QuadTree<'a, N, P>> {
        if self.max_capacity == 0 {
            return Err(QuadTreeError::InvalidArgument(
                "max_capacity must be at least 1".to_string(),
            ));
        }

        let bounds = match self.bounds {
            Some(bounds) => bounds,
            None => default_bounds()?,
        };
        let finite = [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(QuadTreeError::InvalidArgument(format!(
                "bounds must be finite, got {:?}",
                bounds
            )));
        }
        if bounds.min_x > bounds.max_x || bounds.min_y > bounds.max_y {
            return Err(QuadTreeError::InvalidArgument(format!(
                "bounds minimum must not exceed maximum, got {:?}",
                bounds
            )));
        }

        debug!(
            max_capacity = self.max_capacity,
            min_x = bounds.min_x.as_f64(),
            min_y = bounds.min_y.as_f64(),
            max_x = bounds.max_x.as_f64(),
            max_y = bounds.max_y.as_f64(),
            "created quadtree"
        );

        Ok(QuadTree {
            root: Node::new(bounds, self.max_capacity, 0),
            points: vec![],
        })
    }
}

fn default_bounds<N: IndexableNum>() -> Result<Rect<N>> {
    let bound = <N as NumCast>::from(DEFAULT_BOUND).ok_or_else(|| {
        QuadTreeError::InvalidArgument("default bound is not representable".to_string())
    })?;
    Ok(Rect::new(-bound, -bound, bound, bound))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::r#type::Coord;

    #[test]
    fn default_region() {
        let tree: QuadTree<f64, Coord<f64>> = QuadTreeBuilder::new().finish().unwrap();
        let bounds = tree.bounds();
        assert_eq!(bounds.min_x(), -DEFAULT_BOUND);
        assert_eq!(bounds.max_y(), DEFAULT_BOUND);
        assert_eq!(tree.max_capacity(), DEFAULT_MAX_CAPACITY);
    }

    #[test]
    fn default_region_f32() {
        let tree: QuadTree<f32, Coord<f32>> = QuadTreeBuilder::new().finish().unwrap();
        assert!(tree.bounds().max_x() >= 999_999_999.0);
    }

    #[test]
    fn rejects_zero_capacity() {
        let result: Result<QuadTree<f64, Coord<f64>>> =
            QuadTreeBuilder::new_with_capacity(0).finish();
        assert!(matches!(result, Err(QuadTreeError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_invalid_bounds() {
        let inverted: Result<QuadTree<f64, Coord<f64>>> = QuadTreeBuilder::new()
            .bounds(10., 0., 0., 10.)
            .finish();
        assert!(matches!(inverted, Err(QuadTreeError::InvalidArgument(_))));

        let infinite: Result<QuadTree<f64, Coord<f64>>> = QuadTreeBuilder::new()
            .bounds(f64::NEG_INFINITY, 0., 0., 10.)
            .finish();
        assert!(matches!(infinite, Err(QuadTreeError::InvalidArgument(_))));

        let nan: Result<QuadTree<f64, Coord<f64>>> = QuadTreeBuilder::new()
            .bounds(0., f64::NAN, 10., 10.)
            .finish();
        assert!(matches!(nan, Err(QuadTreeError::InvalidArgument(_))));
    }
}
