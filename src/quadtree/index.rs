use geo_traits::CoordTrait;
use tracing::warn;

use crate::error::{QuadTreeError, Result};
use crate::quadtree::node::Node;
use crate::quadtree::rect::Rect;
use crate::quadtree::traversal::NodeRef;
use crate::quadtree::QuadTreeBuilder;
use crate::r#type::IndexableNum;

/// A region quadtree over borrowed points.
///
/// The tree never owns its points: it stores `&'a P` references into storage owned by the
/// caller, so the points must outlive the tree and every search result. Each inserted point is
/// identified by its insertion index, which is what the `*_ids` searches return.
///
/// Usually this will be created via [`QuadTree::try_new`] or a [`QuadTreeBuilder`].
#[derive(Debug)]
pub struct QuadTree<'a, N: IndexableNum, P: CoordTrait<T = N>> {
    pub(crate) root: Node<N>,
    pub(crate) points: Vec<&'a P>,
}

impl<N: IndexableNum, P: CoordTrait<T = N>> Clone for QuadTree<'_, N, P> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            points: self.points.clone(),
        }
    }
}

impl<'a, N: IndexableNum, P: CoordTrait<T = N>> QuadTree<'a, N, P> {
    /// Create an empty tree covering the default root region, where leaves split once they
    /// hold more than `max_capacity` points.
    pub fn try_new(max_capacity: usize) -> Result<Self> {
        QuadTreeBuilder::new_with_capacity(max_capacity).finish()
    }

    /// Insert a point, returning its insertion index.
    ///
    /// Points outside the root region (including points with a NaN coordinate) are rejected
    /// with [`QuadTreeError::OutOfBounds`] and leave the tree unchanged.
    pub fn insert(&mut self, point: &'a P) -> Result<u32> {
        let id: u32 = self.points.len().try_into().map_err(|_| {
            QuadTreeError::InvalidArgument("cannot index more than u32::MAX points".to_string())
        })?;
        let (x, y) = (point.x(), point.y());

        self.points.push(point);
        let points = &self.points;
        let coords = |id: u32| {
            let p = points[id as usize];
            (p.x(), p.y())
        };

        let inserted = self.root.insert(id, x, y, &coords);
        match inserted {
            Ok(()) => Ok(id),
            Err(err) => {
                self.points.pop();
                if matches!(err, QuadTreeError::OutOfBounds { .. }) {
                    warn!(%err, "point rejected");
                }
                Err(err)
            }
        }
    }

    /// Insert every point of the iterator in order, stopping at the first error.
    ///
    /// Points inserted before the failing one stay in the tree.
    pub fn extend<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a P>,
    {
        for point in points {
            self.insert(point)?;
        }
        Ok(())
    }

    /// The number of points in this tree.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point has been inserted.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of points a leaf holds before it splits.
    pub fn max_capacity(&self) -> usize {
        self.root.max_capacity
    }

    /// The root region of this tree.
    pub fn bounds(&self) -> Rect<N> {
        self.root.bounds
    }

    /// The point with the given insertion index.
    pub fn get(&self, id: u32) -> Option<&'a P> {
        self.points.get(id as usize).copied()
    }

    /// All points in insertion order.
    pub fn points(&self) -> &[&'a P] {
        &self.points
    }

    /// Access the root node of the tree for manual traversal.
    pub fn root(&self) -> NodeRef<'_, N> {
        NodeRef::new(&self.root)
    }
}
