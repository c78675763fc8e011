use tinyvec::TinyVec;
use tracing::{debug, error};

use crate::error::{QuadTreeError, Result};
use crate::quadtree::rect::Rect;
use crate::r#type::IndexableNum;

/// Nodes at this depth never split, even when they hold more than `max_capacity` items.
///
/// Only reachable when more than `max_capacity` points (nearly) coincide; without the limit
/// such points would be split apart forever.
pub(crate) const MAX_DEPTH: u8 = 64;

/// Slots in the `children` array.
pub(crate) const NORTHWEST: usize = 0;
pub(crate) const NORTHEAST: usize = 1;
pub(crate) const SOUTHWEST: usize = 2;
pub(crate) const SOUTHEAST: usize = 3;

/// Order in which children are tested when routing a point. Points on a shared boundary line
/// go to the first child that contains them.
const DISPATCH_ORDER: [usize; 4] = [SOUTHEAST, SOUTHWEST, NORTHWEST, NORTHEAST];

/// Order in which children are visited when collecting candidates.
const COLLECT_ORDER: [usize; 4] = [NORTHEAST, NORTHWEST, SOUTHEAST, SOUTHWEST];

/// A node of the region quadtree.
///
/// A leaf holds insertion ids directly. Once it overflows it becomes an internal node with
/// exactly four children covering its quadrants, and holds no ids itself.
#[derive(Debug, Clone)]
pub(crate) struct Node<N: IndexableNum> {
    pub(crate) bounds: Rect<N>,
    pub(crate) max_capacity: usize,
    pub(crate) depth: u8,

    // Use TinyVec to avoid heap allocations for small leaves
    pub(crate) items: TinyVec<[u32; 8]>,

    /// Indexed by `NORTHWEST`, `NORTHEAST`, `SOUTHWEST`, `SOUTHEAST`.
    pub(crate) children: Option<Box<[Node<N>; 4]>>,
}

impl<N: IndexableNum> Node<N> {
    pub(crate) fn new(bounds: Rect<N>, max_capacity: usize, depth: u8) -> Self {
        Self {
            bounds,
            max_capacity,
            depth,
            items: TinyVec::new(),
            children: None,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Insert the item `id` located at `(x, y)` into this subtree.
    ///
    /// `coords` resolves the location of any previously inserted id; it is needed to
    /// redistribute a leaf's items when it splits.
    ///
    /// On error the subtree is left as it was before the call.
    pub(crate) fn insert<F>(&mut self, id: u32, x: N, y: N, coords: &F) -> Result<()>
    where
        F: Fn(u32) -> (N, N),
    {
        if !self.bounds.contains(x, y) {
            return Err(QuadTreeError::OutOfBounds {
                x: x.as_f64(),
                y: y.as_f64(),
            });
        }

        if let Some(children) = self.children.as_mut() {
            return dispatch(children, id, x, y, coords);
        }

        self.items.push(id);
        if self.items.len() > self.max_capacity && self.depth < MAX_DEPTH {
            if let Err(err) = self.split(coords) {
                self.items.pop();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Turn this leaf into an internal node, moving every item into one of four new children
    /// in insertion order.
    ///
    /// Nothing is modified unless every item found a child.
    fn split<F>(&mut self, coords: &F) -> Result<()>
    where
        F: Fn(u32) -> (N, N),
    {
        debug_assert!(self.is_leaf());

        let mut children = Box::new(
            self.bounds
                .quadrants()
                .map(|bounds| Node::new(bounds, self.max_capacity, self.depth + 1)),
        );
        for &id in self.items.iter() {
            let (x, y) = coords(id);
            dispatch(&mut children, id, x, y, coords)?;
        }

        debug!(
            depth = self.depth,
            items = self.items.len(),
            "split quadtree node"
        );

        self.items = TinyVec::new();
        self.children = Some(children);
        Ok(())
    }

    /// Append every id stored in a descendant whose box intersects the circle.
    ///
    /// This over-collects: whole leaves are appended, so callers still need to check the
    /// distance of each item. Must only be called on an internal node.
    pub(crate) fn collect(&self, cx: N, cy: N, radius: N, out: &mut Vec<u32>) {
        let Some(children) = self.children.as_ref() else {
            return;
        };

        for quadrant in COLLECT_ORDER {
            let child = &children[quadrant];
            if !child.bounds.intersects_circle(cx, cy, radius) {
                continue;
            }

            if child.is_leaf() {
                out.extend(child.items.iter().copied());
            } else {
                child.collect(cx, cy, radius, out);
            }
        }
    }
}

/// Route a point to the first child containing it, in `DISPATCH_ORDER`.
fn dispatch<N, F>(children: &mut [Node<N>; 4], id: u32, x: N, y: N, coords: &F) -> Result<()>
where
    N: IndexableNum,
    F: Fn(u32) -> (N, N),
{
    for quadrant in DISPATCH_ORDER {
        let child = &mut children[quadrant];
        if child.bounds.contains(x, y) {
            return child.insert(id, x, y, coords);
        }
    }

    error!(id, x = x.as_f64(), y = y.as_f64(), "no child contains point");
    Err(QuadTreeError::InternalInconsistency(format!(
        "item {} at ({}, {}) is not contained by any child node",
        id,
        x.as_f64(),
        y.as_f64()
    )))
}
