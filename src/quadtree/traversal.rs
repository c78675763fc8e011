//! Utilities to traverse the QuadTree structure.

use geo_traits::{
    GeometryTrait, GeometryType, RectTrait, UnimplementedGeometryCollection, UnimplementedLine,
    UnimplementedLineString, UnimplementedMultiLineString, UnimplementedMultiPoint,
    UnimplementedMultiPolygon, UnimplementedPoint, UnimplementedPolygon, UnimplementedTriangle,
};

use crate::quadtree::node::Node;
use crate::quadtree::rect::Rect;
use crate::r#type::{Coord, IndexableNum};

/// A read-only reference onto a node of a [`QuadTree`][crate::quadtree::QuadTree].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t, N: IndexableNum> {
    node: &'t Node<N>,
}

impl<'t, N: IndexableNum> NodeRef<'t, N> {
    pub(crate) fn new(node: &'t Node<N>) -> Self {
        Self { node }
    }

    /// The box covered by this node.
    pub fn bounds(&self) -> Rect<N> {
        self.node.bounds
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.node.depth as usize
    }

    /// Returns `true` if this is a leaf node without children.
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Returns `true` if this is an intermediate node with children.
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }

    /// Insertion indices of the points held by this node, in insertion order. Always empty for
    /// intermediate nodes.
    pub fn items(&self) -> &'t [u32] {
        self.node.items.as_slice()
    }

    /// Returns an iterator over the child nodes in the order northwest, northeast, southwest,
    /// southeast. Empty for leaf nodes.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'t, N>> {
        self.node
            .children
            .iter()
            .flat_map(|children| children.iter())
            .map(NodeRef::new)
    }

    /// Returns an iterator over this node and all of its descendants, depth first.
    pub fn descendants(&self) -> impl Iterator<Item = NodeRef<'t, N>> {
        let mut stack = vec![*self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            // Note: these are pushed in backwards order to what gets popped
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev());
            Some(node)
        })
    }
}

impl<N: IndexableNum> GeometryTrait for NodeRef<'_, N> {
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

impl<N: IndexableNum> RectTrait for NodeRef<'_, N> {
    type CoordType<'a>
        = Coord<N>
    where
        Self: 'a;

    fn min(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.node.bounds.min_x,
            y: self.node.bounds.min_y,
        }
    }

    fn max(&self) -> Self::CoordType<'_> {
        Coord {
            x: self.node.bounds.max_x,
            y: self.node.bounds.max_y,
        }
    }
}
