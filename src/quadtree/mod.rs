//! An implementation of a mutable region quadtree with quadrant-balanced radius queries.

#![warn(missing_docs)]

mod builder;
mod index;
mod node;
mod rect;
mod search;
pub mod traversal;

pub use builder::{QuadTreeBuilder, DEFAULT_BOUND, DEFAULT_MAX_CAPACITY};
pub use index::QuadTree;
pub use rect::Rect;
pub use search::Quadrant;
pub use traversal::NodeRef;
