#![doc = include_str!("../README.md")]

mod error;
pub mod quadtree;
mod r#type;

pub use error::{QuadTreeError, Result};
pub use r#type::{Coord, IndexableNum};

#[cfg(test)]
pub(crate) mod test;
