//! Shared fixtures for tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::quadtree::QuadTree;
use crate::r#type::{Coord, IndexableNum};

/// Deterministic random points inside `[-extent, extent]` on both axes, snapped to a grid of
/// step `1 / resolution` so that duplicates occur.
///
/// Under the default root region only the root's midlines fall on this grid; see
/// [`split_line_points`] for points on deeper node boundaries.
pub(crate) fn random_points(n: usize, extent: f64, resolution: f64, seed: u64) -> Vec<Coord<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x: f64 = rng.gen_range(-extent..=extent);
            let y: f64 = rng.gen_range(-extent..=extent);
            Coord::new(
                (x * resolution).round() / resolution,
                (y * resolution).round() / resolution,
            )
        })
        .collect()
}

pub(crate) fn make_tree(points: &[Coord<f64>], max_capacity: usize) -> QuadTree<'_, f64, Coord<f64>> {
    let mut tree = QuadTree::try_new(max_capacity).unwrap();
    tree.extend(points).unwrap();
    tree
}

/// Ids of all points within `radius` of `(cx, cy)`, by linear scan.
pub(crate) fn brute_force_within(points: &[Coord<f64>], cx: f64, cy: f64, radius: f64) -> Vec<u32> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let dx = p.x - cx;
            let dy = p.y - cy;
            dx * dx + dy * dy <= radius * radius
        })
        .map(|(i, _)| i as u32)
        .collect()
}

/// The corners, edge midpoints and center of every internal node of `tree`.
pub(crate) fn split_line_points<N: IndexableNum, P: geo_traits::CoordTrait<T = N>>(
    tree: &QuadTree<'_, N, P>,
) -> Vec<Coord<N>> {
    let mut out = vec![];
    for node in tree.root().descendants().filter(|node| node.is_parent()) {
        let bounds = node.bounds();
        let (mid_x, mid_y) = bounds.midpoint();
        for x in [bounds.min_x(), mid_x, bounds.max_x()] {
            for y in [bounds.min_y(), mid_y, bounds.max_y()] {
                out.push(Coord::new(x, y));
            }
        }
    }
    out
}
