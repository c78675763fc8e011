use std::cmp::Ordering;

use geo_traits::CoordTrait;

use crate::error::{QuadTreeError, Result};
use crate::quadtree::QuadTree;
use crate::r#type::IndexableNum;

/// One of the four directions around a query center that search results are balanced over.
///
/// Points on the axes through the center are assigned by a fixed rule: the positive x axis and
/// the center itself belong to [`Quadrant::NorthEast`], the positive y axis to
/// [`Quadrant::NorthWest`], the negative x axis to [`Quadrant::SouthWest`] and the negative y
/// axis to [`Quadrant::SouthEast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// `x > cx, y > cy`; bucket 0
    NorthEast = 0,
    /// `x < cx, y > cy`; bucket 1
    NorthWest = 1,
    /// `x < cx, y < cy`; bucket 2
    SouthWest = 2,
    /// `x > cx, y < cy`; bucket 3
    SouthEast = 3,
}

impl Quadrant {
    /// All quadrants, in the order their results are concatenated.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    /// Position of this quadrant's bucket in search output.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Classify `point` by its direction from `center`.
    pub fn classify<N: IndexableNum>(
        center: &impl CoordTrait<T = N>,
        point: &impl CoordTrait<T = N>,
    ) -> Self {
        Self::classify_xy(center.x(), center.y(), point.x(), point.y())
    }

    pub(crate) fn classify_xy<N: IndexableNum>(cx: N, cy: N, x: N, y: N) -> Self {
        if x == cx && y == cy {
            // coincident points are merged into the first bucket
            Quadrant::NorthEast
        } else if x == cx {
            if y > cy {
                Quadrant::NorthWest
            } else {
                Quadrant::SouthEast
            }
        } else if y == cy {
            if x > cx {
                Quadrant::NorthEast
            } else {
                Quadrant::SouthWest
            }
        } else if x > cx && y > cy {
            Quadrant::NorthEast
        } else if x < cx && y > cy {
            Quadrant::NorthWest
        } else if x < cx && y < cy {
            Quadrant::SouthWest
        } else {
            Quadrant::SouthEast
        }
    }
}

impl<'a, N: IndexableNum, P: CoordTrait<T = N>> QuadTree<'a, N, P> {
    /// Coarse candidates for a circular query: the insertion indices of every point held by a
    /// leaf whose box intersects the circle.
    ///
    /// This is a superset of [`QuadTree::within`]; points may lie outside the circle.
    pub fn candidates(&self, center: &impl CoordTrait<T = N>, radius: N) -> Result<Vec<u32>> {
        let (cx, cy) = check_query(center, radius)?;
        Ok(self.collect(cx, cy, radius))
    }

    /// Search the tree for points within a given radius.
    ///
    /// Returns insertion indices of found points, unsorted.
    pub fn within(&self, center: &impl CoordTrait<T = N>, radius: N) -> Result<Vec<u32>> {
        let (cx, cy) = check_query(center, radius)?;
        Ok(self.within_xy(cx, cy, radius))
    }

    /// Search the tree for points within a given radius, grouped by [`Quadrant`] around the
    /// center.
    ///
    /// Each bucket is ordered by ascending distance to the center, ties in collection order,
    /// and holds at most `max_per_quadrant` insertion indices. Buckets are indexed by
    /// [`Quadrant::index`].
    pub fn search_quadrants(
        &self,
        center: &impl CoordTrait<T = N>,
        radius: N,
        max_per_quadrant: usize,
    ) -> Result<[Vec<u32>; 4]> {
        let (cx, cy) = check_query(center, radius)?;

        let mut buckets: [Vec<u32>; 4] = Default::default();
        for id in self.within_xy(cx, cy, radius) {
            let p = self.points[id as usize];
            let quadrant = Quadrant::classify_xy(cx, cy, p.x(), p.y());
            buckets[quadrant.index()].push(id);
        }

        let by_distance = |a: &u32, b: &u32| {
            let a = self.points[*a as usize];
            let b = self.points[*b as usize];
            let da = sq_dist(a.x(), a.y(), cx, cy);
            let db = sq_dist(b.x(), b.y(), cx, cy);
            // Stored points are never NaN and the center is finite
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        };
        for bucket in buckets.iter_mut() {
            // stable, so equal distances keep collection order
            bucket.sort_by(by_distance);
            bucket.truncate(max_per_quadrant);
        }

        Ok(buckets)
    }

    /// Search the tree for points within a given radius, balanced across the four quadrants
    /// around the center.
    ///
    /// At most `max_per_quadrant` of the nearest points are kept in each quadrant, so one dense
    /// direction cannot crowd out the others. The result holds the north-east points, then
    /// north-west, south-west and south-east, each group nearest first.
    ///
    /// Returns insertion indices of found points.
    pub fn search_around_ids(
        &self,
        center: &impl CoordTrait<T = N>,
        radius: N,
        max_per_quadrant: usize,
    ) -> Result<Vec<u32>> {
        let buckets = self.search_quadrants(center, radius, max_per_quadrant)?;
        Ok(buckets.concat())
    }

    /// Same as [`QuadTree::search_around_ids`], but returns the points themselves.
    ///
    /// ```
    /// use quad_index::quadtree::QuadTree;
    /// use quad_index::Coord;
    ///
    /// let points = vec![Coord::new(-1., 1.), Coord::new(1., -1.), Coord::new(5., 5.)];
    /// let mut tree = QuadTree::try_new(1).unwrap();
    /// tree.extend(&points).unwrap();
    ///
    /// let results = tree.search_around(&Coord::new(0., 0.), 2., 1).unwrap();
    /// assert_eq!(results, vec![&points[0], &points[1]]);
    /// ```
    pub fn search_around(
        &self,
        center: &impl CoordTrait<T = N>,
        radius: N,
        max_per_quadrant: usize,
    ) -> Result<Vec<&'a P>> {
        let ids = self.search_around_ids(center, radius, max_per_quadrant)?;
        Ok(ids.into_iter().map(|id| self.points[id as usize]).collect())
    }

    /// Run [`QuadTree::search_around`] for many centers in parallel.
    #[cfg(feature = "rayon")]
    pub fn par_search_around<C>(
        &self,
        centers: &[C],
        radius: N,
        max_per_quadrant: usize,
    ) -> Result<Vec<Vec<&'a P>>>
    where
        C: CoordTrait<T = N> + Sync,
        P: Sync,
    {
        use rayon::prelude::*;

        centers
            .par_iter()
            .map(|center| self.search_around(center, radius, max_per_quadrant))
            .collect()
    }

    fn collect(&self, cx: N, cy: N, radius: N) -> Vec<u32> {
        let mut out = vec![];
        if self.root.is_leaf() {
            // nothing has split yet, so the root holds every point
            if self.root.bounds.intersects_circle(cx, cy, radius) {
                out.extend(self.root.items.iter().copied());
            }
        } else {
            self.root.collect(cx, cy, radius, &mut out);
        }
        out
    }

    fn within_xy(&self, cx: N, cy: N, radius: N) -> Vec<u32> {
        let r2 = radius * radius;
        let mut candidates = self.collect(cx, cy, radius);
        candidates.retain(|id| {
            let p = self.points[*id as usize];
            sq_dist(p.x(), p.y(), cx, cy) <= r2
        });
        candidates
    }
}

fn check_query<N: IndexableNum>(center: &impl CoordTrait<T = N>, radius: N) -> Result<(N, N)> {
    let (cx, cy) = (center.x(), center.y());
    if !cx.is_finite() || !cy.is_finite() {
        return Err(QuadTreeError::InvalidArgument(format!(
            "query center must be finite, got ({}, {})",
            cx.as_f64(),
            cy.as_f64()
        )));
    }
    if radius.is_nan() || radius < N::zero() {
        return Err(QuadTreeError::InvalidArgument(format!(
            "radius must be non-negative, got {}",
            radius.as_f64()
        )));
    }
    Ok((cx, cy))
}

#[inline]
pub(crate) fn sq_dist<N: IndexableNum>(ax: N, ay: N, bx: N, by: N) -> N {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[cfg(test)]
mod test {
    use super::Quadrant;
    use crate::r#type::Coord;

    fn classify(x: f64, y: f64) -> Quadrant {
        Quadrant::classify(&Coord::new(0., 0.), &Coord::new(x, y))
    }

    #[test]
    fn classifies_open_quadrants() {
        assert_eq!(classify(1., 1.), Quadrant::NorthEast);
        assert_eq!(classify(-1., 1.), Quadrant::NorthWest);
        assert_eq!(classify(-1., -1.), Quadrant::SouthWest);
        assert_eq!(classify(1., -1.), Quadrant::SouthEast);
    }

    #[test]
    fn classifies_axes() {
        assert_eq!(classify(0., 0.), Quadrant::NorthEast);
        assert_eq!(classify(0., 2.), Quadrant::NorthWest);
        assert_eq!(classify(0., -2.), Quadrant::SouthEast);
        assert_eq!(classify(2., 0.), Quadrant::NorthEast);
        assert_eq!(classify(-2., 0.), Quadrant::SouthWest);
    }

    #[test]
    fn bucket_indices_follow_output_order() {
        let indices: Vec<usize> = Quadrant::ALL.iter().map(|q| q.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
