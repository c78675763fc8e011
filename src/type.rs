use std::fmt::Debug;

use geo_traits::CoordTrait;
use num_traits::Float;

/// A trait for types that can be used for indexed coordinates.
///
/// The quadtree halves its boxes on every split, so only floating point coordinates are
/// supported. This trait is sealed and implemented for `f32` and `f64`.
pub trait IndexableNum: private::Sealed + Float + Debug + Send + Sync + 'static {
    /// Convert to `f64` for error reporting.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl IndexableNum for f32 {}

impl IndexableNum for f64 {}

/// A single coordinate.
///
/// Can be used directly as the point type stored in a
/// [`QuadTree`][crate::quadtree::QuadTree], and is the coordinate type of the
/// [`RectTrait`][geo_traits::RectTrait] implementations in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord<N: IndexableNum> {
    pub(crate) x: N,
    pub(crate) y: N,
}

impl<N: IndexableNum> Coord<N> {
    /// Create a new coordinate.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> From<(N, N)> for Coord<N> {
    fn from((x, y): (N, N)) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> CoordTrait for Coord<N> {
    type T = N;

    fn dim(&self) -> geo_traits::Dimensions {
        geo_traits::Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
