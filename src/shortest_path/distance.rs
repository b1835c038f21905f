use std::fmt::{self, Display};

use num_traits::{PrimInt, Unsigned};

use crate::graph::VertexId;

/// Hop distance between two vertices.
///
/// `Finite` always orders below `Unreachable`, so `min` over distances does
/// what shortest-path relaxation expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance<W = u32> {
    Finite(W),
    Unreachable,
}

impl<W: PrimInt + Unsigned> Distance<W> {
    pub fn zero() -> Self {
        Self::Finite(W::zero())
    }

    pub fn one() -> Self {
        Self::Finite(W::one())
    }

    pub fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn finite(self) -> Option<W> {
        match self {
            Self::Finite(w) => Some(w),
            Self::Unreachable => None,
        }
    }

    /// Length of the concatenation of two paths. Overflowing `W` counts as
    /// unreachable.
    pub fn join(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => {
                a.checked_add(&b).map_or(Self::Unreachable, Self::Finite)
            }
            _ => Self::Unreachable,
        }
    }

    /// One more edge.
    pub fn step(self) -> Self {
        self.join(Self::one())
    }
}

impl<W: Display> Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{w}"),
            Distance::Unreachable => write!(f, "inf"),
        }
    }
}

/// Square all-pairs distance grid indexed by [`VertexId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix<W = u32> {
    size: usize,
    cells: Vec<Distance<W>>,
}

impl<W: PrimInt + Unsigned> DistanceMatrix<W> {
    /// `size × size` grid with every cell unreachable.
    pub fn unreachable(size: usize) -> Self {
        Self {
            size,
            cells: vec![Distance::Unreachable; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from `from` to `to`, `None` if either id is outside the
    /// matrix.
    pub fn try_get(&self, from: VertexId, to: VertexId) -> Option<Distance<W>> {
        (from.index() < self.size && to.index() < self.size)
            .then(|| self.cells[from.index() * self.size + to.index()])
    }

    /// # Panics
    ///
    /// Panics if either id is not below [`Self::size`], e.g. an id from
    /// another graph. Use [`Self::try_get`] for ids of unknown origin.
    pub fn get(&self, from: VertexId, to: VertexId) -> Distance<W> {
        assert!(to.index() < self.size, "vertex id {to} is out of range");
        self.cells[from.index() * self.size + to.index()]
    }

    /// # Panics
    ///
    /// Panics if either id is not below [`Self::size`].
    pub fn set(&mut self, from: VertexId, to: VertexId, d: Distance<W>) {
        assert!(to.index() < self.size, "vertex id {to} is out of range");
        self.cells[from.index() * self.size + to.index()] = d;
    }

    /// # Panics
    ///
    /// Panics if `from` is not below [`Self::size`].
    pub fn row(&self, from: VertexId) -> &[Distance<W>] {
        let start = from.index() * self.size;
        &self.cells[start..start + self.size]
    }

    pub(crate) fn row_mut(&mut self, from: VertexId) -> &mut [Distance<W>] {
        let start = from.index() * self.size;
        &mut self.cells[start..start + self.size]
    }

    /// Every finite cell.
    pub fn finite(&self) -> impl Iterator<Item = W> + '_ {
        self.cells.iter().filter_map(|d| d.finite())
    }

    /// Largest finite cell, `W::zero()` when there is none.
    pub fn max_finite(&self) -> W {
        self.finite().fold(W::zero(), W::max)
    }

    /// Mean of the finite cells, `None` when there is none.
    pub fn mean_finite(&self) -> Option<f64> {
        let (sum, count) = self.finite().fold((0f64, 0usize), |(s, c), w| {
            (s + w.to_f64().unwrap_or(f64::NAN), c + 1)
        });
        (count > 0).then(|| sum / count as f64)
    }
}
