use crate::mesh::BoundaryShape;
use crate::oracle::ContainmentOracle;

/// Outcome of the containment test for one vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    Reject,
}

/// Main-pass gate: stages each vertex's coordinates and asks the
/// oracle once per vertex whether it lies inside the boundary.
///
/// The shape is borrowed, so it cannot change while a pass is running.
pub struct ContainmentFilter<'a> {
    shape: &'a BoundaryShape,
    oracle: &'a dyn ContainmentOracle,
    point: [f64; 3],
    kept: u64,
    removed: u64,
}

impl<'a> ContainmentFilter<'a> {
    #[must_use]
    pub fn new(shape: &'a BoundaryShape, oracle: &'a dyn ContainmentOracle) -> Self {
        Self {
            shape,
            oracle,
            point: [0.0; 3],
            kept: 0,
            removed: 0,
        }
    }

    /// Stage one coordinate of the current vertex.
    pub fn stage(&mut self, axis: usize, value: f64) {
        self.point[axis] = value;
    }

    /// Decide the staged vertex and reset the stage.
    pub fn decide(&mut self) -> Verdict {
        let point = std::mem::take(&mut self.point);
        if self.oracle.contains(self.shape, point) {
            self.kept += 1;
            Verdict::Keep
        } else {
            self.removed += 1;
            tracing::trace!(x = point[0], y = point[1], z = point[2], "vertex outside boundary");
            Verdict::Reject
        }
    }

    #[must_use]
    pub fn kept(&self) -> u64 {
        self.kept
    }

    #[must_use]
    pub fn removed(&self) -> u64 {
        self.removed
    }
}
