pub mod creation;
pub mod modification;
pub mod query;
pub mod shaping;

use crate::error::Result;
use crate::topology::Solid;

pub use creation::Lamina;
pub use shaping::{Extrude, SweepAlongCurve};

/// A construction operation that materializes a [`Solid`].
#[derive(Debug, Clone)]
pub enum SolidOperation {
    /// Two coincident faces of opposite winding.
    Lamina(Lamina),
    /// A profile extruded along a direction.
    Extrude(Extrude),
    /// A profile swept along a curve.
    Sweep(SweepAlongCurve),
}

impl SolidOperation {
    /// Builds the solid described by this operation.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub fn to_solid(&self) -> Result<Solid> {
        match self {
            Self::Lamina(op) => op.execute(),
            Self::Extrude(op) => op.execute(),
            Self::Sweep(op) => op.execute(),
        }
    }
}

impl From<Lamina> for SolidOperation {
    fn from(op: Lamina) -> Self {
        Self::Lamina(op)
    }
}

impl From<Extrude> for SolidOperation {
    fn from(op: Extrude) -> Self {
        Self::Extrude(op)
    }
}

impl From<SweepAlongCurve> for SolidOperation {
    fn from(op: SweepAlongCurve) -> Self {
        Self::Sweep(op)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Line, Polygon, SweepCurve};
    use crate::math::{Point3, Vector3};

    #[test]
    fn dispatches_each_kind() {
        let square = Polygon::rectangle(1.0, 1.0).unwrap();
        let line = Line::new(Point3::origin(), Point3::new(0.0, 0.0, 3.0)).unwrap();
        let ops: Vec<SolidOperation> = vec![
            Lamina::new(square.clone()).into(),
            Extrude::new(square.clone(), Vector3::z(), 1.0).into(),
            SweepAlongCurve::new(square, SweepCurve::Line(line)).into(),
        ];
        let faces: Vec<usize> = ops.iter().map(|op| op.to_solid().unwrap().face_count()).collect();
        assert_eq!(faces, vec![2, 6, 6]);
    }
}
