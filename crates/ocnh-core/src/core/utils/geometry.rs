use nalgebra::Point3;
use thiserror::Error;

/// Vectors shorter than this (in Angstroms) are treated as zero-length.
const DEGENERACY_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Degenerate geometry: zero-length bond vector between points {from} and {to}")]
    ZeroLengthBond { from: usize, to: usize },
    #[error("Degenerate geometry: three consecutive points are collinear")]
    Collinear,
}

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Signed torsion angle of `p1-p2-p3-p4` about the `p2-p3` axis, in degrees.
///
/// Uses the IUPAC sign convention: looking along p2→p3, a clockwise rotation
/// of the p1 bond onto the p4 bond is positive. The result lies in
/// (-180, 180]; an exact -180 is reported as 180.
///
/// # Errors
///
/// Returns [`GeometryError`] when a bond vector has zero length or when
/// either plane is undefined because three consecutive points are collinear.
pub fn dihedral(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Result<f64, GeometryError> {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    for (idx, bond) in [b1, b2, b3].iter().enumerate() {
        if bond.norm() < DEGENERACY_TOLERANCE {
            return Err(GeometryError::ZeroLengthBond {
                from: idx + 1,
                to: idx + 2,
            });
        }
    }

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    if n1.norm() < DEGENERACY_TOLERANCE || n2.norm() < DEGENERACY_TOLERANCE {
        return Err(GeometryError::Collinear);
    }

    let y = n1.cross(&n2).dot(&b2.normalize());
    let x = n1.dot(&n2);
    let angle = y.atan2(x).to_degrees();

    Ok(if angle <= -180.0 { angle + 360.0 } else { angle })
}
