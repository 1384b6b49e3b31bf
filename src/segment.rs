//! This module defines a line segment and its intersection test against axis
//! aligned bounding boxes.

use crate::aabb::{Aabb, IntersectsAabb};
use crate::{Point3, Real, Vector3};

/// A line segment between two endpoints.
///
/// Construction precomputes the half-vector, midpoint and componentwise
/// absolute half-vector, so that repeated box tests against the same segment
/// share the setup.
///
/// The cross-axis rejection tests carry an absolute `f32::EPSILON` slack so
/// that segments exactly touching a box edge register as intersecting. The
/// slack does not scale with the coordinates, so at magnitudes far above 1 it
/// is smaller than one ULP and exact touches may be missed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The first endpoint.
    pub a: Point3,

    /// The second endpoint.
    pub b: Point3,

    /// Half-vector from `a` to `b`.
    half: Vector3,

    /// Midpoint of the segment.
    mid: Point3,

    /// Componentwise absolute value of `half`.
    abs_half: Vector3,
}

impl Segment {
    /// Creates a new [`Segment`] between two endpoints.
    ///
    /// # Examples
    /// ```
    /// use lbvh::segment::Segment;
    /// use lbvh::Point3;
    ///
    /// let segment = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
    /// assert_eq!(segment.a.x, 0.0);
    /// assert_eq!(segment.b.x, 2.0);
    /// ```
    pub fn new(a: Point3, b: Point3) -> Segment {
        let half = (b - a) * 0.5;
        Segment {
            a,
            b,
            half,
            mid: a + half,
            abs_half: half.abs(),
        }
    }
}

impl IntersectsAabb for Segment {
    /// Separating axis test over the three box axes and the three cross
    /// products of the segment direction with them. Six axes suffice for a
    /// segment against an AABB; if no axis separates, the shapes intersect.
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return false;
        }

        let e = (aabb.max - aabb.min) * 0.5;
        let c = self.mid - aabb.center();
        let d = self.half;
        let ad = self.abs_half;

        if c.x.abs() > e.x + ad.x {
            return false;
        }
        if c.y.abs() > e.y + ad.y {
            return false;
        }
        if c.z.abs() > e.z + ad.z {
            return false;
        }

        let eps = Real::EPSILON;
        if (d.y * c.z - d.z * c.y).abs() > e.y * ad.z + e.z * ad.y + eps {
            return false;
        }
        if (d.z * c.x - d.x * c.z).abs() > e.z * ad.x + e.x * ad.z + eps {
            return false;
        }
        if (d.x * c.y - d.y * c.x).abs() > e.x * ad.y + e.y * ad.x + eps {
            return false;
        }

        true
    }
}
