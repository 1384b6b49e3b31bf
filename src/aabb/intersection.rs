use crate::aabb::Aabb;
use crate::Point3;

/// A trait implemented by things that may or may not intersect an AABB and, by
/// extension, things that can be used to traverse a BVH.
pub trait IntersectsAabb {
    /// Returns whether this object intersects an [`Aabb`].
    ///
    /// Implementations must return `false` when `aabb` is empty.
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::{Aabb, IntersectsAabb};
    /// use lbvh::Point3;
    ///
    /// struct XyPlane;
    ///
    /// impl IntersectsAabb for XyPlane {
    ///     fn intersects_aabb(&self, aabb: &Aabb) -> bool {
    ///         !aabb.is_empty() && aabb.min.z <= 0.0 && aabb.max.z >= 0.0
    ///     }
    /// }
    ///
    /// let xy_plane = XyPlane;
    /// let aabb = Aabb::with_bounds(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    /// assert!(xy_plane.intersects_aabb(&aabb));
    /// ```
    ///
    /// [`Aabb`]: struct.Aabb.html
    fn intersects_aabb(&self, aabb: &Aabb) -> bool;
}

impl<Q: IntersectsAabb + ?Sized> IntersectsAabb for &Q {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        Q::intersects_aabb(self, aabb)
    }
}

impl IntersectsAabb for Aabb {
    /// Closed-interval overlap test: the boxes intersect iff they overlap on
    /// every axis, with shared faces and edges counting as overlap. Returns
    /// `false` if either box is empty.
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if self.is_empty() || aabb.is_empty() {
            return false;
        }
        self.min.x <= aabb.max.x
            && self.max.x >= aabb.min.x
            && self.min.y <= aabb.max.y
            && self.max.y >= aabb.min.y
            && self.min.z <= aabb.max.z
            && self.max.z >= aabb.min.z
    }
}

impl IntersectsAabb for Point3 {
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        aabb.contains(self)
    }
}
