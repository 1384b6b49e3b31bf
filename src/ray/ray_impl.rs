use crate::aabb::{Aabb, IntersectsAabb};
use crate::{Point3, Real, Vector3};

/// A struct which defines a ray and some of its cached values.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// The ray origin.
    pub origin: Point3,

    /// The normalized ray direction.
    pub direction: Vector3,

    /// Inverse (1/x) ray direction. Cached for use in [`Aabb`] intersections.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    pub inv_direction: Vector3,
}

impl Ray {
    /// Creates a new [`Ray`] from an `origin` and a `direction`.
    /// `direction` will be normalized.
    ///
    /// # Examples
    /// ```
    /// use lbvh::ray::Ray;
    /// use lbvh::{Point3, Vector3};
    ///
    /// let origin = Point3::new(0.0, 0.0, 0.0);
    /// let direction = Vector3::new(4.0, 0.0, 0.0);
    /// let ray = Ray::new(origin, direction);
    ///
    /// assert_eq!(ray.origin, origin);
    /// assert_eq!(ray.direction, Vector3::new(1.0, 0.0, 0.0));
    /// ```
    ///
    /// [`Ray`]: struct.Ray.html
    pub fn new(origin: Point3, direction: Vector3) -> Ray {
        let direction = direction.normalize();
        Ray {
            origin,
            direction,
            inv_direction: direction.map(|x| 1.0 / x),
        }
    }
}

impl IntersectsAabb for Ray {
    /// Slab test. Each finite component of `inv_direction` clips the ray
    /// parameter interval against the pair of planes bounding the box on that
    /// axis. An infinite component means the ray is parallel to the axis; the
    /// axis then contributes an inclusive origin-in-slab check instead of an
    /// interval, so rays grazing a face, and infinitely thin boxes, are
    /// reported as hits.
    ///
    /// A NaN in `inv_direction` is caller error and yields an unspecified
    /// result.
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        if aabb.is_empty() {
            return false;
        }

        let mut tmin = Real::NEG_INFINITY;
        let mut tmax = Real::INFINITY;

        for i in 0..3 {
            let inv = self.inv_direction[i];
            if inv.is_finite() {
                let t0 = (aabb.min[i] - self.origin[i]) * inv;
                let t1 = (aabb.max[i] - self.origin[i]) * inv;
                tmin = tmin.max(t0.min(t1));
                tmax = tmax.min(t0.max(t1));
            } else if self.origin[i] < aabb.min[i] || self.origin[i] > aabb.max[i] {
                return false;
            }
        }

        tmax >= tmin && tmax >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::aabb::{Aabb, IntersectsAabb};
    use crate::ray::Ray;
    use crate::testbase::{tuple_to_point, tuplevec_small_strategy};
    use crate::{Point3, Vector3};

    fn shifted_box() -> Aabb {
        Aabb::with_bounds(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0))
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let ray = Ray::new(Point3::new(0.0, 3.5, 4.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_ray_points_away() {
        let ray = Ray::new(Point3::new(10.0, 3.5, 4.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_ray_from_inside() {
        let ray = Ray::new(Point3::new(2.0, 3.0, 4.0), Vector3::new(0.0, -1.0, 0.0));
        assert!(ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_negative_direction() {
        let ray = Ray::new(Point3::new(10.0, 3.5, 4.5), Vector3::new(-1.0, 0.0, 0.0));
        assert!(ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_diagonal_ray() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let aabb = Aabb::with_bounds(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0));
        assert!(ray.intersects_aabb(&aabb));
    }

    #[test]
    fn test_axis_parallel_ray_misses_slab() {
        // Parallel to x, but outside the box on y.
        let ray = Ray::new(Point3::new(0.0, 10.0, 4.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(!ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_grazing_ray_on_face_plane() {
        // Parallel to x and coplanar with the y = 2 face.
        let ray = Ray::new(Point3::new(0.0, 2.0, 4.5), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray.intersects_aabb(&shifted_box()));
    }

    #[test]
    fn test_infinitely_thin_box() {
        let flat = Aabb::with_bounds(Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 1.0, 1.0));

        // In the plane of the box.
        let coplanar = Ray::new(Point3::new(-1.0, 0.5, 1.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(coplanar.intersects_aabb(&flat));

        // Crossing the plane of the box.
        let crossing = Ray::new(Point3::new(0.5, 0.5, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(crossing.intersects_aabb(&flat));
    }

    #[test]
    fn test_ray_against_empty_box() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(!ray.intersects_aabb(&Aabb::empty()));
    }

    proptest! {
        // A ray aimed at the center of a box always hits it.
        #[test]
        fn test_ray_points_at_aabb_center(origin in tuplevec_small_strategy(),
                                          a in tuplevec_small_strategy(),
                                          b in tuplevec_small_strategy())
        {
            let origin = tuple_to_point(&origin);
            let aabb = Aabb::empty()
                .grow(&tuple_to_point(&a))
                .grow(&tuple_to_point(&b));
            let direction = aabb.center() - origin;
            prop_assume!(direction.norm() > 0.01);

            let ray = Ray::new(origin, direction);
            assert!(ray.intersects_aabb(&aabb));
        }
    }
}
