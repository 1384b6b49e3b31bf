use crate::{Point3, Real, Vector3};

/// An axis-aligned bounding box, represented by the minimum and maximum
/// coordinates of its corners.
///
/// Edges and faces are inclusive: a point lying on the surface of the box is
/// considered to be inside it.
///
/// A freshly constructed box is *empty*. The empty state is encoded by
/// ordering the corners so that `min.x > max.x`; no intersection test
/// succeeds against an empty box, and growing an empty box by a point or
/// another box adopts the operand.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum coordinates.
    pub min: Point3,

    /// Maximum coordinates.
    pub max: Point3,
}

impl Aabb {
    /// Creates a new [`Aabb`] with the given bounds.
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    /// use lbvh::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(aabb.min.x, -1.0);
    /// assert_eq!(aabb.max.x, 1.0);
    /// ```
    pub fn with_bounds(min: Point3, max: Point3) -> Aabb {
        Aabb { min, max }
    }

    /// Creates a new empty [`Aabb`].
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    ///
    /// let aabb = Aabb::empty();
    ///
    /// // It does not contain anything.
    /// assert!(aabb.is_empty());
    /// ```
    pub fn empty() -> Aabb {
        Aabb {
            min: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
            max: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    /// Returns true if this [`Aabb`] is empty.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Resets this [`Aabb`] to the empty state.
    pub fn clear(&mut self) {
        *self = Aabb::empty();
    }

    /// Returns the center point of the [`Aabb`].
    ///
    /// The center of an empty box is not a number.
    pub fn center(&self) -> Point3 {
        self.min + self.size() * 0.5
    }

    /// Returns the size of this [`Aabb`] in all three dimensions.
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns true if the [`Point3`] is inside the [`Aabb`]. Surface points
    /// are members.
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    /// use lbvh::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// assert!(aabb.contains(&Point3::new(0.5, 0.5, 0.5)));
    /// assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
    /// assert!(!aabb.contains(&Point3::new(1.5, 0.5, 0.5)));
    /// ```
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and
    /// the point `other`.
    pub fn grow(&self, other: &Point3) -> Aabb {
        Aabb::with_bounds(
            Point3::new(
                self.min.x.min(other.x),
                self.min.y.min(other.y),
                self.min.z.min(other.z),
            ),
            Point3::new(
                self.max.x.max(other.x),
                self.max.y.max(other.y),
                self.max.z.max(other.z),
            ),
        )
    }

    /// Grows this [`Aabb`] in place to contain the point `other`.
    pub fn grow_mut(&mut self, other: &Point3) {
        *self = self.grow(other);
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and
    /// `other`. Empty operands contribute nothing.
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    /// use lbvh::Point3;
    ///
    /// let a = Aabb::with_bounds(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// let joint = Aabb::empty().join(&a);
    /// assert_eq!(joint, a);
    /// ```
    pub fn join(&self, other: &Aabb) -> Aabb {
        Aabb::with_bounds(
            Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Grows this [`Aabb`] in place to contain `other`.
    pub fn join_mut(&mut self, other: &Aabb) {
        *self = self.join(other);
    }
}

impl Default for Aabb {
    fn default() -> Aabb {
        Aabb::empty()
    }
}

/// A degenerate box spanning a single point.
impl From<Point3> for Aabb {
    fn from(pt: Point3) -> Aabb {
        Aabb { min: pt, max: pt }
    }
}
