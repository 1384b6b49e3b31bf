//! A crate which exports axis-aligned bounding boxes and a linear bounding
//! volume hierarchy (BVH) built over them.
//!
//! ## About
//!
//! This crate can be used for applications which need to answer many spatial
//! queries against a large set of boxes: which boxes contain a point, overlap
//! another box, or are crossed by a segment or a ray. A BVH reduces the cost
//! of such a query from O(n) to roughly O(log2(n)) at the cost of building
//! the tree once in advance.
//!
//! The tree is built by sorting box centroids along a 30-bit Morton curve
//! (with a radix sort, parallel under the `rayon` feature) and splitting each
//! range at the highest differing key bit. Nodes are stored contiguously in
//! depth-first pre-order and each internal node records its subtree size, so
//! traversal is a single cursor over the node array: a failed box test skips
//! the whole subtree with one index addition, and no stack is needed.
//!
//! ## Example
//!
//! ```
//! use lbvh::aabb::Aabb;
//! use lbvh::bvh::Bvh;
//! use lbvh::ray::Ray;
//! use lbvh::{Point3, Vector3};
//!
//! let mut boxes = Vec::new();
//! for i in 0..1000u32 {
//!     let min = Point3::new(i as f32, 0.0, 0.0);
//!     let max = Point3::new(i as f32 + 0.8, 1.0, 1.0);
//!     boxes.push(Aabb::with_bounds(min, max));
//! }
//!
//! let bvh = Bvh::build(&boxes).unwrap();
//!
//! let ray = Ray::new(Point3::new(-1.0, 0.5, 0.5), Vector3::new(1.0, 0.0, 0.0));
//! let hit_count = bvh.traverse_iterator(&ray).count();
//! assert_eq!(hit_count, 1000);
//! ```
//!
//! Queries can be rewound and reused without reallocating:
//!
//! ```
//! # use lbvh::aabb::Aabb;
//! # use lbvh::bvh::Bvh;
//! # use lbvh::Point3;
//! # let boxes = vec![Aabb::with_bounds(
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 1.0, 1.0),
//! # )];
//! # let bvh = Bvh::build(&boxes).unwrap();
//! let mut query = bvh.traverse_iterator(Point3::new(0.5, 0.5, 0.5));
//! let first: Vec<usize> = query.by_ref().collect();
//! query.reset();
//! let second: Vec<usize> = query.collect();
//! assert_eq!(first, second);
//! ```

#![deny(missing_docs)]

/// Scalar type used for box coordinates.
pub type Real = f32;

/// Point math type used by this crate. Type alias for [`nalgebra::Point3`].
pub type Point3 = nalgebra::Point3<Real>;

/// Vector math type used by this crate. Type alias for [`nalgebra::Vector3`].
pub type Vector3 = nalgebra::Vector3<Real>;

pub mod aabb;
pub mod bvh;
pub mod morton;
pub mod ray;
pub mod segment;

mod radix;

#[cfg(test)]
mod testbase;
