//! This module defines [`Bvh`] and [`BvhNode`] and functions for building and
//! traversing it.
//!
//! [`Bvh`]: struct.Bvh.html
//! [`BvhNode`]: struct.BvhNode.html

mod bvh_impl;
mod bvh_node;
mod iter;

pub use self::bvh_impl::*;
pub use self::bvh_node::*;
pub use self::iter::*;
