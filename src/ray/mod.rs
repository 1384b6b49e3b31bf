//! This module holds the ray definition and its intersection test against
//! axis aligned bounding boxes.

mod ray_impl;

pub use self::ray_impl::*;
