//! Common utilities shared by unit tests.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aabb::{Aabb, IntersectsAabb};
use crate::bvh::{Bvh, BvhNode};
use crate::{Point3, Real};

/// A vector represented as a tuple.
pub type TupleVec = (f32, f32, f32);

/// Generates a [`TupleVec`] for [`proptest::strategy::Strategy`], in a range
/// small enough to keep fp32 rounding away from the properties under test.
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -100.0_f32..100.0_f32,
        -100.0_f32..100.0_f32,
        -100.0_f32..100.0_f32,
    )
}

/// Converts a [`TupleVec`] to a [`Point3`].
pub fn tuple_to_point(tpl: &TupleVec) -> Point3 {
    Point3::new(tpl.0, tpl.1, tpl.2)
}

/// Generates `count` unit boxes with minimum corners uniformly distributed
/// in `[-edge, edge]³`, from a fixed seed.
pub fn random_unit_boxes(seed: u64, count: usize, edge: Real) -> Vec<Aabb> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let min = Point3::new(
                rng.gen_range(-edge..edge),
                rng.gen_range(-edge..edge),
                rng.gen_range(-edge..edge),
            );
            let max = Point3::new(min.x + 1.0, min.y + 1.0, min.z + 1.0);
            Aabb::with_bounds(min, max)
        })
        .collect()
}

/// Generates 1000 unit boxes on a 10×10×10 grid with unit spacing. The box
/// at grid position `(x, y, z)` has index `x * 100 + y * 10 + z`.
pub fn grid_boxes() -> Vec<Aabb> {
    let mut boxes = Vec::with_capacity(1000);
    for x in 0..10 {
        for y in 0..10 {
            for z in 0..10 {
                let min = Point3::new(x as Real, y as Real, z as Real);
                let max = Point3::new(x as Real + 1.0, y as Real + 1.0, z as Real + 1.0);
                boxes.push(Aabb::with_bounds(min, max));
            }
        }
    }
    boxes
}

/// The set of indices whose box intersects the query, computed by testing
/// every box. The ground truth the tree traversal must reproduce.
pub fn brute_force<Query: IntersectsAabb>(boxes: &[Aabb], query: &Query) -> HashSet<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, aabb)| query.intersects_aabb(aabb))
        .map(|(i, _)| i)
        .collect()
}

/// Checks the structural invariants of a tree generated from `boxes`:
/// the node count is `2n - 1`, every input index appears in exactly one
/// leaf, subtree sizes tile the array in pre-order, and every node's box
/// is exactly the union of its descendants' input boxes.
pub fn assert_tree_invariants(bvh: &Bvh, boxes: &[Aabb]) {
    let nodes = bvh.nodes();
    assert_eq!(bvh.size(), boxes.len());

    if boxes.is_empty() {
        assert!(nodes.is_empty());
        return;
    }
    assert_eq!(nodes.len(), 2 * boxes.len() - 1);

    let mut seen = vec![false; boxes.len()];
    for node in nodes {
        if let Some(index) = node.object_index() {
            assert!(!seen[index], "object {index} referenced by two leaves");
            seen[index] = true;
        }
    }
    assert!(seen.iter().all(|&leaf| leaf));

    let root_size = check_subtree(nodes, boxes, 0);
    assert_eq!(root_size, nodes.len());
}

/// Recursively checks the subtree rooted at `root` and returns its node
/// count.
fn check_subtree(nodes: &[BvhNode], boxes: &[Aabb], root: usize) -> usize {
    let node = &nodes[root];
    let size = node.subtree_size();
    assert!(root + size <= nodes.len());

    if let Some(index) = node.object_index() {
        assert_eq!(size, 1);
        if boxes[index].is_empty() {
            assert!(node.aabb().is_empty());
        } else {
            assert_eq!(node.aabb(), &boxes[index]);
        }
        return size;
    }

    assert!(size >= 3);
    let left = root + 1;
    let left_size = check_subtree(nodes, boxes, left);
    let right = left + left_size;
    assert!(right < root + size);
    let right_size = check_subtree(nodes, boxes, right);
    assert_eq!(1 + left_size + right_size, size);

    let joint = nodes[left].aabb().join(nodes[right].aabb());
    assert_eq!(node.aabb(), &joint);

    size
}
