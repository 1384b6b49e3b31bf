//! This module defines [`Bvh`] and the construction of the tree.
//!
//! [`Bvh`]: struct.Bvh.html

use log::debug;

use crate::aabb::{Aabb, IntersectsAabb};
use crate::bvh::{BvhNode, BvhTraverseIterator};
use crate::morton::{self, MortonEntry};
use crate::radix;

/// The error returned by [`Bvh::generate`] when the input exceeds
/// [`Bvh::MAX_SIZE`] boxes. Carries the offending input length. Recoverable
/// by partitioning the scene into several trees.
///
/// [`Bvh::generate`]: struct.Bvh.html#method.generate
/// [`Bvh::MAX_SIZE`]: struct.Bvh.html#associatedconstant.MAX_SIZE
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot build a bvh over {0} boxes (maximum is {max})", max = Bvh::MAX_SIZE)]
pub struct CapacityError(
    /// Number of boxes in the rejected input.
    pub usize,
);

/// The [`Bvh`] data structure: the list of [`BvhNode`]s in depth-first
/// pre-order, plus the leaf count.
///
/// [`Bvh`]: struct.Bvh.html
/// [`BvhNode`]: struct.BvhNode.html
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bvh {
    /// The tree, stored linearly in depth-first pre-order.
    pub(crate) nodes: Vec<BvhNode>,

    /// Number of leaf nodes, one per input box.
    num_leaves: usize,
}

impl Bvh {
    /// Maximum number of objects in a single tree. A tree over `n` boxes has
    /// `2n - 1` nodes and subtree sizes are stored in 31 bits, so `n` is
    /// capped at 2³⁰.
    pub const MAX_SIZE: usize = 1 << 30;

    /// Creates a new empty [`Bvh`].
    ///
    /// [`Bvh`]: struct.Bvh.html
    pub fn new() -> Bvh {
        Bvh {
            nodes: Vec::new(),
            num_leaves: 0,
        }
    }

    /// Creates a new [`Bvh`] from the given boxes.
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    /// use lbvh::bvh::Bvh;
    /// use lbvh::Point3;
    ///
    /// let boxes = vec![
    ///     Aabb::with_bounds(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
    ///     Aabb::with_bounds(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0)),
    /// ];
    /// let bvh = Bvh::build(&boxes).unwrap();
    /// assert_eq!(bvh.size(), 2);
    /// ```
    ///
    /// [`Bvh`]: struct.Bvh.html
    pub fn build(boxes: &[Aabb]) -> Result<Bvh, CapacityError> {
        let mut bvh = Bvh::new();
        bvh.generate(boxes)?;
        Ok(bvh)
    }

    /// Empties the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.num_leaves = 0;
    }

    /// The number of leaves, which equals the number of boxes the tree was
    /// generated from.
    pub fn size(&self) -> usize {
        self.num_leaves
    }

    /// Returns true if the tree holds no boxes.
    pub fn is_empty(&self) -> bool {
        self.num_leaves == 0
    }

    /// The nodes of the tree, in depth-first pre-order.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Replaces any previous tree with one generated from the given list of
    /// object bounding boxes.
    ///
    /// Boxes that are individually empty are legal; they never intersect
    /// anything and sort as if centered on the minimum corner of the scene.
    ///
    /// Fails only if there are more than [`MAX_SIZE`] boxes; the tree is left
    /// empty in that case.
    ///
    /// [`MAX_SIZE`]: struct.Bvh.html#associatedconstant.MAX_SIZE
    pub fn generate(&mut self, boxes: &[Aabb]) -> Result<(), CapacityError> {
        self.clear();

        if boxes.len() > Self::MAX_SIZE {
            return Err(CapacityError(boxes.len()));
        }
        if boxes.is_empty() {
            return Ok(());
        }

        // Number of nodes is known up front: 2 * (number of leaves) - 1.
        self.nodes.reserve_exact(2 * boxes.len() - 1);

        // Bounding box that covers every box in the scene. Empty boxes
        // contribute nothing, whatever corner values encode their emptiness.
        let mut root_box = Aabb::empty();
        for aabb in boxes {
            if !aabb.is_empty() {
                root_box.join_mut(aabb);
            }
        }

        // Morton-code the box centroids and sort the entries along the curve.
        let mut entries = morton::make_entries(boxes, &root_box);
        radix::sort_by_code(&mut entries);

        self.emit(boxes, &entries, root_box, 0, boxes.len() - 1);

        debug_assert_eq!(self.nodes.len(), 2 * boxes.len() - 1);
        debug!(
            "generated bvh: {} leaves, {} nodes",
            self.num_leaves,
            self.nodes.len()
        );
        Ok(())
    }

    /// Creates a [`BvhTraverseIterator`] that yields the indices of all boxes
    /// whose [`Aabb`] intersects the query, in depth-first pre-order of the
    /// tree (Morton order over the objects, not distance order).
    ///
    /// # Examples
    /// ```
    /// use lbvh::aabb::Aabb;
    /// use lbvh::bvh::Bvh;
    /// use lbvh::segment::Segment;
    /// use lbvh::Point3;
    ///
    /// let boxes = vec![
    ///     Aabb::with_bounds(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
    ///     Aabb::with_bounds(Point3::new(4.0, 0.0, 0.0), Point3::new(5.0, 1.0, 1.0)),
    /// ];
    /// let bvh = Bvh::build(&boxes).unwrap();
    ///
    /// let segment = Segment::new(Point3::new(0.5, -1.0, 0.5), Point3::new(0.5, 2.0, 0.5));
    /// let hits: Vec<usize> = bvh.traverse_iterator(segment).collect();
    /// assert_eq!(hits, vec![0]);
    /// ```
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    /// [`BvhTraverseIterator`]: struct.BvhTraverseIterator.html
    pub fn traverse_iterator<Query: IntersectsAabb>(
        &self,
        query: Query,
    ) -> BvhTraverseIterator<'_, Query> {
        BvhTraverseIterator::new(self, query)
    }

    /// Recursively emits the subtree covering the sorted entries in
    /// `first..=last`, in depth-first pre-order. `curr_box` is the union of
    /// the member boxes, computed by the caller.
    fn emit(
        &mut self,
        boxes: &[Aabb],
        entries: &[MortonEntry],
        curr_box: Aabb,
        first: usize,
        last: usize,
    ) {
        if first == last {
            self.nodes.push(BvhNode::leaf(curr_box, entries[first].idx));
            self.num_leaves += 1;
            return;
        }

        // The subtree over k objects always has 2k - 1 nodes, so the skip
        // distance is known before the children are emitted.
        let node_count = 2 * (last - first + 1) - 1;
        self.nodes.push(BvhNode::internal(curr_box, node_count as u32));

        let split = find_split(entries, first, last);

        let left_box = joint_box(boxes, &entries[first..=split]);
        self.emit(boxes, entries, left_box, first, split);

        let right_box = joint_box(boxes, &entries[split + 1..=last]);
        self.emit(boxes, entries, right_box, split + 1, last);
    }
}

/// Union of the non-empty input boxes referenced by the given entries.
fn joint_box(boxes: &[Aabb], entries: &[MortonEntry]) -> Aabb {
    let mut joint = Aabb::empty();
    for entry in entries {
        let aabb = &boxes[entry.idx as usize];
        if !aabb.is_empty() {
            joint.join_mut(aabb);
        }
    }
    joint
}

/// Finds where to split the sorted range `first..=last`: the index of the
/// last entry whose code shares more than the common prefix with the first
/// one, so that the highest differing Morton bit separates the children.
///
/// Returns `first..last`; `split + 1` is the first entry of the right child.
fn find_split(entries: &[MortonEntry], first: usize, last: usize) -> usize {
    let first_code = entries[first].code;
    let last_code = entries[last].code;

    // Identical codes: the whole range shares one Morton bucket, so there is
    // no bit left to split on. Cut the range in the middle.
    if first_code == last_code {
        return (first + last) / 2;
    }

    let common_prefix = (first_code ^ last_code).leading_zeros();

    // Binary search for the highest entry that shares more than
    // `common_prefix` leading bits with the first one.
    let mut split = first;
    let mut step = last - first;
    loop {
        step = (step + 1) / 2;
        let proposal = split + step;
        if proposal < last {
            let split_prefix = (first_code ^ entries[proposal].code).leading_zeros();
            if split_prefix > common_prefix {
                split = proposal;
            }
        }
        if step <= 1 {
            break;
        }
    }

    split
}
