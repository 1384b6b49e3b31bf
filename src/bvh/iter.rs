use crate::aabb::IntersectsAabb;
use crate::bvh::Bvh;

/// Iterator that traverses a [`Bvh`] without memory allocations, lazily
/// yielding the indices of all boxes whose [`Aabb`] intersects the query.
///
/// The pre-order node layout collapses the traversal state to a single
/// cursor: descending into a hit subtree is `+ 1`, and skipping a missed
/// subtree is `+ subtree_size`, so no stack is kept.
///
/// Indices come out in the depth-first pre-order of the tree, which follows
/// the Morton sort of the objects. The order is deterministic but unrelated
/// to distance along a ray.
///
/// [`Aabb`]: ../aabb/struct.Aabb.html
/// [`Bvh`]: struct.Bvh.html
pub struct BvhTraverseIterator<'bvh, Query: IntersectsAabb> {
    /// Reference to the BVH to traverse.
    bvh: &'bvh Bvh,

    /// The query whose box test prunes subtrees.
    query: Query,

    /// Position of the iterator in the node array.
    index: usize,
}

impl<'bvh, Query: IntersectsAabb> BvhTraverseIterator<'bvh, Query> {
    /// Creates a new [`BvhTraverseIterator`].
    ///
    /// [`BvhTraverseIterator`]: struct.BvhTraverseIterator.html
    pub(crate) fn new(bvh: &'bvh Bvh, query: Query) -> Self {
        BvhTraverseIterator {
            bvh,
            query,
            index: 0,
        }
    }

    /// Rewinds the iterator to the root, keeping the query. The next drain
    /// repeats the previous one exactly.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Rewinds the iterator to the root and replaces the query.
    pub fn reset_with(&mut self, query: Query) {
        self.query = query;
        self.index = 0;
    }
}

impl<Query: IntersectsAabb> Iterator for BvhTraverseIterator<'_, Query> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(node) = self.bvh.nodes.get(self.index) {
            if self.query.intersects_aabb(node.aabb()) {
                self.index += 1;
                if let Some(object_index) = node.object_index() {
                    return Some(object_index);
                }
                // Internal hit: fall through into the subtree.
            } else {
                self.index += node.subtree_size();
            }
        }
        None
    }
}
