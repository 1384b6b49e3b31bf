//! Stable LSD radix sort for the Morton entry list.
//!
//! Four 8-bit-digit passes over the 32-bit codes, scattering between the
//! entry vector and a swap buffer. Stability matters: entries sharing a
//! Morton bucket must keep their input order so that equal-key ranges split
//! deterministically during tree emission.

use crate::morton::MortonEntry;

const DIGIT_BITS: usize = 8;
const BUCKETS: usize = 1 << DIGIT_BITS;
const PASSES: usize = 32 / DIGIT_BITS;

/// Entry counts below this are cheaper to sort on one thread than to fan out.
#[cfg(feature = "rayon")]
const PARALLEL_CUTOFF: usize = 1 << 13;

#[inline]
fn digit(code: u32, shift: usize) -> usize {
    ((code >> shift) & (BUCKETS as u32 - 1)) as usize
}

/// Sorts the entries by Morton code, ascending and stable.
pub(crate) fn sort_by_code(entries: &mut Vec<MortonEntry>) {
    if entries.len() < 2 {
        return;
    }
    let mut buffer = vec![MortonEntry::default(); entries.len()];

    #[cfg(feature = "rayon")]
    {
        if entries.len() >= PARALLEL_CUTOFF {
            parallel::radix_sort(entries, &mut buffer);
            return;
        }
    }

    radix_sort(entries, &mut buffer);
}

/// Single-threaded sort; also the fallback when no worker pool is compiled
/// in. Each pass counts digits, turns the histogram into exclusive bucket
/// starts, scatters into the buffer, and swaps the roles of the two vectors.
/// An even number of passes leaves the result in `entries`.
fn radix_sort(entries: &mut Vec<MortonEntry>, buffer: &mut Vec<MortonEntry>) {
    for pass in 0..PASSES {
        let shift = pass * DIGIT_BITS;

        let mut bucket = [0usize; BUCKETS];
        for entry in entries.iter() {
            bucket[digit(entry.code, shift)] += 1;
        }

        let mut start = 0;
        for slot in bucket.iter_mut() {
            let count = *slot;
            *slot = start;
            start += count;
        }

        for entry in entries.iter() {
            let d = digit(entry.code, shift);
            buffer[bucket[d]] = *entry;
            bucket[d] += 1;
        }

        std::mem::swap(entries, buffer);
    }
}

#[cfg(feature = "rayon")]
mod parallel {
    use rayon::prelude::*;

    use super::{digit, BUCKETS, DIGIT_BITS, PASSES};
    use crate::morton::MortonEntry;

    /// Shared scatter destination. Workers write disjoint slots: the bucket
    /// start positions partition the output, so no slot is owned by more
    /// than one worker.
    struct ScatterBuffer(*mut MortonEntry);

    unsafe impl Sync for ScatterBuffer {}

    impl ScatterBuffer {
        // Routes access through a method so the closure below captures the
        // whole (Sync) wrapper rather than the bare pointer field; disjoint
        // closure captures would otherwise split out `out.0` on its own.
        fn ptr(&self) -> *mut MortonEntry {
            self.0
        }
    }

    /// One chunk per pool thread, with the same pass structure as the serial
    /// sort. Each pass runs three phases separated by the joins of the
    /// parallel iterators: per-worker histograms, a sequential conversion of
    /// the global histogram into per-worker bucket starts, and the scatter.
    pub(super) fn radix_sort(entries: &mut Vec<MortonEntry>, buffer: &mut Vec<MortonEntry>) {
        let chunk_len = entries
            .len()
            .div_ceil(rayon::current_num_threads())
            .max(1);

        for pass in 0..PASSES {
            let shift = pass * DIGIT_BITS;

            let mut starts: Vec<[usize; BUCKETS]> = entries
                .par_chunks(chunk_len)
                .map(|chunk| {
                    let mut histogram = [0usize; BUCKETS];
                    for entry in chunk {
                        histogram[digit(entry.code, shift)] += 1;
                    }
                    histogram
                })
                .collect();

            // Walk buckets in digit order and workers in chunk order, so
            // equal keys land in input order and the sort stays stable.
            let mut running = 0;
            for bucket in 0..BUCKETS {
                for worker in starts.iter_mut() {
                    let count = worker[bucket];
                    worker[bucket] = running;
                    running += count;
                }
            }

            let out = ScatterBuffer(buffer.as_mut_ptr());
            entries
                .par_chunks(chunk_len)
                .zip(starts.par_iter_mut())
                .for_each(|(chunk, starts)| {
                    for entry in chunk {
                        let d = digit(entry.code, shift);
                        unsafe { out.ptr().add(starts[d]).write(*entry) };
                        starts[d] += 1;
                    }
                });

            std::mem::swap(entries, buffer);
        }
    }
}
