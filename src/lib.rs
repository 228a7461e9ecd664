//! Fixed-capacity bucket priority queue for small dense integer priorities.
//!
//! [`queue::BucketQueue`] partitions one preallocated slab into a bucket per
//! priority class, giving amortized-O(1) insert, pop-min and pop-max without
//! a comparison heap. [`graph`] shows the structure in its natural habitat:
//! Dial's shortest-path algorithm over small integer edge weights.

pub mod graph;
pub mod queue;

pub use queue::{BucketQueue, Error};
