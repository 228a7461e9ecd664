use std::fmt;

/// Error type for queue construction and insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Constructed with zero priority classes
    NoBuckets,
    /// Total capacity across all buckets overflows usize
    CapacityOverflow,
    /// Insert priority outside `0..num_buckets`
    InvalidPriority { priority: usize, num_buckets: usize },
    /// Insert into a bucket already at its fixed capacity
    BucketFull { priority: usize, capacity: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoBuckets => write!(f, "queue must have at least one bucket"),
            Error::CapacityOverflow => write!(f, "total bucket capacity overflows usize"),
            Error::InvalidPriority {
                priority,
                num_buckets,
            } => write!(
                f,
                "invalid priority {} (must be < {})",
                priority, num_buckets
            ),
            Error::BucketFull { priority, capacity } => write!(
                f,
                "bucket {} is full (capacity {})",
                priority, capacity
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Per-bucket bookkeeping: where the bucket's region starts in the flat
/// store, and how many live elements it currently holds.
#[derive(Debug, Clone, Copy)]
struct Region {
    offset: usize,
    count: usize,
}

/// A fixed-capacity bucket priority queue over small dense integer
/// priorities, supporting amortized-O(1) insert, pop-min and pop-max.
///
/// Storage is a single flat slab of element ids, partitioned at construction
/// into one fixed-capacity region per priority class; each region is a small
/// LIFO stack growing from its offset. A pair of hint cursors bounds the
/// lowest and highest non-empty bucket and is advanced lazily, so min/max
/// lookups skip empty buckets only when a query actually needs the answer.
///
/// The whole structure makes exactly two heap allocations, both in the
/// constructor, and never reallocates.
#[derive(Debug)]
pub struct BucketQueue {
    /// Flat element storage; only `offset..offset + count` of each bucket's
    /// region holds live ids.
    store: Box<[u32]>,
    /// One entry per bucket plus a sentinel whose offset is the total
    /// capacity. Bucket capacities are derived from adjacent offsets.
    regions: Box<[Region]>,
    /// Lower bound on the lowest non-empty priority.
    min_hint: usize,
    /// Upper bound on the highest non-empty priority. Hints are only
    /// consulted while the queue is non-empty, so 0 is a valid initial
    /// value: insert tightens the bound before any element exists.
    max_hint: usize,
    len: usize,
}

impl BucketQueue {
    /// Create a queue accepting priorities `0..bucket_sizes.len()`, where
    /// bucket `i` can hold at most `bucket_sizes[i]` elements at a time.
    pub fn with_capacities(bucket_sizes: &[usize]) -> Result<Self, Error> {
        if bucket_sizes.is_empty() {
            return Err(Error::NoBuckets);
        }

        let mut regions = Vec::with_capacity(bucket_sizes.len() + 1);
        let mut offset = 0usize;
        for &size in bucket_sizes {
            regions.push(Region { offset, count: 0 });
            offset = offset.checked_add(size).ok_or(Error::CapacityOverflow)?;
        }
        // Sentinel: marks the end of the last bucket's region.
        regions.push(Region { offset, count: 0 });

        Ok(BucketQueue {
            store: vec![0; offset].into_boxed_slice(),
            regions: regions.into_boxed_slice(),
            min_hint: 0,
            max_hint: 0,
            len: 0,
        })
    }

    /// Create a queue accepting priorities `0..num_buckets`, where every
    /// bucket can hold at most `bucket_size` elements at a time.
    pub fn uniform(num_buckets: usize, bucket_size: usize) -> Result<Self, Error> {
        if num_buckets == 0 {
            return Err(Error::NoBuckets);
        }
        let total = num_buckets
            .checked_mul(bucket_size)
            .ok_or(Error::CapacityOverflow)?;

        let regions: Vec<Region> = (0..=num_buckets)
            .map(|i| Region {
                offset: i * bucket_size,
                count: 0,
            })
            .collect();

        Ok(BucketQueue {
            store: vec![0; total].into_boxed_slice(),
            regions: regions.into_boxed_slice(),
            min_hint: 0,
            max_hint: 0,
            len: 0,
        })
    }

    /// Number of priority classes this queue accepts.
    pub fn num_buckets(&self) -> usize {
        self.regions.len() - 1
    }

    /// Fixed capacity of the given priority class, or `None` if the
    /// priority is out of range.
    pub fn capacity(&self, priority: usize) -> Option<usize> {
        if priority >= self.num_buckets() {
            return None;
        }
        Some(self.regions[priority + 1].offset - self.regions[priority].offset)
    }

    /// Total capacity across all buckets.
    pub fn total_capacity(&self) -> usize {
        self.regions[self.num_buckets()].offset
    }

    /// Number of elements currently in the queue.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Add `id` to the bucket for `priority`. O(1).
    ///
    /// Elements of equal priority come back out in LIFO order. A failed
    /// insert leaves the queue unchanged.
    pub fn insert(&mut self, id: u32, priority: usize) -> Result<(), Error> {
        let num_buckets = self.num_buckets();
        if priority >= num_buckets {
            return Err(Error::InvalidPriority {
                priority,
                num_buckets,
            });
        }

        let offset = self.regions[priority].offset;
        let count = self.regions[priority].count;
        let limit = self.regions[priority + 1].offset;
        let slot = offset + count;
        if slot == limit {
            return Err(Error::BucketFull {
                priority,
                capacity: limit - offset,
            });
        }

        self.store[slot] = id;
        self.regions[priority].count += 1;
        self.len += 1;

        // Eagerly tighten the hints; this keeps them valid bounds without
        // ever scanning.
        if priority < self.min_hint {
            self.min_hint = priority;
        }
        if priority > self.max_hint {
            self.max_hint = priority;
        }

        Ok(())
    }

    /// Lowest priority class with at least one element, or `None` if the
    /// queue is empty. Amortized O(1), worst case O(num_buckets).
    ///
    /// Advances the min hint forward past empty buckets and leaves it
    /// pointing at the answer.
    pub fn min_priority(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        // len > 0 guarantees a non-empty bucket at or above the hint.
        while self.regions[self.min_hint].count == 0 {
            self.min_hint += 1;
        }
        Some(self.min_hint)
    }

    /// Highest priority class with at least one element, or `None` if the
    /// queue is empty. Amortized O(1), worst case O(num_buckets).
    ///
    /// Advances the max hint backward past empty buckets and leaves it
    /// pointing at the answer.
    pub fn max_priority(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        // len > 0 guarantees a non-empty bucket at or below the hint.
        while self.regions[self.max_hint].count == 0 {
            self.max_hint -= 1;
        }
        Some(self.max_hint)
    }

    /// Most recently inserted id in the lowest non-empty bucket, without
    /// removing it. `None` if the queue is empty.
    pub fn peek_min(&mut self) -> Option<u32> {
        let p = self.min_priority()?;
        Some(self.top(p))
    }

    /// Most recently inserted id in the highest non-empty bucket, without
    /// removing it. `None` if the queue is empty.
    pub fn peek_max(&mut self) -> Option<u32> {
        let p = self.max_priority()?;
        Some(self.top(p))
    }

    /// Remove and return the most recently inserted id in the lowest
    /// non-empty bucket. `None` if the queue is empty.
    ///
    /// If this empties the bucket, the min hint is left stale; the next
    /// min query pays the cost of skipping past it.
    pub fn pop_min(&mut self) -> Option<u32> {
        let p = self.min_priority()?;
        Some(self.take_top(p))
    }

    /// Remove and return the most recently inserted id in the highest
    /// non-empty bucket. `None` if the queue is empty.
    ///
    /// If this empties the bucket, the max hint is left stale; the next
    /// max query pays the cost of skipping past it.
    pub fn pop_max(&mut self) -> Option<u32> {
        let p = self.max_priority()?;
        Some(self.take_top(p))
    }

    /// Read the tail of a bucket known to be non-empty.
    fn top(&self, priority: usize) -> u32 {
        let region = self.regions[priority];
        self.store[region.offset + region.count - 1]
    }

    /// Remove and return the tail of a bucket known to be non-empty.
    fn take_top(&mut self, priority: usize) -> u32 {
        let id = self.top(priority);
        self.regions[priority].count -= 1;
        self.len -= 1;
        id
    }
}
