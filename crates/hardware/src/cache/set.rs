//! Cache sets and their storage slots.
//!
//! A set is a fixed array of ways created once at construction. Ways are
//! mutated in place on install and are never removed, so a way index is a
//! stable identity for the lifetime of the cache.

/// One associative storage slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Way {
    /// Tag of the resident line; meaningless while `valid` is false.
    pub tag: u32,
    /// Whether the way holds a line.
    pub valid: bool,
    /// Clock stamp of the last install or hit.
    pub last_used: u64,
}

impl Way {
    /// Whether this way holds the line identified by `tag`.
    #[inline]
    pub const fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }
}

/// Fixed-size group of ways sharing one index, plus the round-robin cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    ways: Box<[Way]>,
    cursor: usize,
}

impl CacheSet {
    /// Creates a set of `ways` empty slots.
    pub fn new(ways: usize) -> Self {
        Self {
            ways: vec![Way::default(); ways].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Number of ways (the associativity).
    #[inline]
    pub fn associativity(&self) -> usize {
        self.ways.len()
    }

    /// All ways in storage order.
    #[inline]
    pub fn ways(&self) -> &[Way] {
        &self.ways
    }

    /// Way at `index`.
    #[inline]
    pub fn way(&self, index: usize) -> Option<&Way> {
        self.ways.get(index)
    }

    /// Index of the way holding `tag`, if resident.
    pub fn lookup(&self, tag: u32) -> Option<usize> {
        self.ways.iter().position(|w| w.holds(tag))
    }

    /// Index of the first invalid way in storage order.
    pub fn free_way(&self) -> Option<usize> {
        self.ways.iter().position(|w| !w.valid)
    }

    /// Whether every way holds a line.
    pub fn is_full(&self) -> bool {
        self.free_way().is_none()
    }

    /// Number of valid ways.
    pub fn occupancy(&self) -> usize {
        self.ways.iter().filter(|w| w.valid).count()
    }

    /// Current round-robin cursor.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the cursor and advances it modulo the associativity.
    pub fn advance_cursor(&mut self) -> usize {
        let current = self.cursor;
        self.cursor = (self.cursor + 1) % self.ways.len();
        current
    }

    /// Stamps the way at `index` with `now`.
    pub fn touch(&mut self, index: usize, now: u64) {
        if let Some(way) = self.ways.get_mut(index) {
            way.last_used = now;
        }
    }

    /// Overwrites the way at `index` with a valid line and returns the previous contents.
    pub fn fill(&mut self, index: usize, tag: u32, now: u64) -> Option<Way> {
        let way = self.ways.get_mut(index)?;
        let previous = *way;
        *way = Way {
            tag,
            valid: true,
            last_used: now,
        };
        Some(previous)
    }
}
