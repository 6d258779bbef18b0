use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Allocator for transfer regions that keeps count of the live ones.
#[derive(Debug, Clone, Default)]
pub struct RegionPool {
    live: Arc<AtomicUsize>,
}

impl RegionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled region of exactly `len` samples. Released when dropped.
    pub fn allocate(&self, len: usize) -> TransferRegion {
        self.live.fetch_add(1, Ordering::SeqCst);
        log::trace!("Allocated transfer region of {} samples", len);
        TransferRegion {
            data: vec![0; len],
            live: Arc::clone(&self.live),
        }
    }

    /// Regions allocated from this pool and not yet released
    pub fn live_regions(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

/// Buffer handed to a `TransferChannel`, sized at allocation and never resized.
#[derive(Debug)]
pub struct TransferRegion {
    data: Vec<i32>,
    live: Arc<AtomicUsize>,
}

impl Deref for TransferRegion {
    type Target = [i32];

    fn deref(&self) -> &[i32] {
        &self.data
    }
}

impl DerefMut for TransferRegion {
    fn deref_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }
}

impl Drop for TransferRegion {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        log::trace!("Released transfer region of {} samples", self.data.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions_released_on_drop() {
        let pool = RegionPool::new();
        {
            let mut a = pool.allocate(4);
            let b = pool.allocate(4);
            a[0] = 7;
            assert_eq!(a.len(), 4);
            assert_eq!(b.iter().sum::<i32>(), 0);
            assert_eq!(pool.live_regions(), 2);
        }
        assert_eq!(pool.live_regions(), 0);
    }

    #[test]
    fn test_clones_share_count() {
        let pool = RegionPool::new();
        let other = pool.clone();
        let _region = other.allocate(1);
        assert_eq!(pool.live_regions(), 1);
    }
}
