//! Load consolidation by first-fit decreasing.
//!
//! Items are sorted by size, largest first (ties keep input order), and each
//! goes into the first open container with enough remaining room; a new
//! container is opened when none fits. Uses at most 11/9 · OPT + 6/9
//! containers.
//!
//! # Complexity
//!
//! O(n · b) where b = number of containers opened.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// An item to pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackItem {
    pub id: usize,
    pub size: i32,
}

impl PackItem {
    pub fn new(id: usize, size: i32) -> Self {
        Self { id, size }
    }
}

/// One filled container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    /// Item IDs in packing order.
    pub items: Vec<usize>,
    pub load: i32,
}

/// Result of [`first_fit_decreasing`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packing {
    pub containers: Vec<Container>,
    /// IDs of items larger than a container.
    pub oversized: Vec<usize>,
}

impl Packing {
    pub fn num_containers(&self) -> usize {
        self.containers.len()
    }
}

/// Packs `items` into containers of `capacity`.
///
/// # Examples
///
/// ```
/// use u_logistics::flow::{first_fit_decreasing, PackItem};
///
/// let items = [PackItem::new(0, 4), PackItem::new(1, 8), PackItem::new(2, 1), PackItem::new(3, 4)];
/// let packing = first_fit_decreasing(&items, 10);
/// assert_eq!(packing.num_containers(), 2);
/// assert_eq!(packing.containers[0].items, vec![1, 2]);
/// assert_eq!(packing.containers[1].items, vec![0, 3]);
/// ```
pub fn first_fit_decreasing(items: &[PackItem], capacity: i32) -> Packing {
    let mut order: Vec<&PackItem> = items.iter().collect();
    order.sort_by(|a, b| b.size.cmp(&a.size));

    let mut packing = Packing::default();
    for item in order {
        if item.size > capacity {
            packing.oversized.push(item.id);
            continue;
        }
        let slot = packing
            .containers
            .iter_mut()
            .find(|c| c.load + item.size <= capacity);
        match slot {
            Some(container) => {
                container.items.push(item.id);
                container.load += item.size;
            }
            None => packing.containers.push(Container {
                items: vec![item.id],
                load: item.size,
            }),
        }
    }

    debug!(
        items = items.len(),
        capacity,
        containers = packing.num_containers(),
        oversized = packing.oversized.len(),
        "items packed"
    );
    packing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let packing = first_fit_decreasing(&[], 10);
        assert_eq!(packing, Packing::default());
    }

    #[test]
    fn test_oversized_reported() {
        let items = [PackItem::new(0, 11), PackItem::new(1, 10)];
        let packing = first_fit_decreasing(&items, 10);
        assert_eq!(packing.oversized, vec![0]);
        assert_eq!(packing.num_containers(), 1);
        assert_eq!(packing.containers[0].load, 10);
    }

    #[test]
    fn test_loads_within_capacity() {
        let items: Vec<PackItem> = (0..20).map(|i| PackItem::new(i, (i as i32 * 7) % 9 + 1)).collect();
        let packing = first_fit_decreasing(&items, 12);
        let total: i32 = items.iter().map(|i| i.size).sum();
        let packed: i32 = packing.containers.iter().map(|c| c.load).sum();
        assert_eq!(total, packed);
        for c in &packing.containers {
            assert!(c.load <= 12);
        }
        let lower_bound = (total + 11) / 12;
        assert!(packing.num_containers() as i32 >= lower_bound);
    }

    #[test]
    fn test_decreasing_beats_input_order() {
        // First fit in input order needs 3 containers here.
        let items = [
            PackItem::new(0, 3),
            PackItem::new(1, 3),
            PackItem::new(2, 7),
            PackItem::new(3, 7),
        ];
        let packing = first_fit_decreasing(&items, 10);
        assert_eq!(packing.num_containers(), 2);
    }
}
