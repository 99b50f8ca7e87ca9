//! Reusable scratch buffer for boundary cells.
//!
//! While cells are collected the buffer is a binary min-heap ordered by
//! (row, col). Once collection is done, [`CellHeap::sort_dedup_in_place`]
//! heapsorts the same storage and drops duplicates, so a query never
//! allocates once the buffer has grown to its working size.

use crate::grid::GridCell;

/// Binary min-heap of [`GridCell`] backed by a single reusable `Vec`.
#[derive(Clone, Debug, Default)]
pub struct CellHeap {
    cells: Vec<GridCell>,
}

impl CellHeap {
    /// Creates an empty heap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with room for `capacity` cells.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Empties the heap, keeping its storage.
    #[inline]
    pub fn reset(&mut self) {
        self.cells.clear();
    }

    /// Number of stored cells (duplicates included until sorted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the heap holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Allocated capacity of the backing storage.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    /// Backing storage. In heap order before sorting, strictly ascending after.
    #[must_use]
    pub fn as_slice(&self) -> &[GridCell] {
        &self.cells
    }

    /// Smallest cell, if any.
    #[must_use]
    pub fn peek(&self) -> Option<GridCell> {
        self.cells.first().copied()
    }

    /// Adds a cell, restoring heap order. O(log n).
    #[inline]
    pub fn push(&mut self, cell: GridCell) {
        self.cells.push(cell);
        self.sift_up(self.cells.len() - 1);
    }

    /// Removes and returns the smallest cell. O(log n).
    pub fn pop(&mut self) -> Option<GridCell> {
        let last = self.cells.len().checked_sub(1)?;
        self.cells.swap(0, last);
        self.sift_down(0, last);
        self.cells.pop()
    }

    /// Sorts the stored cells ascending by (row, col) and removes duplicates.
    ///
    /// Heapsort on the existing storage: the root is swapped to the shrinking
    /// end, which leaves the cells descending, then the slice is reversed and
    /// adjacent duplicates are collapsed. Call once, after the last push of a
    /// tracing pass; the heap order is gone afterwards.
    pub fn sort_dedup_in_place(&mut self) {
        for end in (1..self.cells.len()).rev() {
            self.cells.swap(0, end);
            self.sift_down(0, end);
        }
        self.cells.reverse();
        self.cells.dedup();
    }

    fn sift_up(&mut self, mut child: usize) {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.cells[child] >= self.cells[parent] {
                break;
            }
            self.cells.swap(parent, child);
            child = parent;
        }
    }

    /// Restores heap order below `root`, considering only `..len`.
    fn sift_down(&mut self, mut root: usize, len: usize) {
        loop {
            let left = 2 * root + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smallest = if right < len && self.cells[right] < self.cells[left] {
                right
            } else {
                left
            };
            if self.cells[smallest] >= self.cells[root] {
                break;
            }
            self.cells.swap(root, smallest);
            root = smallest;
        }
    }
}
