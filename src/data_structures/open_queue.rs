// https://en.wikipedia.org/wiki/Binary_heap

use std::cmp::Ordering;

use screeps::{Direction, RoomXY};

/// A node's pending work, as handed to [OpenQueue::push]: which node to
/// visit, its priority inputs, and the candidate directions to continue
/// in, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNode {
    pub node: usize,
    pub estimated_cost: u32,
    pub manhattan_distance: u32,
    pub directions: Vec<Direction>,
}

/// One unit of pending search work: visit a node and, unless the search
/// ends there, continue one step in `direction`.
///
/// A node with several candidate directions is represented by several
/// entries sharing one insertion sequence number, ranked in candidate
/// order; a node with no candidate directions gets a single entry with
/// no direction, so it still surfaces to be examined once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenEntry {
    node: usize,
    position: RoomXY,
    direction: Option<Direction>,
    estimated_cost: u32,
    manhattan_distance: u32,
    seq: u32,
    rank: u8,
}

impl OpenEntry {
    /// The index of the search node this entry belongs to.
    pub fn node(&self) -> usize {
        self.node
    }

    /// The grid position of the node this entry belongs to.
    pub fn position(&self) -> RoomXY {
        self.position
    }

    /// The direction to continue in, or None for a visit-only entry.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn estimated_cost(&self) -> u32 {
        self.estimated_cost
    }

    pub fn manhattan_distance(&self) -> u32 {
        self.manhattan_distance
    }
}

// The heap depends on `Ord`. Lesser entries are closer to the front of
// the queue.
impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that we flip the ordering on sequence numbers: among
        // entries tied on estimated cost and Manhattan distance, the
        // most recently inserted node is examined first. The final rank
        // comparison keeps one node's entries in candidate order, and
        // since (seq, rank) pairs are unique within a queue it also
        // keeps `Ord` consistent with the derived `PartialEq`.
        self.estimated_cost
            .cmp(&other.estimated_cost)
            .then_with(|| self.manhattan_distance.cmp(&other.manhattan_distance))
            .then_with(|| other.seq.cmp(&self.seq))
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

// `PartialOrd` needs to be implemented as well.
impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An indexable binary min-heap of pending search work.
///
/// The entry ordering is fully deterministic:
///
/// 1. lowest estimated cost first;
/// 2. then lowest Manhattan distance, favoring nodes more directly in
///    line with the target;
/// 3. then the most recently inserted node, so fresh discoveries along
///    the current route are followed before older frontier is revisited;
/// 4. then a node's own candidate directions in their given order.
///
/// Ties are never left to arbitrary heap layout, which makes whole
/// searches reproducible.
///
/// Beyond the usual push/peek/pop, the queue is indexable by grid
/// position: [OpenQueue::update_position] lets a caller replace all of
/// a node's pending work in place when a cheaper route to its position
/// is found, preserving the node's original insertion sequence number.
#[derive(Debug, Clone)]
pub struct OpenQueue {
    entries: Vec<OpenEntry>,
    next_seq: u32,
}

impl OpenQueue {
    /// Initializes a new, empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// The number of pending entries (not distinct nodes).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queues a node's pending work, one entry per candidate direction
    /// (or a single visit-only entry if it has none), under a fresh
    /// sequence number.
    pub fn push(&mut self, position: RoomXY, pending: PendingNode) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.push_with_seq(position, pending, seq);
    }

    /// Returns the front entry without removing it.
    pub fn peek(&self) -> Option<&OpenEntry> {
        self.entries.first()
    }

    /// Removes and returns the front entry.
    pub fn pop(&mut self) -> Option<OpenEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.remove(0))
        }
    }

    /// Replaces the pending work of the node at a grid position.
    ///
    /// If any entry exists at `position`, `f` receives one of that
    /// node's entries (all entries at one position share their node,
    /// estimated cost, and Manhattan distance) and either returns the
    /// replacement work or None to leave the queue unchanged. The
    /// replacement keeps the original insertion sequence number, so the
    /// node does not jump ahead of later discoveries it was already
    /// tied with.
    ///
    /// Returns whether an entry existed at `position`.
    ///
    /// The position lookup is a linear scan. With an open set bounded
    /// by the room area this is affordable; an auxiliary position
    /// index would remove it if profiling ever demands.
    pub fn update_position<F>(&mut self, position: RoomXY, f: F) -> bool
    where
        F: FnOnce(&OpenEntry) -> Option<PendingNode>,
    {
        let Some(index) = self.entries.iter().position(|e| e.position == position) else {
            return false;
        };

        if let Some(pending) = f(&self.entries[index]) {
            let seq = self.entries[index].seq;
            while let Some(i) = self.entries.iter().position(|e| e.position == position) {
                self.remove(i);
            }
            self.push_with_seq(position, pending, seq);
        }

        true
    }

    fn push_with_seq(&mut self, position: RoomXY, pending: PendingNode, seq: u32) {
        let PendingNode {
            node,
            estimated_cost,
            manhattan_distance,
            directions,
        } = pending;

        if directions.is_empty() {
            self.push_entry(OpenEntry {
                node,
                position,
                direction: None,
                estimated_cost,
                manhattan_distance,
                seq,
                rank: 0,
            });
        } else {
            for (rank, direction) in directions.into_iter().enumerate() {
                self.push_entry(OpenEntry {
                    node,
                    position,
                    direction: Some(direction),
                    estimated_cost,
                    manhattan_distance,
                    seq,
                    rank: rank as u8,
                });
            }
        }
    }

    fn push_entry(&mut self, entry: OpenEntry) {
        self.entries.push(entry);
        self.percolate_up(self.entries.len() - 1);
    }

    /// Removes and returns the entry at a heap index, restoring the
    /// heap property afterwards.
    fn remove(&mut self, index: usize) -> OpenEntry {
        let removed = self.entries.swap_remove(index);
        if index < self.entries.len() {
            // The element swapped into place may belong above or below
            // its new index.
            self.percolate_up(index);
            self.percolate_down(index);
        }
        removed
    }

    fn percolate_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index] < self.entries[parent] {
                self.entries.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn percolate_down(&mut self, mut index: usize) {
        loop {
            let left = index * 2 + 1;
            if left >= self.entries.len() {
                break;
            }

            let right = left + 1;
            let mut child = left;
            if right < self.entries.len() && self.entries[right] < self.entries[left] {
                child = right;
            }

            if self.entries[child] < self.entries[index] {
                self.entries.swap(index, child);
                index = child;
            } else {
                break;
            }
        }
    }
}
