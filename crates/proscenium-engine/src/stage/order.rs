//! Draw-order list over pool slots.
//!
//! A doubly linked list stored in an arena indexed by slot, closed into a ring by
//! a sentinel node at index `capacity` whose z-index is `ZIndex::MAX`. The list is
//! kept sorted by non-decreasing z-index and repaired incrementally: a z-index
//! change only marks the node dirty, and [`DrawOrder::repair`] relocates dirty
//! nodes once per frame.
//!
//! Tie-break: among equal z-indices, the node whose z-index changed most recently
//! comes last; untouched nodes keep their relative order.

use super::z_index::ZIndex;

#[derive(Debug, Copy, Clone)]
struct Node {
    z: ZIndex,
    prev: u32,
    next: u32,
    linked: bool,
    dirty: bool,
}

#[derive(Debug)]
pub(crate) struct DrawOrder {
    nodes: Vec<Node>,
    /// Dirty nodes in order of their last z-index change.
    dirty: Vec<u32>,
    /// Scratch buffer reused by `repair`.
    anchors: Vec<Option<u32>>,
}

impl DrawOrder {
    pub(crate) fn new(capacity: u32) -> Self {
        let sentinel = capacity;
        let mut nodes = vec![
            Node { z: ZIndex::NONE, prev: sentinel, next: sentinel, linked: false, dirty: false };
            capacity as usize + 1
        ];
        nodes[sentinel as usize] =
            Node { z: ZIndex::MAX, prev: sentinel, next: sentinel, linked: true, dirty: false };

        Self { nodes, dirty: Vec::new(), anchors: Vec::new() }
    }

    #[inline]
    fn sentinel(&self) -> u32 {
        (self.nodes.len() - 1) as u32
    }

    #[inline]
    pub(crate) fn z(&self, i: u32) -> ZIndex {
        self.nodes[i as usize].z
    }

    /// Records a new z-index for node `i`. Returns `false` if the value is unchanged.
    ///
    /// The node's list position is stale until the next [`repair`](Self::repair).
    pub(crate) fn set_z(&mut self, i: u32, z: ZIndex) -> bool {
        let node = &mut self.nodes[i as usize];
        if node.z == z {
            return false;
        }
        node.z = z;
        let was_dirty = std::mem::replace(&mut node.dirty, true);

        if was_dirty {
            self.dirty.retain(|&d| d != i);
        }
        self.dirty.push(i);
        true
    }

    /// Drops node `i` from the list immediately and resets its z-index.
    pub(crate) fn remove(&mut self, i: u32) {
        if self.nodes[i as usize].dirty {
            self.dirty.retain(|&d| d != i);
        }
        self.unlink(i);

        let node = &mut self.nodes[i as usize];
        node.z = ZIndex::NONE;
        node.dirty = false;
    }

    /// Relocates every dirty node.
    ///
    /// All dirty nodes are unlinked first, each remembering its nearest clean
    /// predecessor as anchor. They are then re-inserted in change order right
    /// after that anchor (or at the tail when the node was not linked before)
    /// and bubbled locally into place.
    pub(crate) fn repair(&mut self) {
        if self.dirty.is_empty() {
            return;
        }

        let sentinel = self.sentinel();
        let dirty = std::mem::take(&mut self.dirty);
        let mut anchors = std::mem::take(&mut self.anchors);
        anchors.clear();

        for &i in &dirty {
            let node = self.nodes[i as usize];
            if !node.linked {
                anchors.push(None);
                continue;
            }

            let mut anchor = node.prev;
            while anchor != sentinel && self.nodes[anchor as usize].dirty {
                anchor = self.nodes[anchor as usize].prev;
            }
            anchors.push(Some(anchor));
        }

        for &i in &dirty {
            self.unlink(i);
        }

        for (&i, &anchor) in dirty.iter().zip(anchors.iter()) {
            self.nodes[i as usize].dirty = false;
            if !self.nodes[i as usize].z.is_drawn() {
                continue;
            }

            let after = anchor.unwrap_or(self.nodes[sentinel as usize].prev);
            self.link_after(i, after);
            self.bubble(i);
        }

        self.anchors = anchors;
        // Reuse the allocation for the next frame's changes.
        self.dirty = dirty;
        self.dirty.clear();
    }

    fn bubble(&mut self, i: u32) {
        let sentinel = self.sentinel();
        let z = self.nodes[i as usize].z;

        let mut after = self.nodes[i as usize].prev;
        while after != sentinel && self.nodes[after as usize].z > z {
            after = self.nodes[after as usize].prev;
        }

        if after == self.nodes[i as usize].prev {
            let mut next = self.nodes[i as usize].next;
            while next != sentinel && self.nodes[next as usize].z <= z {
                after = next;
                next = self.nodes[next as usize].next;
            }
        }

        if after != self.nodes[i as usize].prev {
            self.unlink(i);
            self.link_after(i, after);
        }
    }

    fn link_after(&mut self, i: u32, after: u32) {
        let next = self.nodes[after as usize].next;

        let node = &mut self.nodes[i as usize];
        node.prev = after;
        node.next = next;
        node.linked = true;

        self.nodes[after as usize].next = i;
        self.nodes[next as usize].prev = i;
    }

    fn unlink(&mut self, i: u32) {
        let node = self.nodes[i as usize];
        if !node.linked {
            return;
        }

        self.nodes[node.prev as usize].next = node.next;
        self.nodes[node.next as usize].prev = node.prev;

        let sentinel = self.sentinel();
        let node = &mut self.nodes[i as usize];
        node.prev = sentinel;
        node.next = sentinel;
        node.linked = false;
    }

    /// First node in draw order.
    #[inline]
    pub(crate) fn first(&self) -> Option<u32> {
        self.after(self.sentinel())
    }

    /// Node drawn after `i`. `i` must be linked (or the sentinel).
    #[inline]
    pub(crate) fn after(&self, i: u32) -> Option<u32> {
        let next = self.nodes[i as usize].next;
        (next != self.sentinel()).then_some(next)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors(self.first(), move |&i| self.after(i))
    }
}
