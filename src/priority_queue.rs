//! Indexed binary min-heap with decrease-key.
//!
//! Entries are `(priority, id)` pairs where `id` is a small dense integer.
//! A position table maps each id to its slot in the heap so membership tests
//! are O(1) and priority updates are O(log n).

const NOT_QUEUED: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct PriorityQueue<P> {
    heap: Vec<(P, usize)>,
    /// `pos[id]` is the heap slot of `id`, or `NOT_QUEUED`.
    pos: Vec<usize>,
}

impl<P: Ord + Copy> PriorityQueue<P> {
    pub const fn new() -> Self {
        Self {
            heap: Vec::new(),
            pos: Vec::new(),
        }
    }

    /// Queue able to hold ids `0..ids` without reallocating.
    pub fn with_capacity(ids: usize) -> Self {
        Self {
            heap: Vec::with_capacity(ids),
            pos: vec![NOT_QUEUED; ids],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.slot(id).is_some()
    }

    pub fn priority(&self, id: usize) -> Option<P> {
        self.slot(id).map(|i| self.heap[i].0)
    }

    /// Id of the minimum entry.
    pub fn top(&self) -> Option<usize> {
        self.heap.first().map(|&(_, id)| id)
    }

    pub fn peek(&self) -> Option<(P, usize)> {
        self.heap.first().copied()
    }

    /// Inserts `id` with `priority`. If `id` is already queued its priority
    /// is replaced.
    pub fn push(&mut self, priority: P, id: usize) {
        if let Some(i) = self.slot(id) {
            let old = self.heap[i].0;
            self.heap[i].0 = priority;
            if priority < old {
                self.sift_up(i);
            } else {
                self.sift_down(i);
            }
            return;
        }
        if id >= self.pos.len() {
            self.pos.resize(id + 1, NOT_QUEUED);
        }
        let i = self.heap.len();
        self.heap.push((priority, id));
        self.pos[id] = i;
        self.sift_up(i);
    }

    /// Removes and returns the minimum entry.
    pub fn pop(&mut self) -> Option<(P, usize)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.pos[entry.1] = NOT_QUEUED;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry)
    }

    /// Lowers the priority of a queued id.
    ///
    /// Returns `false`, leaving the queue untouched, when `id` is not queued
    /// or `priority` is not strictly lower than the current one.
    pub fn change_priority(&mut self, id: usize, priority: P) -> bool {
        match self.slot(id) {
            Some(i) if priority < self.heap[i].0 => {
                self.heap[i].0 = priority;
                self.sift_up(i);
                true
            }
            _ => false,
        }
    }

    fn slot(&self, id: usize) -> Option<usize> {
        self.pos.get(id).copied().filter(|&i| i != NOT_QUEUED)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a].1] = a;
        self.pos[self.heap[b].1] = b;
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].0 >= self.heap[parent].0 {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let (l, r) = (2 * i + 1, 2 * i + 2);
            let mut min = i;
            if l < n && self.heap[l].0 < self.heap[min].0 {
                min = l;
            }
            if r < n && self.heap[r].0 < self.heap[min].0 {
                min = r;
            }
            if min == i {
                break;
            }
            self.swap(i, min);
            i = min;
        }
    }
}

impl<P: Ord + Copy> Default for PriorityQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}
