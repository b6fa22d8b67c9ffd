use crate::config::BalanceTolerance;
use crate::error::TreeError;
use crate::node_store::{NodeHandle, NodeStore, NodeView};
use crate::utils::rebalance_threshold;
use std::cmp::Ordering;
use std::fmt::Display;
use tracing::{debug, trace};

/// Where a search goes after examining a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Lesser,
    Greater,
    Stop,
}

impl Direction {
    /// Direction leading from `value` toward `target`.
    pub fn toward<T: Ord>(value: &T, target: &T) -> Self {
        match value.cmp(target) {
            Ordering::Greater => Direction::Lesser,
            Ordering::Less => Direction::Greater,
            Ordering::Equal => Direction::Stop,
        }
    }
}

/// Array-backed binary search tree that rebuilds itself when it grows too tall.
///
/// Insertion never rotates. Instead the tree tracks the deepest path created
/// since the last rebuild and, once that exceeds the [`BalanceTolerance`],
/// rebuilds the whole store into a minimal-height shape.
#[derive(Clone, Debug)]
pub struct OrderedIndexTree<T> {
    store: NodeStore<T>,
    root: Option<usize>,
    height: usize,
    tolerance: BalanceTolerance,
}

impl<T: Ord> Default for OrderedIndexTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> OrderedIndexTree<T> {
    pub fn new() -> Self {
        Self::with_tolerance(BalanceTolerance::default())
    }

    pub fn with_tolerance(tolerance: BalanceTolerance) -> Self {
        Self {
            store: NodeStore::new(),
            root: None,
            height: 0,
            tolerance,
        }
    }

    /// Builds a minimal-height tree directly from unsorted values.
    pub fn balanced_from(values: impl IntoIterator<Item = T>) -> Self {
        let mut sorted: Vec<T> = values.into_iter().collect();
        sorted.sort();
        sorted.dedup();

        let mut tree = Self::new();
        tree.install_sorted(sorted, 0);
        tree
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Deepest path created by insertion since the last rebuild.
    ///
    /// Reset to 1 by every rebuild, so it can under-report the real shape
    /// until new inserts go deeper. See [`measured_height`](Self::measured_height).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tolerance(&self) -> &BalanceTolerance {
        &self.tolerance
    }

    /// Number of rebuilds this tree has gone through.
    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub fn root(&self) -> Option<NodeHandle> {
        self.root.map(|i| self.store.handle(i))
    }

    /// Resolves a handle issued by [`root`](Self::root) or a previous `node` call.
    ///
    /// Handles from before the most recent rebuild are rejected.
    pub fn node(&self, handle: NodeHandle) -> Result<NodeView<'_, T>, TreeError> {
        self.store.get(handle)
    }

    /// Inserts `value`; a value already present is ignored.
    pub fn insert(&mut self, value: T) {
        let Some(mut current) = self.root else {
            self.root = Some(self.store.push(value));
            self.height = 1;
            return;
        };

        let mut depth = 1;
        let goes_left = loop {
            let node = self.store.node(current);
            let (goes_left, next) = match value.cmp(&node.value) {
                Ordering::Less => (true, node.left),
                Ordering::Greater => (false, node.right),
                Ordering::Equal => {
                    trace!(depth, "duplicate value ignored");
                    return;
                }
            };
            match next {
                Some(child) => {
                    current = child;
                    depth += 1;
                }
                None => break goes_left,
            }
        };

        let leaf = self.store.push(value);
        let parent = self.store.node_mut(current);
        if goes_left {
            parent.left = Some(leaf);
        } else {
            parent.right = Some(leaf);
        }
        self.height = self.height.max(depth + 1);

        if self.needs_rebalance() {
            self.rebalance();
        }
    }

    fn needs_rebalance(&self) -> bool {
        self.tolerance.is_enabled()
            && self.height as f64 > rebalance_threshold(self.store.len(), &self.tolerance)
    }

    /// Rebuilds the tree into minimal-height shape and resets the tracked height.
    ///
    /// Every handle issued before the call becomes stale.
    pub fn rebalance(&mut self) {
        if self.store.len() <= 1 {
            return;
        }

        let previous_height = self.height;
        let order = self.in_order_indices();
        let retired = std::mem::take(&mut self.store);
        let generation = retired.generation() + 1;

        let mut slots: Vec<Option<T>> = retired.into_values().into_iter().map(Some).collect();
        let sorted: Vec<T> = order.iter().filter_map(|&i| slots[i].take()).collect();
        let count = sorted.len();

        self.install_sorted(sorted, generation);

        debug!(
            count,
            previous_height,
            generation,
            "rebuilt tree from sorted values"
        );
    }

    // Node i of the new store holds sorted[i]; links follow the midpoint split.
    fn install_sorted(&mut self, sorted: Vec<T>, generation: u64) {
        let mut store = NodeStore::with_capacity(generation, sorted.len());
        for value in sorted {
            store.push(value);
        }
        let last = store.len() as isize - 1;
        let root = Self::link_balanced(&mut store, 0, last);

        self.store = store;
        self.root = root;
        self.height = if root.is_some() { 1 } else { 0 };
    }

    fn link_balanced(store: &mut NodeStore<T>, start: isize, end: isize) -> Option<usize> {
        if start > end {
            return None;
        }

        let mid = ((start + end) / 2) as usize;
        let left = Self::link_balanced(store, start, mid as isize - 1);
        let right = Self::link_balanced(store, mid as isize + 1, end);
        let node = store.node_mut(mid);
        node.left = left;
        node.right = right;
        Some(mid)
    }

    /// Walks from the root, letting `condition` pick a direction at each node.
    ///
    /// Returns the last value visited: the one where `condition` answered
    /// [`Direction::Stop`], or the one whose requested child was missing.
    /// Returns `None` only when the tree is empty.
    pub fn search<'a, F>(&'a self, mut condition: F) -> Option<&'a T>
    where
        F: FnMut(&'a T) -> Direction,
    {
        let mut cursor = self.root;
        let mut best = None;
        while let Some(index) = cursor {
            let node = self.store.node(index);
            best = Some(&node.value);
            cursor = match condition(&node.value) {
                Direction::Lesser => node.left,
                Direction::Greater => node.right,
                Direction::Stop => break,
            };
        }
        best
    }

    pub fn get(&self, target: &T) -> Option<&T> {
        self.search(|v| Direction::toward(v, target))
            .filter(|v| *v == target)
    }

    pub fn contains(&self, target: &T) -> bool {
        self.get(target).is_some()
    }

    /// Smallest stored value strictly greater than `target`.
    pub fn successor(&self, target: &T) -> Option<&T> {
        let mut best = None;
        self.search(|v| {
            if v > target {
                best = Some(v);
                Direction::Lesser
            } else {
                Direction::Greater
            }
        });
        best
    }

    /// Largest stored value strictly less than `target`.
    pub fn predecessor(&self, target: &T) -> Option<&T> {
        let mut best = None;
        self.search(|v| {
            if v < target {
                best = Some(v);
                Direction::Greater
            } else {
                Direction::Lesser
            }
        });
        best
    }
}

impl<T> OrderedIndexTree<T> {
    /// Ascending iterator over all stored values.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            store: &self.store,
            stack: Vec::new(),
        };
        iter.descend_left(self.root);
        iter
    }

    /// All stored values in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    fn in_order_indices(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.store.len());
        let mut stack = Vec::new();
        let mut cursor = self.root;
        loop {
            while let Some(index) = cursor {
                stack.push(index);
                cursor = self.store.node(index).left;
            }
            let Some(index) = stack.pop() else {
                break;
            };
            order.push(index);
            cursor = self.store.node(index).right;
        }
        order
    }

    /// Depth of the deepest leaf in the current shape.
    pub fn measured_height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((index, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.store.node(index);
            stack.extend(node.left.map(|i| (i, depth + 1)));
            stack.extend(node.right.map(|i| (i, depth + 1)));
        }
        deepest
    }

    /// Values grouped by depth, each row ordered left to right.
    pub fn rows(&self) -> Vec<Vec<&T>> {
        let mut rows: Vec<Vec<&T>> = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut cursor = self.root.map(|r| (r, 0));
        loop {
            while let Some((index, depth)) = cursor {
                stack.push((index, depth));
                cursor = self.store.node(index).left.map(|i| (i, depth + 1));
            }
            let Some((index, depth)) = stack.pop() else {
                break;
            };
            if rows.len() <= depth {
                rows.resize_with(depth + 1, Vec::new);
            }
            let node = self.store.node(index);
            rows[depth].push(&node.value);
            cursor = node.right.map(|i| (i, depth + 1));
        }
        rows
    }

    pub fn render(&self) -> String
    where
        T: Display,
    {
        let mut out = String::new();
        let mut stack: Vec<(usize, String, bool)> =
            self.root.map(|r| (r, String::new(), true)).into_iter().collect();

        while let Some((index, prefix, is_tail)) = stack.pop() {
            let node = self.store.node(index);
            out.push_str(&format!(
                "{}{} {}\n",
                prefix,
                if is_tail { "└──" } else { "├──" },
                node.value
            ));

            let new_prefix = format!("{}{}", prefix, if is_tail { "    " } else { "│   " });

            // right subtree is drawn first, so it goes on the stack last
            if let Some(left) = node.left {
                stack.push((left, new_prefix.clone(), true));
            }
            if let Some(right) = node.right {
                stack.push((right, new_prefix, false));
            }
        }
        out
    }

    pub fn pretty_print(&self)
    where
        T: Display,
    {
        println!("\n=== Ordered Index Tree ===");
        if self.root.is_none() {
            println!("  (empty tree)");
        } else {
            print!("{}", self.render());
        }
        println!("==========================\n");
    }
}

impl<T: Ord> Extend<T> for OrderedIndexTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedIndexTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderedIndexTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator driven by an explicit stack.
#[derive(Debug)]
pub struct Iter<'a, T> {
    store: &'a NodeStore<T>,
    stack: Vec<usize>,
}

impl<T> Iter<'_, T> {
    fn descend_left(&mut self, mut cursor: Option<usize>) {
        while let Some(index) = cursor {
            self.stack.push(index);
            cursor = self.store.node(index).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = self.store.node(index);
        self.descend_left(node.right);
        Some(&node.value)
    }
}
