//! Array-backed node storage with generational handles.
//!
//! Nodes live in a single `Vec` and refer to their children by index. A store
//! never frees individual nodes; the tree replaces the whole store when it
//! rebuilds, and the replacement carries the next generation number so handles
//! issued by the retired store are rejected instead of resolving to whatever
//! now occupies the same slot.

use crate::error::TreeError;

/// Designates a node within one store generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u64,
}

impl NodeHandle {
    /// Position of the node within its store.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation of the store that issued this handle.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

/// Read-only view of a node resolved from a [`NodeHandle`].
#[derive(Debug)]
pub struct NodeView<'a, T> {
    value: &'a T,
    left: Option<NodeHandle>,
    right: Option<NodeHandle>,
}

impl<'a, T> NodeView<'a, T> {
    pub fn value(&self) -> &'a T {
        self.value
    }

    pub fn left(&self) -> Option<NodeHandle> {
        self.left
    }

    pub fn right(&self) -> Option<NodeHandle> {
        self.right
    }
}

#[derive(Clone, Debug)]
pub struct NodeStore<T> {
    nodes: Vec<Node<T>>,
    generation: u64,
}

impl<T> Default for NodeStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeStore<T> {
    pub fn new() -> Self {
        Self::with_generation(0)
    }

    pub(crate) fn with_generation(generation: u64) -> Self {
        Self {
            nodes: Vec::new(),
            generation,
        }
    }

    pub(crate) fn with_capacity(generation: u64, capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            generation,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Adds a leaf node holding `value` and returns its handle.
    pub fn append(&mut self, value: T) -> NodeHandle {
        let index = self.push(value);
        self.handle(index)
    }

    /// Resolves `handle` to the node's value and child handles.
    pub fn get(&self, handle: NodeHandle) -> Result<NodeView<'_, T>, TreeError> {
        let index = self.resolve(handle)?;
        let node = &self.nodes[index];
        Ok(NodeView {
            value: &node.value,
            left: node.left.map(|i| self.handle(i)),
            right: node.right.map(|i| self.handle(i)),
        })
    }

    pub fn set_left(
        &mut self,
        handle: NodeHandle,
        child: Option<NodeHandle>,
    ) -> Result<(), TreeError> {
        let index = self.resolve(handle)?;
        let child = child.map(|c| self.resolve(c)).transpose()?;
        self.nodes[index].left = child;
        Ok(())
    }

    pub fn set_right(
        &mut self,
        handle: NodeHandle,
        child: Option<NodeHandle>,
    ) -> Result<(), TreeError> {
        let index = self.resolve(handle)?;
        let child = child.map(|c| self.resolve(c)).transpose()?;
        self.nodes[index].right = child;
        Ok(())
    }

    pub(crate) fn handle(&self, index: usize) -> NodeHandle {
        NodeHandle {
            index,
            generation: self.generation,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Result<usize, TreeError> {
        if handle.generation != self.generation {
            return Err(TreeError::StaleHandle {
                handle,
                current: self.generation,
            });
        }
        if handle.index >= self.nodes.len() {
            return Err(TreeError::HandleOutOfBounds {
                handle,
                len: self.nodes.len(),
            });
        }
        Ok(handle.index)
    }

    // Index-based accessors for the tree itself. Indices come from links
    // stored in this same generation, so they are always in bounds.

    pub(crate) fn push(&mut self, value: T) -> usize {
        self.nodes.push(Node {
            value,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn node(&self, index: usize) -> &Node<T> {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<T> {
        &mut self.nodes[index]
    }

    pub(crate) fn into_values(self) -> Vec<T> {
        self.nodes.into_iter().map(|n| n.value).collect()
    }
}
