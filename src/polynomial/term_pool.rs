//! Recycling storage for polynomial term nodes.
//!
//! All nodes of all polynomials created from one [`TermPool`] live in a single
//! [`TermArena`]: a `Vec` of nodes whose links are plain indices. A node is
//! either linked into exactly one polynomial (sentinels included) or sits on
//! the free stack, never both. Destroyed terms go onto the free stack and are
//! handed out again, most recently freed first, before the arena grows.
//!
//! The pool is a single-threaded resource (`Rc<RefCell<..>>`), so it is
//! `!Send`: every thread that builds polynomials needs its own pool.
use crate::polynomial::term::Term;
use log::trace;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Index of a node inside a [`TermArena`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One storage cell: a term and the index of the next node in its chain.
#[derive(Debug, Clone)]
pub(crate) struct TermNode {
    pub(crate) term: Term,
    pub(crate) link: NodeId,
}

/// Counters describing how the pool has served storage requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// cells created by growing the arena
    pub fresh_allocations: usize,
    /// requests satisfied from the free stack
    pub recycled: usize,
    /// cells currently waiting on the free stack
    pub free_cells: usize,
    /// cells currently linked into some polynomial (sentinels included)
    pub live_cells: usize,
}

impl fmt::Display for PoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fresh allocations: {}, recycled: {}, free cells: {}, live cells: {}",
            self.fresh_allocations, self.recycled, self.free_cells, self.live_cells
        )
    }
}

/// Node storage with a LIFO free stack.
#[derive(Debug, Default)]
pub struct TermArena {
    nodes: Vec<TermNode>,
    free: Vec<NodeId>,
    fresh_allocations: usize,
    recycled: usize,
}

impl TermArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the most recently released cell, if there is one.
    pub(crate) fn acquire(&mut self) -> Option<NodeId> {
        let id = self.free.pop()?;
        self.recycled += 1;
        trace!("term pool: reusing cell {}", id.0);
        Some(id)
    }

    /// Pushes a cell onto the free stack. The caller must already have
    /// unlinked it from its chain.
    pub(crate) fn release(&mut self, id: NodeId) {
        debug_assert!(id.0 < self.nodes.len(), "cell {} is out of range", id.0);
        debug_assert!(!self.free.contains(&id), "cell {} released twice", id.0);
        self.nodes[id.0].link = id;
        self.free.push(id);
        trace!("term pool: cell {} returned", id.0);
    }

    /// Storage for a new node holding `term`: a recycled cell when the free
    /// stack is not empty, a freshly pushed one otherwise. The new node links
    /// to itself.
    pub(crate) fn allocate(&mut self, term: Term) -> NodeId {
        match self.acquire() {
            Some(id) => {
                let node = &mut self.nodes[id.0];
                node.term = term;
                node.link = id;
                id
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(TermNode { term, link: id });
                self.fresh_allocations += 1;
                id
            }
        }
    }

    pub(crate) fn term(&self, id: NodeId) -> Term {
        self.nodes[id.0].term
    }

    pub(crate) fn term_mut(&mut self, id: NodeId) -> &mut Term {
        &mut self.nodes[id.0].term
    }

    pub(crate) fn link(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].link
    }

    pub(crate) fn set_link(&mut self, id: NodeId, next: NodeId) {
        self.nodes[id.0].link = next;
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            fresh_allocations: self.fresh_allocations,
            recycled: self.recycled,
            free_cells: self.free.len(),
            live_cells: self.nodes.len() - self.free.len(),
        }
    }
}

/// Shared handle to a [`TermArena`].
///
/// Cloning the handle is cheap and yields the same pool. Hand one to every
/// polynomial that should share recycled storage.
#[derive(Clone, Default)]
pub struct TermPool {
    arena: Rc<RefCell<TermArena>>,
}

impl TermPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> PoolStats {
        self.arena.borrow().stats()
    }

    /// true when both handles point at the same arena
    pub fn same_pool(&self, other: &TermPool) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }

    pub(crate) fn arena(&self) -> Ref<'_, TermArena> {
        self.arena.borrow()
    }

    pub(crate) fn arena_mut(&self) -> RefMut<'_, TermArena> {
        self.arena.borrow_mut()
    }
}

impl fmt::Debug for TermPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arena.try_borrow() {
            Ok(arena) => f.debug_struct("TermPool").field("stats", &arena.stats()).finish(),
            Err(_) => f.write_str("TermPool { <borrowed> }"),
        }
    }
}
