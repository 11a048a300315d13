//! Ordered term chains stored inside a [`TermArena`].
//!
//! A chain is circular through its sentinel (header) node: the header's link is
//! the first term and the last term links back to the header, so an empty
//! chain is a header linking to itself. Terms are kept in strictly descending
//! exponent order, never share an exponent and never hold a zero coefficient.
use crate::polynomial::term::Term;
use crate::polynomial::term_pool::{NodeId, TermArena, TermPool};

/// What a single insertion did to a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertOutcome {
    /// zero coefficient, chain untouched
    Ignored,
    /// a new node was spliced in
    Inserted,
    /// coefficient added to the term with the same exponent
    Combined,
    /// the combined coefficient became zero and the node went back to the pool
    Cancelled,
}

impl TermArena {
    /// Creates an empty chain and returns its header.
    pub(crate) fn new_chain(&mut self) -> NodeId {
        // allocate() leaves the node linked to itself
        self.allocate(Term::default())
    }

    pub(crate) fn first(&self, header: NodeId) -> NodeId {
        self.link(header)
    }

    pub(crate) fn chain_is_empty(&self, header: NodeId) -> bool {
        self.link(header) == header
    }

    pub(crate) fn chain_len(&self, header: NodeId) -> usize {
        let mut count = 0;
        let mut current = self.first(header);
        while current != header {
            count += 1;
            current = self.link(current);
        }
        count
    }

    /// Combine-or-insert-or-cancel of `coefficient * x^exponent`.
    pub(crate) fn insert_term(
        &mut self,
        header: NodeId,
        coefficient: i64,
        exponent: i32,
    ) -> InsertOutcome {
        if coefficient == 0 {
            return InsertOutcome::Ignored;
        }
        let mut prev = header;
        let mut current = self.first(header);
        while current != header && self.term(current).exponent > exponent {
            prev = current;
            current = self.link(current);
        }

        if current != header && self.term(current).exponent == exponent {
            let term = self.term_mut(current);
            term.coefficient += coefficient;
            if term.coefficient != 0 {
                return InsertOutcome::Combined;
            }
            // exponents are unique, so nothing further down can combine
            let next = self.link(current);
            self.set_link(prev, next);
            self.release(current);
            InsertOutcome::Cancelled
        } else {
            let node = self.allocate(Term::new(coefficient, exponent));
            self.set_link(node, current);
            self.set_link(prev, node);
            InsertOutcome::Inserted
        }
    }

    /// Returns every term node to the pool; the header stays and the chain is
    /// left empty. Returns the number of released terms.
    pub(crate) fn release_terms(&mut self, header: NodeId) -> usize {
        let mut released = 0;
        let mut current = self.first(header);
        while current != header {
            let next = self.link(current);
            self.release(current);
            released += 1;
            current = next;
        }
        self.set_link(header, header);
        released
    }

    /// Returns the whole chain, header included, to the pool.
    pub(crate) fn release_chain(&mut self, header: NodeId) -> usize {
        let released = self.release_terms(header);
        self.release(header);
        released
    }

    /// Builds a fresh chain by appending `terms` one after another. The input
    /// must already be in descending exponent order without zero terms.
    pub(crate) fn chain_from_ordered<I>(&mut self, terms: I) -> NodeId
    where
        I: IntoIterator<Item = Term>,
    {
        let header = self.new_chain();
        let mut last = header;
        for term in terms {
            debug_assert!(!term.is_zero(), "zero terms are never stored");
            let node = self.allocate(term);
            self.set_link(node, header);
            self.set_link(last, node);
            last = node;
        }
        header
    }

    /// Deep copy of a chain of this same arena.
    pub(crate) fn copy_chain(&mut self, source: NodeId) -> NodeId {
        let terms = self.chain_terms(source);
        self.chain_from_ordered(terms)
    }

    /// Snapshot of a chain, in chain order.
    pub(crate) fn chain_terms(&self, header: NodeId) -> Vec<Term> {
        ChainCursor::new(self, header).collect()
    }
}

fn advance(arena: &TermArena, header: NodeId, current: &mut NodeId) -> Option<Term> {
    if *current == header {
        return None;
    }
    let term = arena.term(*current);
    *current = arena.link(*current);
    Some(term)
}

/// Forward walk over a chain borrowed from an arena reference.
pub(crate) struct ChainCursor<'a> {
    arena: &'a TermArena,
    header: NodeId,
    current: NodeId,
}

impl<'a> ChainCursor<'a> {
    pub(crate) fn new(arena: &'a TermArena, header: NodeId) -> Self {
        ChainCursor {
            arena,
            header,
            current: arena.first(header),
        }
    }
}

impl Iterator for ChainCursor<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        advance(self.arena, self.header, &mut self.current)
    }
}

/// Lazy, forward-only traversal of a polynomial's terms in descending
/// exponent order.
///
/// The pool is only borrowed inside each `next()`, so other polynomials of
/// the same pool can be created, modified or dropped while a walk is alive.
pub struct Terms<'a> {
    pool: &'a TermPool,
    header: NodeId,
    current: NodeId,
}

impl<'a> Terms<'a> {
    pub(crate) fn new(pool: &'a TermPool, header: NodeId) -> Self {
        let current = pool.arena().first(header);
        Terms {
            pool,
            header,
            current,
        }
    }
}

impl Iterator for Terms<'_> {
    type Item = Term;

    fn next(&mut self) -> Option<Term> {
        advance(&self.pool.arena(), self.header, &mut self.current)
    }
}

impl std::iter::FusedIterator for Terms<'_> {}
