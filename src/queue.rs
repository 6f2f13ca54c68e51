//! Queue module - bag randomizer and lookahead
//!
//! Pieces are supplied by a "7-bag": one of each kind, drawn without
//! replacement at a uniformly random index, refilled when empty. A fixed
//! length lookahead buffer sits in front of the bag so upcoming pieces can
//! be previewed; dequeuing the front triggers one bag pull to refill it.
//!
//! The RNG is a small seeded LCG so piece sequences are reproducible.

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

/// The 7-piece bag
#[derive(Debug, Clone)]
pub struct Bag {
    remaining: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            remaining: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Draw one kind at a uniformly random index, refilling first if empty
    pub fn next(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let idx = self.rng.next_range(self.remaining.len() as u32) as usize;
        self.remaining.remove(idx)
    }

    /// Kinds left in the current bag
    #[cfg(test)]
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }
}

/// Bag plus lookahead buffer
#[derive(Debug, Clone)]
pub struct PieceQueue {
    bag: Bag,
    lookahead: VecDeque<PieceKind>,
}

impl PieceQueue {
    /// Create a queue with a pre-populated lookahead of the given length
    pub fn new(seed: u32, lookahead_len: usize) -> Self {
        let mut queue = Self {
            bag: Bag::new(seed),
            lookahead: VecDeque::with_capacity(lookahead_len),
        };
        queue.refill_lookahead(lookahead_len);
        queue
    }

    /// Pull from the bag until the lookahead holds `len` pieces
    pub fn refill_lookahead(&mut self, len: usize) {
        while self.lookahead.len() < len {
            let kind = self.bag.next();
            self.lookahead.push_back(kind);
        }
    }

    /// Pop the front of the lookahead and immediately refill it by one pull
    pub fn dequeue_next(&mut self) -> PieceKind {
        let target = self.lookahead.len();
        let kind = match self.lookahead.pop_front() {
            Some(kind) => kind,
            // Zero-length lookahead degenerates to drawing straight
            // from the bag.
            None => self.bag.next(),
        };
        self.refill_lookahead(target);
        kind
    }

    /// Upcoming pieces, front first
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.lookahead.iter().copied()
    }

    pub fn lookahead_len(&self) -> usize {
        self.lookahead.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_coerced() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_bag_draws_each_kind_once() {
        let mut bag = Bag::new(1);
        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(bag.next());
        }
        for kind in PieceKind::ALL {
            assert_eq!(
                drawn.iter().filter(|&&k| k == kind).count(),
                1,
                "kind {:?} not drawn exactly once",
                kind
            );
        }
    }

    #[test]
    fn test_bag_refills_after_exhaustion() {
        let mut bag = Bag::new(7);
        for _ in 0..7 {
            bag.next();
        }
        assert!(bag.remaining().is_empty());

        // Next draw refills and the following 6 complete a fresh bag.
        let mut second = vec![bag.next()];
        for _ in 0..6 {
            second.push(bag.next());
        }
        for kind in PieceKind::ALL {
            assert!(second.contains(&kind));
        }
    }

    #[test]
    fn test_lookahead_stays_at_fixed_length() {
        let mut queue = PieceQueue::new(42, 4);
        assert_eq!(queue.lookahead_len(), 4);

        for _ in 0..20 {
            queue.dequeue_next();
            assert_eq!(queue.lookahead_len(), 4);
        }
    }

    #[test]
    fn test_dequeue_returns_previewed_front() {
        let mut queue = PieceQueue::new(9, 4);
        let front = queue.preview().next().unwrap();
        assert_eq!(queue.dequeue_next(), front);
    }

    #[test]
    fn test_seeded_queues_agree() {
        let mut a = PieceQueue::new(777, 4);
        let mut b = PieceQueue::new(777, 4);
        for _ in 0..30 {
            assert_eq!(a.dequeue_next(), b.dequeue_next());
        }
    }

    #[test]
    fn test_seven_consecutive_draws_cover_all_kinds() {
        // Lookahead plus bag preserve the bag invariant: any 7 draws
        // aligned to a bag boundary contain each kind exactly once.
        let mut queue = PieceQueue::new(3, 0);
        let mut drawn = Vec::new();
        for _ in 0..7 {
            drawn.push(queue.dequeue_next());
        }
        for kind in PieceKind::ALL {
            assert_eq!(drawn.iter().filter(|&&k| k == kind).count(), 1);
        }
    }
}
