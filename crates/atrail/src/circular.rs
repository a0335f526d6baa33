//! Circular sequences and the two adjacent-slot pairings.
//!
//! Every piece of rotational bookkeeping (slot wrap-around, adjacency of two
//! slots, which split-child owns a slot) goes through `Ring` and `Parity` so
//! the modular arithmetic lives in one place.

use std::fmt;

/// Read-only view of a slice as a cyclic sequence.
///
/// Indices passed to the methods are reduced modulo `len()`. All index
/// methods panic on an empty ring.
#[derive(Clone, Copy, Debug)]
pub struct Ring<'a, T> {
    items: &'a [T],
}

impl<'a, T> Ring<'a, T> {
    #[inline]
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Reduce a signed offset into `0..len`.
    #[inline]
    pub fn wrap(&self, i: isize) -> usize {
        i.rem_euclid(self.len() as isize) as usize
    }

    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i % self.len() + 1) % self.len()
    }

    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i % self.len() + self.len() - 1) % self.len()
    }

    #[inline]
    pub fn get(&self, i: usize) -> &'a T {
        &self.items[i % self.len()]
    }

    /// True iff slots `i` and `j` are cyclic neighbours (wrap-around included).
    #[inline]
    pub fn are_adjacent(&self, i: usize, j: usize) -> bool {
        if self.is_empty() {
            return false;
        }
        let j = j % self.len();
        self.next(i) == j || self.prev(i) == j
    }
}

impl<'a, T: PartialEq> Ring<'a, T> {
    /// First slot holding `x`.
    pub fn position(&self, x: &T) -> Option<usize> {
        self.items.iter().position(|y| y == x)
    }

    /// Whether `a` and `b` sit in neighbouring slots; `None` if either is absent.
    pub fn items_adjacent(&self, a: &T, b: &T) -> Option<bool> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.are_adjacent(i, j))
    }
}

/// One of the two ways to pair the slots of an even-degree rotation into
/// rotationally adjacent pairs.
///
/// - `OddEven`: odd follows even, pairs `(0,1), (2,3), ...`.
/// - `EvenOdd`: even follows odd, pairs `(d-1,0), (1,2), (3,4), ...`.
///
/// Pair `i` is reported as `(2i, 2i+1)` resp. `(2i, 2i-1 mod d)`: the even slot
/// first. All methods expect an even `degree >= 2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parity {
    OddEven,
    EvenOdd,
}

impl Parity {
    /// Search order at every level.
    pub const BOTH: [Parity; 2] = [Parity::OddEven, Parity::EvenOdd];

    /// Slots of pair `i`.
    #[inline]
    pub fn pair(self, i: usize, degree: usize) -> (usize, usize) {
        debug_assert!(degree >= 2 && degree % 2 == 0, "degree {degree} is not even");
        match self {
            Parity::OddEven => (2 * i, 2 * i + 1),
            Parity::EvenOdd => (2 * i, (2 * i + degree - 1) % degree),
        }
    }

    pub fn pairs(self, degree: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..degree / 2).map(move |i| self.pair(i, degree))
    }

    /// Index of the pair (and of the split-child) that owns `slot`.
    #[inline]
    pub fn pair_of_slot(self, slot: usize, degree: usize) -> usize {
        match self {
            Parity::OddEven => (slot % degree) / 2,
            Parity::EvenOdd => ((slot + 1) % degree) / 2,
        }
    }

    /// The slot paired with `slot`.
    pub fn partner(self, slot: usize, degree: usize) -> usize {
        let (a, b) = self.pair(self.pair_of_slot(slot, degree), degree);
        if a == slot % degree {
            b
        } else {
            a
        }
    }

    pub fn other(self) -> Self {
        match self {
            Parity::OddEven => Parity::EvenOdd,
            Parity::EvenOdd => Parity::OddEven,
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parity::OddEven => write!(f, "odd_even"),
            Parity::EvenOdd => write!(f, "even_odd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn even_degree() -> impl Strategy<Value = usize> {
        (1usize..=6).prop_map(|h| 2 * h)
    }

    #[test]
    fn ring_wraps_both_directions() {
        let items = [10, 11, 12, 13];
        let r = Ring::new(&items);
        assert_eq!(r.next(3), 0);
        assert_eq!(r.prev(0), 3);
        assert_eq!(r.wrap(-1), 3);
        assert_eq!(r.wrap(9), 1);
        assert_eq!(*r.get(6), 12);
        assert!(r.are_adjacent(0, 3));
        assert!(!r.are_adjacent(0, 2));
        assert_eq!(r.items_adjacent(&13, &10), Some(true));
        assert_eq!(r.items_adjacent(&10, &99), None);
    }

    #[test]
    fn degree_two_parities_coincide() {
        let a: Vec<_> = Parity::OddEven.pairs(2).collect();
        let b: Vec<_> = Parity::EvenOdd.pairs(2).collect();
        assert_eq!(a, vec![(0, 1)]);
        assert_eq!(b, vec![(0, 1)]);
    }

    #[test]
    fn even_odd_wraps_first_pair() {
        let pairs: Vec<_> = Parity::EvenOdd.pairs(6).collect();
        assert_eq!(pairs, vec![(0, 5), (2, 1), (4, 3)]);
        assert_eq!(Parity::EvenOdd.pair_of_slot(5, 6), 0);
        assert_eq!(Parity::EvenOdd.pair_of_slot(1, 6), 1);
        assert_eq!(Parity::OddEven.pair_of_slot(5, 6), 2);
    }

    proptest! {
        #[test]
        fn pairs_partition_slots_into_adjacent_pairs(d in even_degree(), odd_even in any::<bool>()) {
            let par = if odd_even { Parity::OddEven } else { Parity::EvenOdd };
            let slots: Vec<usize> = (0..d).collect();
            let ring = Ring::new(&slots);
            let mut seen = vec![0u8; d];
            for (i, (a, b)) in par.pairs(d).enumerate() {
                prop_assert!(a < d && b < d);
                prop_assert!(ring.are_adjacent(a, b));
                prop_assert_eq!(par.pair_of_slot(a, d), i);
                prop_assert_eq!(par.pair_of_slot(b, d), i);
                seen[a] += 1;
                seen[b] += 1;
            }
            prop_assert!(seen.iter().all(|&c| c == 1));
        }

        #[test]
        fn partner_is_an_adjacent_involution(d in even_degree(), slot in 0usize..12, odd_even in any::<bool>()) {
            let par = if odd_even { Parity::OddEven } else { Parity::EvenOdd };
            let slot = slot % d;
            let p = par.partner(slot, d);
            prop_assert_ne!(p, slot);
            prop_assert_eq!(par.partner(p, d), slot);
            let slots: Vec<usize> = (0..d).collect();
            prop_assert!(Ring::new(&slots).are_adjacent(slot, p));
        }

        #[test]
        fn parities_differ_from_degree_four(d in even_degree(), slot in 0usize..12) {
            let slot = slot % d;
            let a = Parity::OddEven.partner(slot, d);
            let b = Parity::EvenOdd.partner(slot, d);
            if d == 2 {
                prop_assert_eq!(a, b);
            } else {
                prop_assert_ne!(a, b);
                // Together the two partners are the two ring neighbours.
                let slots: Vec<usize> = (0..d).collect();
                let ring = Ring::new(&slots);
                let mut got = [a, b];
                got.sort_unstable();
                let mut want = [ring.prev(slot), ring.next(slot)];
                want.sort_unstable();
                prop_assert_eq!(got, want);
            }
        }

        #[test]
        fn wrap_agrees_with_next_and_prev(d in 1usize..=12, i in 0usize..12, k in -30isize..30) {
            let slots: Vec<usize> = (0..d).collect();
            let ring = Ring::new(&slots);
            let i = i % d;
            prop_assert_eq!(ring.wrap(i as isize + 1), ring.next(i));
            prop_assert_eq!(ring.wrap(i as isize - 1), ring.prev(i));
            prop_assert!(ring.wrap(k) < d);
        }
    }
}
