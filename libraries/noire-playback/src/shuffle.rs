//! Shuffle selection
//!
//! Shuffle does not reorder the queue: each "next" draws a uniformly random
//! slot over the whole queue. The current slot is not excluded, so the same
//! track can be picked twice in a row.

use rand::Rng;

/// Pick a random queue index in `[0, len)`, `None` for an empty queue
pub fn random_index<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_queue_has_no_index() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_index(0, &mut rng), None);
    }

    #[test]
    fn index_always_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in 1..20 {
            for _ in 0..50 {
                let index = random_index(len, &mut rng).unwrap();
                assert!(index < len);
            }
        }
    }

    #[test]
    fn every_slot_is_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[random_index(4, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s), "slots never drawn: {seen:?}");
    }
}
