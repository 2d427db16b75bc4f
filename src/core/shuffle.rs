use rand::Rng;

/// In-place Fisher–Yates shuffle.
///
/// Walks from the last index down to 1 and swaps each element with one drawn
/// uniformly from `[0, i]`. The permutation depends only on `rng`, so a seeded
/// or hand-written source gives a reproducible deal.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Source that always yields zero, so every draw picks index 0.
    struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn zero_source_rotates_left() {
        let mut items = [0, 1, 2, 3];
        shuffle(&mut items, &mut ZeroRng);
        assert_eq!(items, [1, 2, 3, 0]);
    }

    #[test]
    fn short_slices_untouched() {
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut ZeroRng);
        let mut one = [7];
        shuffle(&mut one, &mut ZeroRng);
        assert_eq!(one, [7]);
    }
}
