//! Base-3 encoding of per-axis periodic image shifts.
//!
//! A neighbour's image code packs one shift in `{-1, 0, +1}` per axis as the
//! digit `shift + 1`, most significant digit first. The code of a neighbour
//! reached without wrapping on any axis is [`ImageWeights::unwrapped`].

use smallvec::SmallVec;
use trellis_core::Coord;

/// Largest dimension whose image codes fit in a `u64`.
pub const MAX_IMAGE_AXES: usize = 40;

/// Place values `3^(D-1-i)` of the image-code digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ImageWeights {
    weights: SmallVec<[u64; 4]>,
    unwrapped: u64,
}

impl ImageWeights {
    /// Weights for `d` axes. `d` must not exceed [`MAX_IMAGE_AXES`].
    pub(crate) fn new(d: usize) -> Self {
        debug_assert!(d <= MAX_IMAGE_AXES);
        let mut weights: SmallVec<[u64; 4]> = SmallVec::from_elem(1, d);
        for i in (0..d.saturating_sub(1)).rev() {
            weights[i] = weights[i + 1] * 3;
        }
        let unwrapped = weights.iter().sum();
        Self { weights, unwrapped }
    }

    /// Digit place value for `axis`.
    #[inline]
    pub(crate) fn weight(&self, axis: usize) -> u64 {
        self.weights[axis]
    }

    /// Code with a zero shift on every axis.
    #[inline]
    pub(crate) fn unwrapped(&self) -> u64 {
        self.unwrapped
    }

    /// Per-axis shifts encoded in `code`.
    pub(crate) fn decode(&self, code: u64) -> Coord {
        self.weights
            .iter()
            .map(|&w| ((code / w) % 3) as i32 - 1)
            .collect()
    }

    /// Code for per-axis `shifts`, each in `{-1, 0, +1}`.
    #[cfg(test)]
    pub(crate) fn encode(&self, shifts: &[i32]) -> u64 {
        shifts
            .iter()
            .zip(&self.weights)
            .map(|(&s, &w)| (s + 1) as u64 * w)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_powers_of_three() {
        let w = ImageWeights::new(3);
        assert_eq!(
            (0..3).map(|i| w.weight(i)).collect::<Vec<_>>(),
            vec![9, 3, 1]
        );
        assert_eq!(w.unwrapped(), 13);
    }

    #[test]
    fn decode_inverts_encode() {
        let w = ImageWeights::new(4);
        for code in 0..81 {
            let shifts = w.decode(code);
            assert!(shifts.iter().all(|s| (-1..=1).contains(s)));
            assert_eq!(w.encode(&shifts), code);
        }
        assert_eq!(w.decode(w.unwrapped()).as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn largest_dimension_fits() {
        let w = ImageWeights::new(MAX_IMAGE_AXES);
        let all_high: Vec<i32> = vec![1; MAX_IMAGE_AXES];
        assert_eq!(w.decode(w.encode(&all_high)).as_slice(), all_high.as_slice());
    }
}
