// SPDX-License-Identifier: MIT

//! Allocation bitmap helpers over byte slices.
//!
//! Bit `i` lives in byte `i / 8` at position `i % 8` (LSB first).

pub trait BitmapOps {
    /// Sets or clears a bit. Out of range bits are ignored.
    fn set_bit(&mut self, bit: usize, value: bool);

    /// Returns `false` for out of range bits.
    fn get_bit(&self, bit: usize) -> bool;

    /// Counts set bits in `[start, end)`.
    fn count_ones_in_range(&self, start: usize, end: usize) -> usize;

    /// First clear bit in `[start, end)`.
    fn find_first_zero_in(&self, start: usize, end: usize) -> Option<usize>;

    /// Clear bits of `[start, end)` in ascending order.
    fn zeros_in(&self, start: usize, end: usize) -> impl Iterator<Item = usize> + '_;
}

impl BitmapOps for [u8] {
    #[inline]
    fn set_bit(&mut self, bit: usize, value: bool) {
        if let Some(byte) = self.get_mut(bit / 8) {
            let mask = 1u8 << (bit % 8);
            if value {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
    }

    #[inline]
    fn get_bit(&self, bit: usize) -> bool {
        self.get(bit / 8)
            .is_some_and(|b| (b & (1 << (bit % 8))) != 0)
    }

    fn count_ones_in_range(&self, start: usize, end: usize) -> usize {
        (start..end).filter(|&i| self.get_bit(i)).count()
    }

    fn find_first_zero_in(&self, start: usize, end: usize) -> Option<usize> {
        self.zeros_in(start, end).next()
    }

    fn zeros_in(&self, start: usize, end: usize) -> impl Iterator<Item = usize> + '_ {
        let end = end.min(self.len() * 8);
        (start..end).filter(move |&i| !self.get_bit(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_bit() {
        let mut bitmap = [0u8; 4];

        bitmap.set_bit(0, true);
        assert!(bitmap.get_bit(0));
        assert_eq!(bitmap[0], 0b00000001);

        bitmap.set_bit(8, true);
        assert_eq!(bitmap[1], 0b00000001);

        bitmap.set_bit(0, false);
        assert!(!bitmap.get_bit(0));
        assert_eq!(bitmap[0], 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut bitmap = [0u8; 2];
        bitmap.set_bit(100, true);
        assert_eq!(bitmap, [0, 0]);
        assert!(!bitmap.get_bit(100));
        assert_eq!(bitmap.zeros_in(10, 100).count(), 6);
    }

    #[test]
    fn test_find_zero_in_range() {
        let bitmap = [0b1111_1111u8, 0b1111_1101, 0];
        assert_eq!(bitmap.find_first_zero_in(0, 24), Some(9));
        assert_eq!(bitmap.find_first_zero_in(10, 24), Some(16));
        assert_eq!(bitmap.find_first_zero_in(0, 9), None);

        let zeros: Vec<usize> = bitmap.zeros_in(9, 19).collect();
        assert_eq!(zeros, vec![9, 16, 17, 18]);
    }

    #[test]
    fn test_count_ones() {
        let bitmap = [0b1010_1010u8, 0b1111_0000];
        assert_eq!(bitmap.count_ones_in_range(0, 8), 4);
        assert_eq!(bitmap.count_ones_in_range(0, 16), 8);
        assert_eq!(bitmap.count_ones_in_range(12, 14), 2);
    }
}
