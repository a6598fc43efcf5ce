/// Swaps the first and third byte of every packed 3-byte pixel in place.
///
/// Turns sensor-order RGB into BGR and back again. Only the first
/// `width * height * 3` bytes are touched; anything past that is left alone.
pub fn swap_red_blue(data: &mut [u8], width: usize, height: usize) {
    let len = width.saturating_mul(height).saturating_mul(3).min(data.len());
    for pixel in data[..len].chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::swap_red_blue;

    #[test]
    fn test_swaps_only_first_and_third_byte() {
        // 4x2 frame, pixel n = [n*3, n*3+1, n*3+2]
        let original: Vec<u8> = (0..24).collect();
        let mut data = original.clone();

        swap_red_blue(&mut data, 4, 2);

        for (i, (before, after)) in original.chunks(3).zip(data.chunks(3)).enumerate() {
            assert_eq!(after[0], before[2], "pixel {i} red");
            assert_eq!(after[1], before[1], "pixel {i} green");
            assert_eq!(after[2], before[0], "pixel {i} blue");
        }
    }

    #[test]
    fn test_swap_is_an_involution() {
        let original: Vec<u8> = (0..=255u8).cycle().take(17 * 5 * 3).collect();
        let mut data = original.clone();

        swap_red_blue(&mut data, 17, 5);
        assert_ne!(data, original);
        swap_red_blue(&mut data, 17, 5);
        assert_eq!(data, original);
    }

    #[test]
    fn test_trailing_payload_untouched() {
        let mut data = vec![1, 2, 3, 4, 5, 6, 7];
        swap_red_blue(&mut data, 2, 1);
        assert_eq!(data, vec![3, 2, 1, 6, 5, 4, 7]);
    }

    #[test]
    fn test_oversized_dimensions_clamp_to_buffer() {
        let mut data = vec![1, 2, 3, 4, 5, 6];
        swap_red_blue(&mut data, usize::MAX, 2);
        assert_eq!(data, vec![3, 2, 1, 6, 5, 4]);
    }
}
