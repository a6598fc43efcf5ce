/// Rotates an interleaved image by 180 degrees in place.
///
/// Reversing the whole buffer reverses pixel order but also the channel
/// order inside each pixel, so every pixel is flipped back afterwards.
pub fn rotate_180(data: &mut [u8], channels: usize) {
    data.reverse();
    if channels > 1 {
        for pixel in data.chunks_exact_mut(channels) {
            pixel.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rotate_180;

    #[test]
    fn test_rotate_mono() {
        // 3x2
        let mut data = vec![1, 2, 3, 4, 5, 6];
        rotate_180(&mut data, 1);
        assert_eq!(data, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_rotate_keeps_channel_order() {
        let mut data = vec![1, 2, 3, 10, 20, 30];
        rotate_180(&mut data, 3);
        assert_eq!(data, vec![10, 20, 30, 1, 2, 3]);
    }
}
