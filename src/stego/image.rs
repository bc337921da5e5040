//! LSB (Least Significant Bit) steganography for images.
//!
//! Hides a framed message in the least significant bits of pixel color
//! values, one bit per channel.
//!
//! Channel slots are visited row by row, left to right, and within a pixel
//! in R, G, B order. This order is fixed here and does not depend on the
//! file format the carrier came from, so encode and decode always agree.

use image::{DynamicImage, RgbImage};
use log::debug;

use crate::codec::{self, bits_to_string, framed_len, token_bits, Bitstream};
use crate::config::{BITS_PER_CHAR, CHANNELS, START_TOKEN, STOP_TOKEN, TOKEN_BITS};
use crate::error::{Result, StegError};

/// Image steganography handler.
pub struct ImageStego {
    image: RgbImage,
}

impl ImageStego {
    /// Creates a new ImageStego from any decoded image, converting to RGB8.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    /// Creates a new ImageStego from an RGB8 buffer.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    /// Returns the number of channel slots (bits) this image can hold.
    pub fn capacity(&self) -> usize {
        let (width, height) = self.image.dimensions();
        (width as usize) * (height as usize) * CHANNELS
    }

    /// Longest message, in characters, whose framed form fits.
    ///
    /// Returns 0 both when only the empty message fits and when nothing
    /// fits at all; check `capacity() >= framed_len(0)` to tell them apart.
    pub fn max_message_len(&self) -> usize {
        let capacity = self.capacity();
        if capacity < framed_len(0) {
            return 0;
        }
        let mut chars = (capacity - framed_len(0)) / 8;
        while chars > 0 && framed_len(chars) > capacity {
            chars -= 1;
        }
        chars
    }

    /// Writes `bitstream` into the channel LSBs.
    ///
    /// Fails before touching any pixel if the stream does not fit. Slots past
    /// the end of the stream keep their original values.
    pub fn embed(&mut self, bitstream: &Bitstream) -> Result<()> {
        let capacity = self.capacity();
        if bitstream.len() > capacity {
            return Err(StegError::Capacity {
                needed: bitstream.len(),
                capacity,
            });
        }

        let (width, height) = self.image.dimensions();
        let mut bits = bitstream.as_bits().iter();
        let mut written = 0;

        'outer: for y in 0..height {
            for x in 0..width {
                let pixel = self.image.get_pixel_mut(x, y);

                for channel in 0..CHANNELS {
                    let Some(&bit) = bits.next() else {
                        break 'outer;
                    };
                    // Clear LSB and set new bit
                    pixel.0[channel] = (pixel.0[channel] & 0xFE) | u8::from(bit);
                    written += 1;
                }
            }
        }

        debug!("Embedded {} of {} available bits", written, capacity);
        Ok(())
    }

    /// Frames `message` and embeds it.
    pub fn hide(&mut self, message: &str) -> Result<()> {
        let bitstream = codec::frame(message)?;
        self.embed(&bitstream)
    }

    /// Channel LSBs in slot order.
    fn lsbs(&self) -> impl Iterator<Item = bool> + '_ {
        self.image
            .pixels()
            .flat_map(|pixel| pixel.0.into_iter().map(|value| value & 1 == 1))
    }

    /// Checks whether the first 24 slots spell the start token.
    pub fn locate_start(&self) -> bool {
        let bits: Vec<bool> = self.lsbs().take(TOKEN_BITS).collect();
        if bits.len() < TOKEN_BITS {
            return false;
        }
        bits_to_string(&bits) == START_TOKEN
    }

    /// Extracts the message between the start and stop tokens.
    ///
    /// Scans pixel by pixel. The stop token always ends on a character
    /// boundary at bit `48 + 8n`, which need not be a pixel boundary, so after
    /// each pixel every such boundary inside that pixel's three bits is
    /// compared with the stop token. Misaligned windows are never matched.
    pub fn extract(&self) -> Result<String> {
        if !self.locate_start() {
            return Err(StegError::NotEncoded);
        }

        let stop = token_bits(STOP_TOKEN);
        let min_end = 2 * TOKEN_BITS;
        let mut buffer: Vec<bool> = Vec::new();

        for pixel in self.image.pixels() {
            let before = buffer.len();
            buffer.extend(pixel.0.iter().map(|value| value & 1 == 1));

            for end in (before + 1)..=buffer.len() {
                let on_char_boundary = end >= min_end && (end - min_end) % BITS_PER_CHAR == 0;
                if on_char_boundary && buffer[end - TOKEN_BITS..end] == stop[..] {
                    buffer.truncate(end);
                    debug!("Stop token found after {} bits", end);
                    return Ok(codec::unframe(&buffer));
                }
            }
        }

        debug!("Scanned all {} bits without finding stop token", buffer.len());
        Err(StegError::StopTokenNotFound)
    }

    /// Recovers the hidden message, failing with `NotEncoded` when the
    /// start token is absent.
    pub fn reveal(&self) -> Result<String> {
        debug!("Checking for start token, extracting");
        self.extract()
    }

    /// Returns a reference to the underlying image.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Consumes self and returns the underlying image.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 17) % 256) as u8,
                ((y * 23) % 256) as u8,
                (((x + y) * 31) % 256) as u8,
            ])
        })
    }

    /// Flattened channel values in slot order.
    fn channels(image: &RgbImage) -> Vec<u8> {
        image.pixels().flat_map(|p| p.0).collect()
    }

    /// Overwrites the first LSBs of `image` with `bits`.
    fn write_lsbs(image: &mut RgbImage, bits: &[bool]) {
        for (value, &bit) in image.iter_mut().zip(bits) {
            *value = (*value & 0xFE) | u8::from(bit);
        }
    }

    #[test]
    fn test_capacity() {
        let stego = ImageStego::from_rgb(create_test_image(100, 100));
        assert_eq!(stego.capacity(), 30000);
    }

    #[test]
    fn test_max_message_len() {
        // 300 bits: 48 + 8 * 31 = 296 <= 300, 48 + 8 * 32 = 304 > 300
        let stego = ImageStego::from_rgb(create_test_image(10, 10));
        assert_eq!(stego.max_message_len(), 31);

        let tiny = ImageStego::from_rgb(create_test_image(2, 2));
        assert_eq!(tiny.max_message_len(), 0);
    }

    #[test]
    fn test_hide_and_extract_small() {
        let mut stego = ImageStego::from_rgb(create_test_image(100, 100));
        stego.hide("Hello, steganography!").unwrap();
        assert_eq!(stego.reveal().unwrap(), "Hello, steganography!");
    }

    #[test]
    fn test_hi_scenario() {
        let original = create_test_image(10, 10);
        let mut stego = ImageStego::from_rgb(original.clone());

        let bitstream = codec::frame("hi").unwrap();
        assert_eq!(bitstream.len(), 66);
        stego.embed(&bitstream).unwrap();

        assert_eq!(stego.reveal().unwrap(), "hi");

        let before = channels(&original);
        let after = channels(stego.image());
        assert_eq!(&before[66..], &after[66..]);
    }

    #[test]
    fn test_only_lsbs_change() {
        let original = create_test_image(20, 20);
        let mut stego = ImageStego::from_rgb(original.clone());
        stego.hide("only the low bit moves").unwrap();

        for (a, b) in channels(&original).iter().zip(channels(stego.image())) {
            assert_eq!(a & 0xFE, b & 0xFE);
        }
    }

    #[test]
    fn test_canonical_channel_order() {
        let mut stego = ImageStego::from_rgb(RgbImage::new(10, 10));
        stego.hide("").unwrap();
        // '<' = 0b00111100: first pixel carries 0, 0, 1 in R, G, B
        let first = stego.image().get_pixel(0, 0);
        assert_eq!(first.0, [0, 0, 1]);
    }

    #[test]
    fn test_capacity_boundary() {
        // 6x4 = 72 bits = framed_len(3)
        let original = create_test_image(6, 4);
        let mut stego = ImageStego::from_rgb(original.clone());
        assert_eq!(stego.capacity(), framed_len(3));

        stego.hide("abc").unwrap();
        assert_eq!(stego.reveal().unwrap(), "abc");

        let mut too_small = ImageStego::from_rgb(original.clone());
        let result = too_small.hide("abcd");
        assert!(matches!(
            result,
            Err(StegError::Capacity { needed: 81, capacity: 72 })
        ));
        assert_eq!(too_small.image(), &original);
    }

    #[test]
    fn test_empty_message() {
        let mut stego = ImageStego::from_rgb(create_test_image(4, 4));
        stego.hide("").unwrap();
        assert_eq!(stego.reveal().unwrap(), "");
    }

    #[test]
    fn test_all_alignments() {
        for n in 0..12 {
            let message: String = ('a'..='z').cycle().take(n).collect();
            let mut stego = ImageStego::from_rgb(create_test_image(16, 16));
            stego.hide(&message).unwrap();
            assert_eq!(stego.reveal().unwrap(), message, "length {}", n);
        }
    }

    #[test]
    fn test_misaligned_stop_pattern_ignored() {
        // The last bit of an even byte followed by "x~|" spells the stop token
        for message in ["bx~|", "bx~}", "dx~|", "zbx~|q"] {
            let mut stego = ImageStego::from_rgb(RgbImage::new(32, 32));
            stego.hide(message).unwrap();
            assert_eq!(stego.reveal().unwrap(), message);
        }
    }

    #[test]
    fn test_narrow_image_wraps_rows() {
        let mut stego = ImageStego::from_rgb(create_test_image(3, 20));
        stego.hide("narrow").unwrap();
        assert!(stego.locate_start());
        assert_eq!(stego.reveal().unwrap(), "narrow");
    }

    #[test]
    fn test_not_encoded() {
        let stego = ImageStego::from_rgb(RgbImage::new(50, 50));
        assert!(!stego.locate_start());
        assert!(matches!(stego.reveal(), Err(StegError::NotEncoded)));
        assert!(matches!(stego.extract(), Err(StegError::NotEncoded)));
    }

    #[test]
    fn test_too_small_for_start_token() {
        let stego = ImageStego::from_rgb(create_test_image(2, 2));
        assert!(!stego.locate_start());
    }

    #[test]
    fn test_stop_token_not_found() {
        let mut image = RgbImage::new(20, 20);
        write_lsbs(&mut image, &token_bits(START_TOKEN));
        let stego = ImageStego::from_rgb(image);

        assert!(stego.locate_start());
        assert!(matches!(stego.reveal(), Err(StegError::StopTokenNotFound)));
    }

    #[test]
    fn test_embedded_stop_token_truncates() {
        let mut stego = ImageStego::from_rgb(create_test_image(20, 20));
        stego.hide("ab<?>cd").unwrap();
        assert_eq!(stego.reveal().unwrap(), "ab");
    }

    #[test]
    fn test_from_dynamic_image() {
        let rgba = image::RgbaImage::from_pixel(10, 10, image::Rgba([9, 8, 7, 255]));
        let mut stego = ImageStego::from_image(DynamicImage::ImageRgba8(rgba));
        assert_eq!(stego.capacity(), 300);
        stego.hide("rgba").unwrap();
        assert_eq!(stego.reveal().unwrap(), "rgba");
    }
}
