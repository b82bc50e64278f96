//! A flat bit image of a constant.

/// The maximum size of a bit image in bits.
pub const MAX_BITS: u32 = 512;

const WORDS: usize = MAX_BITS as usize / 64;

const fn low_mask(width: u32) -> u64 {
    u64::MAX >> (64 - width)
}

/// A 512-bit little-endian bit image.
///
/// Bit `n` of the image is bit `n % 64` of the word `n / 64`. All accessors work on
/// runs of 1 to 64 bits which may straddle a word boundary.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct BitImage {
    words: [u64; WORDS],
}

impl BitImage {
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    /// ORs the low `width` bits of `value` into the image at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not within 1 and 64 inclusive or the run does not fit
    /// into the image.
    pub fn or_bits(&mut self, offset: u32, width: u32, value: u64) {
        Self::check(offset, width);
        let value = value & low_mask(width);
        let word = offset as usize / 64;
        let shift = offset % 64;
        self.words[word] |= value << shift;
        if shift != 0 && shift + width > 64 {
            self.words[word + 1] |= value >> (64 - shift);
        }
    }

    /// Sets a run of `width` bits at `offset`.
    pub fn set_ones(&mut self, offset: u32, width: u32) {
        self.or_bits(offset, width, u64::MAX);
    }

    /// Returns a run of `width` bits at `offset` zero-extended to 64 bits.
    ///
    /// # Panics
    ///
    /// Panics if `width` is not within 1 and 64 inclusive or the run does not fit
    /// into the image.
    pub fn bits(&self, offset: u32, width: u32) -> u64 {
        Self::check(offset, width);
        let word = offset as usize / 64;
        let shift = offset % 64;
        let mut value = self.words[word] >> shift;
        if shift != 0 && shift + width > 64 {
            value |= self.words[word + 1] << (64 - shift);
        }
        value & low_mask(width)
    }

    /// Returns `true` if every bit of the run is set.
    pub fn all_ones(&self, offset: u32, width: u32) -> bool {
        self.bits(offset, width) == low_mask(width)
    }

    fn check(offset: u32, width: u32) {
        assert!(
            (1..=64).contains(&width) && offset + width <= MAX_BITS,
            "bit run {}..{} out of image",
            offset,
            offset + width
        );
    }
}
