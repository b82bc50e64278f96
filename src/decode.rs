//! Shuffle mask decoders.
//!
//! Every decoder extracts a raw mask at the element width of its instruction and
//! appends one [`MaskElt`] per raw element to the given mask. If a constant cannot
//! be decoded, nothing is appended and an error describing the reason is returned.
//! Callers must treat such errors as "do not optimize", not as an undefined mask.

mod permil;
mod pshufb;
mod vperm;
mod vpperm;

pub use self::permil::{vpermil, vpermil2};
pub use self::pshufb::pshufb;
pub use self::vperm::{vpermv, vpermv3};
pub use self::vpperm::vpperm;

use crate::constant::Constant;
use crate::mask::{MaskElt, ShuffleMask};
use crate::raw::{ExtractError, PermuteOp, RawElt};
use bitflags::bitflags;
use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("Failed to extract raw mask")]
    Extract {
        #[from]
        source: ExtractError,
    },
    #[error("Unexpected {bits}-bit mask for {shuffle}")]
    UnexpectedSize { shuffle: Shuffle, bits: u32 },
    #[error("Unsupported {op} operation in byte {index}")]
    UnsupportedOp { index: usize, op: PermuteOp },
}

/// A width of shuffled elements.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u32)]
pub enum ElementWidth {
    Byte = 8,
    Word = 16,
    Dword = 32,
    Qword = 64,
}

impl ElementWidth {
    pub fn bits(&self) -> u32 {
        *self as u32
    }

    /// Returns the number of elements in a 128-bit lane.
    pub fn per_lane(&self) -> usize {
        128 / self.bits() as usize
    }

    fn suffix(&self) -> char {
        match self {
            Self::Byte => 'b',
            Self::Word => 'w',
            Self::Dword => 'd',
            Self::Qword => 'q',
        }
    }

    fn fp_suffix(&self) -> &'static str {
        match self {
            Self::Qword => "pd",
            _ => "ps",
        }
    }
}

bitflags! {
    /// A zero-control field of `VPERMIL2PS`/`VPERMIL2PD`.
    ///
    /// | `M2Z` | match bit | result   |
    /// |-------|-----------|----------|
    /// | `0X`  | `X`       | selected |
    /// | `10`  | `0`       | selected |
    /// | `10`  | `1`       | zero     |
    /// | `11`  | `0`       | zero     |
    /// | `11`  | `1`       | selected |
    #[derive(Default)]
    pub struct M2z: u8 {
        /// A match bit value which selects a source element.
        const MATCH = 0b01;
        /// Enables conditional zeroing.
        const ZERO = 0b10;
    }
}

impl M2z {
    /// Returns `true` if an element with the given match bit is zeroed.
    pub fn zeroes(&self, match_bit: bool) -> bool {
        self.contains(Self::ZERO) && match_bit != self.contains(Self::MATCH)
    }
}

/// A shuffle instruction family with its decode parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Shuffle {
    /// `PSHUFB`, in-lane byte shuffle with zeroing.
    Pshufb,
    /// `VPERMILPS`/`VPERMILPD`, in-lane permute of 32/64-bit elements.
    Vpermil(ElementWidth),
    /// `VPERMIL2PS`/`VPERMIL2PD`, two source in-lane permute with conditional zeroing.
    Vpermil2 { m2z: M2z, width: ElementWidth },
    /// `VPPERM`, two source byte permute with per-byte operation.
    Vpperm,
    /// `VPERMB`/`VPERMW`/`VPERMD`/`VPERMQ`, full cross-lane permute.
    Vpermv(ElementWidth),
    /// `VPERMT2B`/`VPERMT2W`/`VPERMT2D`/`VPERMT2Q`, two source cross-lane permute.
    Vpermv3(ElementWidth),
}

impl Shuffle {
    /// Returns the element width of the control operand.
    pub fn width(&self) -> ElementWidth {
        match self {
            Self::Pshufb | Self::Vpperm => ElementWidth::Byte,
            Self::Vpermil(w) | Self::Vpermv(w) | Self::Vpermv3(w) => *w,
            Self::Vpermil2 { width, .. } => *width,
        }
    }

    /// Returns the allowed sizes of the control operand in bits.
    pub fn sizes(&self) -> &'static [u32] {
        match self {
            Self::Vpperm => &[128],
            Self::Vpermil2 { .. } => &[128, 256],
            _ => &[128, 256, 512],
        }
    }

    pub fn mnemonic(&self) -> String {
        match self {
            Self::Pshufb => "pshufb".into(),
            Self::Vpermil(w) => format!("vpermil{}", w.fp_suffix()),
            Self::Vpermil2 { width, .. } => format!("vpermil2{}", width.fp_suffix()),
            Self::Vpperm => "vpperm".into(),
            Self::Vpermv(w) => format!("vperm{}", w.suffix()),
            Self::Vpermv3(w) => format!("vpermt2{}", w.suffix()),
        }
    }

    /// Decodes the shuffle mask from the constant and appends it to `mask`.
    ///
    /// Leaves `mask` untouched on error.
    ///
    /// # Panics
    ///
    /// Panics if the element width is not supported by the instruction.
    pub fn decode_into<C: Constant + ?Sized>(
        &self,
        constant: &C,
        mask: &mut ShuffleMask,
    ) -> Result<(), DecodeError> {
        let ret = match *self {
            Self::Pshufb => pshufb(constant, mask),
            Self::Vpermil(width) => vpermil(constant, width, mask),
            Self::Vpermil2 { m2z, width } => vpermil2(constant, m2z, width, mask),
            Self::Vpperm => vpperm(constant, mask),
            Self::Vpermv(width) => vpermv(constant, width, mask),
            Self::Vpermv3(width) => vpermv3(constant, width, mask),
        };
        if let Err(err) = &ret {
            log::trace!("{}: mask is not decodable: {}", self, err);
        }
        ret
    }

    /// Decodes the shuffle mask from the constant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use x86_shuffle_decode::{ConstVector, ElementWidth, IntWidth, MaskElt, Shuffle};
    /// let c = ConstVector::from_ints(IntWidth::I32, &[3, 6, 1, 4]);
    /// let mask = Shuffle::Vpermv(ElementWidth::Dword).decode(&c)?;
    /// assert_eq!(
    ///     mask.as_slice(),
    ///     &[MaskElt::Index(3), MaskElt::Index(2), MaskElt::Index(1), MaskElt::Index(0)]
    /// );
    /// # Ok::<(), x86_shuffle_decode::DecodeError>(())
    /// ```
    pub fn decode<C: Constant + ?Sized>(&self, constant: &C) -> Result<ShuffleMask, DecodeError> {
        let mut mask = ShuffleMask::new();
        self.decode_into(constant, &mut mask)?;
        Ok(mask)
    }
}

impl fmt::Display for Shuffle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(&self.mnemonic())
    }
}

/// Checks the size of an extracted raw mask.
fn check_size(shuffle: Shuffle, len: usize) -> Result<(), DecodeError> {
    let bits = len as u32 * shuffle.width().bits();
    if shuffle.sizes().contains(&bits) {
        Ok(())
    } else {
        Err(DecodeError::UnexpectedSize { shuffle, bits })
    }
}

/// Maps a defined raw element to a mask element.
fn map_defined<F>(raw: &[RawElt], mask: &mut ShuffleMask, mut f: F)
where
    F: FnMut(usize, u64) -> MaskElt,
{
    mask.extend(raw.iter().enumerate().map(|(i, elt)| match *elt {
        RawElt::Undef => MaskElt::Undef,
        RawElt::Bits(bits) => f(i, bits),
    }));
}
