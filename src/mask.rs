//! Decoded shuffle masks.

use core::convert::TryFrom;
use core::fmt;
use smallvec::SmallVec;
use thiserror::Error;

/// The conventional integer encoding of [`MaskElt::Undef`].
pub const SENTINEL_UNDEF: i32 = -1;
/// The conventional integer encoding of [`MaskElt::Zero`].
pub const SENTINEL_ZERO: i32 = -2;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("Invalid shuffle mask sentinel {0}")]
pub struct InvalidSentinel(i32);

/// An element of a shuffle mask.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MaskElt {
    /// An index of a source element.
    ///
    /// Elements of a second source, if any, follow elements of the first one.
    Index(u32),
    /// The destination element is not constrained.
    Undef,
    /// The destination element is zeroed.
    Zero,
}

impl MaskElt {
    pub fn index(&self) -> Option<u32> {
        match self {
            Self::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_undef(&self) -> bool {
        *self == Self::Undef
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::Zero
    }
}

impl From<MaskElt> for i32 {
    fn from(elt: MaskElt) -> i32 {
        match elt {
            MaskElt::Index(i) => i as i32,
            MaskElt::Undef => SENTINEL_UNDEF,
            MaskElt::Zero => SENTINEL_ZERO,
        }
    }
}

impl TryFrom<i32> for MaskElt {
    type Error = InvalidSentinel;
    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            SENTINEL_UNDEF => Ok(Self::Undef),
            SENTINEL_ZERO => Ok(Self::Zero),
            i if i >= 0 => Ok(Self::Index(i as u32)),
            _ => Err(InvalidSentinel(value)),
        }
    }
}

impl fmt::Display for MaskElt {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Index(i) => fmt::Display::fmt(i, fmt),
            Self::Undef => fmt.write_str("u"),
            Self::Zero => fmt.write_str("z"),
        }
    }
}

/// A shuffle mask.
pub type ShuffleMask = SmallVec<[MaskElt; 64]>;

/// Returns a displayable form of the mask, e.g. `[0, z, u, 3]`.
pub fn display(mask: &[MaskElt]) -> impl fmt::Display + '_ {
    Display { mask }
}

struct Display<'a> {
    mask: &'a [MaskElt],
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str("[")?;
        for (i, elt) in self.mask.iter().enumerate() {
            if i != 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{}", elt)?;
        }
        fmt.write_str("]")
    }
}
