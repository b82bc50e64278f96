//! Raw shuffle masks extracted from constants.
//!
//! A constant pool uniques constants by their bit pattern, so the same 128 bits may be
//! typed as `<2 x i64>`, `<4 x i32>` or `<16 x i8>` depending on which use came
//! first. Extraction flattens a constant into a bit image and slices it again at the
//! element width required by an instruction.

pub mod control;
pub mod image;

pub use self::control::*;

use self::image::BitImage;
use crate::constant::{Constant, Element, ScalarType};
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("Constant is not a vector")]
    NotVector,
    #[error("Unsupported vector element type {0}")]
    NonIntegerElement(ScalarType),
    #[error("Unsupported vector element at index {0}")]
    InvalidElement(usize),
    #[error("Constant of {0} bits is too wide")]
    TooWide(u32),
    #[error("Constant of {bits} bits cannot be split to {width}-bit elements")]
    Unaligned { bits: u32, width: u32 },
}

/// An element of a raw shuffle mask.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RawElt {
    /// Every bit of the element came from undefined source elements.
    Undef,
    /// Bits of the element zero-extended to 64 bits.
    Bits(u64),
}

/// A raw shuffle mask.
pub type RawMask = SmallVec<[RawElt; 64]>;

/// Extracts a raw shuffle mask of `width`-bit elements from the constant.
///
/// An extracted element is undefined only if all of its bits come from undefined
/// source elements. Partially undefined elements are defined and undefined bits
/// are read as zeros.
///
/// # Panics
///
/// Panics if `width` is not within 1 and 64 inclusive.
///
/// # Examples
///
/// ```
/// # use x86_shuffle_decode::{ConstVector, IntWidth};
/// # use x86_shuffle_decode::raw::{self, RawElt};
/// let c = ConstVector::from_ints(IntWidth::I64, &[0x0000_0002_0000_0001, 0]).with_undef(1);
/// let mask = raw::extract(&c, 32)?;
/// assert_eq!(
///     mask.as_slice(),
///     &[RawElt::Bits(1), RawElt::Bits(2), RawElt::Undef, RawElt::Undef]
/// );
/// # Ok::<(), x86_shuffle_decode::raw::ExtractError>(())
/// ```
pub fn extract<C: Constant + ?Sized>(constant: &C, width: u32) -> Result<RawMask, ExtractError> {
    assert!((1..=64).contains(&width), "invalid mask element width {}", width);

    let ty = constant.ty();
    let len = ty.vector_len().ok_or(ExtractError::NotVector)?;
    let elem = ty.scalar();
    if !elem.is_integer() {
        return Err(ExtractError::NonIntegerElement(elem));
    }
    let bits = ty.size_in_bits();
    if bits > image::MAX_BITS {
        return Err(ExtractError::TooWide(bits));
    }
    if bits % width != 0 {
        return Err(ExtractError::Unaligned { bits, width });
    }

    let elem_bits = elem.bits();
    let mut undef = BitImage::new();
    let mut value = BitImage::new();
    for i in 0..len as usize {
        let offset = i as u32 * elem_bits;
        match constant.element(i) {
            Some(Element::Undef) => undef.set_ones(offset, elem_bits),
            Some(Element::Int(v)) => value.or_bits(offset, elem_bits, v),
            _ => return Err(ExtractError::InvalidElement(i)),
        }
    }

    let mask = (0..bits / width)
        .map(|i| {
            let offset = i * width;
            if undef.all_ones(offset, width) {
                RawElt::Undef
            } else {
                RawElt::Bits(value.bits(offset, width))
            }
        })
        .collect();
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ConstScalar, ConstVector, IntWidth, Type};

    #[test]
    fn reinterpret_wider_elements() {
        let c = ConstVector::from_ints(IntWidth::I64, &[0x8000_0000_8000_0000, 0x0302_0100]);
        let mask = extract(&c, 32).unwrap();
        assert_eq!(
            mask.as_slice(),
            &[
                RawElt::Bits(0x8000_0000),
                RawElt::Bits(0x8000_0000),
                RawElt::Bits(0x0302_0100),
                RawElt::Bits(0),
            ]
        );
        let mask = extract(&c, 8).unwrap();
        assert_eq!(mask.len(), 16);
        assert_eq!(mask[3], RawElt::Bits(0x80));
        assert_eq!(mask[9], RawElt::Bits(0x01));
    }

    #[test]
    fn reinterpret_narrower_elements() {
        let c = ConstVector::from_bytes(&[1, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0x80]);
        let mask = extract(&c, 64).unwrap();
        assert_eq!(
            mask.as_slice(),
            &[RawElt::Bits(1), RawElt::Bits(0x8000_0000_0000_0002)]
        );
    }

    #[test]
    fn partially_undefined_element_is_defined() {
        let c = ConstVector::from_ints(IntWidth::I32, &[0, 7, 0, 0])
            .with_undef(0)
            .with_undef(2)
            .with_undef(3);
        let mask = extract(&c, 64).unwrap();
        assert_eq!(
            mask.as_slice(),
            &[RawElt::Bits(0x7_0000_0000), RawElt::Undef]
        );
    }

    #[test]
    fn odd_element_width() {
        let c = ConstVector::from_ints(IntWidth::new_clamp(12), &[0xfff, 0x123, 0xabc, 0x456]);
        let mask = extract(&c, 8).unwrap();
        assert_eq!(
            mask.as_slice(),
            &[
                RawElt::Bits(0xff),
                RawElt::Bits(0x3f),
                RawElt::Bits(0x12),
                RawElt::Bits(0xbc),
                RawElt::Bits(0x6a),
                RawElt::Bits(0x45),
            ]
        );
    }

    #[test]
    fn reject_non_vector() {
        let c = ConstScalar::new(IntWidth::I64, 0);
        assert_eq!(extract(&c, 8), Err(ExtractError::NotVector));
    }

    #[test]
    fn reject_non_integer_elements() {
        let c = ConstVector::new(ScalarType::F32, vec![Element::Other; 4]);
        assert_eq!(
            extract(&c, 32),
            Err(ExtractError::NonIntegerElement(ScalarType::F32))
        );
    }

    #[test]
    fn reject_symbolic_element() {
        let c = ConstVector::from_ints(IntWidth::I32, &[0, 1, 2, 3])
            .with_element(2, Element::Other);
        assert_eq!(extract(&c, 32), Err(ExtractError::InvalidElement(2)));
    }

    /// A constant pool entry whose vector type is far wider than its storage.
    struct Oversized(u32);

    impl Constant for Oversized {
        fn ty(&self) -> Type {
            Type::Vector {
                len: self.0,
                elem: ScalarType::Int(IntWidth::I64),
            }
        }

        fn element(&self, _: usize) -> Option<Element> {
            Some(Element::Int(0))
        }
    }

    #[test]
    fn reject_oversized_vector_type() {
        assert_eq!(
            extract(&Oversized(1 << 27), 8),
            Err(ExtractError::TooWide(u32::MAX))
        );
        assert_eq!(
            extract(&Oversized(u32::MAX), 64),
            Err(ExtractError::TooWide(u32::MAX))
        );
        assert_eq!(extract(&Oversized(9), 64), Err(ExtractError::TooWide(576)));
    }

    #[test]
    fn reject_unaligned_and_too_wide() {
        let c = ConstVector::from_ints(IntWidth::I8, &[0; 12]);
        assert_eq!(
            extract(&c, 64),
            Err(ExtractError::Unaligned { bits: 96, width: 64 })
        );
        let c = ConstVector::from_ints(IntWidth::I64, &[0; 16]);
        assert_eq!(extract(&c, 64), Err(ExtractError::TooWide(1024)));
    }
}
