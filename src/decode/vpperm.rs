use super::{check_size, DecodeError, Shuffle};
use crate::constant::Constant;
use crate::mask::{MaskElt, ShuffleMask};
use crate::raw::{self, PermuteOp, RawElt, VppermCtrl};
use core::convert::TryFrom;

/// Decodes a `VPPERM` mask.
///
/// Bits 4:0 of a control byte select a byte from both concatenated sources and bits
/// 7:5 select an operation applied to it. Only the source byte and zero-fill
/// operations can be expressed by a shuffle mask. Any other operation makes the
/// whole mask undecodable and everything appended by this call is removed.
pub fn vpperm<C: Constant + ?Sized>(
    constant: &C,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    let len = mask.len();
    let ret = decode(constant, mask);
    if ret.is_err() {
        mask.truncate(len);
    }
    ret
}

fn decode<C: Constant + ?Sized>(constant: &C, mask: &mut ShuffleMask) -> Result<(), DecodeError> {
    let raw = raw::extract(constant, 8)?;
    check_size(Shuffle::Vpperm, raw.len())?;
    for (i, elt) in raw.iter().enumerate() {
        let bits = match *elt {
            RawElt::Undef => {
                mask.push(MaskElt::Undef);
                continue;
            }
            RawElt::Bits(bits) => bits,
        };
        let ctrl = VppermCtrl::from(bits as u8);
        match PermuteOp::try_from(ctrl.op()) {
            Ok(PermuteOp::Source) => mask.push(MaskElt::Index(ctrl.index() as u32)),
            Ok(PermuteOp::Zero) => mask.push(MaskElt::Zero),
            Ok(op) => return Err(DecodeError::UnsupportedOp { index: i, op }),
            // every 3-bit value names an operation
            Err(_) => unreachable!(),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ConstVector, IntWidth};

    #[test]
    fn source_and_zero_ops() {
        let mut bytes: Vec<u8> = (0..16).map(|i| 31 - i).collect();
        bytes[1] = 0x80 | 5;
        let c = ConstVector::from_bytes(&bytes).with_undef(2);
        let mut mask = ShuffleMask::new();
        vpperm(&c, &mut mask).unwrap();
        assert_eq!(mask.len(), 16);
        assert_eq!(mask[0], MaskElt::Index(31));
        assert_eq!(mask[1], MaskElt::Zero);
        assert_eq!(mask[2], MaskElt::Undef);
        assert_eq!(mask[15], MaskElt::Index(16));
    }

    #[test]
    fn unsupported_op_discards_mask() {
        let mut bytes: Vec<u8> = (0..16).collect();
        bytes[9] = 0x20 | 3;
        let c = ConstVector::from_bytes(&bytes);
        let mut mask = ShuffleMask::new();
        mask.push(MaskElt::Undef);
        assert_eq!(
            vpperm(&c, &mut mask),
            Err(DecodeError::UnsupportedOp {
                index: 9,
                op: PermuteOp::Invert
            })
        );
        assert_eq!(mask.as_slice(), &[MaskElt::Undef]);
    }

    #[test]
    fn every_other_op_is_unsupported() {
        for &op in &[1u8, 2, 3, 5, 6, 7] {
            let c = ConstVector::from_bytes(&[op << 5; 16]);
            let mut mask = ShuffleMask::new();
            assert!(vpperm(&c, &mut mask).is_err());
            assert!(mask.is_empty());
        }
    }

    #[test]
    fn every_control_byte_decodes_or_fails() {
        for byte in 0..=255u8 {
            let c = ConstVector::from_bytes(&[byte; 16]);
            let mut mask = ShuffleMask::new();
            let ret = vpperm(&c, &mut mask);
            match byte >> 5 {
                0 => assert_eq!(mask[0], MaskElt::Index((byte & 0x1f) as u32)),
                4 => assert_eq!(mask[0], MaskElt::Zero),
                _ => assert!(matches!(ret, Err(DecodeError::UnsupportedOp { index: 0, .. }))),
            }
        }
    }

    #[test]
    fn rejects_256_bits() {
        let c = ConstVector::from_ints(IntWidth::I64, &[0; 4]);
        let mut mask = ShuffleMask::new();
        assert_eq!(
            vpperm(&c, &mut mask),
            Err(DecodeError::UnexpectedSize {
                shuffle: Shuffle::Vpperm,
                bits: 256
            })
        );
    }
}
