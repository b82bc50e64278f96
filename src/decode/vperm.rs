use super::{check_size, map_defined, DecodeError, ElementWidth, Shuffle};
use crate::constant::Constant;
use crate::mask::{MaskElt, ShuffleMask};
use crate::raw;

/// Decodes a `VPERMB`, `VPERMW`, `VPERMD` or `VPERMQ` mask.
///
/// The low `log2(N)` bits of a control element select any of the `N` elements.
pub fn vpermv<C: Constant + ?Sized>(
    constant: &C,
    width: ElementWidth,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    let raw = raw::extract(constant, width.bits())?;
    check_size(Shuffle::Vpermv(width), raw.len())?;
    let index_mask = raw.len() as u64 - 1;
    map_defined(&raw, mask, |_, bits| MaskElt::Index((bits & index_mask) as u32));
    Ok(())
}

/// Decodes a `VPERMT2B`, `VPERMT2W`, `VPERMT2D` or `VPERMT2Q` mask.
///
/// The low `log2(N) + 1` bits of a control element select any of the `2 * N`
/// elements of both concatenated sources.
pub fn vpermv3<C: Constant + ?Sized>(
    constant: &C,
    width: ElementWidth,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    let raw = raw::extract(constant, width.bits())?;
    check_size(Shuffle::Vpermv3(width), raw.len())?;
    let index_mask = raw.len() as u64 * 2 - 1;
    map_defined(&raw, mask, |_, bits| MaskElt::Index((bits & index_mask) as u32));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ConstVector, IntWidth};

    fn indices(mask: &ShuffleMask) -> Vec<Option<u32>> {
        mask.iter().map(MaskElt::index).collect()
    }

    #[test]
    fn vpermd_cross_lane() {
        let c = ConstVector::from_ints(IntWidth::I32, &[7, 6, 5, 4, 3, 2, 1, 8]).with_undef(5);
        let mut mask = ShuffleMask::new();
        vpermv(&c, ElementWidth::Dword, &mut mask).unwrap();
        assert_eq!(
            indices(&mask),
            vec![Some(7), Some(6), Some(5), Some(4), Some(3), None, Some(1), Some(0)]
        );
        assert!(mask[5].is_undef());
    }

    #[test]
    fn vpermb_512() {
        let bytes: Vec<u8> = (0..64).map(|i| 0xc0 | (63 - i)).collect();
        let c = ConstVector::from_bytes(&bytes);
        let mut mask = ShuffleMask::new();
        vpermv(&c, ElementWidth::Byte, &mut mask).unwrap();
        assert_eq!(mask.len(), 64);
        assert_eq!(mask[0], MaskElt::Index(63));
        assert_eq!(mask[63], MaskElt::Index(0));
    }

    #[test]
    fn vpermt2q_wraps() {
        let c = ConstVector::from_ints(IntWidth::I64, &[4, 3, 8, 9]);
        let mut mask = ShuffleMask::new();
        vpermv3(&c, ElementWidth::Qword, &mut mask).unwrap();
        assert_eq!(indices(&mask), vec![Some(4), Some(3), Some(0), Some(1)]);
    }

    #[test]
    fn vpermw_from_dword_constant() {
        let c = ConstVector::from_ints(IntWidth::I32, &[0x0010_0001, 0x0003_0002, 0, 0xffff_0007]);
        let mut mask = ShuffleMask::new();
        vpermv(&c, ElementWidth::Word, &mut mask).unwrap();
        assert_eq!(
            indices(&mask),
            vec![Some(1), Some(0), Some(2), Some(3), Some(0), Some(0), Some(7), Some(7)]
        );
    }

    #[test]
    fn vpermt2w_two_sources() {
        let c = ConstVector::from_ints(IntWidth::I16, &[15, 16, 31, 32, 0, 1, 2, 3]);
        let mut mask = ShuffleMask::new();
        vpermv3(&c, ElementWidth::Word, &mut mask).unwrap();
        assert_eq!(
            indices(&mask),
            vec![Some(15), Some(0), Some(15), Some(0), Some(0), Some(1), Some(2), Some(3)]
        );
    }
}
