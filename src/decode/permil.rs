use super::{check_size, map_defined, DecodeError, ElementWidth, M2z, Shuffle};
use crate::constant::Constant;
use crate::mask::{MaskElt, ShuffleMask};
use crate::raw::{self, Permil2Ctrl, PermilCtrl};
use crate::util;

fn check_width(width: ElementWidth) {
    assert!(
        matches!(width, ElementWidth::Dword | ElementWidth::Qword),
        "unexpected vector element size {}",
        width.bits()
    );
}

/// Decodes a `VPERMILPS` or `VPERMILPD` mask.
///
/// Bits 1:0 of a 32-bit control element or bit 1 of a 64-bit one select an element
/// from the same 128-bit lane.
///
/// # Panics
///
/// Panics if `width` is not `Dword` or `Qword`.
pub fn vpermil<C: Constant + ?Sized>(
    constant: &C,
    width: ElementWidth,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    check_width(width);
    let raw = raw::extract(constant, width.bits())?;
    check_size(Shuffle::Vpermil(width), raw.len())?;
    let per_lane = width.per_lane();
    map_defined(&raw, mask, |i, bits| {
        let ctrl = PermilCtrl::from(bits);
        let index = match width {
            ElementWidth::Qword => ctrl.pd_index() as u32,
            _ => ctrl.ps_index() as u32,
        };
        MaskElt::Index(util::lane_base(i, per_lane) + index)
    });
    Ok(())
}

/// Decodes a `VPERMIL2PS` or `VPERMIL2PD` mask.
///
/// Like [`vpermil`], but bit 2 of a control element selects the second source and
/// the element is zeroed depending on its match bit and `m2z`.
///
/// # Panics
///
/// Panics if `width` is not `Dword` or `Qword`.
pub fn vpermil2<C: Constant + ?Sized>(
    constant: &C,
    m2z: M2z,
    width: ElementWidth,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    check_width(width);
    let raw = raw::extract(constant, width.bits())?;
    check_size(Shuffle::Vpermil2 { m2z, width }, raw.len())?;
    let len = raw.len() as u32;
    let per_lane = width.per_lane();
    map_defined(&raw, mask, |i, bits| {
        let ctrl = Permil2Ctrl::from(bits);
        if m2z.zeroes(ctrl.match_bit()) {
            return MaskElt::Zero;
        }
        let index = match width {
            ElementWidth::Qword => ctrl.pd_index() as u32,
            _ => ctrl.ps_index() as u32,
        };
        MaskElt::Index(util::lane_base(i, per_lane) + index + ctrl.src() as u32 * len)
    });
    Ok(())
}
