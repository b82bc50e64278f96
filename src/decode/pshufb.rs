use super::{check_size, map_defined, DecodeError, Shuffle};
use crate::constant::Constant;
use crate::mask::{MaskElt, ShuffleMask};
use crate::raw::{self, PshufbCtrl};
use crate::util;

const BYTES_PER_LANE: usize = 16;

/// Decodes a `PSHUFB` mask.
///
/// A control byte with the sign bit set zeroes the destination byte. Otherwise the
/// low 4 bits select a byte from the same 128-bit lane.
pub fn pshufb<C: Constant + ?Sized>(
    constant: &C,
    mask: &mut ShuffleMask,
) -> Result<(), DecodeError> {
    let raw = raw::extract(constant, 8)?;
    check_size(Shuffle::Pshufb, raw.len())?;
    map_defined(&raw, mask, |i, bits| {
        let ctrl = PshufbCtrl::from(bits as u8);
        if ctrl.zero() {
            MaskElt::Zero
        } else {
            MaskElt::Index(util::lane_base(i, BYTES_PER_LANE) + ctrl.index() as u32)
        }
    });
    Ok(())
}
