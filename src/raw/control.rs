//! Per-element control words of shuffle instructions.

use bitfield::bitfield;
use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

bitfield_from_into!(PshufbCtrl, u8);
bitfield! {
    /// A `PSHUFB` control byte.
    #[derive(Copy, Clone, Default, Eq, PartialEq)]
    pub struct PshufbCtrl(u8);
    /// A source byte index within the 128-bit lane.
    pub u8, index, set_index: 3, 0;
    /// Zeroes the destination byte.
    pub zero, set_zero: 7;
}

bitfield_from_into!(PermilCtrl, u64);
bitfield! {
    /// A `VPERMILPS`/`VPERMILPD` control element.
    #[derive(Copy, Clone, Default, Eq, PartialEq)]
    pub struct PermilCtrl(u64);
    /// A source element index within the 128-bit lane for 32-bit elements.
    pub u8, ps_index, set_ps_index: 1, 0;
    /// A source element index within the 128-bit lane for 64-bit elements.
    pub pd_index, set_pd_index: 1;
}

bitfield_from_into!(Permil2Ctrl, u64);
bitfield! {
    /// A `VPERMIL2PS`/`VPERMIL2PD` control element.
    #[derive(Copy, Clone, Default, Eq, PartialEq)]
    pub struct Permil2Ctrl(u64);
    /// A source element index within the 128-bit lane for 32-bit elements.
    pub u8, ps_index, set_ps_index: 1, 0;
    /// A source element index within the 128-bit lane for 64-bit elements.
    pub pd_index, set_pd_index: 1;
    /// Selects the second source operand.
    pub src, set_src: 2;
    /// A match bit compared against `M2Z[0]` if conditional zeroing is enabled.
    pub match_bit, set_match_bit: 3;
}

bitfield_from_into!(VppermCtrl, u8);
bitfield! {
    /// A `VPPERM` control byte.
    #[derive(Copy, Clone, Default, Eq, PartialEq)]
    pub struct VppermCtrl(u8);
    /// A byte index into both concatenated sources.
    pub u8, index, set_index: 4, 0;
    /// A raw [`PermuteOp`].
    pub u8, op, set_op: 7, 5;
}

/// A logical operation applied by `VPPERM` to a selected byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum PermuteOp {
    /// Source byte.
    Source = 0,
    /// Inverted source byte.
    Invert = 1,
    /// Bit reverse of source byte.
    Reverse = 2,
    /// Bit reverse of inverted source byte.
    ReverseInvert = 3,
    /// `00h`.
    Zero = 4,
    /// `FFh`.
    Ones = 5,
    /// Most significant bit of source byte replicated in all bit positions.
    Sign = 6,
    /// Inverted most significant bit of source byte replicated in all bit positions.
    InvertSign = 7,
}

impl PermuteOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Invert => "invert",
            Self::Reverse => "reverse",
            Self::ReverseInvert => "reverse-invert",
            Self::Zero => "zero",
            Self::Ones => "ones",
            Self::Sign => "sign",
            Self::InvertSign => "invert-sign",
        }
    }
}

impl fmt::Display for PermuteOp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}
