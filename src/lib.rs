//! Decoding of x86 shuffle masks from constant pool vectors.
//!
//! Shuffle instructions such as `PSHUFB` or `VPERMILPS` take their control operand from
//! a vector register. When that operand is loaded from a constant pool, the decoders of
//! this crate turn it into an instruction-agnostic [`ShuffleMask`]: for each destination
//! element either the index of a source element, [`MaskElt::Zero`] or
//! [`MaskElt::Undef`].
//!
//! ```
//! use x86_shuffle_decode::{mask, ConstVector, Shuffle};
//!
//! let mut bytes = [0x80; 16];
//! bytes[0] = 3;
//! let c = ConstVector::from_bytes(&bytes).with_undef(1);
//! let mask = Shuffle::Pshufb.decode(&c)?;
//! assert_eq!(
//!     mask::display(&mask).to_string(),
//!     "[3, u, z, z, z, z, z, z, z, z, z, z, z, z, z, z]"
//! );
//! # Ok::<(), x86_shuffle_decode::DecodeError>(())
//! ```

#[macro_use]
mod macros;

pub mod constant;
pub mod decode;
pub mod mask;
pub mod raw;

mod util;

pub use crate::constant::{ConstScalar, ConstVector, Constant, Element, IntWidth, ScalarType, Type};
pub use crate::decode::{DecodeError, ElementWidth, M2z, Shuffle};
pub use crate::mask::{MaskElt, ShuffleMask};
