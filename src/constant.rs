//! Typed constants from a constant pool.
//!
//! The decoders only need a read-only view of a constant: its type and the value of
//! each element. Any constant pool representation can be plugged in by implementing
//! [`Constant`]; [`ConstVector`] and [`ConstScalar`] are simple array-backed
//! implementations.

use core::convert::TryFrom;
use core::fmt;

newtype! {
    /// A width of an integer type in bits.
    ///
    /// The width must be within range of 1 and 64 inclusive.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
    #[repr(transparent)]
    pub struct IntWidth(u32) {
        const RANGE = 1..=64;
        const FMT = "i{}";
    }
}

impl IntWidth {
    pub const I8: Self = Self(8);
    pub const I16: Self = Self(16);
    pub const I32: Self = Self(32);
    pub const I64: Self = Self(64);

    /// Returns a mask of all bits covered by the width.
    pub const fn mask(&self) -> u64 {
        u64::MAX >> (64 - self.0)
    }
}

/// A type of a scalar value or of a vector element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Int(IntWidth),
    F32,
    F64,
}

impl ScalarType {
    /// Returns the size of the type in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Int(w) => w.get(),
            Self::F32 => 32,
            Self::F64 => 64,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int(_))
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(w) => fmt::Display::fmt(w, fmt),
            Self::F32 => fmt.write_str("float"),
            Self::F64 => fmt.write_str("double"),
        }
    }
}

/// A type of a constant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    Scalar(ScalarType),
    Vector { len: u32, elem: ScalarType },
}

impl Type {
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    /// Returns the number of vector elements or `None` for scalars.
    pub fn vector_len(&self) -> Option<u32> {
        match self {
            Self::Vector { len, .. } => Some(*len),
            Self::Scalar(_) => None,
        }
    }

    /// Returns the type of a scalar or of a vector element.
    pub fn scalar(&self) -> ScalarType {
        match self {
            Self::Scalar(ty) => *ty,
            Self::Vector { elem, .. } => *elem,
        }
    }

    pub fn scalar_size_in_bits(&self) -> u32 {
        self.scalar().bits()
    }

    /// Returns the size of the type in bits, saturating at `u32::MAX`.
    pub fn size_in_bits(&self) -> u32 {
        self.vector_len()
            .unwrap_or(1)
            .saturating_mul(self.scalar_size_in_bits())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Scalar(ty) => fmt::Display::fmt(ty, fmt),
            Self::Vector { len, elem } => write!(fmt, "<{} x {}>", len, elem),
        }
    }
}

/// An element of an aggregate constant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Element {
    /// An integer literal.
    Int(u64),
    /// An undefined value.
    Undef,
    /// Anything else, e.g. a floating point literal or a constant expression.
    Other,
}

/// A read-only view of a typed constant.
pub trait Constant {
    /// Returns the type of the constant.
    fn ty(&self) -> Type;

    /// Returns the element at `index` of an aggregate constant.
    ///
    /// Returns `None` for scalars or if `index` is out of range.
    fn element(&self, index: usize) -> Option<Element>;

    fn element_count(&self) -> usize {
        self.ty().vector_len().unwrap_or(0) as usize
    }

    fn element_width(&self) -> u32 {
        self.ty().scalar_size_in_bits()
    }

    fn size_in_bits(&self) -> u32 {
        self.ty().size_in_bits()
    }
}

impl<T: Constant + ?Sized> Constant for &T {
    fn ty(&self) -> Type {
        (**self).ty()
    }

    fn element(&self, index: usize) -> Option<Element> {
        (**self).element(index)
    }
}

/// A constant vector.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstVector {
    elem: ScalarType,
    elements: Vec<Element>,
}

impl ConstVector {
    /// Creates a vector of `elem` typed elements.
    ///
    /// Integer literals are truncated to the width of `elem`.
    pub fn new(elem: ScalarType, elements: Vec<Element>) -> Self {
        let mut ret = Self {
            elem,
            elements: Vec::with_capacity(elements.len()),
        };
        for e in elements {
            let e = ret.fit(e);
            ret.elements.push(e);
        }
        ret
    }

    /// Creates an integer vector from the given values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use x86_shuffle_decode::{Constant, ConstVector, IntWidth};
    /// let c = ConstVector::from_ints(IntWidth::I32, &[0, 1, 2, 3]);
    /// assert_eq!(c.size_in_bits(), 128);
    /// assert_eq!(c.element_count(), 4);
    /// ```
    pub fn from_ints(width: IntWidth, values: &[u64]) -> Self {
        let elements = values.iter().map(|&v| Element::Int(v)).collect();
        Self::new(ScalarType::Int(width), elements)
    }

    /// Creates a byte vector from the given values.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let elements = bytes.iter().map(|&v| Element::Int(v as u64)).collect();
        Self::new(ScalarType::Int(IntWidth::I8), elements)
    }

    /// Replaces the element at `index` with an undefined value.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn with_undef(self, index: usize) -> Self {
        self.with_element(index, Element::Undef)
    }

    /// Replaces the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn with_element(mut self, index: usize, element: Element) -> Self {
        let element = self.fit(element);
        self.elements[index] = element;
        self
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn fit(&self, element: Element) -> Element {
        match (element, self.elem) {
            (Element::Int(v), ScalarType::Int(w)) => Element::Int(v & w.mask()),
            (e, _) => e,
        }
    }
}

impl Constant for ConstVector {
    fn ty(&self) -> Type {
        Type::Vector {
            len: u32::try_from(self.elements.len()).unwrap_or(u32::MAX),
            elem: self.elem,
        }
    }

    fn element(&self, index: usize) -> Option<Element> {
        self.elements.get(index).copied()
    }
}

/// A scalar integer constant.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ConstScalar {
    pub width: IntWidth,
    pub value: u64,
}

impl ConstScalar {
    pub fn new(width: IntWidth, value: u64) -> Self {
        Self {
            width,
            value: value & width.mask(),
        }
    }
}

impl Constant for ConstScalar {
    fn ty(&self) -> Type {
        Type::Scalar(ScalarType::Int(self.width))
    }

    fn element(&self, _: usize) -> Option<Element> {
        None
    }
}
