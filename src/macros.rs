macro_rules! newtype {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($ty_vis:vis $ty:ty) {
            $($body:tt)*
        }
    ) => (
        $(#[$meta])*
        $vis struct $name($ty_vis $ty);

        impl $name {
            /// Returns the value as a primitive type.
            pub const fn get(&self) -> $ty {
                self.0
            }
        }

        newtype! { @body $name, $ty, $($body)* }
    );
    (@body $name:ident, $ty:ty, const RANGE = $min:literal..=$max:expr; $($rest:tt)*) => (
        impl $name {
            pub const MIN: Self = Self($min);
            pub const MAX: Self = Self($max);

            /// Creates a newtype wrapper if the given value within the range.
            pub const fn new(value: $ty) -> Option<Self> {
                if Self::MIN.get() <= value && value <= Self::MAX.get() {
                    Some(Self(value))
                } else {
                    None
                }
            }
            /// Creates a newtype wrapper from the given value or clamp it if out of
            /// the range.
            pub const fn new_clamp(value: $ty) -> Self {
                if value <= Self::MAX.get() {
                    if Self::MIN.get() <= value {
                        Self(value)
                    } else {
                        Self::MIN
                    }
                } else {
                    Self::MAX
                }
            }
        }

        newtype! { @body $name, $ty, $($rest)* }
    );
    (@body $name:ident, $ty:ty, const FMT = $fmt:literal; $($rest:tt)*) => (
        impl core::fmt::Display for $name {
            fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(fmt, $fmt, self.get())
            }
        }
        newtype! { @body $name, $ty, $($rest)* }
    );
    (@body $name:ident, $ty:ty, ) => ();
}

macro_rules! bitfield_from_into {
    ($t:ty, $r:ty) => {
        impl From<$r> for $t {
            fn from(value: $r) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $r {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}
