//! Register enum helper.

/// Defines a register field enum with its raw values.
///
/// Generates `to_raw`, `From<$name> for u32` and a `TryFrom<u32>` rejecting values no variant
/// uses.
macro_rules! register_enum {
    {
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    } => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// All variants, in ascending raw value order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the raw register value.
            #[inline]
            pub const fn to_raw(self) -> u32 {
                self as u32
            }
        }

        impl ::core::convert::From<$name> for u32 {
            #[inline]
            fn from(value: $name) -> u32 {
                value.to_raw()
            }
        }

        impl ::core::convert::TryFrom<u32> for $name {
            type Error = $crate::InvalidValueError;

            fn try_from(value: u32) -> ::core::result::Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    _ => Err($crate::InvalidValueError {
                        name: stringify!($name),
                        value,
                    }),
                }
            }
        }
    };
}
