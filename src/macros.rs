//! `code_enum!`: closed enums that round-trip through persisted codes.
//!
//! Drawings store enum fields either as a lowercase name (`"middle"`) or as an
//! ordinal (`2`). The persistence layer hands those codes to us; an unknown
//! code is a contract violation and becomes
//! [`GeometryError::InvalidEnumValue`](crate::GeometryError::InvalidEnumValue).
//!
//! ```ignore
//! code_enum! {
//!     /// Pin length class
//!     pub enum PinLength("pin length") {
//!         Point = "point",
//!         Short = "short",
//!     }
//! }
//! ```
//!
//! generates the enum plus `ALL`, `ordinal()`, `name()`, `Display`, `FromStr`
//! and `TryFrom<u8>`.

macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($kind:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in ordinal order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Position of this variant in declaration order
            pub fn ordinal(self) -> usize {
                // Variants are fieldless and declared in order
                self as usize
            }

            /// Persisted lowercase name
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            fn invalid(value: String) -> $crate::errors::GeometryError {
                $crate::errors::GeometryError::InvalidEnumValue {
                    kind: $kind,
                    value,
                    expected: [$($code),+].join(", "),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::errors::GeometryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_ascii_lowercase();
                $(
                    if lowered == $code {
                        return Ok($name::$variant);
                    }
                )+
                Err(Self::invalid(s.to_string()))
            }
        }

        impl ::std::convert::TryFrom<u8> for $name {
            type Error = $crate::errors::GeometryError;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                Self::ALL
                    .get(code as usize)
                    .copied()
                    .ok_or_else(|| Self::invalid(code.to_string()))
            }
        }
    };
}

pub(crate) use code_enum;
