/// Declares a closed, string-valued wire enum.
///
/// Generates serde (de)serialization by wire value, `as_str`, `ALL`,
/// `Display` and a `FromStr` that reports unknown values as
/// [`ModelError::Parameter`](crate::error::ModelError::Parameter).
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize,
        )]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err($crate::error::ModelError::Parameter(format!(
                        "unknown {} value: {}",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }
    };
}

/// Implements [`Serializable`](crate::serializable::Serializable) through
/// the type's serde derives.
macro_rules! serde_serializable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::serializable::Serializable for $ty {
                fn to_json(&self) -> $crate::error::Result<serde_json::Value> {
                    Ok(serde_json::to_value(self)?)
                }

                fn from_json(value: &serde_json::Value) -> $crate::error::Result<Self> {
                    $crate::serializable::decode_fields(value)
                }
            }
        )+
    };
}

/// Implements [`Serializable`](crate::serializable::Serializable) for
/// receive-only types: decoding goes through serde, encoding always fails.
macro_rules! receive_only {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl $crate::serializable::Serializable for $ty {
                fn to_json(&self) -> $crate::error::Result<serde_json::Value> {
                    Err($crate::error::ModelError::NonSerializable($name))
                }

                fn from_json(value: &serde_json::Value) -> $crate::error::Result<Self> {
                    $crate::serializable::decode_fields(value)
                }
            }
        )+
    };
}
