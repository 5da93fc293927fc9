//! Helper macro for generating domain port error enums.
//!
//! Port errors share a shape: a `thiserror` enum with struct variants and a
//! snake_case constructor per variant accepting `impl Into` for each field.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
