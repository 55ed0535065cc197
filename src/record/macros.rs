//! Declarative record definitions
//!
//! `define_record!` expands a table of `field: Type => coercion` rows into a
//! struct whose fields are all optional and a matching `Record` impl.

macro_rules! define_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $kind:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty => $coerce:path
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::record::Record for $name {
            const KIND: &'static str = $kind;
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            fn decode(raw: &$crate::types::JsonObject) -> $crate::error::Result<Self> {
                Ok(Self {
                    $(
                        $field: $crate::record::coerce::field(
                            raw,
                            $kind,
                            stringify!($field),
                            $coerce,
                        )?,
                    )*
                })
            }
        }
    };
}
