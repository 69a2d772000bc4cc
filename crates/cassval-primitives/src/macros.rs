#[macro_export]
macro_rules! value_kind_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (Custom, code = 0x0000, name = "custom", family = Opaque, arity = Scalar, width = None),
            (Ascii, code = 0x0001, name = "ascii", family = Textual, arity = Scalar, width = None),
            (BigInt, code = 0x0002, name = "bigint", family = Integer, arity = Scalar, width = Some(8)),
            (Blob, code = 0x0003, name = "blob", family = Binary, arity = Scalar, width = None),
            (Boolean, code = 0x0004, name = "boolean", family = Boolean, arity = Scalar, width = Some(1)),
            (Counter, code = 0x0005, name = "counter", family = Integer, arity = Scalar, width = Some(8)),
            (Decimal, code = 0x0006, name = "decimal", family = Numeric, arity = Scalar, width = None),
            (Double, code = 0x0007, name = "double", family = Numeric, arity = Scalar, width = Some(8)),
            (Float, code = 0x0008, name = "float", family = Numeric, arity = Scalar, width = Some(4)),
            (Int, code = 0x0009, name = "int", family = Integer, arity = Scalar, width = Some(4)),
            (Text, code = 0x000A, name = "text", family = Textual, arity = Scalar, width = None),
            (Timestamp, code = 0x000B, name = "timestamp", family = Temporal, arity = Scalar, width = Some(8)),
            (Uuid, code = 0x000C, name = "uuid", family = Identifier, arity = Scalar, width = Some(16)),
            (Varchar, code = 0x000D, name = "varchar", family = Textual, arity = Scalar, width = None),
            (Varint, code = 0x000E, name = "varint", family = Numeric, arity = Scalar, width = None),
            (TimeUuid, code = 0x000F, name = "timeuuid", family = Identifier, arity = Scalar, width = Some(16)),
            (Inet, code = 0x0010, name = "inet", family = Network, arity = Scalar, width = None),
            (Date, code = 0x0011, name = "date", family = Temporal, arity = Scalar, width = Some(4)),
            (Time, code = 0x0012, name = "time", family = Temporal, arity = Scalar, width = Some(8)),
            (SmallInt, code = 0x0013, name = "smallint", family = Integer, arity = Scalar, width = Some(2)),
            (TinyInt, code = 0x0014, name = "tinyint", family = Integer, arity = Scalar, width = Some(1)),
            (List, code = 0x0020, name = "list", family = Collection, arity = One, width = None),
            (Map, code = 0x0021, name = "map", family = Collection, arity = Two, width = None),
            (Set, code = 0x0022, name = "set", family = Collection, arity = One, width = None),
            (Udt, code = 0x0030, name = "udt", family = Composite, arity = Variadic, width = None),
            (Tuple, code = 0x0031, name = "tuple", family = Composite, arity = Variadic, width = None),
            (Unknown, code = 0xFFFF, name = "unknown", family = Opaque, arity = Scalar, width = None),
        }
    };
}

#[macro_export]
macro_rules! value_kind_registry {
    ($macro:ident) => {
        $crate::value_kind_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::value_kind_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    ( @args $kind:expr; @entries $( ($variant:ident, code = $code:expr, name = $name:expr, family = $family:ident, arity = $arity:ident, width = $width:expr) ),* $(,)? ) => {
        match $kind {
            $(
                $crate::ValueKind::$variant => $crate::KindMetadata {
                    code: $code,
                    name: $name,
                    family: $crate::KindFamily::$family,
                    arity: $crate::KindArity::$arity,
                    fixed_width: $width,
                },
            )*
        }
    };
}

macro_rules! all_kinds_from_registry {
    ( @entries $( ($variant:ident, code = $code:expr, name = $name:expr, family = $family:ident, arity = $arity:ident, width = $width:expr) ),* $(,)? ) => {
        [ $( $crate::ValueKind::$variant ),* ]
    };
}
