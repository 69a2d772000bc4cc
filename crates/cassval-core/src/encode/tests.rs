use super::*;
use crate::{
    bind::RawStatement,
    error::{ErrorDetail, ErrorKind},
    types::{Decimal, Timestamp},
    wire::WireValue,
};
use std::{
    collections::BTreeSet,
    net::{IpAddr, Ipv4Addr},
};

fn primitive(typed: TypedValue) -> Primitive {
    match typed {
        TypedValue::Primitive { value, .. } => value,
        other => panic!("expected a primitive, got {other:?}"),
    }
}

fn items(typed: TypedValue) -> Vec<TypedValue> {
    match typed {
        TypedValue::Collection { items, .. } => items,
        other => panic!("expected a collection, got {other:?}"),
    }
}

fn kind_of(value: Value, declared: &CassType) -> ErrorKind {
    to_typed_value(&value, declared).unwrap_err().kind()
}

//
// Strict dispatch
//

#[test]
fn declared_integers_bind_at_their_width() {
    let typed = to_typed_value(&Value::TinyInt(3), &CassType::BIGINT).unwrap();
    assert_eq!(typed.cass_type(), &CassType::BIGINT);
    assert_eq!(primitive(typed), Primitive::Int64(3));

    let typed = encode(&7_i32, &CassType::SMALLINT).unwrap();
    assert_eq!(primitive(typed), Primitive::Int16(7));
}

#[test]
fn narrowing_out_of_range_is_an_encoding_error() {
    let err = to_typed_value(&Value::BigInt(1 << 40), &CassType::INT).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EncodingRange);
    assert_eq!(err.to_string(), "value 1099511627776 does not fit CQL int");
}

#[test]
fn incompatible_host_types_are_mismatches() {
    assert_eq!(
        kind_of(Value::Text("x".into()), &CassType::INT),
        ErrorKind::TypeMismatch
    );
    assert_eq!(
        kind_of(Value::Double(1.0), &CassType::FLOAT),
        ErrorKind::TypeMismatch
    );
    assert_eq!(
        kind_of(Value::Int(1), &CassType::BOOLEAN),
        ErrorKind::TypeMismatch
    );
}

#[test]
fn udt_and_custom_are_unsupported() {
    let udt = CassType::new(ValueKind::Udt, vec![CassType::TEXT]);
    assert_eq!(kind_of(Value::Text("x".into()), &udt), ErrorKind::UnsupportedType);
    assert_eq!(
        kind_of(Value::Blob(vec![1]), &CassType::CUSTOM),
        ErrorKind::UnsupportedType
    );
}

#[test]
fn declared_null_keeps_its_type() {
    let typed = to_typed_value(&Value::Null, &CassType::TEXT).unwrap();
    assert_eq!(typed, TypedValue::Null(CassType::TEXT));
}

//
// Coercions
//

#[test]
fn text_coerces_to_date_uuid_and_inet() {
    let date = to_typed_value(&Value::Text("1970-01-02".into()), &CassType::DATE).unwrap();
    assert_eq!(primitive(date), Primitive::Uint32((1 << 31) + 1));

    let text = "97294c90-a549-11e5-83b1-dfa924dad615";
    let uuid = to_typed_value(&Value::Text(text.into()), &CassType::TIMEUUID).unwrap();
    assert_eq!(primitive(uuid), Primitive::Uuid(Uuid::parse(text).unwrap()));

    let inet = to_typed_value(&Value::Text("10.0.0.1".into()), &CassType::INET).unwrap();
    assert_eq!(
        primitive(inet),
        Primitive::Inet(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
    );

    assert_eq!(
        kind_of(Value::Text("not-an-ip".into()), &CassType::INET),
        ErrorKind::MalformedValue
    );
}

#[test]
fn integers_coerce_to_temporal_types() {
    let ts = to_typed_value(&Value::BigInt(1_450_606_299), &CassType::TIMESTAMP).unwrap();
    assert_eq!(primitive(ts), Primitive::Int64(1_450_606_299));

    let typed = encode(&Timestamp::from_seconds(5), &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::TIMESTAMP);

    let time = to_typed_value(&Value::Integer(1_000), &CassType::TIME).unwrap();
    assert_eq!(primitive(time), Primitive::Int64(1_000));

    assert_eq!(
        kind_of(Value::Integer(-1), &CassType::TIME),
        ErrorKind::MalformedValue
    );
}

#[test]
fn numeric_widening_coercions() {
    let double = to_typed_value(&Value::Float(1.5), &CassType::DOUBLE).unwrap();
    assert_eq!(primitive(double), Primitive::Double(1.5));

    let varint = to_typed_value(&Value::Integer(128), &CassType::VARINT).unwrap();
    assert_eq!(primitive(varint), Primitive::Bytes(vec![0x00, 0x80]));

    let decimal = encode(&Decimal::new(-5, 2), &CassType::DECIMAL).unwrap();
    assert_eq!(
        primitive(decimal),
        Primitive::Decimal {
            unscaled: vec![0xFB],
            scale: 2
        }
    );
}

//
// Inference
//

#[test]
fn untyped_values_are_inferred() {
    let typed = encode(&String::from("hi"), &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::TEXT);

    let typed = to_typed_value(&Value::Integer(1 << 40), &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::BIGINT);

    assert_eq!(
        kind_of(Value::Null, &CassType::UNKNOWN),
        ErrorKind::UnresolvedType
    );
}

#[test]
fn first_element_fixes_the_collection_type() {
    let typed = encode(&vec![1_i32, 2, 3], &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::list_of(CassType::INT));
    assert_eq!(items(typed).len(), 3);

    let mixed = Value::List(vec![Value::Int(1), Value::Text("a".into())]);
    assert_eq!(kind_of(mixed, &CassType::UNKNOWN), ErrorKind::TypeMismatch);
}

#[test]
fn empty_siblings_defer_to_later_ones() {
    let nested = Value::List(vec![
        Value::List(Vec::new()),
        Value::List(vec![Value::Int(1)]),
    ]);

    let typed = to_typed_value(&nested, &CassType::UNKNOWN).unwrap();
    assert_eq!(
        typed.cass_type(),
        &CassType::list_of(CassType::list_of(CassType::INT))
    );
}

#[test]
fn empty_collection_stays_unspecialized() {
    let typed = to_typed_value(&Value::List(Vec::new()), &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::LIST);

    let typed = to_typed_value(&Value::List(Vec::new()), &CassType::list_of(CassType::INT))
        .unwrap();
    assert_eq!(typed.cass_type(), &CassType::list_of(CassType::INT));
}

#[test]
fn null_collection_items_are_rejected() {
    let list = Value::List(vec![Value::Int(1), Value::Null]);
    let err = to_typed_value(&list, &CassType::UNKNOWN).unwrap_err();

    let ErrorDetail::TypeMismatch { host_type, .. } = &err.detail else {
        panic!("expected a type mismatch, got {err}");
    };
    assert_eq!(host_type, "null");
}

#[test]
fn maps_resolve_key_and_value_types() {
    let map = Value::Map(vec![(Value::Text("a".into()), Value::Double(1.0))]);
    let typed = to_typed_value(&map, &CassType::UNKNOWN).unwrap();

    assert_eq!(
        typed.cass_type(),
        &CassType::map_of(CassType::TEXT, CassType::DOUBLE)
    );
    assert_eq!(items(typed).len(), 2);
}

//
// Set marker
//

#[test]
fn set_marker_binds_as_set() {
    let typed = to_typed_value(&Value::set_of([1_i32, 2]), &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::set_of(CassType::INT));

    let host: BTreeSet<String> = ["a".to_string()].into_iter().collect();
    let typed = encode(&host, &CassType::UNKNOWN).unwrap();
    assert_eq!(typed.cass_type(), &CassType::set_of(CassType::TEXT));
}

#[test]
fn set_marker_rejects_list_and_map_declarations() {
    let set = Value::set_of([1_i32]);
    assert_eq!(
        kind_of(set.clone(), &CassType::list_of(CassType::INT)),
        ErrorKind::TypeMismatch
    );
    assert_eq!(kind_of(set, &CassType::MAP), ErrorKind::TypeMismatch);
}

#[test]
fn plain_list_binds_to_declared_set() {
    let typed = encode(&vec![1_i64], &CassType::set_of(CassType::BIGINT)).unwrap();
    assert_eq!(typed.cass_type(), &CassType::set_of(CassType::BIGINT));
}

//
// Tuples
//

#[test]
fn tuple_slots_resolve_independently() {
    let typed = encode(&(1_i32, Option::<String>::None), &CassType::UNKNOWN).unwrap();

    let TypedValue::Tuple { cass_type, slots } = typed else {
        panic!("expected a tuple");
    };
    assert_eq!(
        cass_type,
        CassType::tuple_of(vec![CassType::INT, CassType::UNKNOWN])
    );
    assert!(slots[1].is_null());
}

#[test]
fn declared_tuple_coerces_each_slot() {
    let declared = CassType::tuple_of(vec![CassType::BIGINT, CassType::TEXT]);
    let typed = encode(&(1_i32, String::from("x")), &declared).unwrap();
    assert_eq!(typed.cass_type(), &declared);

    let short = CassType::tuple_of(vec![CassType::INT]);
    assert_eq!(
        kind_of(Value::from_host(&(1_i32, 2_i32)), &short),
        ErrorKind::TypeMismatch
    );
}

//
// Binding
//

#[test]
fn bind_arguments_fills_the_statement() {
    let mut stmt = RawStatement::new();
    let args = [
        Value::Text("k".into()),
        Value::Null,
        Value::List(vec![Value::Int(4), Value::Int(5)]),
    ];
    let declared = [CassType::TEXT, CassType::INT];

    bind_arguments(&mut stmt, &args, &declared).unwrap();

    assert_eq!(stmt.len(), 3);
    assert_eq!(stmt.param(0), Some(Some(&b"k"[..])));
    assert_eq!(stmt.param(1), Some(None));

    let list = stmt.value(2, CassType::list_of(CassType::INT)).unwrap();
    let elements = list.elements().unwrap();
    assert_eq!(elements[1].get_int32().unwrap(), 5);
}

#[test]
fn bind_errors_name_the_argument() {
    let mut stmt = RawStatement::new();
    let args = [Value::Int(1), Value::Bool(true)];
    let declared = [CassType::INT, CassType::INT];

    let err = bind_arguments(&mut stmt, &args, &declared).unwrap_err();
    assert_eq!(err.context.argument, Some(1));
    assert!(err.to_string().ends_with("(argument 1)"));
}

//
// Limits
//

#[test]
fn lengths_must_fit_the_i32_prefix() {
    let max = usize::try_from(i32::MAX).unwrap();
    assert!(payload_len(max, &CassType::BLOB).is_ok());

    let err = payload_len(max + 1, &CassType::BLOB).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingRange);
}

#[test]
fn nesting_depth_is_bounded() {
    let nested = Value::List(vec![Value::List(vec![Value::Int(1)])]);
    let encoder = Encoder::new(CodecConfig {
        max_depth: 1,
        ..CodecConfig::default()
    });

    let err = encoder.encode(&nested, &CassType::UNKNOWN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LimitExceeded);
}

#[test]
fn inferred_siblings_must_match_the_fixed_type() {
    let widened = Value::List(vec![Value::Int(1), Value::BigInt(2)]);
    assert_eq!(kind_of(widened, &CassType::UNKNOWN), ErrorKind::TypeMismatch);

    let too_wide = Value::List(vec![Value::Int(1), Value::Integer(1 << 40)]);
    assert_eq!(kind_of(too_wide, &CassType::UNKNOWN), ErrorKind::TypeMismatch);

    let nested = Value::List(vec![
        Value::List(vec![Value::Int(1)]),
        Value::List(vec![Value::Double(2.0)]),
    ]);
    assert_eq!(kind_of(nested, &CassType::UNKNOWN), ErrorKind::TypeMismatch);
}

#[test]
fn untyped_integers_take_the_width_siblings_fixed() {
    let list = Value::List(vec![Value::BigInt(1), Value::Integer(2)]);
    let typed = to_typed_value(&list, &CassType::UNKNOWN).unwrap();

    assert_eq!(typed.cass_type(), &CassType::list_of(CassType::BIGINT));
    assert_eq!(primitive(items(typed).remove(1)), Primitive::Int64(2));
}

#[test]
fn declared_element_types_still_coerce_every_item() {
    let list = Value::List(vec![Value::Int(1), Value::BigInt(2)]);
    let typed = to_typed_value(&list, &CassType::list_of(CassType::BIGINT)).unwrap();

    assert_eq!(primitive(items(typed).remove(0)), Primitive::Int64(1));
}
