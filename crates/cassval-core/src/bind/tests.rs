use super::*;
use crate::{
    decode::decode_value,
    encode::{encode, to_typed_value},
    value::Value,
    wire::{RawValue, WireValue},
};
use std::net::Ipv4Addr;

fn bound(typed: &TypedValue) -> RawValue {
    let mut stmt = RawStatement::new();
    typed.bind(&mut stmt, 0);

    stmt.value(0, typed.cass_type().clone()).unwrap()
}

#[test]
fn primitives_bind_in_native_encoding() {
    let int = encode(&-2_i32, &CassType::INT).unwrap();
    assert_eq!(bound(&int).bytes(), Some(&[0xFF, 0xFF, 0xFF, 0xFE][..]));

    let flag = encode(&true, &CassType::BOOLEAN).unwrap();
    assert_eq!(bound(&flag).bytes(), Some(&[1][..]));

    let ip = IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1));
    let inet = encode(&ip, &CassType::INET).unwrap();
    assert_eq!(bound(&inet).bytes(), Some(&[192, 168, 0, 1][..]));
}

#[test]
fn decimal_binds_scale_before_unscaled() {
    let typed = TypedValue::Primitive {
        cass_type: CassType::DECIMAL,
        value: Primitive::Decimal {
            unscaled: vec![0x30, 0x39],
            scale: 2,
        },
    };

    assert_eq!(bound(&typed).bytes(), Some(&[0, 0, 0, 2, 0x30, 0x39][..]));
}

#[test]
fn unbound_positions_read_as_null() {
    let mut stmt = RawStatement::new();
    encode(&1_i64, &CassType::BIGINT)
        .unwrap()
        .bind(&mut stmt, 2);

    assert_eq!(stmt.len(), 3);
    assert_eq!(stmt.param(0), Some(None));
    assert_eq!(stmt.param(3), None);
}

#[test]
fn map_items_are_counted_as_pairs() {
    let map = Value::Map(vec![
        (Value::Text("a".into()), Value::Int(1)),
        (Value::Text("b".into()), Value::Int(2)),
    ]);
    let typed = to_typed_value(&map, &CassType::UNKNOWN).unwrap();
    let raw = bound(&typed);

    assert_eq!(raw.bytes().map(|b| &b[..4]), Some(&[0, 0, 0, 2][..]));
    assert_eq!(decode_value(&raw, raw.cass_type()).unwrap(), map);
}

#[test]
fn tuple_slots_keep_position_and_nulls() {
    let declared = CassType::tuple_of(vec![CassType::INT, CassType::TEXT]);
    let typed = encode(&(9_i32, Option::<String>::None), &declared).unwrap();
    let raw = bound(&typed);

    let fields = raw.fields().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].get_int32().unwrap(), 9);
    assert!(fields[1].is_null());
}

#[test]
fn nested_collections_build_inner_sinks() {
    let declared = CassType::tuple_of(vec![
        CassType::TEXT,
        CassType::list_of(CassType::SMALLINT),
    ]);
    let value = (String::from("k"), vec![1_i16, 2, 3]);
    let raw = bound(&encode(&value, &declared).unwrap());

    let fields = raw.fields().unwrap();
    let inner = fields[1].elements().unwrap();
    assert_eq!(inner.len(), 3);
    assert_eq!(inner[2].get_int16().unwrap(), 3);
}

#[test]
fn collection_sink_can_be_driven_directly() {
    let ty = CassType::list_of(CassType::TEXT);
    let mut sink = <RawCollection as CollectionSink>::new(&ty, 2);
    for s in ["x", "y"] {
        encode(&String::from(s), &CassType::TEXT)
            .unwrap()
            .append(&mut sink);
    }

    let raw = sink.into_raw();
    assert_eq!(
        decode_value(&raw, &ty).unwrap(),
        Value::List(vec![Value::Text("x".into()), Value::Text("y".into())])
    );
}

#[test]
fn tuple_sink_is_presized_from_its_type() {
    let ty = CassType::tuple_of(vec![CassType::INT, CassType::INT, CassType::INT]);
    let mut sink = <RawTuple as TupleSink>::new(&ty);
    encode(&4_i32, &CassType::INT).unwrap().set(&mut sink, 1);

    let fields = sink.into_raw().fields().unwrap();
    assert!(fields[0].is_null());
    assert_eq!(fields[1].get_int32().unwrap(), 4);
    assert!(fields[2].is_null());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "NULL item in list<int> collection")]
fn null_collection_items_are_caught_when_binding() {
    let typed = TypedValue::Collection {
        cass_type: CassType::list_of(CassType::INT),
        items: vec![TypedValue::Null(CassType::INT)],
    };

    bound(&typed);
}
