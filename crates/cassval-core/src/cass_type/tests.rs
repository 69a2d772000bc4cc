use super::*;
use crate::error::MalformedValueError;

struct Node {
    kind: ValueKind,
    subs: Vec<Node>,
}

impl Node {
    fn leaf(kind: ValueKind) -> Self {
        Self {
            kind,
            subs: Vec::new(),
        }
    }
}

impl DataTypeHandle for Node {
    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn sub_type_count(&self) -> usize {
        self.subs.len()
    }

    fn sub_type(&self, index: usize) -> Option<&Self> {
        self.subs.get(index)
    }
}

fn nested_tuple() -> CassType {
    CassType::tuple_of(vec![
        CassType::INT,
        CassType::TEXT,
        CassType::list_of(CassType::TIMEUUID),
    ])
}

#[test]
fn renders_nested_tuple() {
    assert_eq!(nested_tuple().name(), "tuple<int, text, list<timeuuid>>");
}

#[test]
fn renders_collections() {
    assert_eq!(CassType::list_of(CassType::INT).to_string(), "list<int>");
    assert_eq!(CassType::set_of(CassType::ASCII).to_string(), "set<ascii>");
    assert_eq!(
        CassType::map_of(CassType::TEXT, CassType::BIGINT).to_string(),
        "map<text, bigint>"
    );
    assert_eq!(CassType::LIST.to_string(), "list<?>");
    assert_eq!(CassType::MAP.to_string(), "map<?, ?>");
    assert_eq!(CassType::UNKNOWN.to_string(), "unknown");
}

#[test]
fn equality_is_structural() {
    assert_eq!(nested_tuple(), nested_tuple());
    assert_ne!(
        CassType::list_of(CassType::INT),
        CassType::set_of(CassType::INT)
    );
    assert_ne!(
        CassType::list_of(CassType::INT),
        CassType::list_of(CassType::BIGINT)
    );
    assert_ne!(CassType::LIST, CassType::list_of(CassType::INT));
}

#[test]
fn specialize_leaves_original_untouched() {
    let head = CassType::LIST;
    let list = head.specialize(vec![CassType::DOUBLE]);

    assert!(!head.is_specialized());
    assert!(list.is_specialized());
    assert_eq!(list, CassType::list_of(CassType::DOUBLE));
}

#[test]
fn resolved_requires_concrete_leaves() {
    assert!(nested_tuple().is_resolved());
    assert!(!CassType::list_of(CassType::UNKNOWN).is_resolved());
    assert!(!CassType::MAP.is_resolved());
}

#[test]
fn parses_canonical_rendering() {
    let parsed: CassType = "tuple<int, text, list<timeuuid>>".parse().unwrap();
    assert_eq!(parsed, nested_tuple());

    let parsed: CassType = " Map < TEXT , frozen<set<uuid>> > ".parse().unwrap();
    assert_eq!(
        parsed,
        CassType::map_of(CassType::TEXT, CassType::set_of(CassType::UUID))
    );

    let parsed: CassType = "list<?>".parse().unwrap();
    assert_eq!(parsed, CassType::LIST);
}

#[test]
fn rejects_malformed_type_strings() {
    for input in [
        "",
        "integer",
        "list<int",
        "map<int>",
        "int<text>",
        "map<?, int>",
        "list<int>>",
    ] {
        assert!(input.parse::<CassType>().is_err(), "{input}");
    }
}

#[test]
fn deep_nesting_is_rejected_not_recursed() {
    let depth = 100_000;
    let input = format!("{}int{}", "list<".repeat(depth), ">".repeat(depth));
    let err = input.parse::<CassType>().unwrap_err();
    assert!(matches!(err, MalformedValueError::TooDeep { .. }), "{err}");

    let frozen = format!("{}int{}", "frozen<".repeat(depth), ">".repeat(depth));
    assert!(frozen.parse::<CassType>().is_err());

    let shallow = format!("{}int{}", "list<".repeat(8), ">".repeat(8));
    assert!(shallow.parse::<CassType>().is_ok());
}

#[test]
fn serializes_as_canonical_string() {
    let ty = CassType::map_of(CassType::TEXT, CassType::list_of(CassType::INT));
    let json = serde_json::to_string(&ty).unwrap();
    assert_eq!(json, r#""map<text, list<int>>""#);

    let back: CassType = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ty);
}

#[test]
fn resolves_from_wire_descriptor() {
    let handle = Node {
        kind: ValueKind::Map,
        subs: vec![
            Node::leaf(ValueKind::Varchar),
            Node {
                kind: ValueKind::Tuple,
                subs: vec![Node::leaf(ValueKind::Int), Node::leaf(ValueKind::Date)],
            },
        ],
    };

    let ty = CassType::from_wire_descriptor(&handle);
    assert_eq!(ty.to_string(), "map<varchar, tuple<int, date>>");
}

#[test]
fn wire_descriptor_without_subtypes_stays_unspecialized() {
    let ty = CassType::from_wire_descriptor(&Node::leaf(ValueKind::Set));
    assert_eq!(ty, CassType::SET);
}
