use pretty_assertions::assert_eq;
use protolift_core::{
    ClassCatalog, Error, FieldDescriptor, FixedWindow, Reconstructor, Result, TypeDescriptor,
    TypeProvider,
};
use std::io::Write;
use tempfile::NamedTempFile;

const SHOP: &str = r#"{
    "types": [
        {
            "name": "com.shop.Foo",
            "kind": "message",
            "fields": [
                { "name": "bitField0_", "type": "int" },
                { "name": "LABEL_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "label_", "type": "long" },
                { "name": "COUNT_FIELD_NUMBER", "type": "int", "value": 2 },
                { "name": "count_", "type": "long" },
                { "name": "DEFAULT_INSTANCE", "type": "com.shop.Foo" },
                { "name": "PARSER", "type": "com.google.protobuf.Parser" },
                { "name": "memoizedIsInitialized", "type": "byte" }
            ]
        },
        {
            "name": "com.shop.Order",
            "kind": "message",
            "fields": [
                { "name": "bitField0_", "type": "int" },
                { "name": "memoizedHashCode", "type": "int" },
                { "name": "BUYER_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "buyer_", "type": "com.shop.Party" },
                { "name": "SELLER_FIELD_NUMBER", "type": "int", "value": 2 },
                { "name": "seller_", "type": "com.shop.Party" },
                { "name": "TAGS_FIELD_NUMBER", "type": "int", "value": 5 },
                { "name": "tags_", "type": "com.google.protobuf.LazyStringList", "element": "com.shop.Party" },
                { "name": "ITEMS_FIELD_NUMBER", "type": "int", "value": 9 },
                { "name": "items_", "type": "java.util.List", "element": "com.shop.Order$Item" },
                { "name": "PAID_FIELD_NUMBER", "type": "int", "value": 10 },
                { "name": "paid_", "type": "boolean" },
                { "name": "DEFAULT_INSTANCE", "type": "com.shop.Order" },
                { "name": "PARSER", "type": "com.google.protobuf.Parser" },
                { "name": "memoizedIsInitialized", "type": "byte" }
            ]
        },
        {
            "name": "com.shop.Party",
            "kind": "message",
            "fields": [
                { "name": "NAME_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "name_", "type": "java.lang.Object" },
                { "name": "ROLE_FIELD_NUMBER", "type": "int", "value": 2 },
                { "name": "role_", "type": "com.shop.Role" },
                { "name": "DEFAULT_INSTANCE", "type": "com.shop.Party" },
                { "name": "PARSER", "type": "com.google.protobuf.Parser" },
                { "name": "memoizedIsInitialized", "type": "byte" }
            ]
        },
        {
            "name": "com.shop.Order$Item",
            "kind": "message",
            "fields": [
                { "name": "bitField0_", "type": "int" },
                { "name": "SKU_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "sku_", "type": "com.google.protobuf.ByteString" },
                { "name": "PRICE_FIELD_NUMBER", "type": "int", "value": 2 },
                { "name": "price_", "type": "double" },
                { "name": "SELLER_FIELD_NUMBER", "type": "int", "value": 3 },
                { "name": "seller_", "type": "com.shop.Party" },
                { "name": "DEFAULT_INSTANCE", "type": "com.shop.Order$Item" },
                { "name": "PARSER", "type": "com.google.protobuf.Parser" },
                { "name": "memoizedIsInitialized", "type": "byte" }
            ]
        },
        {
            "name": "com.shop.Role",
            "kind": "enum",
            "fields": [
                { "name": "BUYER", "type": "com.shop.Role" },
                { "name": "SELLER", "type": "com.shop.Role" },
                { "name": "BROKER", "type": "com.shop.Role" },
                { "name": "BUYER_VALUE", "type": "int", "value": 0 },
                { "name": "SELLER_VALUE", "type": "int", "value": 1 },
                { "name": "BROKER_VALUE", "type": "int", "value": 4 }
            ],
            "constants": [
                { "name": "BUYER", "number": 0 },
                { "name": "SELLER", "number": 1 },
                { "name": "BROKER", "number": 4 }
            ]
        },
        {
            "name": "com.shop.Dangling",
            "kind": "message",
            "fields": [
                { "name": "GHOST_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "ghost_", "type": "com.shop.Ghost" },
                { "name": "a", "type": "int" },
                { "name": "b", "type": "int" },
                { "name": "c", "type": "int" }
            ]
        },
        {
            "name": "com.shop.Sealed",
            "kind": "message",
            "factory": false,
            "fields": [
                { "name": "ID_FIELD_NUMBER", "type": "int", "value": 1 },
                { "name": "id_", "type": "long" },
                { "name": "a", "type": "int" },
                { "name": "b", "type": "int" },
                { "name": "c", "type": "int" }
            ]
        }
    ]
}"#;

const ORDER_SCHEMA: &str = "\
message Order {
  optional Party buyer = 1;
  optional Party seller = 2;
  repeated string tags = 5;
  repeated Item items = 9;
  optional bool paid = 10;
}

message Party {
  optional string name = 1;
  optional Role role = 2;
}

message Item {
  optional bytes sku = 1;
  optional double price = 2;
  optional Party seller = 3;
}

enum Role {
  BUYER = 0;
  SELLER = 1;
  BROKER = 4;
}
";

fn shop() -> ClassCatalog {
    ClassCatalog::from_json_str(SHOP).unwrap()
}

#[test]
fn scalar_message_keeps_declaration_order() {
    let schema = Reconstructor::new(shop()).reconstruct("com.shop.Foo").unwrap();
    assert_eq!(
        schema,
        "message Foo {\n  optional int64 label = 1;\n  optional int64 count = 2;\n}\n"
    );
}

#[test]
fn shared_references_emit_one_block_each() {
    let schema = Reconstructor::new(shop()).reconstruct("com.shop.Order").unwrap();
    assert_eq!(schema, ORDER_SCHEMA);
    assert_eq!(schema.matches("message Party {").count(), 1);
    assert_eq!(schema.matches("enum Role {").count(), 1);
}

#[test]
fn repeated_calls_are_identical() {
    let reconstructor = Reconstructor::new(shop());
    let first = reconstructor.reconstruct("com.shop.Order").unwrap();
    let second = reconstructor.reconstruct("com.shop.Order").unwrap();
    assert_eq!(first, second);
}

#[test]
fn failure_leaves_no_state_behind() {
    let reconstructor = Reconstructor::new(shop());

    let err = reconstructor.reconstruct("com.shop.Dangling").unwrap_err();
    assert!(err.is_unresolved());
    assert!(err.to_string().contains("com.shop.Ghost"));

    let after_failure = reconstructor.reconstruct("com.shop.Order").unwrap();
    let fresh = Reconstructor::new(shop()).reconstruct("com.shop.Order").unwrap();
    assert_eq!(after_failure, fresh);
}

#[test]
fn missing_factory_is_fatal() {
    let err = Reconstructor::new(shop())
        .reconstruct("com.shop.Sealed")
        .unwrap_err();
    assert!(matches!(err, Error::MissingFactory { .. }));
}

#[test]
fn fixed_window_skips_known_prefix() {
    let schema = Reconstructor::new(shop())
        .with_detector(FixedWindow::new(1, 3))
        .reconstruct("com.shop.Foo")
        .unwrap();
    assert_eq!(
        schema,
        "message Foo {\n  optional int64 label = 1;\n  optional int64 count = 2;\n}\n"
    );
}

#[test]
fn catalog_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SHOP.as_bytes()).unwrap();

    let catalog = ClassCatalog::from_path(file.path()).unwrap();
    let schema = Reconstructor::new(&catalog).reconstruct("com.shop.Order").unwrap();
    assert_eq!(schema, ORDER_SCHEMA);
}

/// Provider whose field numbers live on the instance, as they do for hosts
/// that expose them through instance accessors.
struct Counted;

impl TypeProvider for Counted {
    type Instance = i32;

    fn resolve(&self, name: &str) -> Result<TypeDescriptor> {
        match name {
            "pkg.Ping" => Ok(TypeDescriptor::message(
                "pkg.Ping",
                vec![
                    FieldDescriptor::new("unknownFields", "pkg.UnknownFieldSet"),
                    FieldDescriptor::new("SEQ_FIELD_NUMBER", "int"),
                    FieldDescriptor::new("seq_", "java.lang.Integer"),
                    FieldDescriptor::new("HOPS_FIELD_NUMBER", "int"),
                    FieldDescriptor::new("hops_", "java.util.List").element("java.lang.Float"),
                    FieldDescriptor::new("x", "int"),
                    FieldDescriptor::new("y", "int"),
                    FieldDescriptor::new("z", "int"),
                ],
            )),
            other => Err(Error::type_not_found(other)),
        }
    }

    fn instantiate(&self, _ty: &TypeDescriptor) -> Result<i32> {
        Ok(0)
    }

    fn read_int(&self, _instance: &i32, field: &FieldDescriptor) -> Result<i32> {
        match field.name.as_str() {
            "SEQ_FIELD_NUMBER" => Ok(3),
            "HOPS_FIELD_NUMBER" => Ok(8),
            _ => Err(Error::field_read("pkg.Ping", &field.name)),
        }
    }

    fn enum_number(&self, ty: &TypeDescriptor, index: usize) -> Result<i32> {
        Err(Error::enum_constant(&ty.name, index))
    }
}

#[test]
fn custom_provider() {
    let schema = Reconstructor::new(Counted).reconstruct("pkg.Ping").unwrap();
    assert_eq!(
        schema,
        "message Ping {\n  optional int64 seq = 3;\n  repeated float hops = 8;\n}\n"
    );
}
