//! Test: named-field structs with serde and apidoc attributes derive `Model`.

use apidoc::{Model, TypeDescriptor};

/// A sellable item.
#[derive(Model)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    #[apidoc(example = "5", required)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<u64>,
    #[apidoc(example = "Physical", enum = "Physical|Online")]
    pub kind: String,
    #[serde(skip)]
    pub cache: std::cell::RefCell<Vec<u8>>,
    pub r#type: String,
}

fn main() {
    let TypeDescriptor::Object(object) = Product::descriptor() else {
        panic!("expected an object descriptor");
    };
    assert_eq!(object.name, "Product");
    assert_eq!(object.description, Some("A sellable item."));

    let names: Vec<_> = object.fields.iter().filter_map(|f| f.property_name()).collect();
    assert_eq!(names, vec!["id", "merchantId", "kind", "type"]);
}
