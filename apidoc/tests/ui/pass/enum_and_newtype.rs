//! Test: unit enums and newtype wrappers derive `Model`.

use apidoc::{Model, TypeDescriptor};

#[derive(Model)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    OnHold,
    #[serde(rename = "gone")]
    Retired,
}

#[derive(Model)]
pub struct OrderId(pub u64);

#[derive(Model)]
#[serde(transparent)]
pub struct Labels {
    pub values: Vec<String>,
}

fn main() {
    let TypeDescriptor::Enum(status) = Status::descriptor() else {
        panic!("expected an enum descriptor");
    };
    assert_eq!(status.variants, vec!["ACTIVE", "ON_HOLD", "gone"]);

    assert!(matches!(OrderId::descriptor(), TypeDescriptor::Primitive(_)));
    assert!(Labels::descriptor().is_sequence());
}
