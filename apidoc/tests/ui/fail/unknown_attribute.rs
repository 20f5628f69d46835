//! Test: unknown `apidoc` field attributes are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
struct Product {
    #[apidoc(minimum = 1)]
    id: u64,
}

fn main() {}
