//! Test: unions are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
union Bits {
    a: u32,
    b: f32,
}

fn main() {}
