//! Test: unit structs are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
struct Marker;

fn main() {}
