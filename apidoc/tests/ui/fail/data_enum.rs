//! Test: enums with data-carrying variants are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
enum Shape {
    Circle { radius: f64 },
    Square(f64),
}

fn main() {}
