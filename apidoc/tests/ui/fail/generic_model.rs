//! Test: generic models are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
struct Page<T> {
    items: Vec<T>,
}

fn main() {}
