//! Test: newtypes that contain themselves are rejected.
#![allow(dead_code)]

use apidoc::Model;

#[derive(Model)]
struct Tree(Vec<Tree>);

fn main() {}
