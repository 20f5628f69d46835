//! Test: self-referential and mutually recursive models derive `Model`.

use apidoc::Model;

#[derive(Model)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
    pub parent: Option<Box<TreeNode>>,
}

#[derive(Model)]
pub struct Author {
    pub books: Vec<Book>,
}

#[derive(Model)]
pub struct Book {
    pub author: Option<std::sync::Arc<Author>>,
}

fn main() {
    let node = TreeNode::descriptor();
    let object = node.as_object().expect("object");
    assert_eq!(object.fields.len(), 3);
    assert!(object.fields[1].descriptor().is_sequence());

    assert!(Author::descriptor().as_object().is_some());
    assert!(Book::descriptor().as_object().is_some());
}
