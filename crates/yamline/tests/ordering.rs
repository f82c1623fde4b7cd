//! The shared total order: Scalar < Sequence < Mapping, equality iff the
//! comparison is zero, hash consistent with equality.

use core::cmp::Ordering;
use std::collections::BTreeSet;

use yamline::{MappingBuilder, Node, SequenceBuilder, YamlSource};

fn scalar(text: &str) -> Node {
    Node::scalar(text)
}

fn sequence(items: &[&str]) -> Node {
    let mut builder = SequenceBuilder::new();
    for item in items {
        builder = builder.add(*item);
    }
    Node::Sequence(builder.build())
}

fn mapping(pairs: &[(&str, &str)]) -> Node {
    let mut builder = MappingBuilder::new();
    for (key, value) in pairs {
        builder = builder.add(*key, *value).expect("valid key");
    }
    Node::Mapping(builder.build())
}

#[test]
fn kinds_order_scalar_sequence_mapping() {
    assert_eq!(scalar("z").cmp(&sequence(&["a"])), Ordering::Less);
    assert_eq!(sequence(&["z"]).cmp(&mapping(&[("a", "1")])), Ordering::Less);
    assert_eq!(scalar("z").cmp(&mapping(&[("a", "1")])), Ordering::Less);
}

#[test]
fn equality_iff_comparison_is_zero() {
    let pairs = [
        (scalar("a"), scalar("a"), true),
        (scalar("a"), scalar("b"), false),
        (sequence(&["a", "b"]), sequence(&["a", "b"]), true),
        (sequence(&["a"]), sequence(&["a", "b"]), false),
        (mapping(&[("k", "v")]), mapping(&[("k", "v")]), true),
        (mapping(&[("k", "v")]), mapping(&[("k", "w")]), false),
        (scalar("a"), sequence(&["a"]), false),
    ];
    for (left, right, expected) in pairs {
        assert_eq!(left == right, expected);
        assert_eq!(left.cmp(&right) == Ordering::Equal, expected);
    }
}

#[test]
fn comparison_is_antisymmetric() {
    let nodes = [
        scalar("a"),
        scalar("b"),
        sequence(&["a"]),
        mapping(&[("a", "1")]),
    ];
    for left in &nodes {
        for right in &nodes {
            assert_eq!(left.cmp(right), right.cmp(left).reverse());
        }
    }
}

#[test]
fn mapping_comparison_is_order_sensitive() {
    let one = mapping(&[("a", "1"), ("b", "2")]);
    let two = mapping(&[("b", "2"), ("a", "1")]);
    assert_ne!(one, two);
}

#[test]
fn read_and_built_nodes_compare_equal() {
    let read = YamlSource::from_text("name: yamline\nversion: 1.0\n")
        .read()
        .expect("read");
    let built = mapping(&[("name", "yamline"), ("version", "1.0")]);
    assert_eq!(read, built);
    assert_eq!(read.cmp(&built), Ordering::Equal);
}

#[test]
fn nodes_work_in_sorted_containers() {
    let mut set = BTreeSet::new();
    set.insert(scalar("b"));
    set.insert(scalar("a"));
    set.insert(scalar("a"));
    set.insert(sequence(&["a"]));
    assert_eq!(set.len(), 3);
    let first = set.iter().next().expect("smallest");
    assert_eq!(first, &scalar("a"));
}

#[test]
fn nodes_work_as_hash_keys() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(scalar("dup"));
    set.insert(scalar("dup"));
    let read = YamlSource::from_text("---\ndup\n").read().expect("read");
    set.insert(read);
    assert_eq!(set.len(), 1);
}

#[test]
fn null_orders_before_values() {
    assert!(Node::null() < scalar(""));
    assert!(Node::null() < scalar("a"));
    assert_eq!(Node::null(), Node::null());
}
