//! The indentation law and the other fault paths, all fatal and all naming
//! the offending line.

use pretty_assertions::assert_eq;
use yamline::{YamlError, YamlSource};

fn read_err(text: &str) -> YamlError {
    YamlSource::from_text(text)
        .read()
        .expect_err("expected a fault")
}

#[test]
fn odd_indentation_names_the_line() {
    assert_eq!(
        read_err("a:\n   b: 1\n"),
        YamlError::OddIndentation { line: 1, spaces: 3 }
    );
}

#[test]
fn nesting_must_step_exactly_two() {
    assert_eq!(
        read_err("a:\n    b: 1\n"),
        YamlError::MisplacedIndentation {
            line: 1,
            expected: 2,
            found: 4
        }
    );
}

#[test]
fn indent_without_an_opener_faults() {
    assert_eq!(
        read_err("a: 1\n  b: 2\n"),
        YamlError::UnexpectedIndentation {
            line: 1,
            found: 2,
            previous: 0
        }
    );
}

#[test]
fn opener_followed_by_sibling_is_a_null_value() {
    // `a:` has no nested content; `b: 1` belongs to the enclosing scope
    let mapping = YamlSource::from_text("a:\nb: 1\n")
        .read_mapping()
        .expect("read");
    assert!(
        mapping
            .value(&yamline::Node::scalar("a"))
            .expect("key exists")
            .as_scalar()
            .expect("scalar")
            .is_null()
    );
}

#[test]
fn deep_nesting_inside_a_tree_is_found_by_validation() {
    assert_eq!(
        read_err("outer:\n  inner:\n      deep: 1\n"),
        YamlError::MisplacedIndentation {
            line: 2,
            expected: 4,
            found: 6
        }
    );
}

#[test]
fn unclassifiable_document_faults() {
    assert_eq!(
        read_err("plain one\nplain two\n"),
        YamlError::UnknownNodeType { line: 0 }
    );
}

#[test]
fn complex_key_without_value_faults() {
    let error = YamlSource::from_text("?\n  - a\nnext: 1\n")
        .read()
        .expect_err("missing value");
    assert_eq!(error, YamlError::MissingValue { line: 0 });
}

#[test]
fn faults_display_their_line() {
    let error = read_err("a:\n   b: 1\n");
    assert_eq!(error.to_string(), "line 1: odd indentation of 3 spaces");
}

#[test]
fn literal_interiors_are_exempt_from_the_law() {
    let mapping = YamlSource::from_text("log: |\n  text\n      deeper\n  back\n")
        .read_mapping()
        .expect("block scalar interiors are content");
    assert_eq!(
        mapping.string("log"),
        Some("text\n    deeper\nback".to_string())
    );
}

#[test]
fn rewritten_sequence_items_stay_well_indented() {
    let sequence = YamlSource::from_text("- name: one\n  extra: two\n- name: three\n")
        .read_sequence()
        .expect("read");
    assert_eq!(sequence.len(), 2);
    let first = sequence.get(0).expect("first");
    let first = first.as_mapping().expect("mapping");
    assert_eq!(first.string("extra"), Some("two".to_string()));
}
