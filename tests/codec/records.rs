//! CSV record reading and writing.

use valspec_codec::{stringify, tokenize};

#[test]
fn tokenize_splits_on_commas() {
    assert_eq!(tokenize("a,b,c").unwrap(), ["a", "b", "c"]);
}

#[test]
fn tokenize_keeps_whitespace() {
    assert_eq!(tokenize(" a , b").unwrap(), [" a ", " b"]);
}

#[test]
fn tokenize_unquotes_fields() {
    assert_eq!(
        tokenize(r#""x, y","say ""hi""",z"#).unwrap(),
        ["x, y", r#"say "hi""#, "z"]
    );
}

#[test]
fn tokenize_flattens_lines() {
    assert_eq!(tokenize("1,2\n3\n4,5").unwrap(), ["1", "2", "3", "4", "5"]);
}

#[test]
fn tokenize_empty_fields() {
    assert_eq!(tokenize("a,,b").unwrap(), ["a", "", "b"]);
}

#[test]
fn stringify_quotes_only_when_needed() {
    assert_eq!(stringify(["plain", "with,comma"]), r#"plain,"with,comma""#);
    assert_eq!(stringify([r#"a "b""#]), r#""a ""b""""#);
}

#[test]
fn stringify_nothing_is_empty() {
    assert_eq!(stringify(Vec::<String>::new()), "");
}

#[test]
fn stringify_then_tokenize_preserves_awkward_fields() {
    let fields = ["one", "two, three", "line\nbreak", r#"q"uote"#];
    let line = stringify(fields);
    assert_eq!(tokenize(&line).unwrap(), fields);
}
