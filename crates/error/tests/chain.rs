//! Integration tests for error context chains

use faultline_error::LeafError;
use faultline_error::core::{is, render, unwrap, with_location, wrap};
use faultline_error::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

sentinel! {
    static SENTINEL_A = "sentinel a";
    static SENTINEL_B = "sentinel b";
}

/// Strip the `(at file:line:column)` suffix so renders compare stably.
fn notes(rendered: &str) -> String {
    rendered
        .lines()
        .map(|line| line.rsplit_once(" (at ").map_or(line, |(note, _)| note))
        .collect::<Vec<_>>()
        .join("\n")
}

fn nested_six() -> Result<()> {
    fn lookup() -> Result<()> {
        Err::<(), _>(RECORD_NOT_FOUND.err())
            .wrap_err("err-1")
            .wrap_err("err-2")
            .wrap_err("err-3")
            .wrap_err("err-4")
            .wrap_err("err-5")
            .wrap_err("err-6")
    }

    fn service() -> Result<()> {
        lookup()
    }

    service()
}

#[test]
fn three_wraps_render_outermost_first() {
    let err = RECORD_NOT_FOUND.err().wrap("err-1").wrap("err-2").wrap("err-3");

    insta::assert_snapshot!(notes(&render(&err)), @r"
    err-3
    err-2
    err-1
    record not found
    ");
    assert!(is(&err, &RECORD_NOT_FOUND));
}

#[test]
fn six_wraps_through_nested_calls() {
    let err = nested_six().unwrap_err();

    assert_eq!(err.len(), 7);
    assert!(err.is(&RECORD_NOT_FOUND));
    assert!(!err.is(&UNKNOWN));
    assert_eq!(
        err.to_string(),
        "err-6: err-5: err-4: err-3: err-2: err-1: record not found"
    );
    assert_eq!(format!("{err:#}"), err.render());
    assert_eq!(format!("{err:?}"), err.render());
}

#[test]
fn every_rendered_line_names_this_file_for_wraps() {
    let err = RECORD_NOT_FOUND.err().wrap("outer");
    let rendered = err.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("outer (at "));
    assert!(lines[0].contains("tests/chain.rs:"));
    assert!(lines[1].starts_with("record not found (at "));
    assert!(lines[1].contains("leaf.rs:"));
}

#[test]
fn raise_site_is_recorded_on_the_chain() {
    fn find_user(id: u32) -> Result<String> {
        Err(RECORD_NOT_FOUND.err().with_location()).wrap_err_with(|| format!("find user {id}"))
    }

    let err = find_user(3).unwrap_err();
    let rendered = err.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(err.to_string(), "find user 3: record not found");
    assert!(err.is(&RECORD_NOT_FOUND));
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("record not found (at "));
    assert!(lines[1].contains("tests/chain.rs:"));
    assert!(lines[2].contains("leaf.rs:"));
    assert!(with_location(None::<ChainError>).is_none());
}

#[test]
fn multi_line_note_renders_on_one_line() {
    let err = ChainError::msg("root").wrap("line one\nline two");
    let rendered = err.render();

    assert_eq!(rendered.lines().count(), err.len());
    assert!(rendered.starts_with(r"line one\nline two (at "));
    assert_eq!(err.frames()[0].message, "line one\nline two");
}

#[test]
fn failed_assertion_inside_try_isolate_renders_one_line_per_node() {
    let err = try_isolate(|| -> Result<()> {
        assert_eq!(1, 2);
        Ok(())
    })
    .unwrap_err();

    assert!(err.is(&PANICKED));
    assert!(err.message().contains('\n'));
    assert_eq!(err.render().lines().count(), err.len());
}

#[test]
fn wrap_of_absent_error_is_absent() {
    let nothing: Option<ChainError> = None;
    assert!(wrap(nothing, "err-1").is_none());

    let ok: Result<u32> = Ok(5);
    assert_eq!(ok.wrap_err("never applied").unwrap(), 5);
}

#[test]
fn unwrap_walks_one_step() {
    let err = SENTINEL_A.err().wrap("inner").wrap("outer");

    let inner = unwrap(&err).unwrap();
    assert_eq!(inner.message(), "inner");
    let root = unwrap(inner).unwrap();
    assert!(root.leaf().is_some());
    assert!(unwrap(root).is_none());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(12)]
fn frames_match_render(#[case] depth: usize) {
    let mut err = UNKNOWN.err();
    for i in 0..depth {
        err = err.wrap(format!("layer-{i}"));
    }

    let frames = err.frames();
    assert_eq!(frames.len(), depth + 1);
    assert_eq!(frames.last().unwrap().message, "unknown error");
    let joined = frames.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n");
    assert_eq!(joined, err.render());
}

#[cfg(feature = "serde")]
#[test]
fn frames_serialize_to_json() {
    let err = SENTINEL_B.err().wrap("saving");
    let json = serde_json::to_value(err.frames()).unwrap();

    assert_eq!(json[0]["message"], "saving");
    assert_eq!(json[0]["location"]["file"], file!());
    assert_eq!(json[1]["message"], "sentinel b");
    assert!(json[1]["location"]["line"].as_u64().unwrap() > 0);
}

#[test]
fn foreign_errors_convert_with_question_mark() {
    fn parse(input: &str) -> Result<u16> {
        let value: u16 = input.parse()?;
        Ok(value)
    }

    let err = parse("seventy").wrap_err("reading port").unwrap_err();
    assert!(err.find::<std::num::ParseIntError>().is_some());
    assert_eq!(err.len(), 2);

    let boxed: Box<dyn std::error::Error + Send + Sync> = err.into();
    assert_eq!(boxed.to_string(), "reading port");
    assert!(boxed.source().is_some());
}

proptest! {
    #[test]
    fn unwrap_of_wrap_is_identity(layers in proptest::collection::vec("[a-z]{1,8}", 0..8), outer in "[a-z]{1,8}") {
        let mut err = ChainError::msg("root");
        for note in layers {
            err = err.wrap(note);
        }
        let before = err.to_string();
        let leaf: *const LeafError = err.root_cause().leaf().unwrap();

        let back = err.wrap(outer).into_cause().unwrap();

        prop_assert_eq!(back.to_string(), before);
        prop_assert!(std::ptr::eq(leaf, back.root_cause().leaf().unwrap()));
    }

    #[test]
    fn sentinel_survives_any_depth(depth in 0usize..64, use_a in any::<bool>()) {
        let (target, other) = if use_a { (&SENTINEL_A, &SENTINEL_B) } else { (&SENTINEL_B, &SENTINEL_A) };
        let mut err = target.err();
        for i in 0..depth {
            err = err.wrap(format!("wrap-{i}"));
        }

        prop_assert!(err.is(target));
        prop_assert!(!err.is(other));
        prop_assert_eq!(err.render().lines().count(), depth + 1);
    }
}
