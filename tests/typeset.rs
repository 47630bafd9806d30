//! End-to-end tests: markup in, measured box tree out.

use mathbox::atom::AtomBody;
use mathbox::boxes::{BoxPayload, LayoutBox};
use mathbox::error::ParseErrorKind;
use mathbox::{layout, parse, typeset, LayoutOptions, UniformMetrics};

use proptest::prelude::*;

fn typeset_clean(input: &str) -> LayoutBox {
    let outcome = typeset(input, &LayoutOptions::default(), &UniformMetrics);
    assert!(
        outcome.is_clean(),
        "unexpected errors for {input:?}: parse {:?}, layout {:?}",
        outcome.parse_errors,
        outcome.layout_errors
    );
    outcome.root
}

fn count_payload(root: &LayoutBox, pred: impl Fn(&BoxPayload) -> bool) -> usize {
    let mut count = 0;
    root.walk(&mut |_, node| {
        if pred(&node.payload) {
            count += 1;
        }
    });
    count
}

#[test]
fn empty_input_yields_empty_box_and_no_errors() {
    let outcome = typeset("", &LayoutOptions::default(), &UniformMetrics);
    assert!(outcome.is_clean());
    assert!(outcome.root.is_empty());
}

#[test]
fn each_fraction_draws_one_rule() {
    let root = typeset_clean(r"\frac{1}{2} + \frac{\frac{a}{b}}{c}");
    let rules = count_payload(&root, |p| *p == BoxPayload::Rule);
    assert_eq!(rules, 3);
}

#[test]
fn scripted_atom_spans_above_and_below_the_baseline() {
    let root = typeset_clean("x^2_i");
    let plain = typeset_clean("x");
    assert!(root.height > plain.height);
    assert!(root.depth > plain.depth);
}

#[test]
fn radical_sign_outgrows_its_radicand() {
    let root = typeset_clean(r"\sqrt{x}");
    let plain = typeset_clean("x");
    assert!(root.height > plain.height);
    // One vinculum.
    assert_eq!(count_payload(&root, |p| *p == BoxPayload::Rule), 1);
}

#[test]
fn unknown_command_is_one_error_and_still_renders() {
    let outcome = typeset(r"\unknown{x}", &LayoutOptions::default(), &UniformMetrics);
    assert_eq!(outcome.parse_errors.len(), 1);
    let error = &outcome.parse_errors[0];
    assert!(matches!(
        &error.kind,
        ParseErrorKind::UnknownCommand { command } if command == "unknown"
    ));
    assert_eq!(error.position, Some(0));
    assert!(!outcome.root.is_empty());
    // The braced argument still made it into the output.
    assert_eq!(
        count_payload(&outcome.root, |p| matches!(
            p,
            BoxPayload::Glyph { text, .. } if text == "x"
        )),
        1
    );
}

#[test]
fn matrix_rows_and_columns_line_up() {
    let root = typeset_clean(r"\begin{matrix} a & b \\ c & d \end{matrix}");
    let mut origins = Vec::new();
    root.walk(&mut |origin, node| {
        if let BoxPayload::Glyph { text, .. } = &node.payload {
            origins.push((text.clone(), origin.x, origin.y));
        }
    });
    let get = |g: &str| origins.iter().find(|(t, _, _)| t == g).unwrap();
    let (_, ax, ay) = *get("a");
    let (_, bx, by) = *get("b");
    let (_, cx, cy) = *get("c");
    let (_, dx, dy) = *get("d");
    assert_eq!(ay, by);
    assert_eq!(cy, dy);
    assert_eq!(ax, cx);
    assert_eq!(bx, dx);
    assert!(ay > cy);
}

#[test]
fn delimiters_cover_tall_content() {
    let bare = typeset_clean(r"\frac{a}{b}");
    let wrapped = typeset_clean(r"\left[ \frac{a}{b} \right]");
    assert!(wrapped.height >= bare.height);
    assert!(wrapped.depth >= bare.depth);
    assert!(wrapped.width > bare.width);
}

#[test]
fn operator_limits_center_under_the_sign_in_display() {
    let root = typeset_clean(r"\sum_{i=0}^{n}");
    let mut sum_span = None;
    let mut n_origin = None;
    root.walk(&mut |origin, node| {
        if let BoxPayload::Glyph { text, .. } = &node.payload {
            if text.starts_with('∑') {
                sum_span = Some((origin.x, origin.x + node.width));
            }
            if text == "n" {
                n_origin = Some(origin);
            }
        }
    });
    let (left, right) = sum_span.expect("operator glyph");
    let n = n_origin.expect("upper limit glyph");
    assert!(n.x >= left - 1e-9 && n.x <= right + 1e-9);
    assert!(n.y > 0.0);
}

#[test]
fn parse_then_layout_round_trip_is_stable() {
    let input = r"\int_0^1 \frac{\sin x}{x} \, dx = \frac{\pi}{2}";
    let first = parse(input);
    let second = parse(input);
    assert!(first.errors.is_empty());
    assert_eq!(first.list, second.list);

    let opts = LayoutOptions::default();
    let a = layout(&first.list, &opts, &UniformMetrics);
    let b = layout(&first.list, &opts, &UniformMetrics);
    assert_eq!(a.root, b.root);
}

#[test]
fn recovered_parse_still_lays_out() {
    // Unmatched group, stray alignment, missing fraction argument.
    for input in ["{a", "a & b", r"\frac{a}", r"\left( x", "x^2^3"] {
        let outcome = typeset(input, &LayoutOptions::default(), &UniformMetrics);
        assert!(!outcome.parse_errors.is_empty(), "expected errors for {input:?}");
        assert!(
            !outcome.root.is_empty(),
            "expected best-effort layout for {input:?}"
        );
    }
}

#[test]
fn style_commands_change_glyph_sizes_mid_list() {
    let root = typeset_clean(r"a \scriptscriptstyle b");
    let mut sizes = Vec::new();
    root.walk(&mut |_, node| {
        if let BoxPayload::Glyph { text, size } = &node.payload {
            sizes.push((text.clone(), *size));
        }
    });
    let a = sizes.iter().find(|(t, _)| t == "a").unwrap().1;
    let b = sizes.iter().find(|(t, _)| t == "b").unwrap().1;
    assert_eq!(a, 20.0);
    assert_eq!(b, 10.0);
}

#[test]
fn placeholders_survive_into_the_tree() {
    let outcome = parse(r"\nope + x");
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(outcome.list.atoms[0].body, AtomBody::Placeholder));
    assert_eq!(outcome.list.len(), 3);
}

proptest! {
    // Parsing and layout are total: no input panics, and the box tree
    // never reports negative extents.
    #[test]
    fn arbitrary_input_never_panics(input in "[ -~]{0,60}") {
        let outcome = typeset(&input, &LayoutOptions::default(), &UniformMetrics);
        let mut extents_ok = true;
        outcome.root.walk(&mut |_, node| {
            if node.height < 0.0 || node.depth < 0.0 {
                extents_ok = false;
            }
        });
        prop_assert!(extents_ok);
    }

    #[test]
    fn parse_errors_come_back_ordered(input in "[a-z{}^_&\\\\]{0,40}") {
        let outcome = parse(&input);
        let positions: Vec<_> = outcome
            .errors
            .iter()
            .filter_map(|e| e.position)
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }

    #[test]
    fn parsing_is_deterministic(input in "[ -~]{0,60}") {
        prop_assert_eq!(parse(&input).list, parse(&input).list);
    }

    #[test]
    fn wider_content_never_shrinks_a_fraction(a in "[a-z]{1,6}", b in "[a-z]{1,3}") {
        let wide = typeset(&format!(r"\frac{{{a}{a}}}{{{b}}}"), &LayoutOptions::default(), &UniformMetrics);
        let narrow = typeset(&format!(r"\frac{{{a}}}{{{b}}}"), &LayoutOptions::default(), &UniformMetrics);
        prop_assert!(wide.root.width >= narrow.root.width);
    }
}
