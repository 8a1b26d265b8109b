//! Properties that hold for the session API across option settings.

use codesift::{Location, Parameters, Searcher};

const SAMPLE: &[&str] = &[
    "#include <vector>",
    "",
    "class Widget : public Base {",
    "    // the main entry_point",
    "    int run(unsigned long count) {",
    "        auto label = L\"&Start\";",
    "        return count ? 0x1F : 31;",
    "    }",
    "};",
];

/// Every folding/equivalence option off, kinds must line up.
fn strict_parameters() -> Parameters {
    Parameters {
        orthogonal: true,
        case_insensitive_numbers: false,
        case_insensitive_strings: false,
        case_insensitive_comments: false,
        case_insensitive_identifiers: false,
        fold_and_ignore_diacritics_strings: false,
        fold_and_ignore_diacritics_comments: false,
        fold_and_ignore_diacritics_identifiers: false,
        digraphs: false,
        trigraphs: false,
        iso646: false,
        nullptr_is_0: false,
        boolean_is_integer: false,
        numbers: false,
        match_floats_and_integers: false,
        unescape: false,
        ignore_accelerator_hints_in_strings: false,
        undecorate_comments: false,
        match_snake_and_camel_casing: false,
        match_ifs_and_conditional: false,
        match_class_struct_typename: false,
        match_any_inheritance_type: false,
        match_any_integer_decl_style: false,
        match_float_and_double_decl: false,
        ..Parameters::default()
    }
}

#[test]
fn test_token_locations_are_nondecreasing() {
    let mut searcher = Searcher::new();
    searcher.load(SAMPLE);

    let locations: Vec<Location> = searcher.tokens().iter().map(|t| t.location).collect();
    assert!(!locations.is_empty());
    assert!(locations.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_clear_then_load_matches_fresh_session() {
    let mut reused = Searcher::new();
    reused.load(["completely different /* content"]);
    reused.clear();
    reused.load(SAMPLE);

    let mut fresh = Searcher::new();
    fresh.load(SAMPLE);

    assert_eq!(fresh.tokens(), reused.tokens());
}

#[test]
fn test_empty_needle_and_empty_haystack_yield_nothing() {
    let mut searcher = Searcher::new();
    searcher.load(SAMPLE);
    assert_eq!(0, searcher.find("", |_, _, _, _| panic!("no callbacks")));

    let empty = Searcher::new();
    assert_eq!(0, empty.find("widget", |_, _, _, _| panic!("no callbacks")));
}

#[test]
fn test_count_equals_number_of_callbacks() {
    let mut searcher = Searcher::new();
    searcher.load(SAMPLE);

    let mut calls = 0;
    let count = searcher.find("count", |_, _, _, _| {
        calls += 1;
        true
    });

    assert!(count > 0);
    assert_eq!(calls, count);
}

#[test]
fn test_callback_index_counts_from_zero() {
    let mut searcher = Searcher::new();
    searcher.load(["a; a; a;"]);

    let mut expected = 0;
    searcher.find("a", |needle, index, _, _| {
        assert_eq!("a", needle);
        assert_eq!(expected, index);
        expected += 1;
        true
    });
    assert_eq!(3, expected);
}

#[test]
fn test_reported_ranges_are_ordered() {
    let mut searcher = Searcher::new();
    searcher.load(SAMPLE);

    for needle in ["count", "public Base", "0x1F", "class Widget : Base"] {
        searcher.find(needle, |_, _, begin, end| {
            assert!(begin <= end, "range for {needle:?}");
            true
        });
    }
}

#[test]
fn test_strict_self_search_finds_the_whole_input() {
    let line = "int foo(char c) { return c + 1; }";

    let mut searcher = Searcher::with_parameters(strict_parameters());
    searcher.load([line]);

    let mut ranges = vec![];
    let count = searcher.find(line, |_, _, begin, end| {
        ranges.push((begin, end));
        true
    });

    assert_eq!(1, count);
    assert_eq!(Location::new(0, 0), ranges[0].0);
    assert_eq!(Location::new(0, line.len() as u32), ranges[0].1);
}

#[test]
fn test_numeric_literals_compare_across_radixes() {
    let mut searcher = Searcher::new();
    searcher.load(["0x1F 31 037 0b11111"]);

    assert_eq!(4, searcher.find("31", |_, _, _, _| true));
}

#[test]
fn test_snake_and_camel_identifiers_are_equivalent() {
    let mut searcher = Searcher::new();
    searcher.load(["foo_bar_baz();"]);
    assert_eq!(1, searcher.find("fooBarBaz", |_, _, _, _| true));

    let mut searcher = Searcher::new();
    searcher.load(["fooBarBaz();"]);
    assert_eq!(1, searcher.find("foo_bar_baz", |_, _, _, _| true));
}

#[test]
fn test_abort_keeps_already_reported_match_in_count() {
    let mut searcher = Searcher::new();
    searcher.load(["x x x x"]);

    let count = searcher.find("x", |_, index, _, _| index < 1);
    assert_eq!(2, count);
}
