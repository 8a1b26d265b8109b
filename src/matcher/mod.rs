//! Linear sub-sequence search over the haystack token vector.

mod compare;

pub use compare::tokens_equivalent;

use crate::lexer::{Location, Token};
use crate::params::Parameters;

/// After the needle consumed `prefix`, haystack tokens from `optional` may
/// be skipped without consuming needle tokens.
struct IgnoredPattern {
    option: fn(&Parameters) -> bool,
    prefix: &'static str,
    optional: &'static [&'static str],
}

static IGNORED_PATTERNS: &[IgnoredPattern] = &[
    IgnoredPattern {
        option: |p| p.match_any_inheritance_type,
        prefix: ":",
        optional: &["virtual", "public", "protected", "private"],
    },
    IgnoredPattern {
        option: |p| p.match_any_integer_decl_style,
        prefix: "long",
        optional: &["int", "unsigned", "long"],
    },
    IgnoredPattern {
        option: |p| p.match_any_integer_decl_style,
        prefix: "short",
        optional: &["int", "unsigned"],
    },
    IgnoredPattern {
        option: |p| p.match_any_integer_decl_style,
        prefix: "signed",
        optional: &["char", "short", "int", "long"],
    },
    IgnoredPattern {
        option: |p| p.match_any_integer_decl_style,
        prefix: "unsigned",
        optional: &["char", "short", "int", "long"],
    },
];

/// Scan `haystack` for every contiguous token run equivalent to `needle`,
/// invoking `found(needle_text, index, begin, end)` per hit. A `false`
/// return aborts the scan; the already-incremented count is returned
/// either way.
pub fn find_in_tokens<F>(
    params: &Parameters,
    haystack: &[Token],
    needle: &[Token],
    needle_text: &str,
    found: &mut F,
) -> usize
where
    F: FnMut(&str, usize, Location, Location) -> bool,
{
    if haystack.is_empty() || needle.is_empty() {
        return 0;
    }

    let mut n = 0;
    let mut start = 0;

    loop {
        // partial-match offsets into the first and last matched token
        let mut fx = 0u32;
        let mut lx = 0u32;

        let mut i = start;
        let mut s = 0;

        let mut ignore: Option<&'static [&'static str]> = None;
        let mut ignore_skip_prefix = false;

        loop {
            if s == needle.len() {
                let first = &haystack[start];
                let last = &haystack[i - 1];
                let begin = Location::new(first.location.row, first.location.column + fx);
                let end = Location::new(
                    last.location.row,
                    last.location.column + last.length - lx,
                );

                n += 1;
                if found(needle_text, n - 1, begin, end) {
                    start += needle.len() - 1;
                    break;
                }
                return n;
            }

            // needle left over but haystack exhausted, nothing further can match
            if i == haystack.len() {
                return n;
            }

            for pattern in IGNORED_PATTERNS {
                if (pattern.option)(params) && needle[s].value == pattern.prefix {
                    ignore = Some(pattern.optional);
                    ignore_skip_prefix = true;
                    break;
                }
            }
            let mut skip = false;
            if let Some(optional) = ignore {
                if ignore_skip_prefix {
                    // the prefix itself must match normally
                    ignore_skip_prefix = false;
                } else if optional.contains(&haystack[i].value.as_str()) {
                    skip = true;
                } else {
                    ignore = None;
                }
            }

            let first = (s == 0).then_some(&mut fx);
            let last = (s == needle.len() - 1).then_some(&mut lx);
            if tokens_equivalent(params, &haystack[i], &needle[s], first, last) {
                i += 1;
                s += 1;
            } else if skip {
                i += 1;
            } else {
                break;
            }
        }

        start += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::normalizer;

    fn haystack(params: &Parameters, text: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(*params);
        let mut pattern = vec![];
        lexer.process_text(text, &mut pattern);
        normalizer::normalize_full(params, &mut pattern);
        pattern
    }

    fn needle(params: &Parameters, text: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(*params);
        let mut pattern = vec![];
        lexer.process_text(text, &mut pattern);
        normalizer::normalize_query(params, &mut pattern);
        pattern
    }

    fn matches(params: &Parameters, h: &str, n: &str) -> Vec<(Location, Location)> {
        let mut results = vec![];
        find_in_tokens(
            params,
            &haystack(params, h),
            &needle(params, n),
            n,
            &mut |_, _, begin, end| {
                results.push((begin, end));
                true
            },
        );
        results
    }

    #[test]
    fn test_find_simple_subsequence() {
        let params = Parameters::default();
        let found = matches(&params, "a = b + c; d = b + c;", "b + c");

        assert_eq!(2, found.len());
        assert_eq!(Location::new(0, 4), found[0].0);
        assert_eq!(Location::new(0, 9), found[0].1);
    }

    #[test]
    fn test_find_empty_inputs() {
        let params = Parameters::default();

        assert!(matches(&params, "", "x").is_empty());
        assert!(matches(&params, "x", "").is_empty());
    }

    #[test]
    fn test_find_abort_counts_last_match() {
        let params = Parameters::default();
        let h = haystack(&params, "x; x; x;");
        let n = needle(&params, "x");

        let mut calls = 0;
        let count = find_in_tokens(&params, &h, &n, "x", &mut |_, _, _, _| {
            calls += 1;
            calls < 2
        });

        assert_eq!(2, calls);
        assert_eq!(2, count);
    }

    #[test]
    fn test_find_restarts_past_reported_match() {
        let params = Parameters::default();
        // overlapping needle occurrences collapse to non-overlapping hits
        let found = matches(&params, "a a a a", "a a");

        assert_eq!(2, found.len());
    }

    #[test]
    fn test_inheritance_access_specifier_is_skipped() {
        let params = Parameters::default();
        let found = matches(&params, "class Foo : public Bar {};", "class Foo : Bar {}");

        assert_eq!(1, found.len());
        assert_eq!(Location::new(0, 0), found[0].0);
        // ends after '}', before ';'
        assert_eq!(Location::new(0, 25), found[0].1);
    }

    #[test]
    fn test_integer_decl_style_skips_width_words() {
        let params = Parameters::default();
        let found = matches(&params, "unsigned long int n = 42;", "long n = 42 ;");

        // the prefix token itself must match, so the hit starts at `long`
        assert_eq!(1, found.len());
        assert_eq!(Location::new(0, 9), found[0].0);
        assert_eq!(Location::new(0, 25), found[0].1);
    }

    #[test]
    fn test_skip_mode_ends_at_first_required_token() {
        let params = Parameters::default();
        // `virtual` may not be skipped once a non-optional token appeared
        let found = matches(&params, "a : x virtual b", ": b");

        assert!(found.is_empty());
    }

    #[test]
    fn test_partial_first_and_last_token() {
        let params = Parameters::default();
        let found = matches(&params, "getFooBar();", "foo");

        assert_eq!(1, found.len());
        // inside `getFooBar`, chars 3..6
        assert_eq!(Location::new(0, 3), found[0].0);
        assert_eq!(Location::new(0, 6), found[0].1);
    }
}
