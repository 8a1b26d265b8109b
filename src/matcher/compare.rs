//! Pairwise token equivalence under the current parameter set.

use crate::lexer::{Token, TokenKind};
use crate::params::Parameters;
use crate::unicode::{self, CompareFlags};

/// A set of spellings that compare equal while `option` is enabled.
struct AlternativeSpelling {
    option: fn(&Parameters) -> bool,
    spellings: &'static [&'static str],
}

static ALTERNATIVE_SPELLINGS: &[AlternativeSpelling] = &[
    AlternativeSpelling {
        option: |p| p.match_ifs_and_conditional,
        spellings: &["if", "?"],
    },
    AlternativeSpelling {
        option: |p| p.match_class_struct_typename,
        spellings: &["class", "struct", "typename"],
    },
    AlternativeSpelling {
        option: |p| p.match_float_and_double_decl,
        spellings: &["float", "double"],
    },
];

/// Spellings that only apply where the normalizer armed a token for them
/// (a `:` belonging to a conditional may read as `else`).
static ALTERNATIVE_SPELLINGS_OPTIONAL: &[AlternativeSpelling] = &[AlternativeSpelling {
    option: |p| p.match_ifs_and_conditional,
    spellings: &["else", ":"],
}];

/// Decide whether haystack token `a` is equivalent to needle token `b`.
///
/// `first`/`last` receive partial-match offsets into `a`'s value: the
/// start offset of the hit and the trailing length beyond it. They are
/// only supplied for the needle's first and last token; without them the
/// values must match as a whole.
pub fn tokens_equivalent(
    params: &Parameters,
    a: &Token,
    b: &Token,
    mut first: Option<&mut u32>,
    mut last: Option<&mut u32>,
) -> bool {
    // numeric equality is blind to the literal's spelling
    if params.numbers && a.kind == TokenKind::Numeric && b.kind == TokenKind::Numeric {
        let values_equal = a.integer == b.integer && a.decimal == b.decimal;
        if params.match_floats_and_integers {
            if values_equal {
                return true;
            }
        } else if values_equal && a.is_decimal == b.is_decimal {
            return true;
        }
    }

    if a.kind == TokenKind::Code || b.kind == TokenKind::Code {
        // fast path for language symbols
        if a.kind == TokenKind::Code && b.kind == TokenKind::Code && a.value == b.value {
            return true;
        }
    } else {
        if params.orthogonal {
            // strings and comments must match in kind; numerics and
            // identifiers are interchangeable with each other
            match b.kind {
                TokenKind::Numeric | TokenKind::Identifier => {
                    if !matches!(a.kind, TokenKind::Numeric | TokenKind::Identifier) {
                        return false;
                    }
                }
                TokenKind::String | TokenKind::Comment => {
                    if a.kind != b.kind {
                        return false;
                    }
                }
                TokenKind::Code => {}
            }
        } else {
            // a plain query matches anywhere; an explicitly quoted or
            // commented query matches only its own kind
            match b.kind {
                TokenKind::String | TokenKind::Comment => {
                    if a.kind != b.kind {
                        return false;
                    }
                }
                _ => {}
            }
        }

        let flags = assemble_flags(params, a.kind, b.kind);

        if compare_values(
            params,
            flags,
            &a.value,
            &b.value,
            first.as_deref_mut(),
            last.as_deref_mut(),
        ) {
            return true;
        }

        let has_a = !a.alternative.is_empty();
        let has_b = !b.alternative.is_empty();
        if has_b
            && compare_values(
                params,
                flags,
                &a.value,
                &b.alternative,
                first.as_deref_mut(),
                last.as_deref_mut(),
            )
        {
            return true;
        }
        if has_a
            && compare_values(
                params,
                flags,
                &a.alternative,
                &b.value,
                first.as_deref_mut(),
                last.as_deref_mut(),
            )
        {
            return true;
        }
        if has_a
            && has_b
            && compare_values(
                params,
                flags,
                &a.alternative,
                &b.alternative,
                first.as_deref_mut(),
                last.as_deref_mut(),
            )
        {
            return true;
        }
    }

    for row in ALTERNATIVE_SPELLINGS {
        if (row.option)(params)
            && row.spellings.contains(&a.value.as_str())
            && row.spellings.contains(&b.value.as_str())
        {
            return true;
        }
    }
    if a.opt_alt_spelling_allowed || b.opt_alt_spelling_allowed {
        for row in ALTERNATIVE_SPELLINGS_OPTIONAL {
            if (row.option)(params)
                && row.spellings.contains(&a.value.as_str())
                && row.spellings.contains(&b.value.as_str())
            {
                return true;
            }
        }
    }

    false
}

/// Case/diacritic sensitivity for this comparison, contributed by every
/// token kind taking part.
fn assemble_flags(params: &Parameters, a: TokenKind, b: TokenKind) -> CompareFlags {
    let mut flags = CompareFlags::default();
    let either = |kind: TokenKind| a == kind || b == kind;

    if either(TokenKind::Numeric) && params.case_insensitive_numbers {
        flags.ignore_case = true;
    }
    if either(TokenKind::String) {
        if params.case_insensitive_strings {
            flags.ignore_case = true;
        }
        if params.fold_and_ignore_diacritics_strings {
            flags.ignore_diacritics = true;
        }
    }
    if either(TokenKind::Comment) {
        if params.case_insensitive_comments {
            flags.ignore_case = true;
        }
        if params.fold_and_ignore_diacritics_comments {
            flags.ignore_diacritics = true;
        }
    }
    if either(TokenKind::Identifier) {
        if params.case_insensitive_identifiers {
            flags.ignore_case = true;
        }
        if params.fold_and_ignore_diacritics_identifiers {
            flags.ignore_diacritics = true;
        }
    }

    flags
}

/// Value comparison honoring the matching-shape options. `whole_words`
/// takes precedence over `individual_partial_words`; the default reports
/// partial-match offsets when the caller asked for them and otherwise
/// requires whole-value equality.
fn compare_values(
    params: &Parameters,
    flags: CompareFlags,
    a: &str,
    b: &str,
    first: Option<&mut u32>,
    last: Option<&mut u32>,
) -> bool {
    if params.whole_words {
        return unicode::equal_values(flags, a, b);
    }
    if params.individual_partial_words {
        return unicode::find_value(flags, a, b).is_some();
    }

    if first.is_some() || last.is_some() {
        match unicode::find_value(flags, a, b) {
            Some((offset, length)) => {
                if let Some(first) = first {
                    *first = offset;
                }
                if let Some(last) = last {
                    *last = a.chars().count() as u32 - length - offset;
                }
                true
            }
            None => false,
        }
    } else {
        unicode::equal_values(flags, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::normalizer;

    fn tokens_with(params: &Parameters, text: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(*params);
        let mut pattern = vec![];
        lexer.process_text(text, &mut pattern);
        normalizer::normalize_query(params, &mut pattern);
        pattern
    }

    fn single(params: &Parameters, text: &str) -> Token {
        let mut pattern = tokens_with(params, text);
        assert_eq!(1, pattern.len(), "expected one token for {text:?}");
        pattern.remove(0)
    }

    fn equivalent(params: &Parameters, a: &str, b: &str) -> bool {
        let a = single(params, a);
        let b = single(params, b);
        tokens_equivalent(params, &a, &b, None, None)
    }

    #[test]
    fn test_numeric_radix_equivalence() {
        let params = Parameters::default();

        assert!(equivalent(&params, "0x1F", "31"));
        assert!(equivalent(&params, "0b11111", "037"));
        assert!(!equivalent(&params, "30", "31"));
    }

    #[test]
    fn test_float_and_integer_equivalence_is_optional() {
        let mut params = Parameters::default();
        assert!(equivalent(&params, "2", "2.0"));

        params.match_floats_and_integers = false;
        assert!(!equivalent(&params, "2", "2.0"));
        assert!(equivalent(&params, "2.0", "2.000"));
    }

    #[test]
    fn test_numbers_off_falls_back_to_text() {
        let params = Parameters {
            numbers: false,
            ..Parameters::default()
        };

        assert!(!equivalent(&params, "0x1F", "31"));
        assert!(equivalent(&params, "31", "31"));
    }

    #[test]
    fn test_code_tokens_compare_by_value_only() {
        let params = Parameters::default();

        assert!(equivalent(&params, "::", "::"));
        assert!(!equivalent(&params, "::", "->"));
    }

    #[test]
    fn test_identifier_case_folding() {
        let mut params = Parameters::default();
        assert!(equivalent(&params, "FooBar", "foobar"));

        params.case_insensitive_identifiers = false;
        assert!(!equivalent(&params, "FooBar", "foobar"));
    }

    #[test]
    fn test_snake_and_camel_casing_match() {
        let params = Parameters::default();

        assert!(equivalent(&params, "foo_bar_baz", "fooBarBaz"));
        assert!(equivalent(&params, "fooBarBaz", "foo_bar_baz"));
    }

    #[test]
    fn test_alternative_spellings() {
        let params = Parameters::default();

        assert!(equivalent(&params, "class", "struct"));
        assert!(equivalent(&params, "struct", "typename"));
        assert!(equivalent(&params, "float", "double"));
        assert!(equivalent(&params, "if", "?"));
        assert!(!equivalent(&params, "class", "float"));

        let params = Parameters {
            match_class_struct_typename: false,
            ..params
        };
        assert!(!equivalent(&params, "class", "struct"));
    }

    #[test]
    fn test_optional_else_spelling_requires_arming() {
        let params = Parameters::default();

        // a bare ':' was never armed by a preceding '?'
        assert!(!equivalent(&params, ":", "else"));

        let haystack = tokens_with(&params, "a ? b : c");
        let colon = haystack.iter().find(|t| t.value == ":").unwrap();
        let else_token = single(&params, "else");
        assert!(tokens_equivalent(&params, colon, &else_token, None, None));
    }

    #[test]
    fn test_explicit_string_query_matches_only_strings() {
        let params = Parameters::default();
        let in_string = single(&params, "\"hello\"");
        let plain = single(&params, "hello");

        // plain needle matches into strings, quoted needle not into plain code
        assert!(tokens_equivalent(&params, &in_string, &plain, None, None));
        assert!(!tokens_equivalent(&params, &plain, &in_string, None, None));
    }

    #[test]
    fn test_orthogonal_mixes_identifiers_and_numbers_only() {
        let params = Parameters {
            orthogonal: true,
            numbers: false,
            case_insensitive_identifiers: true,
            ..Parameters::default()
        };
        let number = single(&params, "42");
        let ident = single(&params, "x42");
        let comment_tokens = tokens_with(&params, "// x42");
        let comment = comment_tokens.last().unwrap();

        // identifier needle may land on a numeric token (and vice versa)
        assert!(!tokens_equivalent(&params, &number, &ident, None, None));
        assert!(tokens_equivalent(
            &params,
            &ident,
            &single(&params, "X42"),
            None,
            None
        ));
        // but never on a comment
        assert!(!tokens_equivalent(&params, comment, &ident, None, None));
    }

    #[test]
    fn test_partial_offsets_into_first_and_last_token() {
        let params = Parameters::default();
        let haystack = single(&params, "prefixNeedleSuffix");
        let needle = single(&params, "needle");

        let mut first = 0;
        let mut last = 0;
        assert!(tokens_equivalent(
            &params,
            &haystack,
            &needle,
            Some(&mut first),
            Some(&mut last)
        ));
        assert_eq!(6, first);
        assert_eq!(6, last);
    }

    #[test]
    fn test_interior_tokens_need_whole_equality() {
        let params = Parameters::default();
        let haystack = single(&params, "prefixNeedleSuffix");
        let needle = single(&params, "needle");

        assert!(!tokens_equivalent(&params, &haystack, &needle, None, None));
    }

    #[test]
    fn test_whole_words_beats_partial_matching() {
        let params = Parameters {
            whole_words: true,
            ..Parameters::default()
        };
        let haystack = single(&params, "prefixNeedleSuffix");
        let needle = single(&params, "needle");

        let mut first = 0;
        assert!(!tokens_equivalent(
            &params,
            &haystack,
            &needle,
            Some(&mut first),
            None
        ));
    }

    #[test]
    fn test_individual_partial_words_match_anywhere() {
        let params = Parameters {
            individual_partial_words: true,
            ..Parameters::default()
        };
        let haystack = single(&params, "prefixNeedleSuffix");
        let needle = single(&params, "needle");

        // matches even without offset out-params
        assert!(tokens_equivalent(&params, &haystack, &needle, None, None));
    }

    #[test]
    fn test_diacritics_fold_in_strings() {
        let params = Parameters::default();
        let haystack = single(&params, "\"café\"");
        let needle = single(&params, "\"CAFE\"");

        assert!(tokens_equivalent(&params, &haystack, &needle, None, None));
    }
}
