//! Token-stream rewrites applied after lexing.
//!
//! These passes enable the style-agnostic matches the comparator alone
//! cannot see: conditional `:` tokens learn they may equate to `else`,
//! accelerator markers disappear from strings, and snake_case tokens get a
//! camelCase alternative spelling.

use crate::lexer::{Token, TokenKind};
use crate::params::Parameters;

/// Normalization for a freshly lexed query (needle).
pub fn normalize_query(params: &Parameters, tokens: &mut [Token]) {
    mark_conditional_colons(params, tokens);
    strip_accelerator_hints(params, tokens);
    build_camel_case_alternatives(params, tokens);
}

/// Normalization for loaded source text. Runs the query passes; the extra
/// haystack-only transformations are not implemented yet.
pub fn normalize_full(params: &Parameters, tokens: &mut [Token]) {
    normalize_query(params, tokens);

    // TODO: unescape string escapes (\n, \x.., \u....) when params.unescape
    // TODO: rewrite casts, `xxx_cast<A>(B)` vs `(A) B`
}

/// Each `?` arms one later `:` as a possible `else` spelling. Marks are
/// recomputed from scratch so the pass can run repeatedly.
fn mark_conditional_colons(params: &Parameters, tokens: &mut [Token]) {
    for token in tokens.iter_mut() {
        token.opt_alt_spelling_allowed = false;
    }
    if !params.match_ifs_and_conditional {
        return;
    }

    let mut open = 0u32;
    for token in tokens.iter_mut() {
        if token.value == "?" {
            open += 1;
        } else if open > 0 && token.value == ":" {
            token.opt_alt_spelling_allowed = true;
            open -= 1;
        }
    }
}

/// Remove menu-accelerator markers from string tokens: `&&` collapses to a
/// single `&`, a lone `&` disappears. Guarded per token, the rewrite is
/// destructive and must not run twice.
fn strip_accelerator_hints(params: &Parameters, tokens: &mut [Token]) {
    if !params.ignore_accelerator_hints_in_strings {
        return;
    }

    for token in tokens.iter_mut() {
        if token.kind != TokenKind::String || token.accelerators_stripped {
            continue;
        }
        token.accelerators_stripped = true;

        let mut chars: Vec<char> = token.value.chars().collect();
        let mut from = 0;
        while let Some(i) = chars[from..].iter().position(|&c| c == '&').map(|p| p + from) {
            let doubled = i + 1 < chars.len() && chars[i + 1] == '&';
            chars.remove(i);
            from = if doubled { i + 2 } else { i + 1 };
            if from > chars.len() {
                break;
            }
        }
        token.value = chars.into_iter().collect();
    }
}

/// For tokens with underscores between words, record the camelCase form as
/// the alternative spelling. Leading and trailing underscores survive.
fn build_camel_case_alternatives(params: &Parameters, tokens: &mut [Token]) {
    if !params.match_snake_and_camel_casing {
        return;
    }

    for token in tokens.iter_mut() {
        match token.kind {
            TokenKind::Identifier | TokenKind::Comment | TokenKind::String => {
                token.alternative = camel_case_alternative(&token.value).unwrap_or_default();
            }
            _ => {}
        }
    }
}

fn camel_case_alternative(value: &str) -> Option<String> {
    let chars: Vec<char> = value.chars().collect();

    let leading = chars.iter().position(|&c| c != '_')?;
    let trailing = chars.len() - 1 - chars.iter().rposition(|&c| c != '_').unwrap();
    let core = &chars[leading..chars.len() - trailing];

    let underscores = core
        .windows(2)
        .filter(|w| w[0] == '_' && w[1].is_alphabetic())
        .count();
    if underscores == 0 {
        return None;
    }

    let mut alternative = String::with_capacity(chars.len() - underscores);
    alternative.extend(std::iter::repeat('_').take(leading));
    let mut i = 0;
    while i < core.len() {
        if i + 1 < core.len() && core[i] == '_' && core[i + 1].is_alphabetic() {
            alternative.extend(core[i + 1].to_uppercase());
            i += 2;
        } else {
            alternative.push(core[i]);
            i += 1;
        }
    }
    alternative.extend(std::iter::repeat('_').take(trailing));

    Some(alternative)
}
