//! Unicode folding and comparison primitives.
//!
//! Lex-time folding is compatibility decomposition: ligatures expand,
//! CJK compatibility forms and alternative digit shapes collapse onto
//! their plain counterparts. Case and diacritics survive folding; whether
//! they matter is decided per comparison via [`CompareFlags`].

use unicode_normalization::char::{decompose_canonical, is_combining_mark};
use unicode_normalization::UnicodeNormalization;

/// Per-comparison sensitivity, assembled from the parameter set for the
/// token kinds taking part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareFlags {
    pub ignore_case: bool,
    pub ignore_diacritics: bool,
}

/// Compatibility-fold `value` (NFKD).
pub fn fold(value: &str) -> String {
    value.nfkd().collect()
}

fn key_char(c: char, flags: CompareFlags, out: &mut Vec<char>) {
    if flags.ignore_diacritics {
        decompose_canonical(c, |decomposed| {
            if !is_combining_mark(decomposed) {
                if flags.ignore_case {
                    out.extend(decomposed.to_lowercase());
                } else {
                    out.push(decomposed);
                }
            }
        });
    } else if flags.ignore_case {
        out.extend(c.to_lowercase());
    } else {
        out.push(c);
    }
}

/// Comparison key of `value`: every key char remembers the index of the
/// source char it came from, so substring finds can report source offsets.
fn comparison_key(value: &str, flags: CompareFlags) -> Vec<(char, u32)> {
    let mut key = Vec::with_capacity(value.len());
    let mut scratch = Vec::new();

    for (i, c) in value.chars().enumerate() {
        scratch.clear();
        key_char(c, flags, &mut scratch);
        key.extend(scratch.iter().map(|&k| (k, i as u32)));
    }

    key
}

/// Whole-value equality under `flags`.
pub fn equal_values(flags: CompareFlags, a: &str, b: &str) -> bool {
    let ka = comparison_key(a, flags);
    let kb = comparison_key(b, flags);

    ka.len() == kb.len() && ka.iter().zip(kb.iter()).all(|(x, y)| x.0 == y.0)
}

/// Find `b` inside `a` under `flags`. Returns offset and length of the hit
/// in chars of `a`, or `None` (an empty `b` never matches).
pub fn find_value(flags: CompareFlags, a: &str, b: &str) -> Option<(u32, u32)> {
    let ka = comparison_key(a, flags);
    let kb: Vec<char> = comparison_key(b, flags).into_iter().map(|(c, _)| c).collect();

    if kb.is_empty() || ka.len() < kb.len() {
        return None;
    }

    for start in 0..=(ka.len() - kb.len()) {
        let window = &ka[start..start + kb.len()];
        if window.iter().map(|&(c, _)| c).eq(kb.iter().copied()) {
            let offset = window[0].1;
            let end = window[window.len() - 1].1 + 1;
            return Some((offset, end - offset));
        }
    }

    None
}
