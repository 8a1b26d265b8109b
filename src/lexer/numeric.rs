//! Parsing of integer and floating point literals.
//!
//! The accepted grammar follows C-family source: radix prefixes (`0x`,
//! `0b`, leading `0` for octal), `'` digit separators, fractional parts,
//! `e`/`p` exponents and the integer/float suffixes. Parsing is total:
//! it consumes as much of the literal as it can and reports how far it
//! got; overflow wraps in the accumulator.

/// Accumulated state while scanning a single literal.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct NumericParse {
    pub radix: u32,
    pub integer: u64,
    pub decimal: f64,
    pub real: bool,
}

impl Default for NumericParse {
    fn default() -> Self {
        Self {
            radix: 10,
            integer: 0,
            decimal: 0.0,
            real: false,
        }
    }
}

/// Scan one numeric literal at the start of `line`. Returns the consumed
/// length (in chars) and the parsed value.
pub(super) fn parse(line: &[char]) -> (usize, NumericParse) {
    let mut state = NumericParse::default();

    let mut i = integer_part(line, &mut state);
    if i < line.len() && state.real {
        i += decimal_part(&line[i..], &mut state);
    }
    if i < line.len() {
        i += suffix(&line[i..], &state);
    }

    (i, state)
}

/// Radix detection plus the integer digits. Stops (setting `real`) at the
/// first character that starts a fractional part or exponent.
fn integer_part(line: &[char], state: &mut NumericParse) -> usize {
    let mut i = 0;

    if line.len() > 1 && line[0] == '0' {
        match line[1] {
            'x' | 'X' => {
                state.radix = 16;
                i = 2;
            }
            'b' | 'B' => {
                state.radix = 2;
                i = 2;
            }
            _ => {
                state.radix = 8;
                i = 1;
            }
        }
    }

    while i < line.len() {
        match line[i] {
            '\'' => {}
            '.' if state.radix == 10 || state.radix == 16 => {
                state.real = true;
                return i;
            }
            'e' | 'E' if state.radix == 10 => {
                state.real = true;
                return i;
            }
            'p' | 'P' if state.radix == 16 => {
                state.real = true;
                return i;
            }
            c => match c.to_digit(state.radix) {
                Some(digit) => {
                    state.integer = state
                        .integer
                        .wrapping_mul(state.radix as u64)
                        .wrapping_add(digit as u64);
                }
                None => return i,
            },
        }
        i += 1;
    }

    i
}

/// Fractional digits (the k-th digit weighs `1/radix^k`), then an optional
/// exponent. Called at the character that stopped the integer part.
fn decimal_part(line: &[char], state: &mut NumericParse) -> usize {
    if line[0] != '.' {
        return exponent(line, state);
    }

    let mut multiplier = 1.0;
    let mut i = 1;
    while i < line.len() {
        match line[i] {
            '\'' => {}
            c => match c.to_digit(state.radix) {
                Some(digit) => {
                    multiplier /= state.radix as f64;
                    state.decimal += multiplier * digit as f64;
                }
                None => return i + exponent(&line[i..], state),
            },
        }
        i += 1;
    }

    i
}

/// `e`/`E` scales by powers of 10, `p`/`P` by powers of 2. Applying the
/// exponent redistributes the value over the integer and fractional parts.
fn exponent(line: &[char], state: &mut NumericParse) -> usize {
    if line.len() < 2 || !matches!(line[0], 'p' | 'P' | 'e' | 'E') {
        return 0;
    }

    let mut i = 1;
    let mut negative = false;
    match line[i] {
        '-' => {
            negative = true;
            i += 1;
        }
        '+' => {
            i += 1;
        }
        _ => {}
    }
    if i == line.len() {
        return 0;
    }

    let mut exponent: i32 = 0;
    while i < line.len() {
        match line[i] {
            '\'' => {}
            c => match c.to_digit(10) {
                Some(digit) => {
                    exponent = exponent.wrapping_mul(10).wrapping_add(digit as i32);
                }
                None => break,
            },
        }
        i += 1;
    }
    if negative {
        exponent = -exponent;
    }

    state.decimal += state.integer as f64;
    let base: f64 = if matches!(line[0], 'p' | 'P') { 2.0 } else { 10.0 };
    state.decimal *= base.powi(exponent);
    state.integer = state.decimal as u64;
    state.decimal -= state.integer as f64;

    i
}

/// Suffix automaton: `{u|U}{l|L|ll|LL|z|Z}?`, `{l|L|ll|LL}{u|U}?` or
/// `{z|Z}{u|U}?` after integers, a single `f|F|l|L` after floats.
fn suffix(line: &[char], state: &NumericParse) -> usize {
    let at = |i: usize| line.get(i).copied().unwrap_or('\0');

    if line.is_empty() {
        return 0;
    }
    if state.real {
        return match line[0] {
            'f' | 'F' | 'l' | 'L' => 1,
            _ => 0,
        };
    }

    match line[0] {
        'u' | 'U' => match at(1) {
            'l' | 'L' => match at(2) {
                'l' | 'L' => 3,
                _ => 2,
            },
            'z' | 'Z' => 2,
            _ => 1,
        },
        'l' | 'L' => match at(1) {
            'l' | 'L' => match at(2) {
                'u' | 'U' => 3,
                _ => 2,
            },
            'u' | 'U' => 2,
            _ => 1,
        },
        'z' | 'Z' => match at(1) {
            'u' | 'U' => 2,
            _ => 1,
        },
        _ => 0,
    }
}
