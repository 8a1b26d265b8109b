//! Line-oriented tokenizer for C-family source text.
//!
//! The lexer consumes one line at a time and keeps mode state (code,
//! string, comment) across lines, so multi-line constructs survive
//! incremental feeding. It never fails: malformed input degrades to
//! best-effort tokens and unterminated constructs simply carry their mode
//! into the next line.

mod lexmap;
mod numeric;
mod token;

pub use token::*;

use once_cell::sync::Lazy;

use crate::params::Parameters;
use crate::unicode;
use lexmap::LexMap;

/// Whitespace the lexer skips; skipped characters still advance the column.
const WHITESPACE: &[char] = &[
    ' ', '\t', '\n', '\r', '\x0B', '\x0C', '\0', '\u{1680}', '\u{180E}', '\u{2000}', '\u{2001}',
    '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}',
    '\u{2009}', '\u{200A}', '\u{200B}', '\u{202F}', '\u{205F}', '\u{2060}', '\u{3000}',
    '\u{FEFF}', '\u{FFFD}',
];

macro_rules! operator {
    ($map:ident, $spelling:expr) => {
        $map.insert($spelling, $spelling);
    };
}

static MULTI_CHAR_OPERATORS: Lazy<LexMap> = Lazy::new(|| {
    let mut m = LexMap::default();

    operator!(m, "::");
    operator!(m, "...");
    operator!(m, "->*");
    operator!(m, "->");
    operator!(m, ".*");
    operator!(m, "==");
    operator!(m, "!=");
    operator!(m, "<=");
    operator!(m, ">=");
    operator!(m, "<=>");
    operator!(m, "++");
    operator!(m, "--");
    operator!(m, "<<");
    operator!(m, ">>");
    operator!(m, "+=");
    operator!(m, "-=");
    operator!(m, "*=");
    operator!(m, "/=");
    operator!(m, "%=");
    operator!(m, "&=");
    operator!(m, "|=");
    operator!(m, "^=");
    operator!(m, "<<=");
    operator!(m, ">>=");
    operator!(m, "&&");
    operator!(m, "||");

    m
});

const DIGRAPHS: &[(&str, &str)] = &[
    ("<%", "{"),
    ("%>", "}"),
    ("<:", "["),
    (":>", "]"),
    ("%:", "#"),
];

const TRIGRAPHS: &[(&str, &str)] = &[
    ("??<", "{"),
    ("??>", "}"),
    ("??(", "["),
    ("??)", "]"),
    ("??=", "#"),
    ("??/", "\\"),
    ("??'", "^"),
    ("??!", "|"),
    ("??-", "~"),
];

const ISO646: &[(&str, &str)] = &[
    ("and", "&&"),
    ("and_eq", "&="),
    ("bitand", "&"),
    ("or", "||"),
    ("or_eq", "|="),
    ("bitor", "|"),
    ("xor", "^"),
    ("xor_eq", "^="),
    ("compl", "~"),
    ("not", "!"),
    ("not_eq", "!="),
];

fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&c)
}

fn starts_with(rest: &[char], prefix: &str) -> bool {
    let length = prefix.chars().count();
    rest.len() >= length && prefix.chars().zip(rest.iter()).all(|(a, &b)| a == b)
}

/// Length of a character literal at the start of `rest`, including both
/// quotes, honoring `\`-escapes. An unterminated literal runs to the end.
fn character_literal_length(rest: &[char]) -> usize {
    let mut e = 1;
    while e < rest.len() {
        match rest[e] {
            '\'' => return e + 1,
            '\\' => e += 2,
            _ => e += 1,
        }
    }
    rest.len()
}

/// Tokenizer with cross-line mode state.
#[derive(Debug, Clone)]
pub struct Lexer {
    params: Parameters,
    mode: TokenKind,
    location: Location,
    string_type: Option<char>,
    /// 0 = none, 1 = closes at end of line, 2 = one more line (trailing
    /// backslash continuation). Decremented at every end of line.
    single_line_comment: u8,
}

impl Lexer {
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            mode: TokenKind::Code,
            location: Location::default(),
            string_type: None,
            single_line_comment: 0,
        }
    }

    /// Back to a pristine state at row 0.
    pub fn reset(&mut self) {
        self.mode = TokenKind::Code;
        self.location = Location::default();
        self.string_type = None;
        self.single_line_comment = 0;
    }

    /// Pristine state at the start of `row`, for re-lexing a single line.
    pub fn reset_at(&mut self, row: u32) {
        self.reset();
        self.location.row = row;
    }

    /// Tokenize `text`, which may contain newlines, appending to `pattern`.
    pub fn process_text(&mut self, text: &str, pattern: &mut Vec<Token>) {
        for line in text.split('\n') {
            self.process_line(line, pattern);
        }
    }

    /// Tokenize a single line (without its newline) and advance to the
    /// next row.
    pub fn process_line(&mut self, line: &str, pattern: &mut Vec<Token>) {
        let chars: Vec<char> = line.chars().collect();

        // trim the end, makes the end-of-line options below reliable
        let mut length = chars.len();
        while length > 0 && is_whitespace(chars[length - 1]) {
            length -= 1;
        }
        let line = &chars[..length];

        let mut i = 0;
        while i < line.len() {
            let skipped = line[i..].iter().take_while(|&&c| is_whitespace(c)).count();
            i += skipped;
            self.location.column += skipped as u32;
            if i == line.len() {
                break;
            }

            if self.is_numeric_initial(&line[i..]) {
                let (length, state) = numeric::parse(&line[i..]);
                let text: String = line[i..i + length].iter().collect();
                let decimal = state.real.then_some(state.decimal);
                self.push_numeric(text, state.integer, decimal, length, pattern);
                i += length;
            } else if self.is_identifier_initial(line[i]) {
                i = self.lex_identifier(line, i, pattern);
            } else {
                i = self.lex_special(line, i, pattern);
            }
        }

        self.location.row += 1;
        self.location.column = 0;
        if self.single_line_comment > 0 {
            self.single_line_comment -= 1;
            if self.single_line_comment == 0 {
                self.mode = TokenKind::Code;
            }
        }
    }

    fn is_numeric_initial(&self, rest: &[char]) -> bool {
        rest[0].is_ascii_digit() || (rest.len() > 1 && rest[0] == '.' && rest[1].is_ascii_digit())
    }

    fn is_identifier_initial(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    fn is_identifier_continuation(&self, c: char) -> bool {
        if self.mode == TokenKind::String
            && self.params.ignore_accelerator_hints_in_strings
            && c == '&'
        {
            return true;
        }
        c.is_alphanumeric() || c == '_'
    }

    /// Identifier runs, including the word rewrites: ISO-646 operator
    /// spellings, `nullptr`/`NULL` and `true`/`false`.
    fn lex_identifier(&mut self, line: &[char], i: usize, pattern: &mut Vec<Token>) -> usize {
        let mut length = 1;
        while i + length < line.len() && self.is_identifier_continuation(line[i + length]) {
            length += 1;
        }
        let identifier: String = line[i..i + length].iter().collect();

        if self.params.iso646 {
            if let Some(&(_, symbol)) = ISO646.iter().find(|&&(word, _)| word == identifier) {
                self.push_token(symbol, length, pattern);
                return i + length;
            }
        }
        if self.params.nullptr_is_0 && (identifier == "nullptr" || identifier == "NULL") {
            self.push_numeric(identifier, 0, None, length, pattern);
            return i + length;
        }
        if self.params.boolean_is_integer && (identifier == "true" || identifier == "false") {
            let value = (identifier == "true") as u64;
            self.push_numeric(identifier, value, None, length, pattern);
            return i + length;
        }

        self.push_identifier(identifier, length, pattern);
        i + length
    }

    /// Mode switching, operator tables, elision and the single-character
    /// fallback.
    fn lex_special(&mut self, line: &[char], i: usize, pattern: &mut Vec<Token>) -> usize {
        let rest = &line[i..];

        match self.mode {
            TokenKind::Code => {
                if starts_with(rest, "/*") {
                    self.location.column += 2;
                    self.mode = TokenKind::Comment;
                    return i + 2;
                }
                if starts_with(rest, "//") {
                    self.location.column += 2;
                    self.mode = TokenKind::Comment;
                    let continued = line[i + 2..].last() == Some(&'\\');
                    self.single_line_comment = if continued { 2 } else { 1 };
                    return i + 2;
                }
                if rest[0] == '\'' {
                    let e = character_literal_length(rest);
                    self.pop_string_prefix(pattern);
                    if e > 1 {
                        let content: String = rest[1..e - 1].iter().collect();
                        self.mode = TokenKind::String;
                        self.push_string_content(content, e, pattern);
                        self.mode = TokenKind::Code;
                    } else {
                        self.location.column += 1;
                    }
                    self.string_type = None;
                    return i + e;
                }
                if rest[0] == '"' {
                    self.location.column += 1;
                    self.mode = TokenKind::String;
                    self.pop_string_prefix(pattern);
                    return i + 1;
                }
            }
            TokenKind::Comment => {
                if starts_with(rest, "*/") && self.single_line_comment == 0 {
                    self.location.column += 2;
                    self.mode = TokenKind::Code;
                    return i + 2;
                }
                if self.params.undecorate_comments && (rest[0] == '*' || rest[0] == '/') {
                    self.location.column += 1;
                    return i + 1;
                }
            }
            TokenKind::String => {
                if starts_with(rest, "\\\"") {
                    self.push_token("\"", 2, pattern);
                    return i + 2;
                }
                if rest[0] == '"' {
                    self.location.column += 1;
                    self.mode = TokenKind::Code;
                    self.string_type = None;
                    return i + 1;
                }
            }
            _ => {}
        }

        if let Some((spelling, value)) = MULTI_CHAR_OPERATORS.longest_match(rest) {
            let length = spelling.chars().count();
            if self.params.ignore_all_syntactic_tokens {
                self.location.column += length as u32;
            } else {
                self.push_token(value, length, pattern);
            }
            return i + length;
        }

        if self.params.digraphs {
            for &(spelling, value) in DIGRAPHS {
                if starts_with(rest, spelling) {
                    if self.params.ignore_all_syntactic_tokens {
                        self.location.column += 2;
                    } else {
                        self.push_token(value, 2, pattern);
                    }
                    return i + 2;
                }
            }
        }
        if self.params.trigraphs {
            for &(spelling, value) in TRIGRAPHS {
                if starts_with(rest, spelling) {
                    if self.params.ignore_all_syntactic_tokens {
                        self.location.column += 3;
                    } else {
                        self.push_token(value, 3, pattern);
                    }
                    return i + 3;
                }
            }
        }

        let c = rest[0];
        let elided = self.params.ignore_all_syntactic_tokens
            || (self.params.ignore_all_parentheses && matches!(c, '(' | ')'))
            || (self.params.ignore_all_brackets && matches!(c, '[' | ']'))
            || (self.params.ignore_all_braces && matches!(c, '{' | '}'))
            || (self.params.ignore_all_commas && c == ',')
            || (self.params.ignore_all_semicolons && c == ';')
            || (self.params.ignore_trailing_commas && c == ',' && rest.len() == 1)
            || (self.params.ignore_trailing_semicolons && c == ';' && rest.len() == 1);

        if elided {
            self.location.column += 1;
        } else {
            let single = c.to_string();
            self.push_token(&single, 1, pattern);
        }
        i + 1
    }

    /// When a string or character literal follows a 1-letter identifier,
    /// that identifier is its encoding prefix: remove the token and keep
    /// the letter for the upcoming string tokens. This is the only
    /// backward edit the lexer performs.
    fn pop_string_prefix(&mut self, pattern: &mut Vec<Token>) {
        if let Some(last) = pattern.last() {
            if last.kind == TokenKind::Identifier && last.value.chars().count() == 1 {
                self.string_type = last.value.chars().next();
                pattern.pop();
            }
        }
    }

    fn push_token(&mut self, value: &str, advance: usize, pattern: &mut Vec<Token>) {
        let mut token = Token::new(self.location, self.mode, value.to_string(), advance as u32);
        if self.mode == TokenKind::String {
            token.string_type = self.string_type;
        }
        pattern.push(token);
        self.location.column += advance as u32;
    }

    /// Character literal content: one string-kind token spanning the whole
    /// literal including its quotes.
    fn push_string_content(&mut self, content: String, advance: usize, pattern: &mut Vec<Token>) {
        let mut token = Token::new(self.location, self.mode, content, advance as u32);
        token.string_type = self.string_type;
        pattern.push(token);
        self.location.column += advance as u32;
    }

    fn push_identifier(&mut self, identifier: String, advance: usize, pattern: &mut Vec<Token>) {
        let kind = if self.mode == TokenKind::Code {
            TokenKind::Identifier
        } else {
            self.mode
        };
        let mut token = Token::new(self.location, kind, self.fold_value(&identifier), advance as u32);
        if self.mode == TokenKind::String {
            token.string_type = self.string_type;
        }
        pattern.push(token);
        self.location.column += advance as u32;
    }

    fn push_numeric(
        &mut self,
        value: String,
        integer: u64,
        decimal: Option<f64>,
        advance: usize,
        pattern: &mut Vec<Token>,
    ) {
        let kind = if self.mode == TokenKind::Code {
            TokenKind::Numeric
        } else {
            self.mode
        };
        let mut token = Token::new(self.location, kind, value, advance as u32);
        if self.mode == TokenKind::String {
            token.string_type = self.string_type;
        }
        token.integer = integer;
        if let Some(decimal) = decimal {
            token.decimal = decimal;
            token.is_decimal = true;
        }
        pattern.push(token);
        self.location.column += advance as u32;
    }

    fn fold_value(&self, value: &str) -> String {
        let fold = match self.mode {
            TokenKind::String => self.params.fold_and_ignore_diacritics_strings,
            TokenKind::Comment => self.params.fold_and_ignore_diacritics_comments,
            TokenKind::Code | TokenKind::Identifier | TokenKind::Numeric => {
                self.params.fold_and_ignore_diacritics_identifiers
            }
        };
        if fold {
            unicode::fold(value)
        } else {
            value.to_string()
        }
    }
}
