//! The search session: owns the parameters, the lexer state and the
//! processed token pattern of the loaded source text.

use log::debug;

use crate::lexer::{Lexer, Location, Token};
use crate::matcher;
use crate::normalizer;
use crate::params::Parameters;

/// A single-threaded search session over one haystack.
///
/// Load source text with [`load`](Self::load) or [`append`](Self::append),
/// patch single lines with [`replace`](Self::replace) and run queries with
/// [`find`](Self::find). Changes to `parameters` take effect when the
/// haystack is next lexed (`clear`/`load`); queries always use the current
/// value.
#[derive(Debug, Clone)]
pub struct Searcher {
    pub parameters: Parameters,
    lexer: Lexer,
    pattern: Vec<Token>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_parameters(Parameters::default())
    }

    pub fn with_parameters(parameters: Parameters) -> Self {
        Self {
            parameters,
            lexer: Lexer::new(parameters),
            pattern: vec![],
        }
    }

    /// The processed token pattern, in source order.
    pub fn tokens(&self) -> &[Token] {
        &self.pattern
    }

    /// Drop all tokens and reset the lexer to row 0.
    pub fn clear(&mut self) {
        self.pattern.clear();
        self.lexer = Lexer::new(self.parameters);
    }

    /// Tokenize `text` (which may span multiple lines) continuing from the
    /// current lexer state, then re-run normalization.
    pub fn append(&mut self, text: &str) {
        self.lexer.process_text(text, &mut self.pattern);
        normalizer::normalize_full(&self.parameters, &mut self.pattern);
    }

    /// Replace one line: drop the tokens of `row`, lex `line` at that row
    /// and re-run normalization. `line` must not contain a newline.
    pub fn replace(&mut self, row: u32, line: &str) {
        debug_assert!(!line.contains('\n'), "replace takes a single line");

        let saved = self.lexer.clone();

        let tail_start = self
            .pattern
            .iter()
            .position(|t| t.location.row > row)
            .unwrap_or(self.pattern.len());
        let tail = self.pattern.split_off(tail_start);
        self.pattern.retain(|t| t.location.row != row);

        self.lexer.reset_at(row);
        self.lexer.process_line(line, &mut self.pattern);
        self.lexer = saved;

        self.pattern.extend(tail);
        normalizer::normalize_full(&self.parameters, &mut self.pattern);
    }

    /// `clear`, then `append` every line.
    pub fn load<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.clear();
        for line in lines {
            self.append(line.as_ref());
        }
        debug!("loaded haystack of {} token(s)", self.pattern.len());
    }

    /// Search the haystack for `needle`. `found` runs once per match with
    /// `(needle, match_index, begin, end)`; returning `false` stops the
    /// search. The returned count includes every reported match.
    pub fn find<F>(&self, needle: &str, mut found: F) -> usize
    where
        F: FnMut(&str, usize, Location, Location) -> bool,
    {
        let mut lexer = Lexer::new(self.parameters);
        let mut needle_pattern = vec![];
        lexer.process_text(needle, &mut needle_pattern);
        normalizer::normalize_query(&self.parameters, &mut needle_pattern);

        let count = matcher::find_in_tokens(
            &self.parameters,
            &self.pattern,
            &needle_pattern,
            needle,
            &mut found,
        );
        debug!("query {needle:?} produced {count} match(es)");
        count
    }
}
