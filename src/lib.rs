//! Coding-style-agnostic search over C-family source text.
//!
//! The pipeline: a [`lexer`] turns source lines into classified tokens, a
//! [`normalizer`] rewrites the token stream so spelling differences stop
//! mattering, and a [`matcher`] scans the haystack tokens for runs
//! equivalent to a query. [`Searcher`] ties the stages together behind a
//! small session API.

pub mod lexer;
pub mod matcher;
pub mod normalizer;
pub mod params;
pub mod searcher;
pub mod unicode;

pub use lexer::{Location, Token, TokenKind};
pub use params::Parameters;
pub use searcher::Searcher;
