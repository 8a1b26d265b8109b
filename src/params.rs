use serde::{Deserialize, Serialize};

/// The full set of options steering lexing, normalization and matching.
///
/// Defaults are permissive: most equivalences are on, structural elision is
/// off. A partially filled JSON options file deserializes on top of the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    // shape of the match
    pub whole_words: bool,
    pub individual_partial_words: bool,
    pub orthogonal: bool,

    // case and diacritic sensitivity, per token kind
    pub case_insensitive_numbers: bool,
    pub case_insensitive_strings: bool,
    pub case_insensitive_comments: bool,
    pub case_insensitive_identifiers: bool,
    pub fold_and_ignore_diacritics_strings: bool,
    pub fold_and_ignore_diacritics_comments: bool,
    pub fold_and_ignore_diacritics_identifiers: bool,

    // alternative lexical forms
    pub digraphs: bool,
    pub trigraphs: bool,
    pub iso646: bool,
    pub nullptr_is_0: bool,
    pub boolean_is_integer: bool,
    pub numbers: bool,
    pub match_floats_and_integers: bool,

    // structural elision
    pub ignore_all_syntactic_tokens: bool,
    pub ignore_all_parentheses: bool,
    pub ignore_all_brackets: bool,
    pub ignore_all_braces: bool,
    pub ignore_all_semicolons: bool,
    pub ignore_all_commas: bool,
    pub ignore_trailing_semicolons: bool,
    pub ignore_trailing_commas: bool,

    // text hygiene
    pub unescape: bool,
    pub ignore_accelerator_hints_in_strings: bool,
    pub undecorate_comments: bool,

    // token equivalences
    pub match_snake_and_camel_casing: bool,
    pub match_ifs_and_conditional: bool,
    pub match_class_struct_typename: bool,
    pub match_any_inheritance_type: bool,
    pub match_any_integer_decl_style: bool,
    pub match_float_and_double_decl: bool,
    /// Declared for completeness; currently without behavior.
    pub match_using_and_typedef: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            whole_words: false,
            individual_partial_words: false,
            orthogonal: false,

            case_insensitive_numbers: true,
            case_insensitive_strings: true,
            case_insensitive_comments: true,
            case_insensitive_identifiers: true,
            fold_and_ignore_diacritics_strings: true,
            fold_and_ignore_diacritics_comments: true,
            fold_and_ignore_diacritics_identifiers: true,

            digraphs: true,
            trigraphs: true,
            iso646: true,
            nullptr_is_0: true,
            boolean_is_integer: true,
            numbers: true,
            match_floats_and_integers: true,

            ignore_all_syntactic_tokens: false,
            ignore_all_parentheses: false,
            ignore_all_brackets: false,
            ignore_all_braces: false,
            ignore_all_semicolons: false,
            ignore_all_commas: false,
            ignore_trailing_semicolons: false,
            ignore_trailing_commas: false,

            unescape: true,
            ignore_accelerator_hints_in_strings: true,
            undecorate_comments: true,

            match_snake_and_camel_casing: true,
            match_ifs_and_conditional: true,
            match_class_struct_typename: true,
            match_any_inheritance_type: true,
            match_any_integer_decl_style: true,
            match_float_and_double_decl: true,
            match_using_and_typedef: false,
        }
    }
}
