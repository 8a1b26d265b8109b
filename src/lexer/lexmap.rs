use std::collections::HashMap;

/// Table of fixed spellings with their emitted token values, queried by
/// longest match against the start of the remaining line.
#[derive(Debug, Clone, Default)]
pub struct LexMap {
    map: HashMap<&'static str, &'static str>,
}

impl LexMap {
    pub fn insert(&mut self, spelling: &'static str, value: &'static str) {
        self.map.insert(spelling, value);
    }

    /// Find the longest spelling that prefixes `rest`. Returns the spelling
    /// and the value to emit for it.
    pub fn longest_match(&self, rest: &[char]) -> Option<(&'static str, &'static str)> {
        let mut best: Option<(&'static str, &'static str)> = None;

        for (&spelling, &value) in &self.map {
            let length = spelling.chars().count();
            if length > rest.len() {
                continue;
            }
            if !spelling.chars().zip(rest.iter()).all(|(a, &b)| a == b) {
                continue;
            }
            if best.map_or(true, |(b, _)| length > b.chars().count()) {
                best = Some((spelling, value));
            }
        }

        best
    }
}
