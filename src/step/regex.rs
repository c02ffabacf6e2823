// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Step patterns, comparable by their source text.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use derive_more::with_trait::Display;
use regex::{Regex, RegexBuilder};

use super::context::Captures;

/// Step pattern compiled both as written and case-insensitively.
///
/// Implements [`Eq`], [`Ord`] and [`Hash`] by its source text.
#[derive(Clone, Debug, Display)]
#[display("{exact}")]
pub struct Pattern {
    exact: Regex,
    folded: Regex,
}

impl Pattern {
    /// Compiles the given `source` into a [`Pattern`].
    ///
    /// # Errors
    ///
    /// If `source` is not a valid [`Regex`].
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            exact: Regex::new(source)?,
            folded: RegexBuilder::new(source).case_insensitive(true).build()?,
        })
    }

    /// Returns the source text of this [`Pattern`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.exact.as_str()
    }

    /// Returns the [`Regex`] to match with.
    #[must_use]
    pub const fn regex(&self, ignore_case: bool) -> &Regex {
        if ignore_case {
            &self.folded
        } else {
            &self.exact
        }
    }

    /// Searches the `sentence` for this [`Pattern`] anywhere inside it.
    ///
    /// Named groups are reported when the [`Pattern`] has any, positional
    /// ones otherwise. Groups that didn't participate are empty strings.
    #[must_use]
    pub fn captures(&self, sentence: &str, ignore_case: bool) -> Option<Captures> {
        let regex = self.regex(ignore_case);
        let found = regex.captures(sentence)?;
        let text = |i: usize| found.get(i).map_or_else(String::new, |m| m.as_str().to_owned());

        let named = regex
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| Some((name?.to_owned(), text(i))))
            .collect::<super::context::Named>();

        Some(if named.is_empty() {
            Captures::Positional((1..regex.captures_len()).map(text).collect())
        } else {
            Captures::Named(named)
        })
    }
}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl PartialOrd for Pattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Captures, Pattern};

    #[test]
    fn equal_by_source() {
        let set = [r"a (\d+)", r"b", r"a (\d+)"]
            .into_iter()
            .map(|s| Pattern::new(s).unwrap())
            .collect::<HashSet<_>>();

        assert_eq!(set.len(), 2);
        assert!(Pattern::new("a").unwrap() < Pattern::new("b").unwrap());
    }

    #[test]
    fn rejects_invalid_regex() {
        assert!(Pattern::new("(unclosed").is_err());
    }

    #[test]
    fn folds_case_on_request() {
        let pattern = Pattern::new("I have (\\d+) apples").unwrap();

        assert!(pattern.captures("Given i HAVE 3 apples", false).is_none());
        assert_eq!(
            pattern.captures("Given i HAVE 3 apples", true),
            Some(Captures::Positional(vec!["3".into()])),
        );
    }

    #[test]
    fn prefers_named_groups() {
        let pattern =
            Pattern::new(r"(?P<who>\w+) eats (\d+)(?: (?P<what>pears))?").unwrap();

        let Some(Captures::Named(named)) =
            pattern.captures("Bob eats 2", false)
        else {
            panic!("expected named captures");
        };
        assert_eq!(named["who"], "Bob");
        assert_eq!(named["what"], "");
        assert_eq!(named.len(), 2);
    }

    #[test]
    fn positional_groups_may_be_empty() {
        let pattern = Pattern::new(r"x(a)?(b)").unwrap();

        assert_eq!(
            pattern.captures("xb", false),
            Some(Captures::Positional(vec![String::new(), "b".into()])),
        );
    }
}
