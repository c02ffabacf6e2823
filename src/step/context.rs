// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Arguments handed to a step body.

use linked_hash_map::LinkedHashMap;

use crate::table::{Row, Table};

/// Named capture groups: group name to matched text, in pattern order.
pub type Named = LinkedHashMap<String, String>;

/// Capture groups of a matched step pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Captures {
    /// Pattern has named groups.
    Named(Named),

    /// Pattern has no named groups, so every group is reported by position,
    /// the first group being at index `0`.
    Positional(Vec<String>),
}

impl Captures {
    /// Number of captured groups.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Named(named) => named.len(),
            Self::Positional(groups) => groups.len(),
        }
    }

    /// Indicates whether no groups were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Context of a single step body invocation.
#[derive(Clone, Debug)]
pub struct Context {
    /// Sentence of the step being run.
    pub sentence: String,

    /// Inline data table of the step.
    pub table: Table,

    /// Capture groups of the matched pattern.
    pub captures: Captures,
}

impl Context {
    /// Creates a new [`Context`].
    #[must_use]
    pub const fn new(sentence: String, table: Table, captures: Captures) -> Self {
        Self { sentence, table, captures }
    }

    /// Returns the value of the named capture group `name`.
    ///
    /// [`None`] if the pattern has no such group, or has no named groups at
    /// all.
    #[must_use]
    pub fn get_named_capture(&self, name: &str) -> Option<&str> {
        match &self.captures {
            Captures::Named(named) => named.get(name).map(String::as_str),
            Captures::Positional(_) => None,
        }
    }

    /// Returns the value of the `index`th capture group, counting from `0`.
    ///
    /// Named groups are counted in pattern order.
    #[must_use]
    pub fn get_capture(&self, index: usize) -> Option<&str> {
        let value = match &self.captures {
            Captures::Named(named) => named.values().nth(index),
            Captures::Positional(groups) => groups.get(index),
        };
        value.map(String::as_str)
    }

    /// Returns the rows of the inline data table.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.table.rows()
    }
}
