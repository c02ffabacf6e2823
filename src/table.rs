// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pipe-delimited data tables.

use linked_hash_map::LinkedHashMap;

use crate::text;

/// Single [`Table`] row: column key to cell value, in column order.
pub type Row = LinkedHashMap<String, String>;

/// Data table parsed from pipe-delimited lines, the first being the header.
///
/// ```
/// # use cress::Table;
/// let table = Table::parse(["a|b", "1|2", "3|4"]);
///
/// assert_eq!(table.keys(), ["a", "b"]);
/// assert_eq!(table.rows()[1]["a"], "3");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    keys: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Parses the given `lines` into a [`Table`].
    ///
    /// Every row is zipped positionally against the header keys, so extra or
    /// missing cells are silently dropped.
    #[must_use]
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter();
        let Some(header) = lines.next() else {
            return Self::default();
        };

        let keys = text::split_cells(header.as_ref());
        let rows = lines
            .map(|line| {
                keys.iter()
                    .cloned()
                    .zip(text::split_cells(line.as_ref()))
                    .collect::<Row>()
            })
            .collect();

        Self { keys, rows }
    }

    /// Column keys, in header order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Rows, in document order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates over the values of the `key` column.
    ///
    /// Rows missing a cell for `key` are skipped.
    pub fn column<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'s str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(key).map(String::as_str))
    }

    /// Indicates whether this [`Table`] has neither keys nor rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.rows.is_empty()
    }

    /// Splits this [`Table`] into its keys and rows.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.keys, self.rows)
    }

    /// Renders this [`Table`] as aligned lines, header first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        text::table_lines(&self.keys, &self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::Table;

    fn row(pairs: &[(&str, &str)]) -> super::Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn parses_header_and_rows() {
        let table = Table::parse(["a|b", "1|2", "3|4"]);

        assert_eq!(table.keys(), ["a", "b"]);
        assert_eq!(
            table.rows(),
            [row(&[("a", "1"), ("b", "2")]), row(&[("a", "3"), ("b", "4")])],
        );
    }

    #[test]
    fn parses_gherkin_style_borders() {
        let table = Table::parse(["| name | age |", "| Ann  | 31  |"]);

        assert_eq!(table.keys(), ["name", "age"]);
        assert_eq!(table.column("name").collect::<Vec<_>>(), ["Ann"]);
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = Table::parse(Vec::<String>::new());

        assert!(table.is_empty());
        assert!(table.lines().is_empty());
    }

    #[test]
    fn mismatched_rows_truncate() {
        let table = Table::parse(["a|b|c", "1|2", "1|2|3|4"]);

        assert_eq!(table.rows()[0], row(&[("a", "1"), ("b", "2")]));
        assert_eq!(
            table.rows()[1],
            row(&[("a", "1"), ("b", "2"), ("c", "3")]),
        );
    }

    #[test]
    fn header_only_has_no_rows() {
        let table = Table::parse(["| x |"]);

        assert!(!table.is_empty());
        assert!(table.rows().is_empty());
        assert_eq!(table.lines(), ["| x |"]);
    }

    #[test]
    fn keeps_escaped_pipes_in_cells() {
        let table = Table::parse([r"| expr |", r"| a \| b |"]);

        assert_eq!(table.rows()[0]["expr"], "a | b");
        assert_eq!(table.lines()[1], r"| a \| b |");
    }
}
