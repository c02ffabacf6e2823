// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line and cell helpers shared by the parser and the rendering helpers.

use std::borrow::Cow;

use itertools::Itertools as _;
use linked_hash_map::LinkedHashMap;

/// Non-blank line of a document, trimmed, with its 1-based line number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Line<'a> {
    pub(crate) number: usize,
    pub(crate) text: &'a str,
}

/// Splits `text` into trimmed non-blank [`Line`]s.
pub(crate) fn stripped_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(n, line)| {
            let text = line.trim();
            (!text.is_empty()).then_some(Line { number: n + 1, text })
        })
        .collect()
}

/// Indicates whether `line` belongs to a pipe-delimited table.
pub(crate) fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Splits a table `line` into trimmed cells.
///
/// A single leading and trailing `|` are dropped. `\|` is never a split point
/// and is unescaped in the resulting cell.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
    let mut line = line.trim();
    if let Some(rest) = line.strip_prefix('|') {
        line = rest;
    }
    if line.ends_with('|') && !line.ends_with("\\|") {
        line = &line[..line.len() - 1];
    }

    let mut cells = vec![];
    let mut cell = String::new();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                _ = chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell)),
            c => cell.push(c),
        }
    }
    cells.push(cell);

    cells.into_iter().map(|c| c.trim().to_owned()).collect()
}

/// Escapes every `|` of a cell value so it survives [`split_cells()`].
pub(crate) fn escape_cell(value: &str) -> Cow<'_, str> {
    if value.contains('|') {
        Cow::Owned(value.replace('|', "\\|"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Display width of `text`, counted in characters.
pub(crate) fn width(text: &str) -> usize {
    text.chars().count()
}

/// Pads `text` with spaces up to `width` characters and appends `append`.
pub(crate) fn rfill(text: &str, width: usize, append: &str) -> String {
    let padding = width.saturating_sub(self::width(text));
    format!("{text}{}{append}", " ".repeat(padding))
}

/// Renders `keys` and `rows` as an aligned table, one `| a | b |` line per
/// row with the header first.
///
/// Returns no lines when there are no `keys`.
pub(crate) fn table_lines(
    keys: &[String],
    rows: &[LinkedHashMap<String, String>],
) -> Vec<String> {
    if keys.is_empty() {
        return vec![];
    }

    let widths = keys
        .iter()
        .map(|key| {
            rows.iter()
                .filter_map(|row| row.get(key))
                .map(|v| width(&escape_cell(v)))
                .chain([width(&escape_cell(key))])
                .max()
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();

    let render = |cells: Vec<Cow<'_, str>>| {
        let body = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| rfill(cell, *w, ""))
            .join(" | ");
        format!("| {body} |")
    };

    let mut lines = vec![render(keys.iter().map(|k| escape_cell(k)).collect())];
    lines.extend(rows.iter().map(|row| {
        render(
            keys.iter()
                .map(|k| escape_cell(row.get(k).map_or("", String::as_str)))
                .collect(),
        )
    }));
    lines
}
