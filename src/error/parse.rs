// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of parsing a feature document.

use std::{io, path::PathBuf};

use derive_more::with_trait::{Display, Error};

/// Malformed or unreadable feature document.
#[derive(Debug, Display, Error)]
pub enum ParseError {
    /// Document has no `Feature:` header.
    #[display("no `Feature:` header found")]
    MissingFeature,

    /// Scenario text is empty.
    #[display("no scenario header found")]
    MissingScenario,

    /// Table row appears before any step it could belong to.
    #[display("line {line}: table row `{text}` does not follow a step")]
    OrphanTable {
        /// 1-based line of the row.
        line: usize,

        /// Text of the row.
        text: String,
    },

    /// `Examples:` block whose header row differs from the first block of
    /// the same scenario.
    #[display(
        "line {line}: examples header `{}` differs from `{}`",
        found.join(" | "),
        expected.join(" | ")
    )]
    MismatchedExamples {
        /// 1-based line of the differing header row.
        line: usize,

        /// Keys of the first `Examples:` block.
        expected: Vec<String>,

        /// Keys of the differing block.
        found: Vec<String>,
    },

    /// Document file couldn't be read.
    #[display("cannot read `{}`: {source}", path.display())]
    Io {
        /// Path of the document file.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::{error::Error as _, io};

    use super::ParseError;

    #[test]
    fn io_error_keeps_source() {
        let err = ParseError::Io {
            path: "missing.feature".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };

        assert_eq!(err.to_string(), "cannot read `missing.feature`: gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn orphan_table_names_line() {
        let err = ParseError::OrphanTable { line: 4, text: "| a |".into() };

        assert_eq!(
            err.to_string(),
            "line 4: table row `| a |` does not follow a step",
        );
        assert!(err.source().is_none());
    }
}
