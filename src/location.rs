// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source locations of parsed documents and registered step definitions.
//!
//! These are diagnostics only: they feed the trailing `# file:line` comments
//! of the rendering helpers and never influence parsing or execution.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use derive_more::with_trait::Display;

/// Place in Rust source where a step definition was registered.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{path}:{line}")]
pub struct Location {
    /// Path to the file where the step definition was registered.
    pub path: &'static str,

    /// Line of the file where the step definition was registered.
    pub line: u32,

    /// Column of the file where the step definition was registered.
    pub column: u32,
}

impl Location {
    /// Creates a new [`Location`] with the given `path`, `line` and `column`.
    #[must_use]
    pub const fn new(path: &'static str, line: u32, column: u32) -> Self {
        Self { path, line, column }
    }

    /// Captures the [`Location`] of the calling code.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let at = std::panic::Location::caller();
        Self::new(at.file(), at.line(), at.column())
    }
}

/// Where a parsed step or scenario was written.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Description {
    /// Document file, if the text was read from one.
    pub file: Option<PathBuf>,

    /// 1-based line of the document, if the text came from a document.
    pub line: Option<usize>,
}

/// Where a parsed step was written.
pub type StepDescription = Description;

/// Where a parsed scenario was written.
pub type ScenarioDescription = Description;

impl Description {
    /// Creates a new [`Description`] of the given `line` in an optional
    /// `file`.
    #[must_use]
    pub fn new(file: Option<&Path>, line: usize) -> Self {
        Self {
            file: file.map(Path::to_path_buf),
            line: Some(line),
        }
    }

    /// Renders this [`Description`] as `file:line`.
    ///
    /// [`None`] unless both the file and the line are known.
    #[must_use]
    pub fn comment(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        let line = self.line?;
        Some(format!("{}:{line}", file.display()))
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{line}", file.display()),
            (Some(file), None) => write!(f, "{}", file.display()),
            (None, Some(line)) => write!(f, "line {line}"),
            (None, None) => write!(f, "<unknown>"),
        }
    }
}

/// Where a parsed feature was written, including its free-text description.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeatureDescription {
    /// Document file, if the text was read from one.
    pub file: Option<PathBuf>,

    /// 1-based line of the `Feature:` header.
    pub line: Option<usize>,

    /// 1-based lines of every free-text description line, in order.
    pub description_at: Vec<usize>,
}

impl FeatureDescription {
    /// Renders the `Feature:` header place as `file:line`.
    #[must_use]
    pub fn comment(&self) -> Option<String> {
        self.comment_at(self.line?)
    }

    /// Renders the given `line` of the feature's file as `file:line`.
    #[must_use]
    pub fn comment_at(&self, line: usize) -> Option<String> {
        let file = self.file.as_ref()?;
        Some(format!("{}:{line}", file.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{Description, FeatureDescription, Location};

    #[test]
    fn location_displays_path_and_line() {
        assert_eq!(
            Location::new("tests/steps.rs", 12, 5).to_string(),
            "tests/steps.rs:12",
        );
    }

    #[test]
    fn caller_points_here() {
        let location = Location::caller();

        assert_eq!(location.path, file!());
        assert_eq!(location.line, line!() - 3);
    }

    #[test]
    fn comment_requires_file_and_line() {
        let located = Description::new(Some(Path::new("a.feature")), 3);

        assert_eq!(located.comment().as_deref(), Some("a.feature:3"));
        assert_eq!(Description::new(None, 3).comment(), None);
        assert_eq!(Description::default().to_string(), "<unknown>");
    }

    #[test]
    fn feature_comment_uses_header_line() {
        let description = FeatureDescription {
            file: Some("b.feature".into()),
            line: Some(1),
            description_at: vec![2, 3],
        };

        assert_eq!(description.comment().as_deref(), Some("b.feature:1"));
        assert_eq!(description.comment_at(3).as_deref(), Some("b.feature:3"));
    }
}
