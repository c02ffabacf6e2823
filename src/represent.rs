// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Column-aligned re-rendering of parsed documents.
//!
//! Every rendered line is padded to the widest line of its [`Feature`] and
//! followed by a `# file:line` comment whenever the place is known.

use itertools::Itertools as _;

use crate::{feature::Feature, scenario::Scenario, step::Step, text};

/// Indentation of [`Scenario`] headers.
const SCENARIO_INDENT: usize = 2;

/// Indentation of [`Step`] sentences and example tables.
const STEP_INDENT: usize = SCENARIO_INDENT + 2;

/// Indentation of [`Step`] data tables.
const TABLE_INDENT: usize = STEP_INDENT + 2;

/// Pads `head` to `width` and appends the `comment`, if any, and a newline.
fn commented(head: &str, width: usize, comment: Option<String>) -> String {
    match comment {
        Some(at) => text::rfill(head, width, &format!("# {at}\n")),
        None => format!("{head}\n"),
    }
}

/// Indents every table line by `indent` and joins them, ending with a
/// newline.
///
/// Empty for a table without keys.
fn indented(lines: Vec<String>, indent: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let pad = " ".repeat(indent);
    format!("{}\n", lines.iter().map(|l| format!("{pad}{l}")).join("\n"))
}

/// Width of the widest of `lines` once indented by `indent`.
fn widest(lines: &[String], indent: usize) -> usize {
    lines.iter().map(|l| text::width(l) + indent).max().unwrap_or_default()
}

impl Step {
    /// Width of the widest line this [`Step`] renders to, without comments.
    #[must_use]
    pub fn max_length(&self) -> usize {
        (text::width(&self.sentence) + STEP_INDENT)
            .max(widest(&self.table().lines(), TABLE_INDENT))
    }

    /// Renders the given `sentence` as a line of this [`Step`], commented
    /// with where its step definition was registered, or where it was
    /// written when unbound.
    #[must_use]
    pub fn represent_string(&self, sentence: &str, feature: &Feature) -> String {
        let head = format!("{}{sentence}", " ".repeat(STEP_INDENT));
        let at = self
            .defined_at()
            .map(|l| l.to_string())
            .or_else(|| self.described_at().comment());
        commented(&head, feature.max_length() + 1, at)
    }

    /// Renders the sentence of this [`Step`] as a commented line.
    #[must_use]
    pub fn represented(&self, feature: &Feature) -> String {
        self.represent_string(&self.sentence, feature)
    }

    /// Renders the data table of this [`Step`], one aligned line per row.
    #[must_use]
    pub fn represent_data_list(&self) -> String {
        indented(self.table().lines(), TABLE_INDENT)
    }
}

impl Scenario {
    /// Width of the widest line this [`Scenario`] renders to, without
    /// comments.
    #[must_use]
    pub fn max_length(&self) -> usize {
        let head = text::width(&format!("{}: {}", self.keyword(), self.name));
        let examples = text::table_lines(self.keys(), self.outlines());

        self.steps()
            .iter()
            .map(Step::max_length)
            .chain([head + SCENARIO_INDENT, widest(&examples, STEP_INDENT)])
            .max()
            .unwrap_or_default()
    }

    /// Renders the header of this [`Scenario`] as a commented line.
    #[must_use]
    pub fn represented(&self, feature: &Feature) -> String {
        let head = format!(
            "{}{}: {}",
            " ".repeat(SCENARIO_INDENT),
            self.keyword(),
            self.name,
        );
        commented(&head, feature.max_length() + 1, self.described_at().comment())
    }

    /// Renders the example rows of this [`Scenario`], one aligned line per
    /// row.
    #[must_use]
    pub fn represent_examples(&self) -> String {
        indented(text::table_lines(self.keys(), self.outlines()), STEP_INDENT)
    }
}

impl Feature {
    /// Header line of this [`Feature`].
    #[must_use]
    pub fn head(&self) -> String {
        format!("Feature: {}", self.name)
    }

    /// Width of the widest line this [`Feature`] renders to, without
    /// comments.
    #[must_use]
    pub fn max_length(&self) -> usize {
        let description = self
            .description()
            .lines()
            .map(|l| text::width(l.trim()) + SCENARIO_INDENT);

        self.scenarios()
            .iter()
            .map(Scenario::max_length)
            .chain(description)
            .chain([text::width(&self.head())])
            .max()
            .unwrap_or_default()
    }

    /// Renders the header and description of this [`Feature`] as commented
    /// lines.
    #[must_use]
    pub fn represented(&self) -> String {
        let width = self.max_length() + 1;
        let at = self.described_at();

        let mut out = commented(&self.head(), width, at.comment());
        for (line, number) in self.description().lines().zip(&at.description_at) {
            out.push_str(&commented(
                &format!("{}{line}", " ".repeat(SCENARIO_INDENT)),
                width,
                at.comment_at(*number),
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{feature::Feature, runner::Runner, step::Collection};

    const TEXT: &str = "\
Feature: Tables
  Shows tables
  Scenario Outline: sums
    Given <a> plus <b>
      | left | right |
      | 1    | 22    |
    Examples:
      | a | b  |
      | 1 | 20 |
";

    #[test]
    fn lengths_cover_every_line() {
        let feature = Feature::from_string(TEXT).unwrap();
        let scenario = &feature.scenarios()[0];
        let step = &scenario.steps()[0];

        assert_eq!(step.max_length(), 4 + "Given <a> plus <b>".len());
        assert_eq!(scenario.max_length(), 2 + "Scenario Outline: sums".len());
        assert_eq!(feature.max_length(), scenario.max_length());
        assert_eq!(feature.head(), "Feature: Tables");
    }

    #[test]
    fn renders_without_comments_when_not_from_file() {
        let feature = Feature::from_string(TEXT).unwrap();
        let scenario = &feature.scenarios()[0];
        let step = &scenario.steps()[0];

        assert_eq!(feature.represented(), "Feature: Tables\n  Shows tables\n");
        assert_eq!(scenario.represented(&feature), "  Scenario Outline: sums\n");
        assert_eq!(step.represented(&feature), "    Given <a> plus <b>\n");
        assert_eq!(
            step.represent_data_list(),
            "      | left | right |\n      | 1    | 22    |\n",
        );
        assert_eq!(
            scenario.represent_examples(),
            "    | a | b  |\n    | 1 | 20 |\n",
        );
    }

    #[test]
    fn renders_file_comments_aligned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.feature");
        std::fs::write(&path, TEXT).unwrap();
        let feature = Feature::from_file(&path).unwrap();
        let p = path.display();

        assert_eq!(
            feature.represented(),
            format!(
                "{:<25}# {p}:1\n{:<25}# {p}:2\n",
                "Feature: Tables", "  Shows tables",
            ),
        );
        assert_eq!(
            feature.scenarios()[0].represented(&feature),
            format!("  Scenario Outline: sums # {p}:3\n"),
        );
    }

    #[test]
    fn bound_step_points_at_definition() {
        let steps = Collection::<()>::new().step("plus", |_, _| Ok(())).unwrap();
        let runner = Runner::new(steps);
        let mut feature = Feature::from_string(TEXT).unwrap();
        _ = feature.run(&runner, &mut ()).unwrap();

        let step = &feature.scenarios()[0].solved_steps()[0];
        let rendered = step.represented(&feature);

        assert!(rendered.starts_with("    Given 1 plus 20 "), "{rendered}");
        assert!(rendered.contains(&format!("# {}:", file!())), "{rendered}");
    }

    #[test]
    fn empty_table_renders_nothing() {
        let feature = Feature::from_string("Feature: f\nScenario: s\nGiven x").unwrap();

        assert_eq!(feature.scenarios()[0].steps()[0].represent_data_list(), "");
        assert_eq!(feature.scenarios()[0].represent_examples(), "");
    }
}
