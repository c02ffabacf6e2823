// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scenarios and scenario outlines.

use std::path::Path;

use derive_more::with_trait::Display;
use lazy_regex::{regex_captures, regex_is_match};

use crate::{
    error::{ExecutionError, ParseError, StepError},
    location::ScenarioDescription,
    result::{Partition, ScenarioResult},
    runner::Runner,
    step::Step,
    table::{Row, Table},
    text::{self, Line},
};

/// Header form a [`Scenario`] was written with.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Keyword {
    /// `Scenario:`
    #[default]
    #[display("Scenario")]
    Scenario,

    /// `Scenario Outline:`
    #[display("Scenario Outline")]
    Outline,
}

fn is_examples_header(line: &str) -> bool {
    regex_is_match!(r"^Examples?:", line)
}

/// Parses every `Examples:` block of `lines` into shared keys and rows in
/// file order.
fn parse_examples(
    lines: &[Line<'_>],
) -> Result<(Vec<String>, Vec<Row>), ParseError> {
    let mut keys = vec![];
    let mut outlines = vec![];
    for block in lines.split(|l| is_examples_header(l.text)) {
        let rows = block
            .iter()
            .filter(|l| text::is_table_line(l.text))
            .collect::<Vec<_>>();
        let Some(header) = rows.first() else {
            continue;
        };
        let (block_keys, block_rows) =
            Table::parse(rows.iter().map(|l| l.text)).into_parts();
        if keys.is_empty() {
            keys = block_keys;
        } else if block_keys != keys {
            return Err(ParseError::MismatchedExamples {
                line: header.number,
                expected: keys,
                found: block_keys,
            });
        }
        outlines.extend(block_rows);
    }
    Ok((keys, outlines))
}

/// Ordered steps of a scenario, optionally expanded over example rows.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Name given in the header.
    pub name: String,

    keyword: Keyword,
    steps: Vec<Step>,
    keys: Vec<String>,
    outlines: Vec<Row>,
    solved_steps: Vec<Step>,
    described_at: ScenarioDescription,
    position: Option<usize>,
}

impl Scenario {
    /// Parses a [`Scenario`] out of the given `text`, starting at its header
    /// line.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingScenario`] if `text` is blank.
    /// - [`ParseError::OrphanTable`] if a table row precedes every step.
    /// - [`ParseError::MismatchedExamples`] if `Examples:` blocks have
    ///   different headers.
    pub fn from_string(text: &str) -> Result<Self, ParseError> {
        Self::from_lines(&text::stripped_lines(text), None)
    }

    /// Parses a [`Scenario`] out of already stripped `lines`.
    pub(crate) fn from_lines(
        lines: &[Line<'_>],
        file: Option<&Path>,
    ) -> Result<Self, ParseError> {
        let (header, body) =
            lines.split_first().ok_or(ParseError::MissingScenario)?;
        let (keyword, name) = match regex_captures!(
            r"(?i)^Scenario( Outline)?:\s*(.*)$",
            header.text
        ) {
            Some((_, "", name)) => (Keyword::Scenario, name),
            Some((_, _, name)) => (Keyword::Outline, name),
            None => (Keyword::Scenario, header.text),
        };

        let (step_lines, example_lines) =
            match body.iter().position(|l| is_examples_header(l.text)) {
                Some(at) => (&body[..at], &body[at..]),
                None => (body, &[][..]),
            };
        let (keys, outlines) = parse_examples(example_lines)?;

        let mut blocks: Vec<Vec<Line<'_>>> = vec![];
        for line in step_lines {
            if text::is_table_line(line.text) {
                blocks
                    .last_mut()
                    .ok_or_else(|| ParseError::OrphanTable {
                        line: line.number,
                        text: line.text.to_owned(),
                    })?
                    .push(*line);
            } else {
                blocks.push(vec![*line]);
            }
        }
        let steps = blocks
            .iter()
            .map(|block| Step::from_lines(block, file))
            .collect::<Vec<_>>();
        let solved_steps = outlines
            .iter()
            .flat_map(|row| steps.iter().map(move |step| step.solve(row)))
            .collect();

        Ok(Self {
            name: name.trim().to_owned(),
            keyword,
            steps,
            keys,
            outlines,
            solved_steps,
            described_at: ScenarioDescription::new(file, header.number),
            position: None,
        })
    }

    /// Attaches this [`Scenario`] and its steps to the given position of the
    /// owning feature.
    pub(crate) fn attach(&mut self, position: usize) {
        self.position = Some(position);
        self.steps
            .iter_mut()
            .chain(&mut self.solved_steps)
            .for_each(|s| s.attach(position));
    }

    /// Header form this [`Scenario`] was written with.
    #[must_use]
    pub const fn keyword(&self) -> Keyword {
        self.keyword
    }

    /// Indicates whether this [`Scenario`] was written as
    /// `Scenario Outline:`.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        self.keyword == Keyword::Outline
    }

    /// Template steps, literally as written.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Column keys of the example rows.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Example rows, in file order.
    #[must_use]
    pub fn outlines(&self) -> &[Row] {
        &self.outlines
    }

    /// Template steps expanded over every example row: row-major, steps in
    /// file order within each row.
    ///
    /// Empty without example rows.
    #[must_use]
    pub fn solved_steps(&self) -> &[Step] {
        &self.solved_steps
    }

    /// Steps a run executes: the solved steps when there are example rows,
    /// the template steps otherwise.
    #[must_use]
    pub fn run_steps(&self) -> &[Step] {
        if self.solved_steps.is_empty() {
            &self.steps
        } else {
            &self.solved_steps
        }
    }

    /// Where this [`Scenario`] was written.
    #[must_use]
    pub const fn described_at(&self) -> &ScenarioDescription {
        &self.described_at
    }

    /// Position of this [`Scenario`] in the owning feature.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Runs every step of this [`Scenario`] in order against the `world`.
    ///
    /// Once a step fails or is undefined, later steps are still resolved but
    /// not run.
    ///
    /// # Errors
    ///
    /// If a step body returned an unexpected error and the [`Runner`] isn't
    /// configured to recover from it.
    pub fn run<World>(
        &mut self,
        runner: &Runner<World>,
        world: &mut World,
    ) -> Result<ScenarioResult<'_>, ExecutionError> {
        let partition = self.execute(runner, world)?;
        Ok(ScenarioResult::new(self, &partition))
    }

    /// Runs every step and classifies it by position.
    pub(crate) fn execute<World>(
        &mut self,
        runner: &Runner<World>,
        world: &mut World,
    ) -> Result<Partition, ExecutionError> {
        let _span =
            tracing::info_span!("scenario", name = %self.name).entered();
        let (definitions, hooks, config) =
            (runner.steps(), runner.hooks(), runner.config());

        hooks.before_scenario(self, world);

        let mut partition = Partition::default();
        let steps = if self.solved_steps.is_empty() {
            &mut self.steps
        } else {
            &mut self.solved_steps
        };
        for (i, step) in steps.iter_mut().enumerate() {
            let mut unexpected = None;

            if step.pre_run(definitions, config.ignore_case).is_err() {
                tracing::warn!(sentence = %step.sentence, "undefined step");
                partition.undefined.push(i);
            } else {
                hooks.before_step(step, world);
                if !partition.halted() {
                    match step.run(definitions, world, config.ignore_case) {
                        Ok(()) => partition.passed.push(i),
                        Err(
                            StepError::Undefined { .. }
                            | StepError::Unbound { .. },
                        ) => {
                            partition.undefined.push(i);
                        }
                        Err(StepError::Assertion { .. }) => {
                            partition.failed.push(i);
                        }
                        Err(StepError::Unexpected { reason, .. }) => {
                            tracing::warn!(
                                sentence = %step.sentence,
                                %reason,
                                "unexpected step error"
                            );
                            if config.recover_unexpected {
                                partition.failed.push(i);
                            } else {
                                unexpected = Some(reason);
                            }
                        }
                    }
                }
            }

            hooks.after_step(step, world);

            if let Some(reason) = unexpected {
                return Err(ExecutionError {
                    scenario: self.name.clone(),
                    step: step.sentence.clone(),
                    reason,
                });
            }
        }
        let total = steps.len();

        hooks.after_scenario(self, world);

        let partition = partition.finish(total);
        tracing::debug!(
            passed = partition.passed.len(),
            failed = partition.failed.len(),
            skipped = partition.skipped.len(),
            undefined = partition.undefined.len(),
            "scenario finished"
        );
        Ok(partition)
    }
}
