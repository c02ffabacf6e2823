// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Steps: single executable lines of a scenario, and the registry of step
//! definitions they are matched against.
//!
//! - [`collection`]: ordered step definitions and first-match lookup
//! - [`context`]: arguments handed to a step body
//! - [`regex`]: step patterns

pub mod collection;
pub mod context;
pub mod regex;

use std::path::Path;

use derive_more::with_trait::Display;

pub use self::{
    collection::{Binding, Body, Collection},
    context::{Captures, Context, Named},
    regex::Pattern,
};
use crate::{
    error::{FailureKind, ReasonToFail, StepError},
    location::{Location, StepDescription},
    panic_trap,
    table::{Row, Table},
    text::{self, Line},
};

/// Run outcome stamped on a [`Step`].
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Outcome {
    /// [`Step`] hasn't run.
    #[default]
    #[display("unrun")]
    Unrun,

    /// [`Step`] ran successfully.
    #[display("passed")]
    Passed,

    /// [`Step`] ran and failed.
    #[display("failed")]
    Failed,
}

/// Single executable line of a scenario, with its optional data table.
///
/// A [`Step`] is bound to at most one step definition for its lifetime: once
/// [`Step::pre_run()`] succeeds the registry is never scanned again for it.
#[derive(Clone, Debug)]
pub struct Step {
    /// Literal instruction text, keyword included.
    pub sentence: String,

    table: Table,
    table_lines: Vec<String>,
    described_at: StepDescription,
    scenario: Option<usize>,
    definition: Option<Binding>,
    ran: bool,
    outcome: Outcome,
    why: Option<ReasonToFail>,
}

impl Step {
    /// Creates a new [`Step`] out of its `sentence` and raw `table_lines`.
    ///
    /// Only the lines starting with `|` feed the data table.
    #[must_use]
    pub fn new(sentence: impl Into<String>, table_lines: Vec<String>) -> Self {
        let table = Table::parse(
            table_lines.iter().filter(|l| text::is_table_line(l)),
        );
        Self {
            sentence: sentence.into(),
            table,
            table_lines,
            described_at: StepDescription::default(),
            scenario: None,
            definition: None,
            ran: false,
            outcome: Outcome::Unrun,
            why: None,
        }
    }

    /// Parses a [`Step`] out of the given `text`: its first non-blank line is
    /// the sentence, the following ones are its data table.
    #[must_use]
    pub fn from_string(text: &str) -> Self {
        Self::from_lines(&text::stripped_lines(text), None)
    }

    /// Builds a [`Step`] out of already stripped `lines`.
    pub(crate) fn from_lines(lines: &[Line<'_>], file: Option<&Path>) -> Self {
        let Some((head, rest)) = lines.split_first() else {
            return Self::new("", vec![]);
        };
        let mut step = Self::new(
            head.text,
            rest.iter().map(|l| l.text.to_owned()).collect(),
        );
        step.described_at = StepDescription::new(file, head.number);
        step
    }

    /// Attaches this [`Step`] to the scenario at the given position.
    pub(crate) fn attach(&mut self, scenario: usize) {
        self.scenario = Some(scenario);
    }

    /// Creates an unrun copy of this template [`Step`] with every `<key>` of
    /// its sentence replaced by the `row` value.
    ///
    /// Placeholders naming no column are kept as is. The data table is
    /// inherited verbatim.
    #[must_use]
    pub fn solve(&self, row: &Row) -> Self {
        let sentence = lazy_regex::regex!(r"<([^<>]+)>").replace_all(
            &self.sentence,
            |cap: &::regex::Captures<'_>| {
                let key = cap.get(1).map_or("", |m| m.as_str());
                row.get(key).map_or_else(|| cap[0].to_owned(), Clone::clone)
            },
        );
        let mut step = Self::new(sentence, self.table_lines.clone());
        step.described_at = self.described_at.clone();
        step.scenario = self.scenario;
        step
    }

    /// Column keys of the data table.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        self.table.keys()
    }

    /// Rows of the data table.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.table.rows()
    }

    /// Data table of this [`Step`].
    #[must_use]
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Raw lines the data table was parsed from.
    #[must_use]
    pub fn table_lines(&self) -> &[String] {
        &self.table_lines
    }

    /// Where this [`Step`] was written.
    #[must_use]
    pub const fn described_at(&self) -> &StepDescription {
        &self.described_at
    }

    /// Position of the owning scenario in its feature.
    #[must_use]
    pub const fn scenario(&self) -> Option<usize> {
        self.scenario
    }

    /// Step definition this [`Step`] is bound to.
    #[must_use]
    pub const fn definition(&self) -> Option<&Binding> {
        self.definition.as_ref()
    }

    /// Indicates whether this [`Step`] is bound to a step definition.
    #[must_use]
    pub const fn has_definition(&self) -> bool {
        self.definition.is_some()
    }

    /// Where the bound step definition was registered.
    #[must_use]
    pub fn defined_at(&self) -> Option<Location> {
        self.definition.as_ref().map(|d| d.location)
    }

    /// Indicates whether the body of this [`Step`] was invoked.
    #[must_use]
    pub const fn ran(&self) -> bool {
        self.ran
    }

    /// [`Outcome`] stamped on this [`Step`].
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Indicates whether this [`Step`] ran successfully.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// Indicates whether this [`Step`] ran and failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }

    /// Why this [`Step`] failed.
    #[must_use]
    pub const fn why(&self) -> Option<&ReasonToFail> {
        self.why.as_ref()
    }

    /// Binds this [`Step`] to the first step definition of `steps` matching
    /// its sentence, unless it's bound already.
    ///
    /// # Errors
    ///
    /// [`StepError::Undefined`] if nothing matches.
    pub fn pre_run<World>(
        &mut self,
        steps: &Collection<World>,
        ignore_case: bool,
    ) -> Result<&Binding, StepError> {
        if self.definition.is_none() {
            let binding = steps
                .find(&self.sentence, ignore_case)
                .ok_or_else(|| StepError::undefined(&self.sentence))?;
            tracing::trace!(
                sentence = %self.sentence,
                pattern = %binding.pattern,
                "step bound"
            );
            self.definition = Some(binding);
        }
        self.definition
            .as_ref()
            .ok_or_else(|| StepError::undefined(&self.sentence))
    }

    /// Binds and runs this [`Step`] against the `world`, stamping its
    /// [`Outcome`].
    ///
    /// # Errors
    ///
    /// - [`StepError::Undefined`] if no step definition matches.
    /// - [`StepError::Unbound`] if this [`Step`] was resolved against other
    ///   `steps`. The binding is kept.
    /// - [`StepError::Assertion`] if the body reported an assertion failure
    ///   or panicked.
    /// - [`StepError::Unexpected`] if the body returned any other error.
    pub fn run<World>(
        &mut self,
        steps: &Collection<World>,
        world: &mut World,
        ignore_case: bool,
    ) -> Result<(), StepError> {
        let binding = self.pre_run(steps, ignore_case)?.clone();
        let context = Context::new(
            self.sentence.clone(),
            self.table.clone(),
            binding.captures.clone(),
        );
        let _span =
            tracing::debug_span!("step", sentence = %self.sentence).entered();

        let reason = match panic_trap::catch(|| {
            steps.invoke(&binding, world, &context)
        }) {
            Ok(None) => {
                return Err(StepError::Unbound {
                    sentence: self.sentence.clone(),
                    pattern: binding.pattern,
                });
            }
            Ok(Some(Ok(()))) => {
                self.ran = true;
                self.outcome = Outcome::Passed;
                tracing::debug!("step passed");
                return Ok(());
            }
            Ok(Some(Err(failure))) => ReasonToFail::from_failure(&failure),
            Err(panic) => ReasonToFail::from_panic(panic.payload, panic.location),
        };
        tracing::debug!(%reason, "step failed");

        self.ran = true;
        self.outcome = Outcome::Failed;
        self.why = Some(reason.clone());

        let sentence = self.sentence.clone();
        Err(match reason.kind {
            FailureKind::Assertion => StepError::Assertion { sentence, reason },
            FailureKind::Unexpected => StepError::Unexpected { sentence, reason },
        })
    }
}
