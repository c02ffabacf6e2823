// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Features: whole documents of scenarios.

use std::{fs, path::Path};

use itertools::Itertools as _;
use lazy_regex::{regex_captures, regex_is_match};

use crate::{
    error::{ExecutionError, ParseError},
    location::FeatureDescription,
    result::{FeatureResult, ScenarioResult},
    runner::Runner,
    scenario::Scenario,
    text::{self, Line},
};

/// Parsed feature document: a name, a free-text description and ordered
/// [`Scenario`]s.
#[derive(Clone, Debug)]
pub struct Feature {
    /// Name given in the `Feature:` header.
    pub name: String,

    description: String,
    scenarios: Vec<Scenario>,
    described_at: FeatureDescription,
}

/// Indicates whether `line` opens a new scenario block.
fn is_scenario_header(line: &str) -> bool {
    regex_is_match!(r"(?i)^Scenario(?: Outline)?:(?:\s|$)", line)
}

impl Feature {
    /// Parses a [`Feature`] out of the given document `text`.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingFeature`] if there is no `Feature:` header.
    /// - [`ParseError::OrphanTable`] if a table row precedes every step of
    ///   its scenario.
    pub fn from_string(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, None)
    }

    /// Reads and parses the feature document at the given `path`, recording
    /// the `path` in every location.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Io`] if the file cannot be read.
    /// - Any error of [`Feature::from_string()`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, Some(path))
    }

    fn parse(text: &str, file: Option<&Path>) -> Result<Self, ParseError> {
        let lines = text::stripped_lines(text);
        let (header, name) = lines
            .iter()
            .find_map(|l| {
                regex_captures!(r"(?i)Feature:(.*)", l.text).map(|(_, n)| (l, n))
            })
            .ok_or(ParseError::MissingFeature)?;
        let body = lines
            .iter()
            .position(|l| l.number > header.number)
            .map_or(&[][..], |at| &lines[at..]);

        let first_scenario = body
            .iter()
            .position(|l| is_scenario_header(l.text))
            .unwrap_or(body.len());
        let (description, rest) = body.split_at(first_scenario);

        let mut blocks: Vec<Vec<Line<'_>>> = vec![];
        for line in rest {
            match blocks.last_mut() {
                Some(block) if !is_scenario_header(line.text) => {
                    block.push(*line);
                }
                _ => blocks.push(vec![*line]),
            }
        }
        let scenarios = blocks
            .iter()
            .enumerate()
            .map(|(position, block)| {
                let mut scenario = Scenario::from_lines(block, file)?;
                scenario.attach(position);
                Ok(scenario)
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let feature = Self {
            name: name.trim().to_owned(),
            description: description.iter().map(|l| l.text).join("\n"),
            scenarios,
            described_at: FeatureDescription {
                file: file.map(Path::to_path_buf),
                line: Some(header.number),
                description_at: description.iter().map(|l| l.number).collect(),
            },
        };
        tracing::debug!(
            name = %feature.name,
            scenarios = feature.scenarios.len(),
            "feature parsed"
        );
        Ok(feature)
    }

    /// Free-text description, one line per description line.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Scenarios, in file order.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Where this [`Feature`] and its description lines were written.
    #[must_use]
    pub const fn described_at(&self) -> &FeatureDescription {
        &self.described_at
    }

    /// Runs every [`Scenario`] in file order, regardless of how the earlier
    /// ones went.
    ///
    /// # Errors
    ///
    /// If a step body returned an unexpected error and the [`Runner`] isn't
    /// configured to recover from it.
    pub fn run<World>(
        &mut self,
        runner: &Runner<World>,
        world: &mut World,
    ) -> Result<FeatureResult<'_>, ExecutionError> {
        let _span = tracing::info_span!("feature", name = %self.name).entered();

        runner.hooks().before_feature(self, world);
        let partitions = self
            .scenarios
            .iter_mut()
            .map(|scenario| scenario.execute(runner, world))
            .collect::<Result<Vec<_>, _>>()?;
        runner.hooks().after_feature(self, world);

        let this = &*self;
        Ok(FeatureResult::new(
            this,
            this.scenarios
                .iter()
                .zip(&partitions)
                .map(|(scenario, partition)| ScenarioResult::new(scenario, partition))
                .collect(),
        ))
    }
}
