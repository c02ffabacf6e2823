// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcomes of running scenarios and features, and their totals.
//!
//! Results borrow the model they describe, so they're built only after every
//! step of it is stamped.

use crate::{feature::Feature, scenario::Scenario, step::Step};

/// Positions of steps in each outcome class of a single scenario run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Partition {
    pub(crate) passed: Vec<usize>,
    pub(crate) failed: Vec<usize>,
    pub(crate) undefined: Vec<usize>,
    pub(crate) skipped: Vec<usize>,
}

impl Partition {
    /// Indicates whether a step has already failed or was undefined.
    pub(crate) fn halted(&self) -> bool {
        !self.failed.is_empty() || !self.undefined.is_empty()
    }

    /// Classifies every step of `0..total` that is in no other class as
    /// skipped.
    pub(crate) fn finish(mut self, total: usize) -> Self {
        self.skipped = (0..total)
            .filter(|i| {
                !self.passed.contains(i)
                    && !self.failed.contains(i)
                    && !self.undefined.contains(i)
            })
            .collect();
        self
    }
}

/// Outcome of running a single [`Scenario`].
///
/// Every run step of the [`Scenario`] appears in exactly one of the four step
/// lists, in run order.
#[derive(Clone, Debug)]
pub struct ScenarioResult<'f> {
    scenario: &'f Scenario,
    steps_passed: Vec<&'f Step>,
    steps_failed: Vec<&'f Step>,
    steps_skipped: Vec<&'f Step>,
    steps_undefined: Vec<&'f Step>,
    total_steps: usize,
}

impl<'f> ScenarioResult<'f> {
    /// Builds a [`ScenarioResult`] resolving the `partition` positions
    /// against the run steps of the `scenario`.
    pub(crate) fn new(scenario: &'f Scenario, partition: &Partition) -> Self {
        let steps = scenario.run_steps();
        let pick = |positions: &[usize]| {
            positions
                .iter()
                .filter_map(|&i| steps.get(i))
                .collect::<Vec<_>>()
        };

        let steps_passed = pick(&partition.passed);
        let steps_failed = pick(&partition.failed);
        let steps_skipped = pick(&partition.skipped);
        let steps_undefined = pick(&partition.undefined);
        let total_steps = steps_passed.len()
            + steps_failed.len()
            + steps_skipped.len()
            + steps_undefined.len();

        Self {
            scenario,
            steps_passed,
            steps_failed,
            steps_skipped,
            steps_undefined,
            total_steps,
        }
    }

    /// [`Scenario`] this result is about.
    #[must_use]
    pub const fn scenario(&self) -> &'f Scenario {
        self.scenario
    }

    /// Steps that ran successfully.
    #[must_use]
    pub fn steps_passed(&self) -> &[&'f Step] {
        &self.steps_passed
    }

    /// Steps that ran and failed.
    #[must_use]
    pub fn steps_failed(&self) -> &[&'f Step] {
        &self.steps_failed
    }

    /// Steps that didn't run because an earlier one failed or was undefined.
    #[must_use]
    pub fn steps_skipped(&self) -> &[&'f Step] {
        &self.steps_skipped
    }

    /// Steps matching no step definition.
    #[must_use]
    pub fn steps_undefined(&self) -> &[&'f Step] {
        &self.steps_undefined
    }

    /// Number of steps this result accounts for.
    #[must_use]
    pub const fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Indicates whether every step passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.total_steps == self.steps_passed.len()
    }
}

/// Outcome of running a single [`Feature`].
#[derive(Clone, Debug)]
pub struct FeatureResult<'f> {
    feature: &'f Feature,
    scenario_results: Vec<ScenarioResult<'f>>,
}

impl<'f> FeatureResult<'f> {
    pub(crate) const fn new(
        feature: &'f Feature,
        scenario_results: Vec<ScenarioResult<'f>>,
    ) -> Self {
        Self { feature, scenario_results }
    }

    /// [`Feature`] this result is about.
    #[must_use]
    pub const fn feature(&self) -> &'f Feature {
        self.feature
    }

    /// Results of every scenario, in file order.
    #[must_use]
    pub fn scenario_results(&self) -> &[ScenarioResult<'f>] {
        &self.scenario_results
    }

    /// Indicates whether every scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.scenario_results.iter().all(ScenarioResult::passed)
    }
}

/// Totals over the results of many features.
#[derive(Clone, Debug, Default)]
pub struct TotalResult<'f> {
    feature_results: Vec<FeatureResult<'f>>,
    steps_passed: usize,
    steps_failed: usize,
    steps_skipped: usize,
    steps_undefined: usize,
    steps: usize,
    proposed_definitions: Vec<&'f Step>,
}

impl<'f> TotalResult<'f> {
    /// Tallies the given [`FeatureResult`]s.
    #[must_use]
    pub fn new(feature_results: Vec<FeatureResult<'f>>) -> Self {
        let mut total = Self::default();
        for result in feature_results.iter().flat_map(|f| &f.scenario_results) {
            total.steps_passed += result.steps_passed.len();
            total.steps_failed += result.steps_failed.len();
            total.steps_skipped += result.steps_skipped.len();
            total.steps_undefined += result.steps_undefined.len();
            total.steps += result.total_steps;
            total
                .proposed_definitions
                .extend(result.steps_undefined.iter().copied());
        }
        total.feature_results = feature_results;
        total
    }

    /// Results of every feature, in run order.
    #[must_use]
    pub fn feature_results(&self) -> &[FeatureResult<'f>] {
        &self.feature_results
    }

    /// Results of every scenario of every feature, in run order.
    pub fn scenario_results(&self) -> impl Iterator<Item = &ScenarioResult<'f>> {
        self.feature_results.iter().flat_map(|f| &f.scenario_results)
    }

    /// Number of steps that ran successfully.
    #[must_use]
    pub const fn steps_passed(&self) -> usize {
        self.steps_passed
    }

    /// Number of steps that ran and failed.
    #[must_use]
    pub const fn steps_failed(&self) -> usize {
        self.steps_failed
    }

    /// Number of steps that didn't run.
    #[must_use]
    pub const fn steps_skipped(&self) -> usize {
        self.steps_skipped
    }

    /// Number of steps matching no step definition.
    #[must_use]
    pub const fn steps_undefined(&self) -> usize {
        self.steps_undefined
    }

    /// Number of steps accounted for.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Undefined steps, in run order, to propose definitions for.
    #[must_use]
    pub fn proposed_definitions(&self) -> &[&'f Step] {
        &self.proposed_definitions
    }

    /// Number of features run.
    #[must_use]
    pub fn features_ran(&self) -> usize {
        self.feature_results.len()
    }

    /// Number of features whose every scenario passed.
    #[must_use]
    pub fn features_passed(&self) -> usize {
        self.feature_results.iter().filter(|f| f.passed()).count()
    }

    /// Number of scenarios run.
    #[must_use]
    pub fn scenarios_ran(&self) -> usize {
        self.scenario_results().count()
    }

    /// Number of scenarios whose every step passed.
    #[must_use]
    pub fn scenarios_passed(&self) -> usize {
        self.scenario_results().filter(|s| s.passed()).count()
    }
}
