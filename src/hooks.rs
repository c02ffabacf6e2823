// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Callbacks run around every feature, scenario and step.

use derive_more::with_trait::Debug;

use crate::{feature::Feature, scenario::Scenario, step::Step};

/// Callback receiving an entity being run and the world.
pub type Hook<Entity, World> = Box<dyn Fn(&Entity, &mut World)>;

/// Ordered callbacks run before and after each [`Feature`], [`Scenario`] and
/// [`Step`].
///
/// Callbacks of the same slot run in registration order.
#[derive(Debug)]
pub struct Hooks<World> {
    #[debug("{}", before_feature.len())]
    before_feature: Vec<Hook<Feature, World>>,
    #[debug("{}", after_feature.len())]
    after_feature: Vec<Hook<Feature, World>>,
    #[debug("{}", before_scenario.len())]
    before_scenario: Vec<Hook<Scenario, World>>,
    #[debug("{}", after_scenario.len())]
    after_scenario: Vec<Hook<Scenario, World>>,
    #[debug("{}", before_step.len())]
    before_step: Vec<Hook<Step, World>>,
    #[debug("{}", after_step.len())]
    after_step: Vec<Hook<Step, World>>,
}

// Implemented manually to omit redundant `World: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<World> Default for Hooks<World> {
    fn default() -> Self {
        Self {
            before_feature: vec![],
            after_feature: vec![],
            before_scenario: vec![],
            after_scenario: vec![],
            before_step: vec![],
            after_step: vec![],
        }
    }
}

impl<World> Hooks<World> {
    /// Creates a new empty set of [`Hooks`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a callback run before each [`Feature`].
    #[must_use]
    pub fn before_each_feature(
        mut self,
        hook: impl Fn(&Feature, &mut World) + 'static,
    ) -> Self {
        self.before_feature.push(Box::new(hook));
        self
    }

    /// Adds a callback run after each [`Feature`].
    #[must_use]
    pub fn after_each_feature(
        mut self,
        hook: impl Fn(&Feature, &mut World) + 'static,
    ) -> Self {
        self.after_feature.push(Box::new(hook));
        self
    }

    /// Adds a callback run before each [`Scenario`].
    ///
    /// This is the place to reset the world between scenarios.
    #[must_use]
    pub fn before_each_scenario(
        mut self,
        hook: impl Fn(&Scenario, &mut World) + 'static,
    ) -> Self {
        self.before_scenario.push(Box::new(hook));
        self
    }

    /// Adds a callback run after each [`Scenario`].
    #[must_use]
    pub fn after_each_scenario(
        mut self,
        hook: impl Fn(&Scenario, &mut World) + 'static,
    ) -> Self {
        self.after_scenario.push(Box::new(hook));
        self
    }

    /// Adds a callback run before each [`Step`] that resolved to a step
    /// definition.
    #[must_use]
    pub fn before_each_step(
        mut self,
        hook: impl Fn(&Step, &mut World) + 'static,
    ) -> Self {
        self.before_step.push(Box::new(hook));
        self
    }

    /// Adds a callback run after each [`Step`], resolved or not.
    #[must_use]
    pub fn after_each_step(
        mut self,
        hook: impl Fn(&Step, &mut World) + 'static,
    ) -> Self {
        self.after_step.push(Box::new(hook));
        self
    }

    pub(crate) fn before_feature(&self, feature: &Feature, world: &mut World) {
        self.before_feature.iter().for_each(|h| h(feature, world));
    }

    pub(crate) fn after_feature(&self, feature: &Feature, world: &mut World) {
        self.after_feature.iter().for_each(|h| h(feature, world));
    }

    pub(crate) fn before_scenario(&self, scenario: &Scenario, world: &mut World) {
        self.before_scenario.iter().for_each(|h| h(scenario, world));
    }

    pub(crate) fn after_scenario(&self, scenario: &Scenario, world: &mut World) {
        self.after_scenario.iter().for_each(|h| h(scenario, world));
    }

    pub(crate) fn before_step(&self, step: &Step, world: &mut World) {
        self.before_step.iter().for_each(|h| h(step, world));
    }

    pub(crate) fn after_step(&self, step: &Step, world: &mut World) {
        self.after_step.iter().for_each(|h| h(step, world));
    }
}
