// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Entry point running parsed features against registered step definitions.

use smart_default::SmartDefault;

use crate::{
    cli,
    error::ExecutionError,
    feature::Feature,
    hooks::Hooks,
    result::{FeatureResult, TotalResult},
    step::Collection,
};

/// Run configuration of a [`Runner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Config {
    /// Whether step sentences are matched against patterns
    /// case-insensitively.
    #[default(true)]
    pub ignore_case: bool,

    /// Whether an unexpected step error classifies the step as failed,
    /// instead of aborting the run with an [`ExecutionError`].
    pub recover_unexpected: bool,
}

impl From<cli::Opts> for Config {
    fn from(opts: cli::Opts) -> Self {
        Self {
            ignore_case: !opts.case_sensitive,
            recover_unexpected: opts.recover_unexpected,
        }
    }
}

/// Runs [`Feature`]s against a [`Collection`] of step definitions.
///
/// Everything runs sequentially, in file order, on the caller's thread. The
/// `World` is handed by `&mut` to every step body and hook and is never reset
/// by the [`Runner`] itself.
#[derive(Debug)]
pub struct Runner<World> {
    steps: Collection<World>,
    hooks: Hooks<World>,
    config: Config,
}

impl<World> Runner<World> {
    /// Creates a new [`Runner`] over the given step definitions, without
    /// hooks and with the default [`Config`].
    #[must_use]
    pub fn new(steps: Collection<World>) -> Self {
        Self { steps, hooks: Hooks::default(), config: Config::default() }
    }

    /// Replaces the [`Hooks`] of this [`Runner`].
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks<World>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the [`Config`] of this [`Runner`].
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Configures this [`Runner`] from parsed command line [`cli::Opts`].
    #[must_use]
    pub fn with_cli(self, opts: cli::Opts) -> Self {
        self.with_config(opts.into())
    }

    /// Step definitions of this [`Runner`].
    #[must_use]
    pub const fn steps(&self) -> &Collection<World> {
        &self.steps
    }

    /// [`Hooks`] of this [`Runner`].
    #[must_use]
    pub const fn hooks(&self) -> &Hooks<World> {
        &self.hooks
    }

    /// [`Config`] of this [`Runner`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a single [`Feature`].
    ///
    /// # Errors
    ///
    /// If a step body returned an unexpected error and
    /// [`Config::recover_unexpected`] is off.
    pub fn run_feature<'f>(
        &self,
        feature: &'f mut Feature,
        world: &mut World,
    ) -> Result<FeatureResult<'f>, ExecutionError> {
        feature.run(self, world)
    }

    /// Runs every given [`Feature`] in order and tallies their results.
    ///
    /// # Errors
    ///
    /// If a step body returned an unexpected error and
    /// [`Config::recover_unexpected`] is off. The remaining features are not
    /// run then.
    pub fn run<'f, I>(
        &self,
        features: I,
        world: &mut World,
    ) -> Result<TotalResult<'f>, ExecutionError>
    where
        I: IntoIterator<Item = &'f mut Feature>,
    {
        let results = features
            .into_iter()
            .map(|feature| feature.run(self, world))
            .collect::<Result<Vec<_>, _>>()?;
        let total = TotalResult::new(results);

        tracing::info!(
            features = total.features_ran(),
            features_passed = total.features_passed(),
            scenarios = total.scenarios_ran(),
            scenarios_passed = total.scenarios_passed(),
            steps = total.steps(),
            steps_failed = total.steps_failed(),
            steps_undefined = total.steps_undefined(),
            "run finished"
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Runner};
    use crate::{cli::Opts, step::Collection};

    #[test]
    fn defaults_ignore_case_and_propagate() {
        let config = Config::default();

        assert!(config.ignore_case);
        assert!(!config.recover_unexpected);
    }

    #[test]
    fn cli_overrides_config() {
        let runner = Runner::new(Collection::<()>::new()).with_cli(Opts {
            case_sensitive: true,
            recover_unexpected: true,
        });

        assert_eq!(
            *runner.config(),
            Config { ignore_case: false, recover_unexpected: true },
        );
    }
}
