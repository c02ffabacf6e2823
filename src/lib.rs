// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Synchronous parser and runner of Given/When/Then feature documents.
//!
//! A [`Feature`] is parsed out of plain text into [`Scenario`]s of [`Step`]s,
//! then run by a [`Runner`] against a [`Collection`] of regex step
//! definitions. Every step is stamped with its outcome, and the run yields
//! results borrowing the parsed model.
//!
//! ```
//! use cress::{Collection, Failure, Feature, Runner};
//!
//! let steps = Collection::<u32>::new()
//!     .step(r"I have (\d+) cucumbers", |w, ctx| {
//!         *w = ctx.get_capture(0).unwrap_or_default().parse()?;
//!         Ok(())
//!     })?
//!     .step(r"I eat (\d+)", |w, ctx| {
//!         *w -= ctx.get_capture(0).unwrap_or_default().parse::<u32>()?;
//!         Ok(())
//!     })?
//!     .step(r"(?P<left>\d+) are left", |w, ctx| {
//!         let left = ctx.get_named_capture("left").unwrap_or_default();
//!         if w.to_string() == left {
//!             Ok(())
//!         } else {
//!             Err(Failure::assertion(format!("{w} are left instead")))
//!         }
//!     })?;
//!
//! let mut feature = Feature::from_string(
//!     "Feature: Eating
//!        Scenario Outline: eat some
//!          Given I have <start> cucumbers
//!          When I eat <eat>
//!          Then <left> are left
//!        Examples:
//!          | start | eat | left |
//!          | 12    | 5   | 7    |
//!          | 20    | 5   | 15   |",
//! )?;
//!
//! let total = Runner::new(steps).run([&mut feature], &mut 0)?;
//!
//! assert_eq!(total.steps_passed(), 6);
//! assert_eq!(total.scenarios_passed(), 1);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod error;
pub mod feature;
pub mod hooks;
pub mod location;
mod panic_trap;
mod represent;
pub mod result;
pub mod runner;
pub mod scenario;
pub mod step;
pub mod table;
mod text;

#[doc(inline)]
pub use self::{
    error::{ExecutionError, Failure, ParseError, StepError, StepResult},
    feature::Feature,
    hooks::Hooks,
    location::Location,
    result::{FeatureResult, ScenarioResult, TotalResult},
    runner::{Config, Runner},
    scenario::Scenario,
    step::{Collection, Context, Step},
    table::Table,
};
