// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types of parsing documents and running them.
//!
//! - [`parse`]: malformed or unreadable documents
//! - [`step`]: step body failures and step outcome errors

pub mod parse;
pub mod step;

use derive_more::with_trait::{Display, Error};

pub use self::{
    parse::ParseError,
    step::{
        BoxError, Failure, FailureKind, PanicPayloadExt, ReasonToFail,
        StepError, StepResult,
    },
};

/// Unexpected step error propagated out of a run.
///
/// Raised only when the runner is not configured to recover from unexpected
/// errors. The failed step is already stamped with its [`ReasonToFail`], and
/// every after-each hook of the step has run.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("scenario `{scenario}`, step `{step}`: {reason}")]
pub struct ExecutionError {
    /// Name of the scenario being run.
    pub scenario: String,

    /// Sentence of the step that errored.
    pub step: String,

    /// Details of the error.
    #[error(not(source))]
    pub reason: ReasonToFail,
}
