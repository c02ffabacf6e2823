// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Failures raised by step bodies and the outcome errors of resolving and
//! running a step.

use std::{any::Any, error::Error as StdError};

use derive_more::with_trait::{Display, Error};

/// Boxed error of an unexpected [`Failure`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result returned by every step body.
pub type StepResult = Result<(), Failure>;

/// Failure reported by a step body.
///
/// Any [`std::error::Error`] converts into [`Failure::Unexpected`], so `?`
/// works inside step bodies. Panics (`assert!()` and friends) are trapped and
/// treated as [`Failure::Assertion`]s.
#[derive(Debug, Display)]
pub enum Failure {
    /// Expectation of the step wasn't met.
    #[display("{_0}")]
    Assertion(String),

    /// Step couldn't be carried out at all.
    #[display("{_0}")]
    Unexpected(BoxError),
}

impl Failure {
    /// Creates a new [`Failure::Assertion`] with the given `message`.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    /// Creates a new [`Failure::Unexpected`] out of the given `error`.
    #[must_use]
    pub fn unexpected(error: impl Into<BoxError>) -> Self {
        Self::Unexpected(error.into())
    }
}

impl<E: StdError + Send + Sync + 'static> From<E> for Failure {
    fn from(error: E) -> Self {
        Self::Unexpected(Box::new(error))
    }
}

/// Kind of a [`ReasonToFail`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum FailureKind {
    /// Step body reported an assertion failure or panicked.
    #[display("assertion failed")]
    Assertion,

    /// Step body returned an unexpected error.
    #[display("unexpected error")]
    Unexpected,
}

/// Why a step failed, stamped on it after running.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{kind}: {message}")]
pub struct ReasonToFail {
    /// Kind of the failure.
    pub kind: FailureKind,

    /// Human-readable cause.
    pub message: String,

    /// Where the failure originated: a panic location or an error's source
    /// chain.
    pub context: Option<String>,
}

impl ReasonToFail {
    /// Creates a new [`ReasonToFail`] describing the given [`Failure`].
    #[must_use]
    pub fn from_failure(failure: &Failure) -> Self {
        match failure {
            Failure::Assertion(message) => Self {
                kind: FailureKind::Assertion,
                message: message.clone(),
                context: None,
            },
            Failure::Unexpected(error) => Self {
                kind: FailureKind::Unexpected,
                message: error.to_string(),
                context: Some(
                    source_chain(&**error)
                        .unwrap_or_else(|| format!("{error:?}")),
                ),
            },
        }
    }

    /// Creates a new assertion [`ReasonToFail`] out of a trapped panic.
    #[must_use]
    pub fn from_panic(message: String, location: Option<String>) -> Self {
        Self {
            kind: FailureKind::Assertion,
            message,
            context: location,
        }
    }
}

/// Joins the sources of `error` into a single `a: b: c` line.
fn source_chain(error: &(dyn StdError + 'static)) -> Option<String> {
    let mut causes = vec![];
    let mut next = error.source();
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }
    (!causes.is_empty()).then(|| causes.join(": "))
}

/// Error of resolving or running a single step.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
pub enum StepError {
    /// No registered pattern matches the step.
    #[display("undefined step: {sentence}")]
    Undefined {
        /// Sentence of the undefined step.
        sentence: String,
    },

    /// Step stays bound to a definition the given steps don't contain, as
    /// it was resolved against another registry.
    #[display("step `{sentence}` is bound to `{pattern}`, missing from the given steps")]
    Unbound {
        /// Sentence of the bound step.
        sentence: String,

        /// Pattern the step is bound to.
        pattern: String,
    },

    /// Step body reported an assertion failure.
    #[display("step `{sentence}` failed: {}", reason.message)]
    Assertion {
        /// Sentence of the failed step.
        sentence: String,

        /// Details of the failure.
        #[error(not(source))]
        reason: ReasonToFail,
    },

    /// Step body returned an unexpected error.
    #[display("step `{sentence}` errored: {}", reason.message)]
    Unexpected {
        /// Sentence of the failed step.
        sentence: String,

        /// Details of the failure.
        #[error(not(source))]
        reason: ReasonToFail,
    },
}

impl StepError {
    /// Creates a new [`StepError::Undefined`] for the given `sentence`.
    #[must_use]
    pub fn undefined(sentence: impl Into<String>) -> Self {
        Self::Undefined { sentence: sentence.into() }
    }

    /// Returns the sentence of the step this error is about.
    #[must_use]
    pub fn sentence(&self) -> &str {
        match self {
            Self::Undefined { sentence }
            | Self::Unbound { sentence, .. }
            | Self::Assertion { sentence, .. }
            | Self::Unexpected { sentence, .. } => sentence,
        }
    }

    /// Returns the [`ReasonToFail`], if the step body ran.
    #[must_use]
    pub const fn reason(&self) -> Option<&ReasonToFail> {
        match self {
            Self::Undefined { .. } | Self::Unbound { .. } => None,
            Self::Assertion { reason, .. } | Self::Unexpected { reason, .. } => {
                Some(reason)
            }
        }
    }
}

/// Conversion of panic payloads into readable messages.
pub trait PanicPayloadExt {
    /// Converts this panic payload into a readable string.
    fn to_readable_string(&self) -> String;
}

impl PanicPayloadExt for Box<dyn Any + Send + 'static> {
    fn to_readable_string(&self) -> String {
        if let Some(s) = self.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = self.downcast_ref::<&str>() {
            (*s).to_owned()
        } else {
            "Unknown panic payload".to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, fmt, num::ParseIntError};

    use super::*;

    #[derive(Debug)]
    struct Outer(ParseIntError);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "cannot read count")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    fn parse(input: &str) -> Result<u32, Failure> {
        Ok(input.parse::<u32>()?)
    }

    #[test]
    fn question_mark_gives_unexpected_failure() {
        let failure = parse("x").unwrap_err();

        assert!(matches!(failure, Failure::Unexpected(_)));
        assert_eq!(failure.to_string(), "invalid digit found in string");
    }

    #[test]
    fn reason_carries_source_chain() {
        let cause = "x".parse::<u32>().unwrap_err();
        let reason = ReasonToFail::from_failure(&Failure::from(Outer(cause)));

        assert_eq!(reason.kind, FailureKind::Unexpected);
        assert_eq!(reason.message, "cannot read count");
        assert_eq!(
            reason.context.as_deref(),
            Some("invalid digit found in string"),
        );
    }

    #[test]
    fn assertion_reason_has_no_context() {
        let reason = ReasonToFail::from_failure(&Failure::assertion("nope"));

        assert_eq!(reason.kind, FailureKind::Assertion);
        assert_eq!(reason.to_string(), "assertion failed: nope");
        assert_eq!(reason.context, None);
    }

    #[test]
    fn step_error_accessors() {
        let undefined = StepError::undefined("Given nothing");
        assert_eq!(undefined.sentence(), "Given nothing");
        assert_eq!(undefined.reason(), None);
        assert_eq!(undefined.to_string(), "undefined step: Given nothing");

        let failed = StepError::Assertion {
            sentence: "Then ok".into(),
            reason: ReasonToFail::from_panic("boom".into(), None),
        };
        assert_eq!(failed.reason().map(|r| r.message.as_str()), Some("boom"));
        assert_eq!(failed.to_string(), "step `Then ok` failed: boom");
    }

    #[test]
    fn panic_payloads_are_readable() {
        let owned: Box<dyn Any + Send> = Box::new("owned".to_owned());
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        let opaque: Box<dyn Any + Send> = Box::new(42_i32);

        assert_eq!(owned.to_readable_string(), "owned");
        assert_eq!(borrowed.to_readable_string(), "borrowed");
        assert_eq!(opaque.to_readable_string(), "Unknown panic payload");
    }
}
