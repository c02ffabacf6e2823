// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Command line options of a [`Runner`], composable into a user's own
//! [`clap`] parser.
//!
//! ```
//! # use cress::cli;
//! #[derive(clap::Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     runner: cli::Opts,
//! }
//! ```
//!
//! [`Runner`]: crate::Runner

/// CLI options of a [`Runner`].
///
/// [`Runner`]: crate::Runner
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::Args)]
#[group(skip)]
pub struct Opts {
    /// Match step sentences against step patterns case-sensitively.
    #[arg(long, global = true)]
    pub case_sensitive: bool,

    /// Treat unexpected step errors as ordinary step failures instead of
    /// aborting the run.
    #[arg(long, global = true)]
    pub recover_unexpected: bool,
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::Opts;
    use crate::runner::Config;

    #[derive(clap::Parser)]
    struct Args {
        #[command(flatten)]
        runner: Opts,
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["test", "--case-sensitive"]).unwrap();

        assert!(args.runner.case_sensitive);
        assert!(!args.runner.recover_unexpected);
        assert!(!Config::from(args.runner).ignore_case);
    }

    #[test]
    fn no_flags_give_default_config() {
        let args = Args::try_parse_from(["test"]).unwrap();

        assert_eq!(Config::from(args.runner), Config::default());
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(Args::try_parse_from(["test", "--fail-fast"]).is_err());
    }
}
