// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Ordered registry of step definitions.

use std::cell::Cell;

use derive_more::with_trait::Debug;

use super::{
    context::{Captures, Context},
    regex::Pattern,
};
use crate::{error::StepResult, location::Location};

/// Body of a step definition.
pub type Body<World> = Box<dyn Fn(&mut World, &Context) -> StepResult>;

/// Single registered step definition.
struct Definition<World> {
    pattern: Pattern,
    location: Location,
    body: Body<World>,
}

/// Step definition a step sentence was matched to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Binding {
    /// Position of the definition in its [`Collection`].
    pub index: usize,

    /// Source text of the matched pattern.
    pub pattern: String,

    /// Where the definition was registered.
    pub location: Location,

    /// Capture groups of the match.
    pub captures: Captures,
}

/// Collection of step definitions, searched in registration order.
///
/// The first pattern found anywhere in a sentence wins: there is neither
/// ambiguity detection nor specificity ranking.
#[derive(Debug)]
pub struct Collection<World> {
    #[debug("{:?}",
        definitions.iter()
            .map(|d| (d.pattern.as_str(), d.location.to_string()))
            .collect::<Vec<_>>(),
    )]
    definitions: Vec<Definition<World>>,

    /// Number of [`Collection::find()`] scans performed so far.
    lookups: Cell<usize>,
}

// Implemented manually to omit redundant `World: Default` trait bound, imposed
// by `#[derive(Default)]`.
impl<World> Default for Collection<World> {
    fn default() -> Self {
        Self { definitions: vec![], lookups: Cell::new(0) }
    }
}

impl<World> Collection<World> {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step definition matching the given `pattern`, located at
    /// the calling code.
    ///
    /// # Errors
    ///
    /// If `pattern` is not a valid regular expression.
    #[track_caller]
    pub fn step<F>(self, pattern: &str, body: F) -> Result<Self, regex::Error>
    where
        F: Fn(&mut World, &Context) -> StepResult + 'static,
    {
        self.step_at(Location::caller(), pattern, body)
    }

    /// Registers a step definition matching the given `pattern`, located at
    /// the given [`Location`].
    ///
    /// # Errors
    ///
    /// If `pattern` is not a valid regular expression.
    pub fn step_at<F>(
        mut self,
        location: Location,
        pattern: &str,
        body: F,
    ) -> Result<Self, regex::Error>
    where
        F: Fn(&mut World, &Context) -> StepResult + 'static,
    {
        self.definitions.push(Definition {
            pattern: Pattern::new(pattern)?,
            location,
            body: Box::new(body),
        });
        Ok(self)
    }

    /// Number of registered step definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Indicates whether no step definitions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterates over the registered [`Pattern`]s and their [`Location`]s, in
    /// registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Pattern, Location)> {
        self.definitions.iter().map(|d| (&d.pattern, d.location))
    }

    /// Finds the first step definition whose pattern occurs in the given
    /// `sentence`.
    #[must_use]
    pub fn find(&self, sentence: &str, ignore_case: bool) -> Option<Binding> {
        self.lookups.set(self.lookups.get() + 1);

        self.definitions.iter().enumerate().find_map(|(index, def)| {
            let captures = def.pattern.captures(sentence, ignore_case)?;
            Some(Binding {
                index,
                pattern: def.pattern.as_str().to_owned(),
                location: def.location,
                captures,
            })
        })
    }

    /// Number of [`Collection::find()`] scans performed so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Invokes the body of the bound step definition.
    ///
    /// [`None`] if the `binding` doesn't point into this [`Collection`].
    pub(crate) fn invoke(
        &self,
        binding: &Binding,
        world: &mut World,
        context: &Context,
    ) -> Option<StepResult> {
        self.definitions
            .get(binding.index)
            .filter(|d| d.pattern.as_str() == binding.pattern)
            .map(|d| (d.body)(world, context))
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, Context};
    use crate::{error::Failure, step::Captures, table::Table};

    fn collection() -> Collection<Vec<String>> {
        Collection::<Vec<String>>::new()
            .step(r"^Given I have (\d+) apples?$", |w, ctx| {
                w.push(format!("have {}", ctx.get_capture(0).unwrap_or_default()));
                Ok(())
            })
            .and_then(|c| {
                c.step(r"apples", |_, _| Err(Failure::assertion("never")))
            })
            .unwrap()
    }

    #[test]
    fn first_registered_match_wins() {
        let steps = collection();

        let binding = steps.find("Given I have 1 apple", false).unwrap();
        assert_eq!(binding.index, 0);
        assert_eq!(binding.captures, Captures::Positional(vec!["1".into()]));

        let binding = steps.find("Then 3 apples remain", false).unwrap();
        assert_eq!(binding.index, 1);
        assert_eq!(binding.pattern, "apples");
    }

    #[test]
    fn counts_lookups() {
        let steps = collection();
        assert_eq!(steps.lookups(), 0);

        assert!(steps.find("Given pears", true).is_none());
        assert!(steps.find("GIVEN I HAVE 2 APPLES", true).is_some());
        assert_eq!(steps.lookups(), 2);
    }

    #[test]
    fn records_registration_site() {
        let steps = collection();

        let (_, location) = steps.iter().next().unwrap();
        assert_eq!(location.path, file!());
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn invokes_bound_body() {
        let steps = collection();
        let binding = steps.find("Given I have 4 apples", false).unwrap();
        let context = Context::new(
            "Given I have 4 apples".into(),
            Table::default(),
            binding.captures.clone(),
        );
        let mut world = vec![];

        assert!(matches!(steps.invoke(&binding, &mut world, &context), Some(Ok(()))));
        assert_eq!(world, ["have 4"]);
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(Collection::<()>::new().step("[", |_, _| Ok(())).is_err());
    }

    #[test]
    fn debug_lists_patterns() {
        let debug = format!("{:?}", collection());

        assert!(debug.contains("apples"), "{debug}");
    }
}
