// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Trapping of panics raised by step bodies.

use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
};

use once_cell::sync::Lazy;

use crate::error::PanicPayloadExt as _;

thread_local! {
    /// Whether the current thread is inside [`catch()`].
    static TRAPPING: Cell<bool> = const { Cell::new(false) };

    /// Location of the last panic trapped on the current thread.
    static LAST_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Process-wide panic hook, installed once on the first [`catch()`].
///
/// Panics raised inside [`catch()`] only have their location recorded.
/// Any other panic goes to the hook that was installed before.
static HOOK: Lazy<()> = Lazy::new(|| {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let trapping = TRAPPING.try_with(Cell::get).unwrap_or_default();
        if !trapping {
            previous(info);
            return;
        }
        let location = info
            .location()
            .map(|at| format!("{}:{}:{}", at.file(), at.line(), at.column()));
        _ = LAST_LOCATION.try_with(|slot| *slot.borrow_mut() = location);
    }));
});

/// Panic caught while running a step body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PanicDetails {
    /// Readable panic message.
    pub(crate) payload: String,

    /// `file:line:column` of the panic, if the hook saw it.
    pub(crate) location: Option<String>,
}

/// Runs `f`, converting a panic into [`PanicDetails`].
///
/// Trapped panics aren't printed. The hook is never swapped per call, so
/// concurrent and nested traps don't interfere.
pub(crate) fn catch<T>(f: impl FnOnce() -> T) -> Result<T, PanicDetails> {
    Lazy::force(&HOOK);

    let outer = TRAPPING.with(|t| t.replace(true));
    LAST_LOCATION.with(|l| l.borrow_mut().take());

    let result = panic::catch_unwind(AssertUnwindSafe(f));

    TRAPPING.with(|t| t.set(outer));
    result.map_err(|payload| PanicDetails {
        payload: payload.to_readable_string(),
        location: LAST_LOCATION.with(|l| l.borrow_mut().take()),
    })
}
