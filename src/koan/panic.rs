//! Catching panics raised by koan bodies and lesson builders.
//!
//! The process-wide panic hook is replaced once. While a thread is inside
//! [`catch`], panics on that thread are recorded silently; everywhere else the
//! previous hook runs unchanged.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use super::SourceLocation;

static INSTALL_HOOK: Once = Once::new();

thread_local! {
    static CATCH_DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_LOCATION: RefCell<Option<SourceLocation>> = const { RefCell::new(None) };
}

/// A panic caught while running lesson code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Panicked {
    pub message: String,
    pub location: Option<SourceLocation>,
}

/// Runs `f`, turning a panic into [`Panicked`].
pub(crate) fn catch<F, R>(f: F) -> Result<R, Panicked>
where
    F: FnOnce() -> R,
{
    install_hook();
    CATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));
    let location = LAST_LOCATION.with(|slot| slot.borrow_mut().take());

    result.map_err(|payload| Panicked {
        message: payload_message(payload.as_ref()),
        location,
    })
}

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let catching = CATCH_DEPTH
                .try_with(|depth| depth.get() > 0)
                .unwrap_or(false);
            if !catching {
                previous(info);
                return;
            }
            let location = info.location().map(SourceLocation::from);
            let _ = LAST_LOCATION.try_with(|slot| *slot.borrow_mut() = location);
        }));
    });
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return s.clone();
    }
    "panicked with a non-string payload".to_string()
}
