//! Per-thread request context
//!
//! Each thread owns exactly one [`Context`]. It is created empty at first use,
//! mutated only by its own thread, and dropped at thread exit, so no log call
//! ever takes a lock to read it.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Ambient metadata attached to every structured log call on this thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub request_id: String,
    pub module: String,
    pub fields: BTreeMap<String, String>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.request_id.is_empty() && self.module.is_empty() && self.fields.is_empty()
    }
}

thread_local! {
    static TLS_CONTEXT: RefCell<Context> = RefCell::new(Context::new());
}

/// Replace this thread's context wholesale. No merging is performed.
pub fn set_context(ctx: Context) {
    TLS_CONTEXT.with(|c| *c.borrow_mut() = ctx);
}

/// Reset this thread's context to the empty default.
pub fn clear_context() {
    TLS_CONTEXT.with(|c| *c.borrow_mut() = Context::new());
}

/// Snapshot of this thread's context.
pub fn current_context() -> Context {
    TLS_CONTEXT.with(|c| c.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_wholesale() {
        set_context(Context::new().with_field("a", "1").with_field("b", "2"));
        set_context(Context::new().with_field("c", "3"));

        let ctx = current_context();
        assert!(!ctx.fields.contains_key("a"));
        assert_eq!(ctx.fields.get("c").map(String::as_str), Some("3"));
        clear_context();
    }

    #[test]
    fn clear_resets_to_default() {
        set_context(
            Context::new()
                .with_request_id("r-9")
                .with_module("auth")
                .with_field("k", "v"),
        );
        clear_context();
        assert_eq!(current_context(), Context::new());
    }

    #[test]
    fn context_is_thread_local() {
        set_context(Context::new().with_request_id("main-thread"));

        let other = std::thread::spawn(current_context)
            .join()
            .expect("thread panicked");
        assert!(other.is_empty());

        assert_eq!(current_context().request_id, "main-thread");
        clear_context();
    }
}
