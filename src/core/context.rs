//! Ambient context scopes
//!
//! Each unit of concurrent work owns an isolated scope of key-value
//! bindings. Bindings made in one scope are never visible to another
//! scope: a spawned unit of work starts from an explicit [`snapshot`] of
//! its parent's bindings, after which the two evolve independently.
//!
//! The scope lives in thread-local storage, so reads never contend and a
//! write only affects the writing thread. Hand-off to spawned work (an OS
//! thread or an executor task) is explicit: capture a [`ScopeSnapshot`]
//! before spawning and [`ScopeSnapshot::attach`] it inside the spawned
//! body.

use super::fields::{EventFields, FieldValue};
use std::cell::RefCell;

thread_local! {
    static SCOPE: RefCell<EventFields> = RefCell::new(EventFields::new());
}

/// Set or overwrite one binding in the current scope.
pub fn bind<K, V>(key: K, value: V)
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    SCOPE.with(|scope| scope.borrow_mut().add_field(key, value));
}

/// Set or overwrite several bindings in the current scope.
pub fn bind_fields(fields: EventFields) {
    SCOPE.with(|scope| {
        let mut current = scope.borrow_mut();
        for (key, value) in fields.iter() {
            current.add_field(key, value.clone());
        }
    });
}

/// Remove one binding from the current scope. Absent keys are a no-op.
pub fn unbind(key: &str) {
    SCOPE.with(|scope| {
        scope.borrow_mut().remove(key);
    });
}

/// Remove the listed bindings from the current scope.
pub fn unbind_all<'a, I>(keys: I)
where
    I: IntoIterator<Item = &'a str>,
{
    SCOPE.with(|scope| {
        let mut current = scope.borrow_mut();
        for key in keys {
            current.remove(key);
        }
    });
}

/// Remove every binding from the current scope. Ancestor and sibling
/// scopes are unaffected.
pub fn clear() {
    SCOPE.with(|scope| {
        *scope.borrow_mut() = EventFields::new();
    });
}

/// Merge the current scope's bindings into an event's attribute set,
/// first-writer-wins: a key already present in the event is never
/// overwritten.
pub fn merge(event: &mut EventFields) {
    SCOPE.with(|scope| {
        let current = scope.borrow();
        for (key, value) in current.iter() {
            event.add_missing(key, value.clone());
        }
    });
}

/// Capture the current scope's bindings for hand-off to a spawned unit of
/// work.
#[must_use]
pub fn snapshot() -> ScopeSnapshot {
    SCOPE.with(|scope| ScopeSnapshot {
        fields: scope.borrow().clone(),
    })
}

/// Bind a set of keys for the duration of one nested operation.
///
/// Dropping the returned guard unbinds exactly those keys, including on
/// unwind. An unbound key reverts to absent, never to a stale previous
/// value.
#[must_use]
pub fn scoped(fields: EventFields) -> ScopeGuard {
    let keys: Vec<String> = fields.keys().map(str::to_string).collect();
    bind_fields(fields);
    ScopeGuard { keys }
}

/// A parent scope's bindings captured at spawn time.
///
/// The snapshot is inert data: mutations in the parent after the capture
/// are invisible to whoever attaches it, and mutations in the attached
/// scope are invisible to the parent and to sibling units of work.
#[derive(Debug, Clone, Default)]
pub struct ScopeSnapshot {
    fields: EventFields,
}

impl ScopeSnapshot {
    /// Install the snapshot as the calling thread's scope.
    ///
    /// The previous scope contents are saved and restored when the
    /// returned guard drops, so attaching inside a pooled worker does not
    /// leak bindings into unrelated work scheduled on the same thread.
    #[must_use]
    pub fn attach(&self) -> AttachGuard {
        let previous = SCOPE.with(|scope| scope.replace(self.fields.clone()));
        AttachGuard { previous }
    }

    /// The captured bindings.
    #[must_use]
    pub fn fields(&self) -> &EventFields {
        &self.fields
    }
}

/// Restores the scope that was active before [`ScopeSnapshot::attach`].
pub struct AttachGuard {
    previous: EventFields,
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        SCOPE.with(|scope| {
            *scope.borrow_mut() = std::mem::take(&mut self.previous);
        });
    }
}

/// Unbinds the keys bound by [`scoped`] when dropped.
pub struct ScopeGuard {
    keys: Vec<String>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE.with(|scope| {
            let mut current = scope.borrow_mut();
            for key in &self.keys {
                current.remove(key);
            }
        });
    }
}

/// Capability interface for ambient context sources consulted during
/// emission.
///
/// Loggers hold an ordered list of processors and invoke [`merge`] on each
/// while assembling an event. None of the operations can fail.
///
/// [`merge`]: ContextProcessor::merge
pub trait ContextProcessor: Send + Sync {
    /// Merge visible bindings into the event, first-writer-wins.
    fn merge(&self, event: &mut EventFields);

    /// Set bindings in the calling unit of work's scope.
    fn bind(&self, fields: EventFields);

    /// Remove the listed bindings from the calling scope.
    fn unbind(&self, keys: &[&str]);

    /// Remove all bindings from the calling scope.
    fn clear(&self);
}

/// The scope-backed processor registered by `enable_context`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeProcessor;

impl ContextProcessor for ScopeProcessor {
    fn merge(&self, event: &mut EventFields) {
        merge(event);
    }

    fn bind(&self, fields: EventFields) {
        bind_fields(fields);
    }

    fn unbind(&self, keys: &[&str]) {
        unbind_all(keys.iter().copied());
    }

    fn clear(&self) {
        clear();
    }
}

/// A processor that contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProcessor;

impl ContextProcessor for NoopProcessor {
    fn merge(&self, _event: &mut EventFields) {}

    fn bind(&self, _fields: EventFields) {}

    fn unbind(&self, _keys: &[&str]) {}

    fn clear(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test runs in its own scope guard-free by clearing first; the
    // test harness may reuse threads between tests.
    fn reset() {
        clear();
    }

    #[test]
    fn test_merge_empty_scope() {
        reset();
        let mut event = EventFields::new().with_field("a", 1);
        merge(&mut event);
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn test_merge_does_not_override() {
        reset();
        bind("a", 5);
        bind("c", true);

        let mut event = EventFields::new().with_field("a", 1).with_field("b", "foo");
        merge(&mut event);

        assert_eq!(event.get("a"), Some(&FieldValue::Int(1)));
        assert_eq!(event.get("b"), Some(&FieldValue::String("foo".to_string())));
        assert_eq!(event.get("c"), Some(&FieldValue::Bool(true)));
    }

    #[test]
    fn test_bind_accumulates_and_overwrites() {
        reset();
        bind("a", 5);
        bind("b", "foo");
        bind("b", "bar");

        let mut event = EventFields::new();
        merge(&mut event);

        assert_eq!(event.get("a"), Some(&FieldValue::Int(5)));
        assert_eq!(event.get("b"), Some(&FieldValue::String("bar".to_string())));
    }

    #[test]
    fn test_unbind_absent_key_is_noop() {
        reset();
        bind("a", 1);
        unbind("missing");

        let mut event = EventFields::new();
        merge(&mut event);
        assert_eq!(event.len(), 1);
    }

    #[test]
    fn test_clear_empties_scope() {
        reset();
        bind("a", 1);
        bind("b", 2);
        clear();

        let mut event = EventFields::new();
        merge(&mut event);
        assert!(event.is_empty());
    }

    #[test]
    fn test_scoped_guard_unbinds_on_drop() {
        reset();
        bind("outer", 1);
        {
            let _guard = scoped(EventFields::new().with_field("inner", 2));
            let mut event = EventFields::new();
            merge(&mut event);
            assert!(event.contains_key("outer"));
            assert!(event.contains_key("inner"));
        }

        let mut event = EventFields::new();
        merge(&mut event);
        assert!(event.contains_key("outer"));
        assert!(!event.contains_key("inner"));
    }

    #[test]
    fn test_attach_restores_previous_scope() {
        reset();
        bind("original", 1);

        let handed_off = ScopeSnapshot {
            fields: EventFields::new().with_field("inherited", 2),
        };
        {
            let _guard = handed_off.attach();
            let mut event = EventFields::new();
            merge(&mut event);
            assert!(event.contains_key("inherited"));
            assert!(!event.contains_key("original"));
        }

        let mut event = EventFields::new();
        merge(&mut event);
        assert!(event.contains_key("original"));
        assert!(!event.contains_key("inherited"));
    }

    #[test]
    fn test_noop_processor() {
        reset();
        let processor = NoopProcessor;
        processor.bind(EventFields::new().with_field("a", 1));

        let mut event = EventFields::new();
        processor.merge(&mut event);
        assert!(event.is_empty());
    }
}
