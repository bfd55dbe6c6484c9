#![forbid(unsafe_code)]

//! Values owned either locally or by an external authority.
//!
//! A [`Controllable`] reads the same way regardless of owner. Writes go
//! through [`Controllable::request`]: an uncontrolled cell stores the new
//! value and reports it to the change hook, a controlled cell only reports it
//! and keeps its current value until the owner calls [`Controllable::sync`].

use std::fmt;

/// Change hook invoked with the requested value.
pub type ChangeHook<T> = Box<dyn FnMut(&T)>;

/// Outcome of [`Controllable::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// The value equals the current one; nothing happened.
    Unchanged,
    /// Stored locally and reported to the hook.
    Stored,
    /// Controlled: reported to the hook, local value untouched.
    Forwarded,
}

impl Request {
    /// Whether the change hook ran.
    pub fn notified(self) -> bool {
        !matches!(self, Request::Unchanged)
    }
}

/// A dual-mode value cell.
pub struct Controllable<T> {
    value: T,
    controlled: bool,
    on_change: Option<ChangeHook<T>>,
}

impl<T: PartialEq> Controllable<T> {
    /// A locally owned value starting at `default`.
    pub fn uncontrolled(default: T) -> Self {
        Self {
            value: default,
            controlled: false,
            on_change: None,
        }
    }

    /// A value owned by the caller, currently `value`.
    pub fn controlled(value: T) -> Self {
        Self {
            value,
            controlled: true,
            on_change: None,
        }
    }

    /// Attach the change hook (builder).
    #[must_use]
    pub fn with_on_change(mut self, hook: impl FnMut(&T) + 'static) -> Self {
        self.on_change = Some(Box::new(hook));
        self
    }

    pub(crate) fn with_hook(mut self, hook: Option<ChangeHook<T>>) -> Self {
        self.on_change = hook;
        self
    }

    /// The authoritative current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether an external owner holds the value.
    pub fn is_controlled(&self) -> bool {
        self.controlled
    }

    /// Ask for `next`. See [`Request`] for the outcomes.
    pub fn request(&mut self, next: T) -> Request {
        if next == self.value {
            return Request::Unchanged;
        }
        if self.controlled {
            if let Some(hook) = self.on_change.as_mut() {
                hook(&next);
            }
            Request::Forwarded
        } else {
            self.value = next;
            if let Some(hook) = self.on_change.as_mut() {
                hook(&self.value);
            }
            Request::Stored
        }
    }

    /// Report the current value to the hook without changing it.
    pub fn notify(&mut self) {
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.value);
        }
    }

    /// Replace the value without running the hook.
    ///
    /// This is how a controlling owner pushes its authoritative value back.
    /// Returns whether the value changed.
    pub fn sync(&mut self, value: T) -> bool {
        if value == self.value {
            return false;
        }
        self.value = value;
        true
    }
}

impl<T: fmt::Debug> fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("value", &self.value)
            .field("controlled", &self.controlled)
            .field("has_hook", &self.on_change.is_some())
            .finish()
    }
}
