//! Reactive values for Horizon disclosure widgets.
//!
//! - [`Property<T>`]: a value with change detection, paired with a signal by
//!   its owner
//! - [`Memo<K, T>`]: a derived value recomputed only when its dependency key
//!   changes
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_disclosure_core::Memo;
//!
//! let label = Memo::new(|count: &u32| Arc::new(format!("{count} items")));
//!
//! let first = label.get(3);
//! let again = label.get(3);
//! assert!(Arc::ptr_eq(&first, &again));
//! assert_eq!(*label.get(4), "4 items");
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `set()` compares the new value with the current one and reports whether the
/// value actually changed, so the owner knows when to emit its notification.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// A derived value cached against the key it was computed from.
///
/// `get(key)` returns the cached value while `key` is unchanged and recomputes
/// otherwise. When `T` is an `Arc`, callers can compare results with
/// `Arc::ptr_eq` to skip work for unchanged inputs.
pub struct Memo<K, T> {
    /// The computation function.
    compute: Box<dyn Fn(&K) -> T + Send + Sync>,
    /// The last key and the value computed for it.
    cached: RwLock<Option<(K, T)>>,
}

impl<K: Clone + PartialEq, T: Clone> Memo<K, T> {
    /// Create a new memo with a computation function.
    ///
    /// Nothing is computed until the first `get()`.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&K) -> T + Send + Sync + 'static,
    {
        Self {
            compute: Box::new(compute),
            cached: RwLock::new(None),
        }
    }

    /// Get the value for `key`, computing it if the key changed.
    pub fn get(&self, key: K) -> T {
        if let Some((cached_key, value)) = self.cached.read().as_ref() {
            if *cached_key == key {
                return value.clone();
            }
        }

        let value = (self.compute)(&key);
        *self.cached.write() = Some((key, value.clone()));
        value
    }

    /// Drop the cached value, forcing recomputation on the next `get()`.
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }
}

impl<K: fmt::Debug, T: fmt::Debug> fmt::Debug for Memo<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("cached", &*self.cached.read())
            .finish()
    }
}
