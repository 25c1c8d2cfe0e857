//! Request-scoped storage
//!
//! Values are stored under `SlotKey<T>` constants. The key carries the stored
//! type, so reads go through a typed accessor and an absent or mismatched slot
//! is simply `None`.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Typed name for one slot in a `RequestContext`
///
/// # Example
///
/// ```rust
/// use reqevents::request::{RequestContext, SlotKey};
///
/// const USER_ID: SlotKey<u64> = SlotKey::new("user_id");
///
/// let mut ctx = RequestContext::new();
/// ctx.insert(&USER_ID, 42);
/// assert_eq!(ctx.get(&USER_ID), Some(&42));
/// ```
pub struct SlotKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SlotKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> fmt::Debug for SlotKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotKey").field(&self.name).finish()
    }
}

/// Key-value storage that lives exactly as long as one request
pub struct RequestContext {
    request_id: u64,
    slots: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
            slots: HashMap::new(),
        }
    }

    /// Process-unique identifier assigned at construction
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Store a value, replacing whatever occupied the slot before
    pub fn insert<T: Any + Send + Sync>(&mut self, key: &SlotKey<T>, value: T) {
        self.slots.insert(key.name, Box::new(value));
    }

    pub fn get<T: Any + Send + Sync>(&self, key: &SlotKey<T>) -> Option<&T> {
        self.slots.get(key.name)?.downcast_ref::<T>()
    }

    /// Take the value out of its slot; a slot holding another type is left untouched
    pub fn remove<T: Any + Send + Sync>(&mut self, key: &SlotKey<T>) -> Option<T> {
        if !self.contains(key) {
            return None;
        }
        self.slots
            .remove(key.name)?
            .downcast::<T>()
            .ok()
            .map(|boxed| *boxed)
    }

    pub fn contains<T: Any + Send + Sync>(&self, key: &SlotKey<T>) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<_> = self.slots.keys().collect();
        slots.sort();
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("slots", &slots)
            .finish()
    }
}
