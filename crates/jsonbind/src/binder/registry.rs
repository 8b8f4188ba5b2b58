//! Process-wide cache of type descriptors.
//!
//! Each descriptor is built outside the lock, leaked, then published under the
//! write lock; the first publisher for a type wins. Readers only ever see
//! complete descriptors.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::{LazyLock, PoisonError, RwLock},
};

use tracing::debug;

use super::{Bindable, TypeDescriptor};

type Entry = &'static (dyn Any + Send + Sync);

static REGISTRY: LazyLock<RwLock<HashMap<TypeId, Entry>>> = LazyLock::new(Default::default);

/// The descriptor of `T`, building and publishing it on first use.
pub fn descriptor<T: Bindable>() -> &'static TypeDescriptor<T> {
    let id = TypeId::of::<T>();
    let cached = REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
        .copied();
    if let Some(entry) = cached {
        return downcast(entry);
    }

    // `describe` may itself look up other descriptors, so no lock is held here.
    let described = T::describe();
    let type_name = described.name();
    let built: Entry = Box::leak(Box::new(described));

    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    let entry = *registry.entry(id).or_insert_with(|| {
        debug!(type_name, "published type descriptor");
        built
    });
    downcast(entry)
}

fn downcast<T: Bindable>(entry: Entry) -> &'static TypeDescriptor<T> {
    entry
        .downcast_ref()
        .expect("registry entries are keyed by the TypeId of their descriptor's type")
}
