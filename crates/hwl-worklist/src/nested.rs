//! Id-indexed operators shared by both nested collection levels.
//!
//! Employee entries inside a hospital and performance entries inside an
//! employee entry follow the same rules, so the operators are written once
//! over [`NestedEntry`].

use hwl_types::{generate_id, is_blank, needs_generated_id, NestedEntry};

use crate::error::{WorklistError, WorklistResult};

/// Index of the first entry with `id`.
pub fn position<E: NestedEntry>(entries: &[E], id: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.id() == id)
}

/// The first entry with `id`, or `NotFound`.
pub fn find<'a, E: NestedEntry>(entries: &'a [E], id: &str) -> WorklistResult<&'a E> {
    position(entries, id)
        .map(|idx| &entries[idx])
        .ok_or_else(|| not_found::<E>())
}

/// Mutable access to the first entry with `id`, or `NotFound`.
pub fn find_mut<'a, E: NestedEntry>(entries: &'a mut [E], id: &str) -> WorklistResult<&'a mut E> {
    match position(entries, id) {
        Some(idx) => Ok(&mut entries[idx]),
        None => Err(not_found::<E>()),
    }
}

/// Append `entry`, assigning a fresh id when it is blank or the `@new`
/// placeholder. Returns the stored entry.
pub fn insert<E: NestedEntry>(entries: &mut Vec<E>, mut entry: E) -> WorklistResult<E> {
    if needs_generated_id(entry.id()) {
        entry.set_id(generate_id());
    }
    if position(entries, entry.id()).is_some() {
        return Err(WorklistError::conflict(format!("{} already exists", E::KIND)));
    }
    entries.push(entry.clone());
    Ok(entry)
}

/// Remove the entry with `id`, keeping the order of the others.
pub fn remove<E: NestedEntry>(entries: &mut Vec<E>, id: &str) -> WorklistResult<E> {
    let idx = position(entries, id).ok_or_else(|| not_found::<E>())?;
    Ok(entries.remove(idx))
}

/// Rebuild a client-supplied list through [`insert`]: placeholder ids are
/// replaced and duplicates rejected with `Conflict`.
pub fn collect_unique<E: NestedEntry>(entries: Vec<E>) -> WorklistResult<Vec<E>> {
    let mut unique = Vec::with_capacity(entries.len());
    for entry in entries {
        insert(&mut unique, entry)?;
    }
    Ok(unique)
}

/// `BadRequest` unless `value` is non-blank.
pub fn require(value: &str, what: &str) -> WorklistResult<()> {
    if is_blank(value) {
        Err(WorklistError::bad_request(format!("{what} is required")))
    } else {
        Ok(())
    }
}

fn not_found<E: NestedEntry>() -> WorklistError {
    WorklistError::not_found(format!("{} not found", E::KIND))
}
