/// Placeholder id a client sends when it wants the server to assign one.
pub const NEW_ENTRY_ID: &str = "@new";

/// Generate a fresh random identifier (UUID v4, hyphenated).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns `true` for an empty or whitespace-only identifier.
pub fn is_blank(id: &str) -> bool {
    id.trim().is_empty()
}

/// Returns `true` if a client-supplied id must be replaced by a generated one.
pub fn needs_generated_id(id: &str) -> bool {
    is_blank(id) || id == NEW_ENTRY_ID
}

/// An element of a nested, id-indexed collection inside a hospital.
///
/// Ids are unique within the owning collection only.
pub trait NestedEntry: Clone {
    /// Human-readable kind used in error messages ("Entry", "Performance entry").
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}
