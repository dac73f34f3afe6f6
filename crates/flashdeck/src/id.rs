//! Record identifier generation.

use uuid::Uuid;

/// Generate a new record identifier.
///
/// Identifiers are random v4 UUIDs rendered as 32 lowercase hex digits.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Generate an identifier that `taken` does not already claim.
pub fn unique_id<F>(mut taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    loop {
        let id = new_id();
        if !taken(&id) {
            return id;
        }
    }
}
