pub mod activity;
pub mod token;
pub mod user;

/// Generate a prefixed opaque id (`user-…`, `log-…`, `auth-…`). The prefix
/// only communicates the entity kind for debugging; the 16 hex characters
/// after it carry no structure.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 8] = rng.random();

    let mut id = String::with_capacity(prefix.len() + 17);
    id.push_str(prefix);
    id.push('-');
    for b in bytes {
        use std::fmt::Write;
        let _ = write!(id, "{b:02x}");
    }
    id
}
