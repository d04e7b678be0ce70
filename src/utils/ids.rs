//! Broker-generated identities for producers and consumers.

use uuid::Uuid;

/// Misses allowed at one suffix width before the suffix grows by a char.
const ATTEMPTS_PER_WIDTH: usize = 8;

/// Builds `<prefix>-<hex>` from a fresh v4 uuid.
pub fn generate_id(prefix: &str, suffix_len: usize) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    let len = suffix_len.clamp(1, hex.len());
    format!("{}-{}", prefix, &hex[..len])
}

/// Returns the caller-supplied id when present, otherwise a generated one
/// that `taken` does not already know about.
///
/// Empty strings count as absent. When the configured suffix width is
/// crowded the suffix widens, up to a full 32-hex uuid.
pub fn resolve_id<F>(requested: Option<&str>, prefix: &str, suffix_len: usize, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if let Some(id) = requested.filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    let mut width = suffix_len.max(1);
    loop {
        for _ in 0..ATTEMPTS_PER_WIDTH {
            let candidate = generate_id(prefix, width);
            if !taken(&candidate) {
                return candidate;
            }
        }
        width += 1;
    }
}
