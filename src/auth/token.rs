use std::fmt::Write as _;

use rand::{rngs::OsRng, RngCore};

/// Token size in bytes; hex-encoded this yields a 256-character credential.
const TOKEN_BYTES: usize = 128;

/// Generate the opaque access token issued once at signup.
///
/// OS entropy, hex-encoded. Looked up later by exact equality.
pub fn generate_access_token() -> String {
    let mut buffer = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buffer);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in buffer {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_256_hex_chars() {
        let token = generate_access_token();
        assert_eq!(token.len(), 256);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_are_unique_per_call() {
        let first = generate_access_token();
        let second = generate_access_token();
        assert_ne!(first, second);
    }
}
