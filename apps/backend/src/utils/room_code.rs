//! Room code generation for party sessions.
//!
//! Room codes are 6-character uppercase alphanumeric strings, short enough
//! to read out loud across a room. Uniqueness among active rooms is enforced
//! by the caller (bounded retry against the store), not here.

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of a shareable room code.
pub const ROOM_CODE_LEN: usize = 6;

/// Generate a random room code using the OS RNG.
pub fn generate_room_code() -> String {
    let mut rng = OsRng.unwrap_err();
    (0..ROOM_CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_code_has_expected_length_and_alphabet() {
        let code = generate_room_code();
        assert_eq!(code.len(), ROOM_CODE_LEN);
        assert!(code
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
    }

    #[test]
    fn room_codes_vary() {
        // 36^6 codes; two equal draws in a row would be astonishing
        let a = generate_room_code();
        let b = generate_room_code();
        assert_ne!(a, b);
    }
}
