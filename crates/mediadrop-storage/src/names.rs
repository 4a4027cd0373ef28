//! Random slot names

use rand::Rng;

/// Length of slot names when none is configured
pub const DEFAULT_NAME_LENGTH: usize = 7;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Generate a name of `length` lowercase ASCII letters. A length of 0 is treated as 1.
pub fn random_name(length: usize) -> String {
    let length = length.max(1);
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_requested_length_of_lowercase_letters() {
        for length in [1, 2, DEFAULT_NAME_LENGTH, 32] {
            let name = random_name(length);
            assert_eq!(name.len(), length);
            assert!(name.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn zero_length_is_coerced_to_one() {
        let name = random_name(0);
        assert_eq!(name.len(), 1);
        assert!(name.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn draws_from_whole_alphabet() {
        let mut seen = [false; 26];
        for _ in 0..200 {
            for c in random_name(64).bytes() {
                seen[(c - b'a') as usize] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
