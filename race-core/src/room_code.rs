use rand::Rng;

/// Characters a room code may contain. Codes are shared between players out
/// of band, so the set stays typeable on a standard keyboard.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*";

/// Length of a generated room code.
pub const CODE_LENGTH: usize = 8;

/// Generates a room code that does not collide with any currently-live room.
///
/// Each character is drawn independently and uniformly from
/// [`CODE_ALPHABET`]; on a collision the whole code is regenerated. The
/// collision domain is live rooms only, so codes can be reused once a room
/// has been deleted.
pub fn generate_code<F>(is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut rng = rand::rng();
    loop {
        let code: String = (0..CODE_LENGTH)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();

        if !is_taken(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_code(|_| false);

        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
    }

    #[test]
    fn test_codes_avoid_live_set() {
        let mut live = HashSet::new();
        for _ in 0..500 {
            live.insert(generate_code(|_| false));
        }

        for _ in 0..100 {
            let code = generate_code(|c| live.contains(c));
            assert!(!live.contains(&code));
        }
    }

    #[test]
    fn test_collision_triggers_regeneration() {
        let attempts = Cell::new(0u32);
        let code = generate_code(|_| {
            attempts.set(attempts.get() + 1);
            // Reject the first three candidates, accept the fourth.
            attempts.get() <= 3
        });

        assert_eq!(attempts.get(), 4);
        assert_eq!(code.len(), CODE_LENGTH);
    }
}
