//! Mixxx key ids → Lancelot (Camelot wheel) notation.

/// Mixxx `ChromaticKey` order: ids 1-12 are the majors C through B in
/// semitone steps, 13-24 the minors c through b.
const LANCELOT: [&str; 24] = [
    "8B", "3B", "10B", "5B", "12B", "7B", "2B", "9B", "4B", "11B", "6B", "1B", // majors
    "5A", "12A", "7A", "2A", "9A", "4A", "11A", "6A", "1A", "8A", "3A", "10A", // minors
];

/// Wheel position for a Mixxx key id, or `None` for 0/invalid (no key).
pub fn key_id_to_lancelot(key_id: i64) -> Option<&'static str> {
    if (1..=24).contains(&key_id) {
        Some(LANCELOT[(key_id - 1) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_major_is_8b() {
        assert_eq!(key_id_to_lancelot(1), Some("8B"));
    }

    #[test]
    fn a_minor_is_8a() {
        // id 22 = A minor, the relative of C major.
        assert_eq!(key_id_to_lancelot(22), Some("8A"));
    }

    #[test]
    fn b_major_is_1b() {
        assert_eq!(key_id_to_lancelot(12), Some("1B"));
    }

    #[test]
    fn relative_keys_share_a_wheel_slot() {
        // Major id n and minor id n+12+9 (mod 12) share the number.
        for major in 1..=12i64 {
            let relative_minor = 13 + ((major - 1 + 9) % 12);
            let major_slot = key_id_to_lancelot(major).unwrap();
            let minor_slot = key_id_to_lancelot(relative_minor).unwrap();
            assert_eq!(
                major_slot.trim_end_matches('B'),
                minor_slot.trim_end_matches('A'),
                "major {major} vs minor {relative_minor}"
            );
        }
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(key_id_to_lancelot(0), None);
        assert_eq!(key_id_to_lancelot(25), None);
        assert_eq!(key_id_to_lancelot(-3), None);
    }
}
