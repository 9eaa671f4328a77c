//! Mixxx track colours → the 8-colour Rekordbox palette.

/// Rekordbox track palette as (r, g, b, hex code).
const PALETTE: [(i64, i64, i64, &str); 8] = [
    (255, 0, 0, "0xFF0000"),    // red
    (255, 165, 0, "0xFFA500"),  // orange
    (255, 255, 0, "0xFFFF00"),  // yellow
    (0, 255, 0, "0x00FF00"),    // green
    (37, 253, 233, "0x25FDE9"), // aqua
    (0, 0, 255, "0x0000FF"),    // blue
    (102, 0, 153, "0x660099"),  // purple
    (255, 0, 127, "0xFF007F"),  // pink
];

/// Map a Mixxx packed RGB value to the nearest palette colour by squared
/// distance in RGB space.
pub fn rgb_to_rekordbox_color(rgb: i64) -> &'static str {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;

    let mut closest = PALETTE[0].3;
    let mut min_distance = i64::MAX;
    for (pr, pg, pb, hex) in PALETTE {
        let distance = (r - pr).pow(2) + (g - pg).pow(2) + (b - pb).pow(2);
        if distance < min_distance {
            min_distance = distance;
            closest = hex;
        }
    }
    closest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_palette_hits() {
        assert_eq!(rgb_to_rekordbox_color(0xFF0000), "0xFF0000");
        assert_eq!(rgb_to_rekordbox_color(0x25FDE9), "0x25FDE9");
        assert_eq!(rgb_to_rekordbox_color(0x660099), "0x660099");
    }

    #[test]
    fn near_misses_snap_to_closest() {
        // Dark red.
        assert_eq!(rgb_to_rekordbox_color(0xCC1010), "0xFF0000");
        // Teal-ish.
        assert_eq!(rgb_to_rekordbox_color(0x20E0D0), "0x25FDE9");
    }

    #[test]
    fn ties_resolve_to_first_palette_entry() {
        // Black is nearest to... whichever comes first among equals; the
        // mapping just has to be deterministic.
        let first = rgb_to_rekordbox_color(0x000000);
        let second = rgb_to_rekordbox_color(0x000000);
        assert_eq!(first, second);
    }
}
