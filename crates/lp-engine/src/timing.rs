//! BPM to wall-clock conversions.

use lp_ir::{BEATS_PER_BAR, SUBDIVISIONS_PER_BAR};

const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Length of one bar in microseconds. A BPM of zero is treated as one.
pub fn bar_micros(bpm: u16) -> u64 {
    BEATS_PER_BAR as u64 * MICROS_PER_MINUTE / bpm.max(1) as u64
}

/// Start of subdivision `k` measured from its bar start.
pub fn subdivision_offset_micros(bpm: u16, k: u32) -> u64 {
    bar_micros(bpm) * k as u64 / SUBDIVISIONS_PER_BAR as u64
}

/// Wait before clicking `subdivision` after the one preceding it, never zero.
///
/// Any `SUBDIVISIONS_PER_BAR` consecutive intervals add up to exactly one bar.
pub fn interval_micros(bpm: u16, subdivision: u32) -> u64 {
    let k = match subdivision % SUBDIVISIONS_PER_BAR {
        0 => SUBDIVISIONS_PER_BAR,
        k => k,
    };
    (subdivision_offset_micros(bpm, k) - subdivision_offset_micros(bpm, k - 1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_bpm_bar_is_four_seconds() {
        assert_eq!(bar_micros(60), 4_000_000);
        assert_eq!(subdivision_offset_micros(60, 12), 1_000_000);
        assert_eq!(interval_micros(60, 1), 83_333);
    }

    #[test]
    fn intervals_add_up_to_a_bar() {
        for bpm in [1, 60, 97, 140, 999, u16::MAX] {
            let bar: u64 = (0..SUBDIVISIONS_PER_BAR).map(|s| interval_micros(bpm, s)).sum();
            assert_eq!(bar, bar_micros(bpm), "bpm {}", bpm);
            let shifted: u64 = (17..17 + SUBDIVISIONS_PER_BAR)
                .map(|s| interval_micros(bpm, s))
                .sum();
            assert_eq!(shifted, bar_micros(bpm), "bpm {}", bpm);
        }
    }

    #[test]
    fn durations_positive_for_every_bpm() {
        for bpm in 0..=u16::MAX {
            assert!(bar_micros(bpm) > 0);
            assert!(interval_micros(bpm, 0) > 0);
            assert!(interval_micros(bpm, 1) > 0);
        }
    }

    #[test]
    fn faster_tempo_means_shorter_bar() {
        assert!(bar_micros(120) < bar_micros(60));
        assert_eq!(bar_micros(120) * 2, bar_micros(60));
    }
}
