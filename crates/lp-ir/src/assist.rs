//! Quantization assist grids.

use core::str::FromStr;

use crate::musical_time::{MusicalTime, SUBDIVISIONS_PER_BAR};

/// Quantization grid applied to recorded timestamps.
///
/// Each grid variant names the number of equal divisions of a bar to snap to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Assist {
    #[default]
    No,
    Grid12,
    Grid8,
    Grid6,
    Grid4,
    Grid3,
}

/// Error returned when parsing an unknown assist name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown assist grid (expected no, 12, 8, 6, 4 or 3)")]
pub struct ParseAssistError;

impl Assist {
    /// All variants, finest grid first.
    pub const ALL: [Assist; 6] = [
        Assist::No,
        Assist::Grid12,
        Assist::Grid8,
        Assist::Grid6,
        Assist::Grid4,
        Assist::Grid3,
    ];

    /// Divisions of a bar, or `None` when quantization is off.
    pub const fn divisions(self) -> Option<u32> {
        match self {
            Assist::No => None,
            Assist::Grid12 => Some(12),
            Assist::Grid8 => Some(8),
            Assist::Grid6 => Some(6),
            Assist::Grid4 => Some(4),
            Assist::Grid3 => Some(3),
        }
    }

    /// Subdivisions between two grid points.
    pub const fn grid(self) -> Option<u32> {
        match self.divisions() {
            Some(d) => Some(SUBDIVISIONS_PER_BAR / d),
            None => None,
        }
    }

    /// Round a subdivision count to the nearest grid point. Ties round up.
    pub fn quantize_subdivisions(self, total: u64) -> u64 {
        let Some(grid) = self.grid() else {
            return total;
        };
        let grid = grid as u64;
        (total + grid / 2) / grid * grid
    }

    /// Round a time to the nearest grid point. Ties round up.
    pub fn quantize(self, time: MusicalTime) -> MusicalTime {
        MusicalTime::from_subdivisions(self.quantize_subdivisions(time.total_subdivisions()))
    }
}

impl FromStr for Assist {
    type Err = ParseAssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no" | "No" | "off" | "none" => Ok(Assist::No),
            "12" => Ok(Assist::Grid12),
            "8" => Ok(Assist::Grid8),
            "6" => Ok(Assist::Grid6),
            "4" => Ok(Assist::Grid4),
            "3" => Ok(Assist::Grid3),
            _ => Err(ParseAssistError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_assist_is_identity() {
        let t = MusicalTime { bar: 1, subdivision: 13 };
        assert_eq!(Assist::No.quantize(t), t);
        assert_eq!(Assist::No.grid(), None);
    }

    #[test]
    fn every_grid_aligns_with_subdivisions() {
        for assist in Assist::ALL {
            if let (Some(div), Some(grid)) = (assist.divisions(), assist.grid()) {
                assert_eq!(div * grid, SUBDIVISIONS_PER_BAR);
            }
        }
    }

    #[test]
    fn quarter_grid_rounds_to_nearest_beat() {
        // Grid4: one grid step = 12 subdivisions
        let down = MusicalTime { bar: 0, subdivision: 5 };
        let up = MusicalTime { bar: 0, subdivision: 7 };
        assert_eq!(Assist::Grid4.quantize(down), MusicalTime::zero());
        assert_eq!(Assist::Grid4.quantize(up), MusicalTime { bar: 0, subdivision: 12 });
    }

    #[test]
    fn tie_rounds_up() {
        let tie = MusicalTime { bar: 0, subdivision: 6 };
        assert_eq!(Assist::Grid4.quantize(tie).subdivision, 12);
    }

    #[test]
    fn rounding_can_cross_into_next_bar() {
        let late = MusicalTime { bar: 2, subdivision: SUBDIVISIONS_PER_BAR - 2 };
        assert_eq!(Assist::Grid3.quantize(late), MusicalTime::from_bars(3));
    }

    #[test]
    fn parse_names() {
        assert_eq!("no".parse::<Assist>(), Ok(Assist::No));
        assert_eq!("12".parse::<Assist>(), Ok(Assist::Grid12));
        assert_eq!(" 3 ".parse::<Assist>(), Ok(Assist::Grid3));
        assert_eq!("5".parse::<Assist>(), Err(ParseAssistError));
    }
}
