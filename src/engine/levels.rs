//! Level derived from total XP
//!
//! Every level spans a fixed [`XP_PER_LEVEL`] band, starting at level 1.

/// XP needed to advance one level
pub const XP_PER_LEVEL: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u64,
    /// XP earned inside the current level band
    pub xp_into_level: u64,
}

impl Level {
    pub fn for_xp(xp: u64) -> Self {
        Self {
            level: xp / XP_PER_LEVEL + 1,
            xp_into_level: xp % XP_PER_LEVEL,
        }
    }

    pub fn xp_to_next(&self) -> u64 {
        XP_PER_LEVEL - self.xp_into_level
    }

    /// Progress through the current level (0.0 - 1.0)
    pub fn progress(&self) -> f64 {
        self.xp_into_level as f64 / XP_PER_LEVEL as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(Level::for_xp(0).level, 1);
        assert_eq!(Level::for_xp(499).level, 1);
        assert_eq!(Level::for_xp(500).level, 2);
        assert_eq!(Level::for_xp(1250).level, 3);
    }

    #[test]
    fn test_level_progress() {
        let level = Level::for_xp(1250);
        assert_eq!(level.xp_into_level, 250);
        assert_eq!(level.xp_to_next(), 250);
        assert!((level.progress() - 0.5).abs() < f64::EPSILON);
    }
}
