//! XP and coin reward formulas
//!
//! Each challenge mode maps to a [`RewardFormula`] in a [`RewardTable`]. The
//! table is loaded from the `[rewards]` config section, falling back to the
//! defaults below.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::domain::{ChallengeMode, DailyMode, GauntletMode};

/// XP and coins credited for one completed challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u64,
    pub coins: u64,
}

impl Reward {
    pub const fn new(xp: u64, coins: u64) -> Self {
        Self { xp, coins }
    }
}

impl Add for Reward {
    type Output = Reward;

    fn add(self, rhs: Reward) -> Reward {
        Reward {
            xp: self.xp + rhs.xp,
            coins: self.coins + rhs.coins,
        }
    }
}

/// How well the user did, in the unit the mode's formula expects
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Performance {
    /// Unrounded score percentage (0-100)
    Percent(f64),
    /// Correct minus incorrect selections (detective)
    Net(i64),
}

impl Performance {
    fn value(self) -> f64 {
        match self {
            Self::Percent(p) => p,
            Self::Net(n) => n as f64,
        }
    }
}

/// Reward formula for one mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RewardFormula {
    /// Same reward regardless of performance
    Flat { xp: u64, coins: u64 },
    /// `base + per_point * performance`, clamped at zero then rounded
    Linear {
        base_xp: f64,
        xp_per_point: f64,
        base_coins: f64,
        coins_per_point: f64,
    },
}

impl RewardFormula {
    pub fn apply(&self, performance: Performance) -> Reward {
        match *self {
            Self::Flat { xp, coins } => Reward::new(xp, coins),
            Self::Linear {
                base_xp,
                xp_per_point,
                base_coins,
                coins_per_point,
            } => {
                let p = performance.value();
                Reward::new(
                    non_negative_round(base_xp + xp_per_point * p),
                    non_negative_round(base_coins + coins_per_point * p),
                )
            }
        }
    }
}

fn non_negative_round(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.round() as u64
    }
}

const fn linear(base_xp: f64, xp_per_point: f64, base_coins: f64, coins_per_point: f64) -> RewardFormula {
    RewardFormula::Linear {
        base_xp,
        xp_per_point,
        base_coins,
        coins_per_point,
    }
}

/// Formula per challenge mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RewardTable {
    pub lesson: RewardFormula,
    pub classic: RewardFormula,
    pub hard: RewardFormula,
    pub time_attack: RewardFormula,
    pub review: RewardFormula,
    pub cloze: RewardFormula,
    pub identification: RewardFormula,
    pub detective: RewardFormula,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            lesson: linear(0.0, 1.0, 0.0, 0.5),
            classic: RewardFormula::Flat { xp: 150, coins: 75 },
            hard: RewardFormula::Flat { xp: 250, coins: 125 },
            time_attack: linear(50.0, 1.0, 25.0, 0.5),
            review: RewardFormula::Flat { xp: 200, coins: 100 },
            cloze: linear(50.0, 0.5, 25.0, 0.25),
            identification: linear(50.0, 0.75, 25.0, 0.5),
            detective: linear(50.0, 10.0, 25.0, 5.0),
        }
    }
}

impl RewardTable {
    pub fn formula(&self, mode: ChallengeMode) -> &RewardFormula {
        match mode {
            ChallengeMode::Lesson => &self.lesson,
            ChallengeMode::Daily(DailyMode::Classic) => &self.classic,
            ChallengeMode::Daily(DailyMode::Hard) => &self.hard,
            ChallengeMode::Daily(DailyMode::TimeAttack) => &self.time_attack,
            ChallengeMode::Review => &self.review,
            ChallengeMode::Gauntlet(GauntletMode::Cloze) => &self.cloze,
            ChallengeMode::Gauntlet(GauntletMode::Identification) => &self.identification,
            ChallengeMode::Gauntlet(GauntletMode::Detective) => &self.detective,
        }
    }
}

/// Reward modifiers granted by power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub double_xp: bool,
}

/// Base reward for a completed challenge, before achievement bonuses
pub fn compute_reward(
    table: &RewardTable,
    mode: ChallengeMode,
    performance: Performance,
    modifiers: Modifiers,
) -> Reward {
    let mut reward = table.formula(mode).apply(performance);
    if modifiers.double_xp {
        reward.xp *= 2;
    }
    reward
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(mode: ChallengeMode, performance: Performance) -> Reward {
        compute_reward(&RewardTable::default(), mode, performance, Modifiers::default())
    }

    #[test]
    fn test_lesson_reward() {
        assert_eq!(reward(ChallengeMode::Lesson, Performance::Percent(100.0)), Reward::new(100, 50));
        assert_eq!(reward(ChallengeMode::Lesson, Performance::Percent(70.0)), Reward::new(70, 35));
    }

    #[test]
    fn test_lesson_reward_rounds_half_up() {
        assert_eq!(reward(ChallengeMode::Lesson, Performance::Percent(45.0)).coins, 23);
        assert_eq!(reward(ChallengeMode::Lesson, Performance::Percent(200.0 / 3.0)), Reward::new(67, 33));
    }

    #[test]
    fn test_time_attack_reward() {
        let mode = ChallengeMode::Daily(DailyMode::TimeAttack);
        assert_eq!(reward(mode, Performance::Percent(60.0)), Reward::new(110, 55));
    }

    #[test]
    fn test_flat_rewards_ignore_score() {
        assert_eq!(
            reward(ChallengeMode::Daily(DailyMode::Classic), Performance::Percent(0.0)),
            Reward::new(150, 75)
        );
        assert_eq!(reward(ChallengeMode::Review, Performance::Percent(13.0)), Reward::new(200, 100));
    }

    #[test]
    fn test_gauntlet_rewards() {
        let cloze = ChallengeMode::Gauntlet(GauntletMode::Cloze);
        assert_eq!(reward(cloze, Performance::Percent(50.0)), Reward::new(75, 38));
        let ident = ChallengeMode::Gauntlet(GauntletMode::Identification);
        assert_eq!(reward(ident, Performance::Percent(80.0)), Reward::new(110, 65));
    }

    #[test]
    fn test_detective_reward_clamps_at_zero() {
        let mode = ChallengeMode::Gauntlet(GauntletMode::Detective);
        assert_eq!(reward(mode, Performance::Net(1)), Reward::new(60, 30));
        assert_eq!(reward(mode, Performance::Net(-10)), Reward::new(0, 0));
        assert_eq!(reward(mode, Performance::Net(-6)), Reward::new(0, 0));
        assert_eq!(reward(mode, Performance::Net(-5)), Reward::new(0, 0));
        assert_eq!(reward(mode, Performance::Net(-4)), Reward::new(10, 5));
    }

    #[test]
    fn test_double_xp_doubles_xp_only() {
        let r = compute_reward(
            &RewardTable::default(),
            ChallengeMode::Lesson,
            Performance::Percent(80.0),
            Modifiers { double_xp: true },
        );
        assert_eq!(r, Reward::new(160, 40));
    }

    #[test]
    fn test_table_from_partial_toml() {
        let table: RewardTable = toml::from_str(
            r#"
            [review]
            kind = "flat"
            xp = 300
            coins = 10
            "#,
        )
        .unwrap();
        assert_eq!(table.review, RewardFormula::Flat { xp: 300, coins: 10 });
        assert_eq!(table.lesson, RewardTable::default().lesson);
    }
}
