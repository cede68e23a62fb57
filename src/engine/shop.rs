//! Shop purchases and theme selection

use crate::domain::{ProfileUpdate, ShopItem, ShopItemKind, UserProfile};
use crate::engine::achievements::{evaluate_purchase, Evaluation, ACHIEVEMENTS};
use crate::error::{EngineError, EngineResult};

/// A validated purchase, ready to persist
#[derive(Debug, Clone)]
pub struct PurchasePlan {
    pub item: &'static ShopItem,
    /// Purchase-time achievements (only ever `high-roller`)
    pub evaluation: Evaluation,
    pub update: ProfileUpdate,
}

/// Free themes are always owned
pub fn owns_theme(profile: &UserProfile, theme_id: &str) -> bool {
    profile.purchased_themes.contains(theme_id)
        || ShopItem::get(theme_id).is_some_and(ShopItem::is_free_theme)
}

pub fn plan_purchase(profile: &UserProfile, item_id: &str) -> EngineResult<PurchasePlan> {
    let item = ShopItem::get(item_id).ok_or_else(|| EngineError::UnknownItem(item_id.to_string()))?;

    if item.kind == ShopItemKind::Theme && owns_theme(profile, item.id) {
        return Err(EngineError::AlreadyOwned(item.id.to_string()));
    }
    if profile.ai_coins < item.cost {
        return Err(EngineError::InsufficientCoins {
            cost: item.cost,
            balance: profile.ai_coins,
        });
    }

    let mut update = ProfileUpdate {
        ai_coins: Some(profile.ai_coins - item.cost),
        total_coins_spent: Some(profile.total_coins_spent + item.cost),
        ..Default::default()
    };
    match item.kind {
        ShopItemKind::Theme => {
            let mut themes = profile.purchased_themes.clone();
            themes.insert(item.id.to_string());
            update.purchased_themes = Some(themes);
        }
        ShopItemKind::PowerUp(kind) => {
            let mut inventory = profile.purchased_power_ups.clone();
            *inventory.entry(kind.inventory_key().to_string()).or_insert(0) += 1;
            update.purchased_power_ups = Some(inventory);
        }
    }

    let hypothetical = profile.with_update(&update);
    let evaluation = evaluate_purchase(&hypothetical, ACHIEVEMENTS);
    if !evaluation.is_empty() {
        let mut achievements = profile.achievements.clone();
        achievements.extend(evaluation.ids().map(String::from));
        update.achievements = Some(achievements);
        update.xp = Some(profile.xp + evaluation.total_xp);
        update.ai_coins = Some(hypothetical.ai_coins + evaluation.total_coins);
    }

    tracing::info!(
        target: "tense_master::engine",
        user_id = %profile.id,
        item = item.id,
        cost = item.cost,
        "Purchase planned"
    );

    Ok(PurchasePlan {
        item,
        evaluation,
        update,
    })
}

pub fn plan_apply_theme(profile: &UserProfile, theme_id: &str) -> EngineResult<ProfileUpdate> {
    match ShopItem::get(theme_id) {
        Some(item) if item.kind == ShopItemKind::Theme => {}
        _ => return Err(EngineError::UnknownItem(theme_id.to_string())),
    }
    if !owns_theme(profile, theme_id) {
        return Err(EngineError::ThemeNotOwned(theme_id.to_string()));
    }
    Ok(ProfileUpdate {
        active_theme: Some(theme_id.to_string()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich(coins: u64) -> UserProfile {
        let mut p = UserProfile::new("u1", "ada", "ada@example.com");
        p.ai_coins = coins;
        p
    }

    #[test]
    fn test_buy_theme() {
        let p = rich(300);
        let plan = plan_purchase(&p, "theme-ocean").unwrap();
        assert_eq!(plan.update.ai_coins, Some(50));
        assert_eq!(plan.update.total_coins_spent, Some(250));
        assert!(plan.update.purchased_themes.unwrap().contains("theme-ocean"));
        assert!(plan.evaluation.is_empty());
    }

    #[test]
    fn test_buy_power_up_strips_prefix() {
        let mut p = rich(100);
        p.purchased_power_ups.insert("5050".into(), 2);
        let plan = plan_purchase(&p, "powerup-5050").unwrap();
        assert_eq!(plan.update.purchased_power_ups.unwrap()["5050"], 3);
        assert_eq!(plan.update.ai_coins, Some(25));
    }

    #[test]
    fn test_insufficient_coins_rejected() {
        let err = plan_purchase(&rich(10), "powerup-hint").unwrap_err();
        assert!(matches!(err, EngineError::InsufficientCoins { cost: 50, balance: 10 }));
    }

    #[test]
    fn test_owned_and_free_themes_rejected() {
        let mut p = rich(1000);
        p.purchased_themes.insert("theme-mint".into());
        assert!(matches!(plan_purchase(&p, "theme-mint"), Err(EngineError::AlreadyOwned(_))));
        assert!(matches!(
            plan_purchase(&p, "theme-high-contrast"),
            Err(EngineError::AlreadyOwned(_))
        ));
    }

    #[test]
    fn test_unknown_item() {
        assert!(matches!(plan_purchase(&rich(10), "nope"), Err(EngineError::UnknownItem(_))));
    }

    #[test]
    fn test_high_roller_unlocks_once() {
        let mut p = rich(2000);
        p.total_coins_spent = 500;
        let plan = plan_purchase(&p, "theme-diamond").unwrap();
        assert_eq!(plan.evaluation.ids().collect::<Vec<_>>(), vec!["high-roller"]);
        assert_eq!(plan.update.xp, Some(100));
        assert_eq!(plan.update.ai_coins, Some(1000));
        assert!(plan.update.achievements.as_ref().unwrap().contains("high-roller"));

        let p = p.with_update(&plan.update);
        let again = plan_purchase(&p, "powerup-hint").unwrap();
        assert!(again.evaluation.is_empty());
        assert_eq!(again.update.xp, None);
    }

    #[test]
    fn test_apply_theme() {
        let mut p = rich(0);
        assert!(matches!(
            plan_apply_theme(&p, "theme-ocean"),
            Err(EngineError::ThemeNotOwned(_))
        ));
        assert_eq!(
            plan_apply_theme(&p, "theme-high-contrast").unwrap().active_theme.as_deref(),
            Some("theme-high-contrast")
        );
        p.purchased_themes.insert("theme-ocean".into());
        assert!(plan_apply_theme(&p, "theme-ocean").is_ok());
        assert!(matches!(
            plan_apply_theme(&p, "powerup-hint"),
            Err(EngineError::UnknownItem(_))
        ));
    }
}
