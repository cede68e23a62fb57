//! Shop listing, purchases and theme switching

use anyhow::{bail, Result};

use tense_master::engine::shop::{owns_theme, plan_apply_theme, plan_purchase};
use tense_master::notify::{sequence, Notification};
use tense_master::{ShopItem, ShopItemKind};

use super::Context;

pub async fn list_command(ctx: &Context, user: Option<&str>) -> Result<()> {
    let session = ctx.login(user).await?;
    let profile = &session.profile;
    println!("You have {} coins.\n", profile.ai_coins);

    println!("Themes:");
    for item in ShopItem::themes() {
        let status = if item.id == profile.active_theme {
            "active".to_string()
        } else if owns_theme(profile, item.id) {
            "owned".to_string()
        } else {
            format!("{} coins", item.cost)
        };
        let premium = if item.premium { " *" } else { "" };
        println!("  {:<22} {:<20} {status}{premium}", item.id, item.name);
    }

    println!("\nPower-ups:");
    for item in ShopItem::power_ups() {
        let owned = match item.kind {
            ShopItemKind::PowerUp(kind) => profile.power_ups(kind.inventory_key()),
            ShopItemKind::Theme => 0,
        };
        println!(
            "  {:<22} {:<20} {} coins (owned: {owned})  {}",
            item.id, item.name, item.cost, item.description
        );
    }
    Ok(())
}

pub async fn buy_command(ctx: &Context, user: Option<&str>, item_id: &str) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let plan = plan_purchase(&session.profile, item_id)?;

    let persisted = session.apply(&ctx.store, &plan.update).await;
    let summary = Notification::Purchased {
        item: plan.item.name.to_string(),
        cost: plan.item.cost,
    };
    let schedule = sequence(summary, &plan.evaluation.newly, &persisted, ctx.config.notifications.stagger());
    ctx.announce(&schedule).await;

    if persisted.is_saved() {
        if let ShopItemKind::PowerUp(kind) = plan.item.kind {
            println!("You now have {} x{}.", kind.label(), session.profile.power_ups(kind.inventory_key()));
        }
        println!("Coins left: {}", session.profile.ai_coins);
    }
    Ok(())
}

pub async fn theme_command(ctx: &Context, user: Option<&str>, theme_id: &str) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let update = plan_apply_theme(&session.profile, theme_id)?;
    if session.apply(&ctx.store, &update).await.is_saved() {
        println!("Theme set to {theme_id}.");
        Ok(())
    } else {
        bail!("Failed to save theme {theme_id}")
    }
}

