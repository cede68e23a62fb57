//! Profile, achievement, course and leaderboard listings

use anyhow::{Context as _, Result};
use chrono::Utc;

use tense_master::domain::icon_glyph;
use tense_master::engine::leaderboard::rank;
use tense_master::engine::{Level, ACHIEVEMENTS};
use tense_master::store::{ContentStore, ProfileStore};
use tense_master::{PowerUpKind, Session};

use super::Context;

pub async fn register_command(ctx: &Context, username: &str, email: &str) -> Result<()> {
    let session = Session::register(
        &ctx.store,
        username,
        email,
        Utc::now(),
        ctx.config.settings.day_boundary,
    )
    .await
    .with_context(|| format!("Failed to register '{username}'"))?;
    println!("Welcome, {}! Your id is {}", session.profile.username, session.user_id);
    Ok(())
}

pub async fn profile_command(ctx: &Context, user: Option<&str>) -> Result<()> {
    let session = ctx.login(user).await?;
    let p = &session.profile;
    let level = Level::for_xp(p.xp);

    println!("{} <{}>", p.username, p.email);
    println!(
        "  Level {} ({} XP, {} to next level)",
        level.level,
        p.xp,
        level.xp_to_next()
    );
    println!("  Coins: {}   Streak: {} day(s)   Quizzes: {}", p.ai_coins, p.streak_days, p.total_quizzes_completed);
    println!("  Theme: {}", p.active_theme);

    let power_ups: Vec<String> = PowerUpKind::ALL
        .iter()
        .filter_map(|k| {
            let n = p.power_ups(k.inventory_key());
            (n > 0).then(|| format!("{} x{n}", k.label()))
        })
        .collect();
    if !power_ups.is_empty() {
        println!("  Power-ups: {}", power_ups.join(", "));
    }

    let catalog = ctx.store.fetch_catalog().await?;
    for course in &catalog.courses {
        let done = course
            .tenses
            .iter()
            .filter(|t| p.tense_completed(&course.id, &t.id))
            .count();
        if done > 0 {
            println!("  {}: {}/{} tenses complete", course.name, done, course.tenses.len());
        }
    }
    Ok(())
}

pub async fn achievements_command(ctx: &Context, user: Option<&str>) -> Result<()> {
    let session = ctx.login(user).await?;
    let (unlocked, locked): (Vec<_>, Vec<_>) = ACHIEVEMENTS
        .iter()
        .partition(|a| session.profile.has_achievement(a.id.as_str()));

    println!("Achievements ({}/{}):\n", unlocked.len(), ACHIEVEMENTS.len());
    for a in unlocked {
        println!("  {} {} - {}", a.icon, a.name, a.description);
    }
    for a in locked {
        println!("  [locked] {} - {} [{}]", a.name, a.description, a.category.label());
    }
    Ok(())
}

pub async fn courses_command(ctx: &Context, user: Option<&str>) -> Result<()> {
    let session = ctx.login(user).await?;
    let catalog = ctx.store.fetch_catalog().await?;

    for course in &catalog.courses {
        let origin = if course.builtin { "" } else { " (community)" };
        println!("{} {} [{}]{origin}", icon_glyph(&course.icon_name), course.name, course.id);
        if !course.description.is_empty() {
            println!("    {}", course.description);
        }
        for tense in &course.tenses {
            let mark = match session
                .profile
                .course_progress
                .get(&course.id)
                .and_then(|c| c.get(&tense.id))
            {
                Some(t) if t.completed => format!("done, best {}%", t.score),
                Some(t) => format!("best {}%", t.score),
                None => "not started".to_string(),
            };
            println!("    - {} [{}]: {mark}", tense.name, tense.id);
        }
    }
    Ok(())
}

pub async fn leaderboard_command(ctx: &Context, limit: usize) -> Result<()> {
    let standings = ctx.store.leaderboard().await?;
    let entries = rank(standings, limit);
    if entries.is_empty() {
        println!("No players yet.");
        return Ok(());
    }
    for e in entries {
        println!("  {:>3}. {:<20} level {:>3}  {} XP", e.rank, e.username, e.level, e.xp);
    }
    Ok(())
}
