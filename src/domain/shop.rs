//! Shop catalog: themes and consumable power-ups

use serde::Serialize;

/// Consumable quiz modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PowerUpKind {
    Hint,
    FiftyFifty,
    Skip,
    SecondChance,
    DoubleXp,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        Self::Hint,
        Self::FiftyFifty,
        Self::Skip,
        Self::SecondChance,
        Self::DoubleXp,
    ];

    /// Key in `purchased_power_ups`
    pub fn inventory_key(&self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::FiftyFifty => "5050",
            Self::Skip => "skip",
            Self::SecondChance => "second-chance",
            Self::DoubleXp => "double-xp",
        }
    }

    pub fn from_inventory_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.inventory_key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hint => "Hint",
            Self::FiftyFifty => "50/50",
            Self::Skip => "Skip Question",
            Self::SecondChance => "Second Chance",
            Self::DoubleXp => "Double XP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShopItemKind {
    Theme,
    PowerUp(PowerUpKind),
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ShopItemKind,
    pub cost: u64,
    pub premium: bool,
}

impl ShopItem {
    pub fn get(id: &str) -> Option<&'static ShopItem> {
        SHOP_ITEMS.iter().find(|i| i.id == id)
    }

    pub fn is_free_theme(&self) -> bool {
        self.kind == ShopItemKind::Theme && self.cost == 0
    }

    pub fn themes() -> impl Iterator<Item = &'static ShopItem> {
        SHOP_ITEMS.iter().filter(|i| i.kind == ShopItemKind::Theme)
    }

    pub fn power_ups() -> impl Iterator<Item = &'static ShopItem> {
        SHOP_ITEMS
            .iter()
            .filter(|i| matches!(i.kind, ShopItemKind::PowerUp(_)))
    }
}

const fn theme(id: &'static str, name: &'static str, description: &'static str, cost: u64, premium: bool) -> ShopItem {
    ShopItem {
        id,
        name,
        description,
        kind: ShopItemKind::Theme,
        cost,
        premium,
    }
}

const fn power_up(id: &'static str, name: &'static str, description: &'static str, kind: PowerUpKind, cost: u64) -> ShopItem {
    ShopItem {
        id,
        name,
        description,
        kind: ShopItemKind::PowerUp(kind),
        cost,
        premium: false,
    }
}

pub static SHOP_ITEMS: &[ShopItem] = &[
    // Free themes
    theme("deep-space", "Deep Space", "The sleek, default look.", 0, false),
    theme("theme-high-contrast", "High Contrast", "Maximum readability for focused learning.", 0, false),
    // Standard themes
    theme("theme-ocean", "Ocean Depths", "A calm and cool blue theme.", 250, false),
    theme("theme-mint", "Minty Fresh", "A clean and refreshing light green theme.", 250, false),
    theme("theme-emerald", "Emerald Forest", "A rich and vibrant green theme.", 300, false),
    theme("theme-violet", "Violet Dream", "A deep and mysterious purple theme.", 300, false),
    theme("theme-desert", "Desert Mirage", "A warm, sandy theme for adventurers.", 350, false),
    theme("theme-nordic", "Nordic Twilight", "A cool, minimalist theme inspired by northern skies.", 350, false),
    theme("theme-sakura", "Sakura Blossom", "A light and elegant pink theme.", 400, false),
    theme("theme-lavender", "Lavender Field", "A calming and beautiful light purple theme.", 400, false),
    // Premium themes
    theme("theme-synthwave", "Synthwave Sunset", "A vibrant retro theme.", 500, true),
    theme("theme-solar", "Solar Flare", "A warm and energetic orange theme.", 500, true),
    theme("theme-cyberpunk", "Cyberpunk Night", "High-tech neons in a futuristic city.", 600, true),
    theme("theme-crimson", "Crimson Peak", "A bold theme with striking red accents.", 600, true),
    theme("theme-aurora", "Northern Lights", "Celestial greens and purples.", 700, true),
    theme("theme-gilded", "Gilded Onyx", "Opulent gold on pure black.", 750, true),
    theme("theme-velvet", "Crimson Velvet", "Luxurious and rich deep reds.", 700, true),
    theme("theme-diamond", "Diamond Brilliance", "The ultimate luxury experience.", 1000, true),
    // Power-ups
    power_up("powerup-hint", "Hint", "Reveals the correct answer for one question.", PowerUpKind::Hint, 50),
    power_up("powerup-5050", "50/50", "Removes two incorrect answers.", PowerUpKind::FiftyFifty, 75),
    power_up("powerup-skip", "Skip Question", "Skips one question (counts as correct).", PowerUpKind::Skip, 100),
    power_up("powerup-double-xp", "Double XP", "Doubles the XP earned from a quiz.", PowerUpKind::DoubleXp, 150),
    power_up("powerup-second-chance", "Second Chance", "Lets you change your answer for one question.", PowerUpKind::SecondChance, 125),
];
