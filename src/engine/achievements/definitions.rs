//! Achievement definitions and metadata
//!
//! All achievements are defined here with their rewards, in presentation order.

use crate::engine::rewards::Reward;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    // Milestone achievements
    FirstQuiz,
    PerfectScore,

    // Course mastery
    PresentMaster,
    PastMaster,
    FutureMaster,
    PassiveMaster,
    ReportedSpeechMaster,
    FirstCustomMaster,
    GrammarGuru,

    // Streak achievements
    StreakStarter,
    StreakMaster,

    QuizMaster,

    // Shop
    HighRoller,
}

impl AchievementId {
    /// Get the string ID stored in the profile's achievement set
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "first-quiz",
            Self::PerfectScore => "perfect-score",
            Self::PresentMaster => "present-master",
            Self::PastMaster => "past-master",
            Self::FutureMaster => "future-master",
            Self::PassiveMaster => "passive-master",
            Self::ReportedSpeechMaster => "reported-speech-master",
            Self::FirstCustomMaster => "first-custom-master",
            Self::GrammarGuru => "grammar-guru",
            Self::StreakStarter => "streak-starter",
            Self::StreakMaster => "streak-master",
            Self::QuizMaster => "quiz-master",
            Self::HighRoller => "high-roller",
        }
    }

    /// Parse from a stored string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "first-quiz" => Some(Self::FirstQuiz),
            "perfect-score" => Some(Self::PerfectScore),
            "present-master" => Some(Self::PresentMaster),
            "past-master" => Some(Self::PastMaster),
            "future-master" => Some(Self::FutureMaster),
            "passive-master" => Some(Self::PassiveMaster),
            "reported-speech-master" => Some(Self::ReportedSpeechMaster),
            "first-custom-master" => Some(Self::FirstCustomMaster),
            "grammar-guru" => Some(Self::GrammarGuru),
            "streak-starter" => Some(Self::StreakStarter),
            "streak-master" => Some(Self::StreakMaster),
            "quiz-master" => Some(Self::QuizMaster),
            "high-roller" => Some(Self::HighRoller),
            _ => None,
        }
    }

    /// Mastery achievement for a built-in course (`<course_id>-master`)
    pub fn course_master(course_id: &str) -> Option<Self> {
        Self::from_str(&format!("{course_id}-master"))
    }

    /// Get all achievement IDs
    pub fn all() -> impl Iterator<Item = AchievementId> {
        ACHIEVEMENTS.iter().map(|a| a.id)
    }
}

/// Achievement categories for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Milestone,
    Mastery,
    Streak,
    Shop,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Milestone => "Milestones",
            Self::Mastery => "Mastery",
            Self::Streak => "Streaks",
            Self::Shop => "Shop",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub xp_reward: u64,
    pub coin_reward: u64,
}

impl Achievement {
    /// Look up an achievement definition by ID
    pub fn get(id: AchievementId) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }

    pub fn reward(&self) -> Reward {
        Reward::new(self.xp_reward, self.coin_reward)
    }
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstQuiz,
        name: "First Step",
        description: "Complete your first quiz.",
        icon: "🎯",
        category: AchievementCategory::Milestone,
        xp_reward: 50,
        coin_reward: 10,
    },
    Achievement {
        id: AchievementId::PerfectScore,
        name: "Perfectionist",
        description: "Get a perfect score (100%) on any quiz.",
        icon: "💯",
        category: AchievementCategory::Milestone,
        xp_reward: 100,
        coin_reward: 50,
    },
    Achievement {
        id: AchievementId::PresentMaster,
        name: "Present Pro",
        description: "Complete all Present Tenses quizzes.",
        icon: "📖",
        category: AchievementCategory::Mastery,
        xp_reward: 200,
        coin_reward: 100,
    },
    Achievement {
        id: AchievementId::PastMaster,
        name: "Past Pro",
        description: "Complete all Past Tenses quizzes.",
        icon: "🕰️",
        category: AchievementCategory::Mastery,
        xp_reward: 200,
        coin_reward: 100,
    },
    Achievement {
        id: AchievementId::FutureMaster,
        name: "Future Pro",
        description: "Complete all Future Tenses quizzes.",
        icon: "🚀",
        category: AchievementCategory::Mastery,
        xp_reward: 200,
        coin_reward: 100,
    },
    Achievement {
        id: AchievementId::PassiveMaster,
        name: "Passive Pro",
        description: "Complete all Passive Voice quizzes.",
        icon: "📚",
        category: AchievementCategory::Mastery,
        xp_reward: 150,
        coin_reward: 75,
    },
    Achievement {
        id: AchievementId::ReportedSpeechMaster,
        name: "Reported Pro",
        description: "Complete all Reported Speech quizzes.",
        icon: "💬",
        category: AchievementCategory::Mastery,
        xp_reward: 150,
        coin_reward: 75,
    },
    Achievement {
        id: AchievementId::FirstCustomMaster,
        name: "Community Scholar",
        description: "Master your first user-created course.",
        icon: "🤝",
        category: AchievementCategory::Mastery,
        xp_reward: 250,
        coin_reward: 125,
    },
    Achievement {
        id: AchievementId::GrammarGuru,
        name: "Grammar Guru",
        description: "Complete all available courses.",
        icon: "🎓",
        category: AchievementCategory::Mastery,
        xp_reward: 1000,
        coin_reward: 500,
    },
    Achievement {
        id: AchievementId::StreakStarter,
        name: "Warming Up",
        description: "Maintain a 3-day streak.",
        icon: "🔥",
        category: AchievementCategory::Streak,
        xp_reward: 75,
        coin_reward: 25,
    },
    Achievement {
        id: AchievementId::StreakMaster,
        name: "On Fire!",
        description: "Maintain a 7-day streak.",
        icon: "☄️",
        category: AchievementCategory::Streak,
        xp_reward: 250,
        coin_reward: 150,
    },
    Achievement {
        id: AchievementId::QuizMaster,
        name: "Dedicated Learner",
        description: "Complete 25 quizzes in total.",
        icon: "🏅",
        category: AchievementCategory::Milestone,
        xp_reward: 300,
        coin_reward: 200,
    },
    Achievement {
        id: AchievementId::HighRoller,
        name: "Big Spender",
        description: "Spend 1000 AI Coins in the shop.",
        icon: "💰",
        category: AchievementCategory::Shop,
        xp_reward: 100,
        coin_reward: 0,
    },
];
