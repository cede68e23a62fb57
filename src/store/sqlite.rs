//! SQLite-backed content and profile stores

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use super::db::Database;
use super::import::{ContentPack, ImportSummary};
use super::{ContentStore, ProfileStore, StoreError, StoreResult};
use crate::domain::{
    ClozeTestChallenge, Course, CourseCatalog, GrammarDetectiveChallenge, ProfileUpdate, Question,
    QuestionSource, Role, TenseIdentificationChallenge, UserProfile,
};
use crate::engine::Standing;

const PROFILE_COLUMNS: &str = "id, email, username, xp, ai_coins, streak_days, last_login, active_theme, \
     achievements, purchased_themes, purchased_power_ups, course_progress, \
     total_quizzes_completed, total_coins_spent, last_challenge_completed, role";

#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self {
            db: Database::open(path)?,
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
        })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Write an already validated content pack in one transaction. Existing ids are replaced.
    pub fn import(&self, pack: &ContentPack) -> StoreResult<ImportSummary> {
        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();
        let mut summary = ImportSummary::default();

        for course in &pack.courses {
            tx.execute(
                "INSERT OR REPLACE INTO courses (id, name, description, icon_name, author, tenses, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    course.id,
                    course.name,
                    course.description,
                    course.icon_name,
                    course.author,
                    serde_json::to_string(&course.tenses)?,
                    now,
                ],
            )?;
            summary.courses += 1;
        }

        for (source, question) in pack.questions_with_sources() {
            tx.execute(
                "INSERT OR REPLACE INTO questions (id, source, prompt, options, correct_option)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    question.id,
                    source.key(),
                    question.prompt,
                    serde_json::to_string(&question.options)?,
                    question.correct_option,
                ],
            )?;
            summary.questions += 1;
        }

        for c in &pack.cloze {
            tx.execute(
                "INSERT OR REPLACE INTO cloze_challenges (id, story_template, blanks) VALUES (?1, ?2, ?3)",
                params![c.id, c.story_template, serde_json::to_string(&c.blanks)?],
            )?;
            summary.cloze += 1;
        }

        for d in &pack.detective {
            tx.execute(
                "INSERT OR REPLACE INTO detective_challenges (id, paragraph, errors) VALUES (?1, ?2, ?3)",
                params![d.id, d.paragraph, serde_json::to_string(&d.errors)?],
            )?;
            summary.detective += 1;
        }

        for t in &pack.identification {
            tx.execute(
                "INSERT OR REPLACE INTO identification_challenges (id, sentence, correct_tense_name)
                 VALUES (?1, ?2, ?3)",
                params![t.id, t.sentence, t.correct_tense_name],
            )?;
            summary.identification += 1;
        }

        tx.commit()?;
        tracing::info!(
            target: "tense_master::store",
            courses = summary.courses,
            questions = summary.questions,
            cloze = summary.cloze,
            detective = summary.detective,
            identification = summary.identification,
            "Imported content pack"
        );
        Ok(summary)
    }

    fn query_profile(&self, column: &str, value: &str) -> StoreResult<Option<UserProfile>> {
        let conn = self.db.conn()?;
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE {column} = ?1");
        let row = conn
            .query_row(&sql, params![value], ProfileRow::read)
            .optional()?;
        row.map(ProfileRow::into_profile).transpose()
    }
}

/// Raw profile columns before JSON and timestamp decoding
struct ProfileRow {
    id: String,
    email: String,
    username: String,
    xp: i64,
    ai_coins: i64,
    streak_days: i64,
    last_login: Option<String>,
    active_theme: String,
    achievements: String,
    purchased_themes: String,
    purchased_power_ups: String,
    course_progress: String,
    total_quizzes_completed: i64,
    total_coins_spent: i64,
    last_challenge_completed: Option<String>,
    role: String,
}

impl ProfileRow {
    fn read(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            email: r.get(1)?,
            username: r.get(2)?,
            xp: r.get(3)?,
            ai_coins: r.get(4)?,
            streak_days: r.get(5)?,
            last_login: r.get(6)?,
            active_theme: r.get(7)?,
            achievements: r.get(8)?,
            purchased_themes: r.get(9)?,
            purchased_power_ups: r.get(10)?,
            course_progress: r.get(11)?,
            total_quizzes_completed: r.get(12)?,
            total_coins_spent: r.get(13)?,
            last_challenge_completed: r.get(14)?,
            role: r.get(15)?,
        })
    }

    fn into_profile(self) -> StoreResult<UserProfile> {
        Ok(UserProfile {
            id: self.id,
            email: self.email,
            username: self.username,
            xp: to_u64(self.xp),
            ai_coins: to_u64(self.ai_coins),
            streak_days: to_u64(self.streak_days) as u32,
            last_login: parse_timestamp(self.last_login)?,
            active_theme: self.active_theme,
            achievements: serde_json::from_str(&self.achievements)?,
            purchased_themes: serde_json::from_str(&self.purchased_themes)?,
            purchased_power_ups: serde_json::from_str(&self.purchased_power_ups)?,
            course_progress: serde_json::from_str(&self.course_progress)?,
            total_quizzes_completed: to_u64(self.total_quizzes_completed) as u32,
            total_coins_spent: to_u64(self.total_coins_spent),
            last_challenge_completed: parse_timestamp(self.last_challenge_completed)?,
            role: Role::from_str(&self.role),
        })
    }
}

fn to_u64(v: i64) -> u64 {
    v.max(0) as u64
}

fn to_sql_int(v: u64) -> Value {
    Value::Integer(i64::try_from(v).unwrap_or(i64::MAX))
}

fn parse_timestamp(raw: Option<String>) -> StoreResult<Option<DateTime<Utc>>> {
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{s}': {e}")))
    })
    .transpose()
}

/// `SET` clauses and bound values for the fields present in `update`
fn update_columns(update: &ProfileUpdate) -> StoreResult<(Vec<&'static str>, Vec<Value>)> {
    let mut sets = Vec::new();
    let mut values = Vec::new();

    if let Some(v) = update.xp {
        sets.push("xp = ?");
        values.push(to_sql_int(v));
    }
    if let Some(v) = update.ai_coins {
        sets.push("ai_coins = ?");
        values.push(to_sql_int(v));
    }
    if let Some(v) = update.streak_days {
        sets.push("streak_days = ?");
        values.push(Value::Integer(i64::from(v)));
    }
    if let Some(v) = update.last_login {
        sets.push("last_login = ?");
        values.push(Value::Text(v.to_rfc3339()));
    }
    if let Some(v) = &update.active_theme {
        sets.push("active_theme = ?");
        values.push(Value::Text(v.clone()));
    }
    if let Some(v) = &update.achievements {
        sets.push("achievements = ?");
        values.push(Value::Text(serde_json::to_string(v)?));
    }
    if let Some(v) = &update.purchased_themes {
        sets.push("purchased_themes = ?");
        values.push(Value::Text(serde_json::to_string(v)?));
    }
    if let Some(v) = &update.purchased_power_ups {
        sets.push("purchased_power_ups = ?");
        values.push(Value::Text(serde_json::to_string(v)?));
    }
    if let Some(v) = &update.course_progress {
        sets.push("course_progress = ?");
        values.push(Value::Text(serde_json::to_string(v)?));
    }
    if let Some(v) = update.total_quizzes_completed {
        sets.push("total_quizzes_completed = ?");
        values.push(Value::Integer(i64::from(v)));
    }
    if let Some(v) = update.total_coins_spent {
        sets.push("total_coins_spent = ?");
        values.push(to_sql_int(v));
    }
    if let Some(v) = update.last_challenge_completed {
        sets.push("last_challenge_completed = ?");
        values.push(Value::Text(v.to_rfc3339()));
    }

    Ok((sets, values))
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn fetch_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        self.query_profile("id", user_id)?
            .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserProfile>> {
        self.query_profile("username", username)
    }

    async fn create_profile(&self, profile: &UserProfile) -> StoreResult<()> {
        let conn = self.db.conn()?;
        conn.execute(
            "INSERT INTO profiles (id, email, username, xp, ai_coins, streak_days, last_login, active_theme,
                 achievements, purchased_themes, purchased_power_ups, course_progress,
                 total_quizzes_completed, total_coins_spent, last_challenge_completed, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            params![
                profile.id,
                profile.email,
                profile.username,
                to_sql_int(profile.xp),
                to_sql_int(profile.ai_coins),
                profile.streak_days,
                profile.last_login.map(|t| t.to_rfc3339()),
                profile.active_theme,
                serde_json::to_string(&profile.achievements)?,
                serde_json::to_string(&profile.purchased_themes)?,
                serde_json::to_string(&profile.purchased_power_ups)?,
                serde_json::to_string(&profile.course_progress)?,
                profile.total_quizzes_completed,
                to_sql_int(profile.total_coins_spent),
                profile.last_challenge_completed.map(|t| t.to_rfc3339()),
                profile.role.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        tracing::info!(target: "tense_master::store", user_id = %profile.id, username = %profile.username, "Created profile");
        Ok(())
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> StoreResult<()> {
        let (sets, mut values) = update_columns(update)?;
        if sets.is_empty() {
            return Ok(());
        }
        values.push(Value::Text(user_id.to_string()));
        let sql = format!("UPDATE profiles SET {} WHERE id = ?", sets.join(", "));

        let mut conn = self.db.conn()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("profile {user_id}")));
        }
        tx.commit()?;

        tracing::debug!(target: "tense_master::store", user_id, fields = sets.len(), "Updated profile");
        Ok(())
    }

    async fn leaderboard(&self) -> StoreResult<Vec<Standing>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, username, xp FROM profiles")?;
        let rows = stmt.query_map([], |r| {
            Ok(Standing {
                user_id: r.get(0)?,
                username: r.get(1)?,
                xp: to_u64(r.get(2)?),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn fetch_questions(&self, source: &QuestionSource) -> StoreResult<Vec<Question>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, prompt, options, correct_option FROM questions WHERE source = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![source.key()], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;

        let mut questions = Vec::new();
        for row in rows {
            let (id, prompt, options, correct_option) = row?;
            questions.push(Question {
                id,
                prompt,
                options: serde_json::from_str(&options)?,
                correct_option,
            });
        }
        tracing::debug!(target: "tense_master::store", source = %source.key(), count = questions.len(), "Fetched questions");
        Ok(questions)
    }

    async fn fetch_catalog(&self) -> StoreResult<CourseCatalog> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, icon_name, author, tenses FROM courses ORDER BY created_at, id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, Option<String>>(4)?,
                r.get::<_, String>(5)?,
            ))
        })?;

        let mut custom = Vec::new();
        for row in rows {
            let (id, name, description, icon_name, author, tenses) = row?;
            custom.push(Course {
                id,
                name,
                description,
                icon_name,
                author,
                builtin: false,
                tenses: serde_json::from_str(&tenses)?,
            });
        }
        Ok(CourseCatalog::with_custom(custom))
    }

    async fn fetch_cloze(&self) -> StoreResult<Vec<ClozeTestChallenge>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, story_template, blanks FROM cloze_challenges ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, story_template, blanks) = row?;
            out.push(ClozeTestChallenge {
                id,
                story_template,
                blanks: serde_json::from_str(&blanks)?,
            });
        }
        Ok(out)
    }

    async fn fetch_detective(&self) -> StoreResult<Vec<GrammarDetectiveChallenge>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, paragraph, errors FROM detective_challenges ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, paragraph, errors) = row?;
            out.push(GrammarDetectiveChallenge {
                id,
                paragraph,
                errors: serde_json::from_str(&errors)?,
            });
        }
        Ok(out)
    }

    async fn fetch_identification(&self) -> StoreResult<Vec<TenseIdentificationChallenge>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, sentence, correct_tense_name FROM identification_challenges ORDER BY id",
        )?;
        let rows = stmt.query_map([], |r| {
            Ok(TenseIdentificationChallenge {
                id: r.get(0)?,
                sentence: r.get(1)?,
                correct_tense_name: r.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
