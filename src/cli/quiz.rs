//! Lesson, daily and review quizzes

use anyhow::Result;
use chrono::Utc;

use tense_master::engine::daily::{can_take_daily, mode_of_the_day, time_until_next, Deadline};
use tense_master::engine::sampling::sample_questions;
use tense_master::engine::submission::{plan_daily, plan_lesson, plan_review, SubmissionPlan};
use tense_master::engine::QuizSession;
use tense_master::notify::sequence_submission;
use tense_master::store::ContentStore;
use tense_master::{
    ChallengeMode, DailyMode, EngineError, PowerUpKind, Question, QuestionSource, Session,
};

use super::{Context, Prompt};

pub async fn lesson_command(ctx: &Context, user: Option<&str>, course_id: &str, tense_id: &str) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let catalog = ctx.store.fetch_catalog().await?;
    let course = catalog
        .get(course_id)
        .ok_or_else(|| EngineError::UnknownCourse(course_id.to_string()))?;
    let tense = course.tense(tense_id).ok_or_else(|| EngineError::UnknownTense {
        course_id: course_id.to_string(),
        tense_id: tense_id.to_string(),
    })?;

    let source = if course.builtin {
        QuestionSource::Lesson {
            tense_id: tense_id.to_string(),
        }
    } else {
        QuestionSource::CustomLesson {
            tense_id: tense_id.to_string(),
        }
    };
    let questions = draw(ctx, &source).await?;

    println!("{}: {} ({} questions)\n", ChallengeMode::Lesson, tense.name, questions.len());
    let mut quiz = QuizSession::new(questions, session.profile.purchased_power_ups.clone());
    let mut prompt = Prompt::new();
    if run_quiz(&mut prompt, &mut quiz, true, None).await? == QuizEnd::Abandoned {
        abandoned();
        return Ok(());
    }

    let plan = plan_lesson(&session.profile, &catalog, course_id, tense_id, &quiz, &ctx.config.rewards)?;
    finish(ctx, &mut session, &plan).await;

    if session.profile.tense_completed(course_id, tense_id) {
        if let Some(next) = course.next_tense(tense_id) {
            println!("Next up: {} (tense-master lesson {course_id} {})", next.name, next.id);
        }
    }
    Ok(())
}

pub async fn daily_command(ctx: &Context, user: Option<&str>, mode: Option<DailyMode>) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let boundary = ctx.config.settings.day_boundary;
    let now = Utc::now();

    if !can_take_daily(session.profile.last_challenge_completed, now, boundary) {
        match time_until_next(session.profile.last_challenge_completed, now, boundary) {
            Some(wait) => println!(
                "Daily challenge already done. Next one in {}h {}m.",
                wait.num_hours(),
                wait.num_minutes() % 60
            ),
            None => println!("Daily challenge already done."),
        }
        return Ok(());
    }

    let mode = mode.unwrap_or_else(|| mode_of_the_day(boundary.date_of(now)));
    let source = QuestionSource::Daily(mode);
    let questions = draw(ctx, &source).await?;
    let deadline = ctx.config.quiz.time_limit(&source).map(Deadline::start);

    let challenge = ChallengeMode::Daily(mode);
    println!("{}: {}\n", challenge, challenge.spec().description);
    let mut quiz = QuizSession::new(questions, Default::default());
    let mut prompt = Prompt::new();
    if run_quiz(&mut prompt, &mut quiz, false, deadline).await? == QuizEnd::Abandoned {
        abandoned();
        return Ok(());
    }

    let plan = plan_daily(
        &session.profile,
        mode,
        quiz.questions(),
        quiz.answers(),
        Utc::now(),
        boundary,
        &ctx.config.rewards,
    )?;
    finish(ctx, &mut session, &plan).await;
    Ok(())
}

pub async fn review_command(ctx: &Context, user: Option<&str>, course_id: &str) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let catalog = ctx.store.fetch_catalog().await?;
    let course = catalog
        .get(course_id)
        .ok_or_else(|| EngineError::UnknownCourse(course_id.to_string()))?;

    let source = QuestionSource::Review {
        course_id: course_id.to_string(),
    };
    let questions = draw(ctx, &source).await?;

    println!("{}: {}\n", ChallengeMode::Review, course.name);
    let mut quiz = QuizSession::new(questions, Default::default());
    let mut prompt = Prompt::new();
    if run_quiz(&mut prompt, &mut quiz, false, None).await? == QuizEnd::Abandoned {
        abandoned();
        return Ok(());
    }

    let plan = plan_review(&session.profile, course_id, quiz.questions(), quiz.answers(), &ctx.config.rewards)?;
    finish(ctx, &mut session, &plan).await;
    Ok(())
}

/// Fetch and sample the questions for `source`
async fn draw(ctx: &Context, source: &QuestionSource) -> Result<Vec<Question>> {
    let pool = ctx.store.fetch_questions(source).await?;
    let questions = sample_questions(pool, ctx.config.quiz.question_limit(source), &mut rand::thread_rng());
    if questions.is_empty() {
        return Err(EngineError::NoQuestions(source.key()).into());
    }
    Ok(questions)
}

/// Print the result, persist, then play the notifications
pub(super) async fn finish(ctx: &Context, session: &mut Session, plan: &SubmissionPlan) {
    println!("\nScore: {}", plan.result.headline());
    let persisted = session.submit(&ctx.store, plan).await;
    let schedule = sequence_submission(plan, &persisted, ctx.config.notifications.stagger());
    ctx.announce(&schedule).await;
}

pub(super) fn abandoned() {
    println!("\nQuiz abandoned, nothing saved.");
}

enum Step {
    Next,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizEnd {
    Finished,
    TimeUp,
    /// Input ended before every question was answered
    Abandoned,
}

/// Ask every question in order. Stops early at end of input or when `deadline` passes.
async fn run_quiz(
    prompt: &mut Prompt,
    quiz: &mut QuizSession,
    power_ups: bool,
    deadline: Option<Deadline>,
) -> Result<QuizEnd> {
    let questions = quiz.questions().to_vec();
    for (i, question) in questions.iter().enumerate() {
        if deadline.is_some_and(|d| d.is_expired()) {
            println!("\nTime's up!");
            return Ok(QuizEnd::TimeUp);
        }
        println!("Question {}/{}: {}", i + 1, questions.len(), question.prompt);
        let step = match deadline {
            Some(deadline) => {
                println!("  ({}s left)", deadline.remaining().as_secs());
                match tokio::time::timeout(deadline.remaining(), ask_one(prompt, quiz, question, power_ups)).await {
                    Ok(step) => step?,
                    Err(_) => {
                        println!("\nTime's up!");
                        return Ok(QuizEnd::TimeUp);
                    }
                }
            }
            None => ask_one(prompt, quiz, question, power_ups).await?,
        };
        if let Step::Stop = step {
            return Ok(QuizEnd::Abandoned);
        }
    }
    if quiz.is_complete() {
        Ok(QuizEnd::Finished)
    } else {
        Ok(QuizEnd::Abandoned)
    }
}

async fn ask_one(prompt: &mut Prompt, quiz: &mut QuizSession, question: &Question, power_ups: bool) -> Result<Step> {
    loop {
        let options: Vec<String> = quiz.options(&question.id)?.into_iter().map(String::from).collect();
        for (n, option) in options.iter().enumerate() {
            println!("  {}. {option}", n + 1);
        }
        if let Some(hint) = quiz.hint(&question.id) {
            println!("  Hint: the answer is \"{hint}\"");
        }
        let menu = if power_ups { power_up_menu(quiz) } else { String::new() };

        let Some(input) = prompt.ask(&format!("Answer{menu}: ")).await? else {
            return Ok(Step::Stop);
        };

        if let Ok(n) = input.parse::<usize>() {
            let Some(option) = options.get(n.wrapping_sub(1)) else {
                println!("Enter a number between 1 and {}.", options.len());
                continue;
            };
            quiz.select(&question.id, option)?;
            if question.is_correct(option) {
                println!("Correct!\n");
                return Ok(Step::Next);
            }
            println!("Not quite.");
            if power_ups && quiz.remaining(PowerUpKind::SecondChance) > 0 {
                let retry = prompt.ask("Use a Second Chance? [y/N]: ").await?;
                if retry.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("y")) {
                    quiz.use_power_up(PowerUpKind::SecondChance, &question.id)?;
                    continue;
                }
            }
            println!("The answer was \"{}\".\n", question.correct_option);
            return Ok(Step::Next);
        }

        let kind = match input.as_str() {
            "h" if power_ups => PowerUpKind::Hint,
            "f" if power_ups => PowerUpKind::FiftyFifty,
            "s" if power_ups => PowerUpKind::Skip,
            "d" if power_ups => PowerUpKind::DoubleXp,
            _ => {
                println!("Enter the number of your answer.");
                continue;
            }
        };
        match quiz.use_power_up(kind, &question.id) {
            Ok(()) if kind == PowerUpKind::Skip => {
                println!("Skipped.\n");
                return Ok(Step::Next);
            }
            Ok(()) if kind == PowerUpKind::DoubleXp => println!("Double XP active for this quiz!"),
            Ok(()) => {}
            Err(e) => println!("{e}"),
        }
    }
}

fn power_up_menu(quiz: &QuizSession) -> String {
    let entries: Vec<String> = [
        ('h', PowerUpKind::Hint),
        ('f', PowerUpKind::FiftyFifty),
        ('s', PowerUpKind::Skip),
        ('d', PowerUpKind::DoubleXp),
    ]
    .into_iter()
    .filter(|(_, kind)| *kind != PowerUpKind::DoubleXp || !quiz.double_xp_active())
    .filter_map(|(key, kind)| {
        let n = quiz.remaining(kind);
        (n > 0).then(|| format!("{key}={} x{n}", kind.label()))
    })
    .collect();

    if entries.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entries.join(", "))
    }
}
