//! Grammar Gauntlet games

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;

use tense_master::engine::sampling::{identification_options, sample};
use tense_master::engine::scoring::toggle_word;
use tense_master::engine::submission::{plan_cloze, plan_detective, plan_identification};
use tense_master::store::ContentStore;
use tense_master::{ChallengeMode, EngineError, GauntletMode};

use super::quiz::{abandoned, finish};
use super::{Context, Prompt};

pub async fn gauntlet_command(ctx: &Context, user: Option<&str>, mode: GauntletMode) -> Result<()> {
    let mut session = ctx.login(user).await?;
    let challenge = ChallengeMode::Gauntlet(mode);
    println!("{}: {}\n", challenge, challenge.spec().description);

    let mut prompt = Prompt::new();
    let plan = match mode {
        GauntletMode::Detective => {
            let pool = ctx.store.fetch_detective().await?;
            let Some(text) = sample(pool, 1, &mut rand::thread_rng()).pop() else {
                return Err(EngineError::NoQuestions("detective".to_string()).into());
            };

            let words: Vec<&str> = text.paragraph.split_whitespace().collect();
            let mut selected = BTreeSet::new();
            loop {
                for (n, word) in words.iter().enumerate() {
                    print!("{word}({}) ", n + 1);
                }
                println!();
                if !selected.is_empty() {
                    let marked: Vec<&str> = selected.iter().map(String::as_str).collect();
                    println!("Marked: {}", marked.join(", "));
                }
                let Some(input) = prompt.ask("Word numbers to mark or unmark (empty line submits): ").await? else {
                    abandoned();
                    return Ok(());
                };
                if input.is_empty() {
                    break;
                }
                for token in input.split_whitespace() {
                    match token.parse::<usize>().ok().and_then(|n| words.get(n.wrapping_sub(1))) {
                        Some(word) => toggle_word(&mut selected, word),
                        None => println!("No word {token}"),
                    }
                }
            }

            let plan = plan_detective(&session.profile, &text, &selected, &ctx.config.rewards)?;
            if let tense_master::engine::Outcome::Detective(result) = &plan.result {
                for e in text.errors.iter().filter(|e| result.missed.contains(&e.incorrect)) {
                    println!("Missed: \"{}\" should be \"{}\"", e.incorrect, e.correct);
                }
                for word in &result.incorrect {
                    println!("Not an error: \"{word}\"");
                }
            }
            plan
        }
        GauntletMode::Cloze => {
            let pool = ctx.store.fetch_cloze().await?;
            let Some(story) = sample(pool, 1, &mut rand::thread_rng()).pop() else {
                return Err(EngineError::NoQuestions("cloze".to_string()).into());
            };

            println!("{}\n", story.render(|id| format!("[{id}]")));
            let mut answers = BTreeMap::new();
            for id in story.story_blank_ids() {
                let Some(blank) = story.blank(id) else { continue };
                for (n, option) in blank.options.iter().enumerate() {
                    println!("  {}. {option}", n + 1);
                }
                let Some(choice) = prompt.choose(&format!("Blank [{id}]: "), blank.options.len()).await? else {
                    abandoned();
                    return Ok(());
                };
                answers.insert(id, blank.options[choice].clone());
            }

            println!(
                "\n{}",
                story.render(|id| story.blank(id).map(|b| b.correct_answer.clone()).unwrap_or_default())
            );
            plan_cloze(&session.profile, &story, &answers, &ctx.config.rewards)?
        }
        GauntletMode::Identification => {
            let pool = ctx.store.fetch_identification().await?;
            let mut rng = rand::thread_rng();
            let rounds = sample(pool, ctx.config.quiz.identification_questions, &mut rng);
            let options: Vec<Vec<String>> = rounds.iter().map(|r| identification_options(r, &mut rng)).collect();
            drop(rng);

            let mut answers = vec![None; rounds.len()];
            for (i, (round, options)) in rounds.iter().zip(&options).enumerate() {
                println!("\"{}\"", round.sentence);
                for (n, option) in options.iter().enumerate() {
                    println!("  {}. {option}", n + 1);
                }
                let Some(choice) = prompt.choose("Tense: ", options.len()).await? else {
                    abandoned();
                    return Ok(());
                };
                if options[choice] == round.correct_tense_name {
                    println!("Correct!\n");
                } else {
                    println!("It was {}.\n", round.correct_tense_name);
                }
                answers[i] = Some(options[choice].clone());
            }
            plan_identification(&session.profile, &rounds, &answers, &ctx.config.rewards)?
        }
    };

    finish(ctx, &mut session, &plan).await;
    Ok(())
}
