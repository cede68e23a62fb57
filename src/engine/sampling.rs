//! Random question selection and option shuffling

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Question, TenseIdentificationChallenge, ALL_TENSE_NAMES};

/// Wrong options offered next to the correct tense name
const IDENTIFICATION_DISTRACTORS: usize = 3;

/// Shuffle `pool` and keep at most `limit` items
pub fn sample<T, R: Rng + ?Sized>(mut pool: Vec<T>, limit: usize, rng: &mut R) -> Vec<T> {
    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

/// Sample a quiz and shuffle each question's options
pub fn sample_questions<R: Rng + ?Sized>(pool: Vec<Question>, limit: usize, rng: &mut R) -> Vec<Question> {
    let mut questions = sample(pool, limit, rng);
    for q in &mut questions {
        q.options.shuffle(rng);
    }
    questions
}

/// Correct tense name plus three random wrong ones, shuffled
pub fn identification_options<R: Rng + ?Sized>(challenge: &TenseIdentificationChallenge, rng: &mut R) -> Vec<String> {
    let wrong: Vec<&str> = ALL_TENSE_NAMES
        .iter()
        .copied()
        .filter(|name| *name != challenge.correct_tense_name)
        .collect();
    let mut options: Vec<String> = wrong
        .choose_multiple(rng, IDENTIFICATION_DISTRACTORS)
        .map(|s| s.to_string())
        .collect();
    options.push(challenge.correct_tense_name.clone());
    options.shuffle(rng);
    options
}
