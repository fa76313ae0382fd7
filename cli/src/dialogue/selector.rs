//! # Question Selection
//!
//! File: cli/src/dialogue/selector.rs
//!
//! ## Overview
//!
//! Question selection and the random source behind it.
//!
//! This is the only place the dialogue engine draws random numbers. The
//! source is injected so a session can be replayed from a seed and tests can
//! script every draw.
//!
use super::bank::QuestionBank;
use super::context::{Category, SessionContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::debug;

/// Upper bound on same-category redraws while the no-repeat rule applies.
pub const MAX_REDRAWS: usize = 32;

/// Turns before which a category may not be asked twice in a row.
const NO_REPEAT_BELOW: u32 = 3;

/// Yields uniformly distributed indices.
pub trait RandomSource {
    /// An index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// `StdRng`-backed source, seeded from the OS or a fixed value.
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Replays a fixed list of draws, then keeps returning 0.
///
/// Out-of-range draws are wrapped with `% len`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = usize>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.draws.pop_front().unwrap_or(0) % len
    }
}

/// Chooses the category for the next question.
///
/// A regular category is drawn; while fewer than three questions have been
/// answered the draw is repeated until it differs from the previous category.
/// On the fourth and fifth question a curveball is forced if none has been
/// asked yet.
pub fn choose_category<R: RandomSource + ?Sized>(ctx: &SessionContext, rng: &mut R) -> Category {
    let candidates = Category::REGULAR;
    let mut category = candidates[rng.pick(candidates.len())];

    if ctx.question_count < NO_REPEAT_BELOW {
        if let Some(last) = ctx.last_question_type {
            let mut redraws = 0;
            while category == last && redraws < MAX_REDRAWS {
                category = candidates[rng.pick(candidates.len())];
                redraws += 1;
            }
            if category == last {
                debug!(%last, "redraw limit reached, taking next category");
                category = candidates
                    .into_iter()
                    .find(|c| *c != last)
                    .unwrap_or(category);
            }
        }
    }

    if matches!(ctx.question_count, 3 | 4) && !ctx.has_covered(Category::Curveball) {
        category = Category::Curveball;
    }

    category
}

/// Draws the next question and records its category on the context.
pub fn next_question<R: RandomSource + ?Sized>(
    ctx: &mut SessionContext,
    bank: &QuestionBank,
    rng: &mut R,
) -> &'static str {
    let category = choose_category(ctx, rng);
    let questions = bank.questions(category);
    let question = questions[rng.pick(questions.len())];

    ctx.last_question_type = Some(category);
    ctx.topics_covered.insert(category);
    debug!(%category, count = ctx.question_count, "selected next question");

    question
}
