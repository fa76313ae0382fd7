//! # Answer Evaluator
//!
//! File: cli/src/dialogue/evaluator.rs
//!
//! ## Overview
//!
//! Heuristic answer evaluation: a length check plus a per-category keyword
//! rubric. Deterministic.
//!
use super::context::Category;
use super::rules::contains_any;

pub const BRIEF_WORDS: usize = 20;
pub const LONG_WORDS: usize = 150;

pub const TOO_BRIEF: &str = "Your answer was quite brief. In interviews, it's important to provide enough detail to fully address the question while staying concise.";
pub const TOO_LONG: &str = "Your answer was quite detailed. While thoroughness is good, in an interview setting, try to be a bit more concise to respect the interviewer's time.";
pub const WELL_PACED: &str =
    "Your answer was well-paced and an appropriate length for an interview response.";

/// What a category expects to hear, and what to say either way.
struct Rubric {
    expected: &'static [&'static str],
    missing: &'static str,
    present: &'static str,
}

const BEHAVIORAL: Rubric = Rubric {
    expected: &["situation", "task", "action", "result", "problem", "solution", "outcome", "learned"],
    missing: "When answering behavioral questions, try using the STAR method: describe the Situation, Task, your Action, and the Result. This structure helps provide a complete and compelling story.",
    present: "Good use of storytelling elements in your response. Behavioral questions are best answered with specific examples, as you've done.",
};

const TECHNICAL: Rubric = Rubric {
    expected: &["experience", "approach", "method", "process", "technique", "technology", "solution"],
    missing: "For technical questions, focus on demonstrating your expertise by describing your approach, methodologies, and specific technologies you've used.",
    present: "Good technical response. You've shown your knowledge and practical experience effectively.",
};

const PERSONAL: Rubric = Rubric {
    expected: &["i believe", "i think", "my approach", "personally", "my experience", "i feel"],
    missing: "When answering personal questions, make sure to express your own perspective and highlight what makes you unique as a candidate.",
    present: "Good personal insight in your answer. You've effectively communicated your individual perspective.",
};

const SITUATIONAL: Rubric = Rubric {
    expected: &["would", "could", "might", "approach", "handle", "manage", "steps", "first"],
    missing: "For situational questions, outline the specific steps you would take to address the scenario, focusing on your problem-solving process.",
    present: "Good approach to the hypothetical situation. You've demonstrated your problem-solving abilities well.",
};

pub const CURVEBALL_ACK: &str = "Interesting response to an unexpected question. These questions often test your ability to think on your feet and show your personality. Your answer gives the interviewer insight into how you approach unusual challenges.";

fn rubric(category: Category) -> Option<&'static Rubric> {
    match category {
        Category::Behavioral => Some(&BEHAVIORAL),
        Category::Technical => Some(&TECHNICAL),
        Category::Personal => Some(&PERSONAL),
        Category::Situational => Some(&SITUATIONAL),
        Category::Curveball => None,
    }
}

pub fn length_feedback(answer: &str) -> &'static str {
    let words = answer.split_whitespace().count();
    if words < BRIEF_WORDS {
        TOO_BRIEF
    } else if words > LONG_WORDS {
        TOO_LONG
    } else {
        WELL_PACED
    }
}

pub fn content_feedback(answer: &str, category: Category) -> &'static str {
    match rubric(category) {
        Some(r) if contains_any(&answer.to_lowercase(), r.expected) => r.present,
        Some(r) => r.missing,
        None => CURVEBALL_ACK,
    }
}

/// Length feedback and content feedback, separated by a single space.
pub fn evaluate_answer(answer: &str, category: Category) -> String {
    format!(
        "{} {}",
        length_feedback(answer),
        content_feedback(answer, category)
    )
}
