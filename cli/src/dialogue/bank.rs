//! # Question Bank
//!
//! File: cli/src/dialogue/bank.rs
//!
//! ## Overview
//!
//! Static question bank, one fixed list per category.
//!
use super::context::Category;

const BEHAVIORAL: &[&str] = &[
    "Tell me about a time when you had to deal with a difficult team member.",
    "Describe a situation where you had to make a decision with limited information.",
    "Tell me about a project that didn't go as planned. How did you handle it?",
    "Give me an example of a time you showed leadership skills.",
    "Describe a situation where you had to meet a tight deadline.",
    "Tell me about a time you received critical feedback and how you responded to it.",
    "Describe a situation where you had to resolve a conflict at work.",
];

const TECHNICAL: &[&str] = &[
    "How would you design a system that needs to handle high traffic?",
    "Explain how you would approach debugging a complex issue in production.",
    "What factors do you consider when selecting technologies for a new project?",
    "How do you stay updated with the latest trends in your field?",
    "Describe your process for ensuring code quality.",
    "How would you optimize a slow-performing application?",
];

const PERSONAL: &[&str] = &[
    "What are your greatest strengths?",
    "What do you consider to be your weaknesses?",
    "Where do you see yourself in five years?",
    "Why do you want to work for this company?",
    "What motivates you in your work?",
    "Tell me about yourself.",
    "Why should we hire you for this position?",
];

const SITUATIONAL: &[&str] = &[
    "How would you handle a situation where you disagree with your manager's approach?",
    "What would you do if you were assigned a task but weren't given enough resources?",
    "How would you prioritize competing deadlines?",
    "What would you do if a team member wasn't contributing their fair share?",
    "How would you handle receiving an unrealistic deadline for an important project?",
];

const CURVEBALL: &[&str] = &[
    "If you were an animal, what would you be and why?",
    "How many windows are there in New York City?",
    "Sell me this pen.",
    "If you could have dinner with anyone from history, who would it be and why?",
];

/// Read-only mapping from category to its questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionBank;

impl QuestionBank {
    /// Questions for `category`, in bank order. Never empty.
    pub fn questions(&self, category: Category) -> &'static [&'static str] {
        match category {
            Category::Behavioral => BEHAVIORAL,
            Category::Technical => TECHNICAL,
            Category::Personal => PERSONAL,
            Category::Situational => SITUATIONAL,
            Category::Curveball => CURVEBALL,
        }
    }

    /// The category a question text belongs to, if it is in the bank.
    #[cfg(test)]
    pub(crate) fn category_of(&self, question: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| self.questions(*c).contains(&question))
    }
}
