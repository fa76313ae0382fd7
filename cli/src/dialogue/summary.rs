//! # Overall Feedback Summary
//!
//! File: cli/src/dialogue/summary.rs
//!
//! ## Overview
//!
//! End-of-interview summary built from what the session covered.
//!
use super::context::{Category, SessionContext};

pub const ENGAGED: &str = "- You engaged well with the questions and provided thoughtful responses\n";
pub const BEHAVIORAL_STRENGTH: &str =
    "- You showed good ability to provide specific examples from past experiences\n";
pub const TECHNICAL_STRENGTH: &str = "- You effectively communicated your technical knowledge\n";
pub const SITUATIONAL_STRENGTH: &str =
    "- Your problem-solving approach to hypothetical scenarios was systematic\n";

const IMPROVEMENTS: &str = "\nAreas for improvement:\n\
- Continue practicing the STAR method for behavioral questions\n\
- Work on being concise while still providing enough detail\n";

const CLOSING: &str = "\nKeep practicing, and you'll become more confident and polished in your interview responses. Would you like to practice any specific types of questions further?";

pub fn overall_feedback(ctx: &SessionContext) -> String {
    let mut feedback = match ctx.user_info.name() {
        Some(name) => format!("{name}, based on our practice interview, here's my overall feedback:\n\n"),
        None => "Based on our practice interview, here's my overall feedback:\n\n".to_string(),
    };

    feedback.push_str("Strengths:\n");
    feedback.push_str(ENGAGED);
    for (category, bullet) in [
        (Category::Behavioral, BEHAVIORAL_STRENGTH),
        (Category::Technical, TECHNICAL_STRENGTH),
        (Category::Situational, SITUATIONAL_STRENGTH),
    ] {
        if ctx.has_covered(category) {
            feedback.push_str(bullet);
        }
    }

    feedback.push_str(IMPROVEMENTS);
    feedback.push_str(CLOSING);
    feedback
}
