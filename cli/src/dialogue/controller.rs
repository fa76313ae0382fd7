//! # Dialogue Controller
//!
//! File: cli/src/dialogue/controller.rs
//!
//! ## Overview
//!
//! The dialogue controller: one practice session's state machine.
//!
//! Every call to [`DialogueController::process_input`] logs the user turn,
//! learns what it can about the candidate, lets the current stage handler
//! produce a reply and logs that reply. The controller never fails and never
//! returns an empty reply.
//!
use super::bank::QuestionBank;
use super::context::{Role, SessionContext, Stage};
use super::evaluator::evaluate_answer;
use super::extract::extract_user_info;
use super::rules::{self, FeedbackAction, IntroAction, FEEDBACK_RULES, INTRO_RULES};
use super::selector::{self, RandomSource, SeededRandom};
use super::summary::overall_feedback;
use tracing::debug;

/// Answers after which the interview moves on to feedback.
pub const QUESTIONS_PER_ROUND: u32 = 5;

pub const WELCOME: &str = "👋 Hello! I'm your AI interview assistant. I can help you prepare for your interview by simulating realistic interview questions and providing personalized feedback. Would you like to start a practice interview or ask questions about interview preparation?";

pub const EXPLAIN: &str = "I'm your AI interview coach. I can conduct a mock interview, provide feedback on your answers, or answer questions about interviewing techniques. Would you like to start a practice interview, or do you have specific questions about interviewing?";

pub const INTRO_DEFAULT: &str = "Hello! I'm your AI interview assistant. I can simulate a job interview to help you practice, or answer questions about interview techniques. Would you like to start a practice interview?";

pub const ROUND_COMPLETE: &str = "We've completed a good set of practice questions. Would you like to receive overall feedback on the interview, or would you prefer to continue with more questions?";

pub const FEEDBACK_PROMPT: &str = "I hope you found this practice session helpful. Would you like me to provide overall feedback on your performance, continue with more questions, or end the interview?";

const LEAD_IN: &str = "Let's begin with a common question:\n\n";

#[derive(Debug, Clone)]
pub struct DialogueController<R = SeededRandom> {
    ctx: SessionContext,
    bank: QuestionBank,
    rng: R,
}

impl DialogueController<SeededRandom> {
    /// Controller drawing from OS entropy.
    pub fn new() -> Self {
        Self::with_random(SeededRandom::from_entropy())
    }

    /// Controller whose draws repeat for the same seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_random(SeededRandom::with_seed(seed))
    }
}

impl Default for DialogueController<SeededRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> DialogueController<R> {
    pub fn with_random(rng: R) -> Self {
        Self {
            ctx: SessionContext::new(),
            bank: QuestionBank,
            rng,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Starts a fresh conversation and returns the welcome message.
    ///
    /// Clears history, stage, question count and covered topics. What was
    /// learned about the candidate is kept.
    pub fn init(&mut self) -> String {
        self.ctx.restart();
        debug!("dialogue session initialised");
        WELCOME.to_string()
    }

    /// Same as [`init`](Self::init); the name the UI uses for its clear button.
    pub fn reset(&mut self) -> String {
        self.init()
    }

    pub fn process_input(&mut self, text: &str) -> String {
        self.ctx.record(Role::User, text);
        extract_user_info(text, &mut self.ctx.user_info);

        let stage = self.ctx.stage;
        let reply = match stage {
            Stage::Introduction => self.handle_introduction(text),
            Stage::Questions => self.handle_questions(text),
            Stage::Feedback => self.handle_feedback(text),
        };
        let reply = reply.unwrap_or_else(|| self.generic_response(text));

        if stage != self.ctx.stage {
            debug!(from = ?stage, to = ?self.ctx.stage, "stage transition");
        }

        self.ctx.record(Role::Assistant, reply.clone());
        reply
    }

    /// Logs a turn that was answered somewhere else, leaving the stage alone.
    pub fn record_exchange(&mut self, text: &str, reply: &str) {
        self.ctx.record(Role::User, text);
        self.ctx.record(Role::Assistant, reply);
    }

    /// Keyword-table reply used when no stage handler has one.
    pub fn generic_response(&self, text: &str) -> String {
        rules::generic_response(text, &self.ctx).to_string()
    }

    /// Overall feedback for what has been covered so far.
    pub fn overall_feedback(&self) -> String {
        overall_feedback(&self.ctx)
    }

    fn handle_introduction(&mut self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        let reply = match rules::first_match(INTRO_RULES, &lowered, &self.ctx) {
            Some(IntroAction::BeginInterview) => self.begin_questions(),
            Some(IntroAction::Explain) => EXPLAIN.to_string(),
            Some(IntroAction::GreetByName) => {
                let name = self.ctx.user_info.name().unwrap_or_default();
                format!(
                    "Nice to meet you, {name}! Are you ready to start your interview practice? I'll ask you a series of questions similar to what you might encounter in a real interview."
                )
            }
            None => INTRO_DEFAULT.to_string(),
        };
        Some(reply)
    }

    fn handle_questions(&mut self, text: &str) -> Option<String> {
        let Some(category) = self.ctx.last_question_type else {
            return Some(self.begin_questions());
        };

        let feedback = evaluate_answer(text, category);
        self.ctx.question_count += 1;

        if self.ctx.question_count >= QUESTIONS_PER_ROUND {
            self.ctx.stage = Stage::Feedback;
            return Some(format!("{feedback}\n\n{ROUND_COMPLETE}"));
        }

        let question = self.next_question();
        Some(format!("{feedback}\n\n{question}"))
    }

    fn handle_feedback(&mut self, text: &str) -> Option<String> {
        let lowered = text.to_lowercase();
        let reply = match rules::first_match(FEEDBACK_RULES, &lowered, &self.ctx) {
            Some(FeedbackAction::MoreQuestions) => {
                self.ctx.stage = Stage::Questions;
                self.next_question().to_string()
            }
            Some(FeedbackAction::Summarize) => self.overall_feedback(),
            None => FEEDBACK_PROMPT.to_string(),
        };
        Some(reply)
    }

    /// Moves to the question stage, introduces the round and asks the first question.
    pub fn begin_questions(&mut self) -> String {
        self.ctx.stage = Stage::Questions;

        let mut intro = String::new();
        if let Some(name) = self.ctx.user_info.name() {
            intro.push_str(&format!("Great, {name}! "));
        }
        match self.ctx.user_info.target_role() {
            Some(role) => intro.push_str(&format!(
                "I'll ask you questions relevant to a {role} position. "
            )),
            None => intro.push_str(
                "I'll ask you a variety of interview questions commonly asked in job interviews. ",
            ),
        }
        intro.push_str(LEAD_IN);

        let question = self.next_question();
        intro.push_str(question);
        intro
    }

    pub fn next_question(&mut self) -> &'static str {
        selector::next_question(&mut self.ctx, &self.bank, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::context::Category;
    use crate::dialogue::selector::ScriptedRandom;

    fn scripted(draws: impl IntoIterator<Item = usize>) -> DialogueController<ScriptedRandom> {
        let mut controller = DialogueController::with_random(ScriptedRandom::new(draws));
        controller.init();
        controller
    }

    #[test]
    fn every_turn_logs_two_entries() {
        let mut controller = scripted([]);
        for (i, input) in ["hello", "start interview", "an answer", "   "].iter().enumerate() {
            let reply = controller.process_input(input);
            assert!(!reply.is_empty());
            assert_eq!(controller.context().history.len(), (i + 1) * 2);
        }
    }

    #[test]
    fn introduction_explains_itself() {
        let mut controller = scripted([]);
        assert_eq!(controller.process_input("How does this work?"), EXPLAIN);
        assert_eq!(controller.process_input("whatever"), INTRO_DEFAULT);
        assert_eq!(controller.context().stage, Stage::Introduction);
    }

    #[test]
    fn greeting_by_name() {
        let mut controller = scripted([]);
        let reply = controller.process_input("Hi, my name is sam");
        assert!(reply.starts_with("Nice to meet you, Sam!"));
    }

    #[test]
    fn start_interview_asks_first_question() {
        // Category draw 1 (technical), question draw 0.
        let mut controller = scripted([1, 0]);
        let reply = controller.process_input("I'm ready to start interview practice");
        assert_eq!(controller.context().stage, Stage::Questions);
        assert!(reply.contains("Great, Ready!"));
        assert!(reply.ends_with(QuestionBank.questions(Category::Technical)[0]));
    }

    #[test]
    fn begin_mentions_target_role() {
        let mut controller = scripted([]);
        controller.process_input("I am applying for data analyst");
        let reply = controller.process_input("let's start");
        assert!(reply.contains("relevant to a data analyst position"));
    }

    #[test]
    fn five_answers_reach_feedback_stage() {
        let mut controller = scripted([]);
        controller.process_input("start interview");
        for _ in 0..4 {
            let reply = controller.process_input("short answer");
            assert_eq!(controller.context().stage, Stage::Questions);
            assert!(reply.contains("\n\n"));
        }
        let reply = controller.process_input("short answer");
        assert_eq!(controller.context().stage, Stage::Feedback);
        assert_eq!(controller.context().question_count, 5);
        assert!(reply.starts_with(crate::dialogue::evaluator::TOO_BRIEF));
        assert!(reply.ends_with(ROUND_COMPLETE));
    }

    #[test]
    fn curveball_asked_on_fourth_question() {
        let mut controller = scripted([]);
        controller.process_input("start interview");
        for _ in 0..3 {
            controller.process_input("answer");
        }
        assert_eq!(controller.context().last_question_type, Some(Category::Curveball));
    }

    #[test]
    fn feedback_stage_branches() {
        let mut controller = scripted([]);
        controller.process_input("start interview");
        for _ in 0..5 {
            controller.process_input("answer");
        }

        assert_eq!(controller.process_input("hmm"), FEEDBACK_PROMPT);
        let summary = controller.process_input("how did i do?");
        assert!(summary.contains("overall feedback"));
        assert_eq!(controller.context().stage, Stage::Feedback);

        let question = controller.process_input("next question please");
        assert_eq!(controller.context().stage, Stage::Questions);
        assert!(QuestionBank.category_of(&question).is_some());
    }

    #[test]
    fn init_twice_resets_progress() {
        let mut controller = scripted([]);
        controller.process_input("my name is lee");
        controller.process_input("start interview");
        controller.process_input("answer");

        for _ in 0..2 {
            assert_eq!(controller.init(), WELCOME);
            assert_eq!(controller.context().question_count, 0);
            assert!(controller.context().topics_covered.is_empty());
            assert!(controller.context().history.is_empty());
            assert_eq!(controller.context().stage, Stage::Introduction);
        }
        assert_eq!(controller.context().user_info.name(), Some("Lee"));
    }

    #[test]
    fn generic_response_is_reachable_directly() {
        let controller = scripted([]);
        assert!(controller.generic_response("thank you").starts_with("You're welcome!"));
    }
}
