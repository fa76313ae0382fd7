//! # Dialogue Engine
//!
//! File: cli/src/dialogue/mod.rs
//!
//! ## Overview
//!
//! A rule-driven mock interviewer. It holds a small per-session context,
//! matches free text against keyword tables and answers with canned or
//! lightly personalised strings. There is no language model here: matching
//! is substring search and the only randomness is question selection.
//!
//! ## Architecture
//!
//! - `context`: Session state (history, user info, stage, counters)
//! - `bank`: The static question bank
//! - `extract`: Name / role / experience extraction
//! - `rules`: Ordered `(predicate, action)` tables and the generic fallback
//! - `selector`: Category and question selection over an injectable random source
//! - `evaluator`: Length and keyword heuristics for answers
//! - `summary`: End-of-interview feedback
//! - `controller`: The stage machine tying it all together
//!
//! ## Examples
//!
//! ```rust
//! use coach::dialogue::{DialogueController, Stage};
//!
//! let mut coach = DialogueController::seeded(7);
//! let welcome = coach.init();
//! assert!(welcome.contains("interview assistant"));
//!
//! let first = coach.process_input("start interview");
//! assert_eq!(coach.context().stage, Stage::Questions);
//! assert!(first.contains("Let's begin with a common question"));
//! ```
//!
pub mod bank;
pub mod context;
pub mod controller;
pub mod evaluator;
pub mod extract;
pub mod rules;
pub mod selector;
pub mod summary;

pub use bank::QuestionBank;
pub use context::{Category, Message, Role, SessionContext, SessionSnapshot, Stage, UserInfo};
pub use controller::DialogueController;
pub use evaluator::evaluate_answer;
pub use selector::{RandomSource, ScriptedRandom, SeededRandom};
pub use summary::overall_feedback;
