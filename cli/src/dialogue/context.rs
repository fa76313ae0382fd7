//! # Session Context
//!
//! File: cli/src/dialogue/context.rs
//!
//! ## Overview
//!
//! Session state threaded through every dialogue turn.
//!
//! A `SessionContext` is owned by whoever drives the conversation (the chat
//! shell, one HTTP session, a test) and lives for one practice session. There
//! is no global instance; two contexts never share anything.
//!
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Coarse phase of the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Introduction,
    Questions,
    Feedback,
}

/// Question category. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Behavioral,
    Technical,
    Personal,
    Situational,
    Curveball,
}

impl Category {
    /// Every category, curveball last.
    pub const ALL: [Category; 5] = [
        Category::Behavioral,
        Category::Technical,
        Category::Personal,
        Category::Situational,
        Category::Curveball,
    ];

    /// Categories eligible for a regular random draw.
    pub const REGULAR: [Category; 4] = [
        Category::Behavioral,
        Category::Technical,
        Category::Personal,
        Category::Situational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Behavioral => "behavioral",
            Category::Technical => "technical",
            Category::Personal => "personal",
            Category::Situational => "situational",
            Category::Curveball => "curveball",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Facts picked up from what the candidate says about themselves.
///
/// Each field is written at most once per session; see [`UserInfo::set_name`]
/// and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    name: Option<String>,
    target_role: Option<String>,
    experience_years: Option<u32>,
}

impl UserInfo {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn target_role(&self) -> Option<&str> {
        self.target_role.as_deref()
    }

    pub fn experience_years(&self) -> Option<u32> {
        self.experience_years
    }

    /// Returns `true` if the value was stored, `false` if a name was already known.
    pub fn set_name(&mut self, name: String) -> bool {
        set_once(&mut self.name, name)
    }

    pub fn set_target_role(&mut self, role: String) -> bool {
        set_once(&mut self.target_role, role)
    }

    pub fn set_experience_years(&mut self, years: u32) -> bool {
        set_once(&mut self.experience_years, years)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

/// The mutable state of one practice session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Append-only; never consulted when choosing a reply.
    pub history: Vec<Message>,
    pub user_info: UserInfo,
    pub stage: Stage,
    pub question_count: u32,
    /// Category of the question currently awaiting an answer.
    pub last_question_type: Option<Category>,
    pub topics_covered: BTreeSet<Category>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to a fresh conversation. `user_info` and `last_question_type` survive.
    pub fn restart(&mut self) {
        self.history.clear();
        self.stage = Stage::Introduction;
        self.question_count = 0;
        self.topics_covered.clear();
    }

    pub fn record(&mut self, role: Role, text: impl Into<String>) {
        self.history.push(Message::new(role, text));
    }

    pub fn has_covered(&self, category: Category) -> bool {
        self.topics_covered.contains(&category)
    }
}

/// Read-only view of a session for status output; omits the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub stage: Stage,
    pub question_count: u32,
    pub last_question_type: Option<Category>,
    pub topics_covered: Vec<Category>,
    pub user_info: UserInfo,
    pub turns: usize,
}

impl From<&SessionContext> for SessionSnapshot {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            stage: ctx.stage,
            question_count: ctx.question_count,
            last_question_type: ctx.last_question_type,
            topics_covered: ctx.topics_covered.iter().copied().collect(),
            user_info: ctx.user_info.clone(),
            turns: ctx.history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_topics_in_order() {
        let mut ctx = SessionContext::new();
        ctx.topics_covered.insert(Category::Curveball);
        ctx.topics_covered.insert(Category::Behavioral);
        ctx.record(Role::User, "hi");

        let snapshot = SessionSnapshot::from(&ctx);
        assert_eq!(
            snapshot.topics_covered,
            vec![Category::Behavioral, Category::Curveball]
        );
        assert_eq!(snapshot.turns, 1);
    }

    #[test]
    fn user_info_fields_are_write_once() {
        let mut info = UserInfo::default();
        assert!(info.set_name("Alice".into()));
        assert!(!info.set_name("Bob".into()));
        assert_eq!(info.name(), Some("Alice"));

        assert!(info.set_experience_years(4));
        assert!(!info.set_experience_years(9));
        assert_eq!(info.experience_years(), Some(4));
    }

    #[test]
    fn restart_keeps_user_info() {
        let mut ctx = SessionContext::new();
        ctx.user_info.set_name("Alice".into());
        ctx.stage = Stage::Feedback;
        ctx.question_count = 5;
        ctx.last_question_type = Some(Category::Technical);
        ctx.topics_covered.insert(Category::Technical);
        ctx.record(Role::User, "hello");

        ctx.restart();

        assert!(ctx.history.is_empty());
        assert_eq!(ctx.stage, Stage::Introduction);
        assert_eq!(ctx.question_count, 0);
        assert!(ctx.topics_covered.is_empty());
        assert_eq!(ctx.user_info.name(), Some("Alice"));
        assert_eq!(ctx.last_question_type, Some(Category::Technical));
    }

    #[test]
    fn categories_serialize_lowercase() {
        let json = serde_json::to_string(&Category::Curveball).unwrap();
        assert_eq!(json, "\"curveball\"");
        assert_eq!(Category::Situational.to_string(), "situational");
    }
}
