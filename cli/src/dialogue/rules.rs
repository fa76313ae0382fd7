//! # Keyword Rule Tables
//!
//! File: cli/src/dialogue/rules.rs
//!
//! ## Overview
//!
//! Ordered keyword rule tables.
//!
//! Each table is a slice of [`Rule`]s evaluated top to bottom against the
//! lower-cased input; the first rule whose predicate holds decides the reply.
//! Matching is plain substring search, so `"hi"` also fires inside `"this"`.
//!
use super::context::SessionContext;

/// `true` if `text` contains any of `keywords`.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// When a rule fires.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    ContainsAny(&'static [&'static str]),
    /// Like `ContainsAny`, but only once the candidate's name is known.
    ContainsAnyWithName(&'static [&'static str]),
}

impl Predicate {
    pub fn matches(&self, lowered: &str, ctx: &SessionContext) -> bool {
        match self {
            Predicate::ContainsAny(keywords) => contains_any(lowered, keywords),
            Predicate::ContainsAnyWithName(keywords) => {
                contains_any(lowered, keywords) && ctx.user_info.name().is_some()
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule<A> {
    pub predicate: Predicate,
    pub action: A,
}

impl<A> Rule<A> {
    pub const fn when_any(keywords: &'static [&'static str], action: A) -> Self {
        Self {
            predicate: Predicate::ContainsAny(keywords),
            action,
        }
    }

    pub const fn when_any_with_name(keywords: &'static [&'static str], action: A) -> Self {
        Self {
            predicate: Predicate::ContainsAnyWithName(keywords),
            action,
        }
    }
}

/// Action of the first matching rule, if any.
pub fn first_match<'r, A>(rules: &'r [Rule<A>], lowered: &str, ctx: &SessionContext) -> Option<&'r A> {
    rules
        .iter()
        .find(|rule| rule.predicate.matches(lowered, ctx))
        .map(|rule| &rule.action)
}

// --- Introduction stage ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroAction {
    BeginInterview,
    Explain,
    GreetByName,
}

pub const INTRO_RULES: &[Rule<IntroAction>] = &[
    Rule::when_any(
        &["start interview", "begin interview", "let's start", "ready to start"],
        IntroAction::BeginInterview,
    ),
    Rule::when_any(
        &["how does this work", "what should i do", "how do we start", "what is this"],
        IntroAction::Explain,
    ),
    Rule::when_any_with_name(&["my name is", "i am", "i'm"], IntroAction::GreetByName),
];

// --- Feedback stage ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackAction {
    MoreQuestions,
    Summarize,
}

pub const FEEDBACK_RULES: &[Rule<FeedbackAction>] = &[
    Rule::when_any(
        &["more questions", "continue", "ask more", "next question"],
        FeedbackAction::MoreQuestions,
    ),
    Rule::when_any(
        &["end", "finish", "done", "that's all", "complete"],
        FeedbackAction::Summarize,
    ),
    Rule::when_any(
        &["feedback", "how did i do", "performance", "improve"],
        FeedbackAction::Summarize,
    ),
];

// --- Generic fallback ---

pub const GENERIC_RULES: &[Rule<&str>] = &[
    Rule::when_any(
        &["hello", "hi", "hey", "greetings"],
        "Hello! I'm your AI interview assistant. How can I help you prepare for your interview today?",
    ),
    Rule::when_any(
        &["who are you", "what can you do", "how can you help"],
        "I'm an AI interview assistant designed to help you prepare for job interviews. I can simulate interview questions, provide feedback on your answers, offer tips on body language, and help you understand what employers are looking for. What specific aspect of interview preparation would you like help with?",
    ),
    Rule::when_any(
        &["ai interview", "ai interviewer", "automated interview"],
        "AI-powered interviews are becoming increasingly common in the hiring process. These systems analyze your responses, facial expressions, tone, and word choice. To perform well, speak clearly, maintain eye contact with the camera, organize your thoughts, and use the STAR method (Situation, Task, Action, Result) for behavioral questions. Would you like to practice with some common AI interview questions?",
    ),
    Rule::when_any(
        &["tips", "advice", "suggestions", "help"],
        "Here are some key interview tips: 1) Research the company thoroughly, 2) Practice your responses to common questions, 3) Prepare examples that highlight your skills and achievements, 4) Maintain good eye contact, 5) Pay attention to your body language, 6) Ask thoughtful questions about the role and company, and 7) Follow up with a thank-you note after the interview. Would you like more specific advice on any of these areas?",
    ),
    Rule::when_any(
        &["common question", "typical question", "usually ask"],
        "Common interview questions include: 'Tell me about yourself', 'Why do you want this job?', 'What are your strengths and weaknesses?', 'Where do you see yourself in 5 years?', 'Tell me about a challenge you faced and how you overcame it', and 'Why should we hire you?'. Would you like to practice answering any of these?",
    ),
    Rule::when_any(
        &["tell me about yourself", "introduce yourself"],
        "This is often the first question in an interview. Focus on your professional background, relevant skills, and what makes you a good fit for the role. Keep it concise (1-2 minutes) and avoid personal details unless they're relevant to the job. Start with your current role, mention key achievements, then explain why you're interested in this position. Would you like to practice your response?",
    ),
    Rule::when_any(
        &["strength", "good at", "excel"],
        "When discussing strengths, be specific and provide examples. Choose strengths relevant to the role you're applying for. For example, instead of just saying 'I'm good at problem-solving,' say 'My problem-solving skills helped me increase efficiency by 20% in my last role by identifying and fixing bottlenecks in our workflow.' Back up your strengths with concrete achievements.",
    ),
    Rule::when_any(
        &["weakness", "improvement", "develop"],
        "When discussing weaknesses, be honest but strategic. Choose something that isn't critical to the job, and most importantly, explain how you're working to improve. For example: 'I sometimes get caught up in details. I've learned to set time limits for tasks and focus on higher-priority items first.' This shows self-awareness and a commitment to growth.",
    ),
    Rule::when_any(
        &["body language", "posture", "eye contact"],
        "Body language is crucial in interviews. Maintain good posture, make appropriate eye contact (look at the camera in virtual interviews), use natural hand gestures, and smile genuinely. Avoid crossing your arms (appears defensive), touching your face (shows nervousness), or fidgeting. Practice these habits beforehand so they feel natural during the actual interview.",
    ),
    Rule::when_any(
        &["salary", "compensation", "pay", "money"],
        "When discussing salary, it's best to be prepared with market research for similar positions in your area. If asked about expectations, you can provide a range based on your research, or ask about their budget for the role. Wait until later in the interview process if possible, as this gives you more leverage once they're interested in hiring you.",
    ),
    Rule::when_any(
        &["thank", "appreciate", "helpful"],
        "You're welcome! I'm glad I could help. Is there anything else you'd like to know about interviewing or any other aspect of the job search process you'd like to discuss?",
    ),
    Rule::when_any(
        &["bye", "goodbye", "see you", "farewell"],
        "Good luck with your interview preparation! Remember to stay confident and be yourself. Feel free to return anytime you need more practice or advice. You've got this!",
    ),
];

pub const GENERIC_DEFAULT: &str = "That's an interesting point about the interview process. Would you like to simulate a full interview with me to practice your skills, or would you prefer specific advice about a particular aspect of interviewing?";

/// Reply from the generic keyword table, or the default deflection.
pub fn generic_response(input: &str, ctx: &SessionContext) -> &'static str {
    let lowered = input.to_lowercase();
    first_match(GENERIC_RULES, &lowered, ctx)
        .copied()
        .unwrap_or(GENERIC_DEFAULT)
}
