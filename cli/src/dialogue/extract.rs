//! # User Info Extraction
//!
//! File: cli/src/dialogue/extract.rs
//!
//! ## Overview
//!
//! Picks the candidate's name, target role and years of experience out of
//! free text.
//!
//! Every field has an ordered list of phrasings. The first phrasing that
//! matches supplies the value; a field that is already known is never
//! overwritten.
//!
use super::context::UserInfo;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const NAME_PATTERNS: &[&str] = &[r"my name is ([a-z]+)", r"i am ([a-z]+)", r"i'm ([a-z]+)"];

const ROLE_PATTERNS: &[&str] = &[
    r"for (?:a|an) ([a-z\s]+) position",
    r"applying for ([a-z\s]+)",
    r"role as (?:a|an) ([a-z\s]+)",
    r"job as (?:a|an) ([a-z\s]+)",
];

const EXPERIENCE_PATTERNS: &[&str] = &[
    r"([0-9]+) years? of experience",
    r"experience of ([0-9]+) years?",
    r"i have ([0-9]+) years?",
];

struct Patterns {
    name: Vec<Regex>,
    role: Vec<Regex>,
    experience: Vec<Regex>,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |list: &[&str]| {
            list.iter()
                .map(|p| Regex::new(p).expect("extraction pattern must compile"))
                .collect()
        };
        Patterns {
            name: compile(NAME_PATTERNS),
            role: compile(ROLE_PATTERNS),
            experience: compile(EXPERIENCE_PATTERNS),
        }
    })
}

/// First capture of the first pattern that matches.
fn first_capture<'t>(list: &[Regex], text: &'t str) -> Option<&'t str> {
    list.iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

/// Upper-cases the first character only; the rest stays lower-case.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fills any still-unset field of `info` from `input`.
pub fn extract_user_info(input: &str, info: &mut UserInfo) {
    let lowered = input.to_lowercase();
    let p = patterns();

    if let Some(name) = first_capture(&p.name, &lowered) {
        if info.set_name(capitalize(name)) {
            debug!(name = info.name(), "learned candidate name");
        }
    }

    if let Some(role) = first_capture(&p.role, &lowered) {
        let role = role.trim();
        if !role.is_empty() && info.set_target_role(role.to_string()) {
            debug!(role, "learned target role");
        }
    }

    if let Some(years) = first_capture(&p.experience, &lowered).and_then(|y| y.parse().ok()) {
        if info.set_experience_years(years) {
            debug!(years, "learned years of experience");
        }
    }
}
