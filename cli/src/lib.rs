//! # Interview Coach
//!
//! File: cli/src/lib.rs
//!
//! A rule-based practice interviewer. The [`dialogue`] module holds the
//! conversation engine, [`provider`] decides where replies come from, and
//! [`commands`] implements the `coach chat` and `coach srv` front ends.
//!
pub mod commands;
pub mod core;
pub mod dialogue;
pub mod provider;
