//! # Local Response Provider
//!
//! File: cli/src/provider/local.rs
//!
//! ## Overview
//!
//! In-process provider backed by the dialogue controller.
//!
use super::ResponseProvider;
use crate::dialogue::{DialogueController, RandomSource, SessionContext};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct LocalProvider<R> {
    controller: DialogueController<R>,
}

impl<R: RandomSource> LocalProvider<R> {
    pub fn new(rng: R) -> Self {
        Self {
            controller: DialogueController::with_random(rng),
        }
    }

    pub fn controller(&self) -> &DialogueController<R> {
        &self.controller
    }

    /// Keeps the local history complete when another provider answered.
    pub fn record_exchange(&mut self, input: &str, reply: &str) {
        self.controller.record_exchange(input, reply);
    }
}

#[async_trait]
impl<R: RandomSource + Send> ResponseProvider for LocalProvider<R> {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn welcome(&mut self) -> String {
        self.controller.init()
    }

    async fn respond(&mut self, input: &str) -> String {
        self.controller.process_input(input)
    }

    async fn reset(&mut self) -> String {
        self.controller.reset()
    }

    fn context(&self) -> &SessionContext {
        self.controller.context()
    }
}
