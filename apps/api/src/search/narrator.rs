//! Narrator — optional natural-language gloss over structured results.
//!
//! Every failure (no key, transport error, bad status, empty completion) is
//! absorbed here and replaced by a fixed fallback. Callers always get a string.

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::models::{DormProfile, Room};
use crate::llm_client::prompts::{CATALOG_SYSTEM, SINGLE_DORM_SYSTEM};
use crate::llm_client::CompletionBackend;
use crate::search::prompts::{catalog_prompt, dorm_prompt};
use crate::search::shaper::ShapedDorm;

pub const CATALOG_FALLBACK: &str =
    "AI recommendations unavailable. Showing dorms from database only.";
pub const DORM_FALLBACK: &str = "AI recommendations unavailable. Showing dorm info only.";

const CATALOG_TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct Narrator {
    backend: Arc<dyn CompletionBackend>,
}

impl Narrator {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Short recommendation summary over the shaped catalog.
    pub async fn summarize_catalog(&self, dorms: &[ShapedDorm]) -> String {
        let prompt = match catalog_prompt(dorms) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Could not serialize dorms for summary: {e}");
                return CATALOG_FALLBACK.to_string();
            }
        };

        match self
            .backend
            .complete(CATALOG_SYSTEM, &prompt, Some(CATALOG_TEMPERATURE))
            .await
        {
            Ok(text) => {
                info!("Catalog summary generated for {} dorms", dorms.len());
                text
            }
            Err(e) => {
                warn!("Catalog summary unavailable: {e}");
                CATALOG_FALLBACK.to_string()
            }
        }
    }

    /// Answers the tenant's question about a single dorm.
    pub async fn answer_about_dorm(
        &self,
        profile: &DormProfile,
        rooms: &[Room],
        question: &str,
    ) -> String {
        let prompt = dorm_prompt(profile, rooms, question);
        match self.backend.complete(SINGLE_DORM_SYSTEM, &prompt, None).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Answer for dorm {} unavailable: {e}", profile.id);
                DORM_FALLBACK.to_string()
            }
        }
    }
}
