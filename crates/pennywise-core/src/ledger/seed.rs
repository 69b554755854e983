//! Demo-data seeding. Not part of the production request flow.

use super::UsageLedger;
use crate::error::Result;
use crate::record::NewUsage;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// Fraction of seeded records marked as cache hits.
const SEED_CACHE_HIT_RATIO: f64 = 0.87;

const SEED_MODELS: &[(&str, &[&str])] = &[
    ("openai", &["gpt-4", "gpt-3.5-turbo", "gpt-4-turbo"]),
    ("anthropic", &["claude-opus", "claude-sonnet", "claude-haiku"]),
];

const SEED_FEATURES: &[&str] = &[
    "chatbot",
    "summarization",
    "code-gen",
    "translation",
    "analysis",
];

impl UsageLedger {
    /// Clear the ledger and populate it with `count` synthetic records
    /// spread over the last `day_span` days. Destructive.
    pub async fn seed_demo(&self, count: u32, day_span: u32) -> Result<()> {
        self.reset_all().await?;

        let users: Vec<String> = (1..=10).map(|i| format!("user_{i:03}")).collect();
        let now = Utc::now();
        let day_span = day_span.max(1);

        // ThreadRng is not Send; generate everything before awaiting.
        let events: Vec<NewUsage> = {
            let mut rng = rand::thread_rng();
            (0..count)
                .map(|_| {
                    let (provider, models) = SEED_MODELS
                        .choose(&mut rng)
                        .copied()
                        .unwrap_or(SEED_MODELS[0]);
                    let model = models.choose(&mut rng).copied().unwrap_or(models[0]);
                    let user = users.choose(&mut rng).cloned().unwrap_or_default();
                    let feature = SEED_FEATURES.choose(&mut rng).copied().unwrap_or("chatbot");

                    let prompt_tokens = rng.gen_range(50..=1500);
                    let completion_tokens = rng.gen_range(20..=800);
                    let cache_hit = rng.gen_bool(SEED_CACHE_HIT_RATIO);

                    let days_ago = rng.gen_range(0..day_span);
                    let hours_ago = rng.gen_range(0..24);
                    let timestamp = now
                        - Duration::days(i64::from(days_ago))
                        - Duration::hours(i64::from(hours_ago));

                    NewUsage::new(user, provider, model, prompt_tokens, completion_tokens)
                        .with_feature(feature)
                        .with_cache_hit(cache_hit)
                        .with_timestamp(timestamp)
                })
                .collect()
        };

        for event in events {
            self.append(event).await?;
        }

        info!(count, day_span, "seeded demo usage records");
        Ok(())
    }
}
