// Discord commands module.
// Each upstream service gets its own command file.

pub mod codeforces;

pub mod kaggle;

pub mod presence;

use std::sync::Arc;

use crate::core::codeforces::CodeforcesService;
use crate::core::kaggle::KaggleService;
use crate::infra::codeforces::CodeforcesApiClient;
use crate::infra::config::BotConfig;
use crate::infra::kaggle::KaggleApiClient;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Shared state handed to every command. Read-only after startup.
pub struct Data {
    pub config: Arc<BotConfig>,
    pub codeforces: Arc<CodeforcesService<CodeforcesApiClient>>,
    pub kaggle: Arc<KaggleService<KaggleApiClient>>,
}

/// Every slash command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        codeforces::cf_problems(),
        codeforces::cf_contests(),
        kaggle::kaggle_competitions(),
        kaggle::kaggle_datasets(),
    ]
}
