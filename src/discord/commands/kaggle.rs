use crate::core::relay::{dispatch, ChannelGuard, CommandRoute};
use crate::discord::relay::{invocation_from, PoiseResponder};
use crate::discord::{Context, Error};
use crate::infra::config::BotConfig;

pub const KAGGLE_CHANNEL_LABEL: &str = "Kaggle";

fn kaggle_guard(config: &BotConfig) -> ChannelGuard {
    ChannelGuard::new(config.kaggle_channel_id, KAGGLE_CHANNEL_LABEL)
}

// Kaggle results are only shown to the invoking user.
pub fn competitions_route(config: &BotConfig) -> CommandRoute {
    CommandRoute {
        name: "kaggle_competitions",
        guard: kaggle_guard(config),
        policy: config.response_policy(true),
    }
}

pub fn datasets_route(config: &BotConfig) -> CommandRoute {
    CommandRoute {
        name: "kaggle_datasets",
        guard: kaggle_guard(config),
        policy: config.response_policy(true),
    }
}

/// List ongoing Kaggle competitions
#[poise::command(slash_command, guild_only)]
pub async fn kaggle_competitions(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let route = competitions_route(&data.config);
    let invocation = invocation_from(ctx, Vec::new());

    let responder = PoiseResponder::new(ctx);
    dispatch(&route, &invocation, &responder, || {
        data.kaggle.latest_competitions()
    })
    .await?;
    Ok(())
}

/// Search for Kaggle datasets
#[poise::command(slash_command, guild_only)]
pub async fn kaggle_datasets(
    ctx: Context<'_>,
    #[description = "What to search for"] query: String,
) -> Result<(), Error> {
    let data = ctx.data();
    let route = datasets_route(&data.config);
    let invocation = invocation_from(ctx, vec![("query", query.clone())]);

    let responder = PoiseResponder::new(ctx);
    dispatch(&route, &invocation, &responder, || {
        data.kaggle.search_datasets(&query)
    })
    .await?;
    Ok(())
}
