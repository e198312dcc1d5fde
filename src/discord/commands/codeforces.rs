// Codeforces slash commands.
//
// Same shape as every relay command: build the route from config, capture the
// invocation, then let the core dispatcher do the rest.

use crate::core::codeforces::{ProblemQuery, PROBLEM_TAGS, RATING_LADDER};
use crate::core::relay::{dispatch, ChannelGuard, CommandRoute};
use crate::discord::relay::{invocation_from, PoiseResponder};
use crate::discord::{Context, Error};
use crate::infra::config::BotConfig;

pub const CP_CHANNEL_LABEL: &str = "Competitive Programming";

/// Choices mirror `PROBLEM_TAGS`, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum TagChoice {
    #[name = "dp"]
    Dp,
    #[name = "math"]
    Math,
    #[name = "greedy"]
    Greedy,
    #[name = "graphs"]
    Graphs,
    #[name = "binary search"]
    BinarySearch,
    #[name = "brute force"]
    BruteForce,
    #[name = "strings"]
    Strings,
    #[name = "trees"]
    Trees,
    #[name = "number theory"]
    NumberTheory,
    #[name = "geometry"]
    Geometry,
    #[name = "sortings"]
    Sortings,
    #[name = "implementation"]
    Implementation,
    #[name = "data structures"]
    DataStructures,
    #[name = "combinatorics"]
    Combinatorics,
    #[name = "constructive algorithms"]
    ConstructiveAlgorithms,
    #[name = "two pointers"]
    TwoPointers,
    #[name = "bitmasks"]
    Bitmasks,
}

impl TagChoice {
    pub fn as_tag(self) -> &'static str {
        PROBLEM_TAGS[self as usize]
    }
}

/// Choices mirror `RATING_LADDER`, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum RatingChoice {
    #[name = "800"]
    R800,
    #[name = "900"]
    R900,
    #[name = "1000"]
    R1000,
    #[name = "1100"]
    R1100,
    #[name = "1200"]
    R1200,
    #[name = "1300"]
    R1300,
    #[name = "1400"]
    R1400,
    #[name = "1500"]
    R1500,
    #[name = "1600"]
    R1600,
    #[name = "1700"]
    R1700,
    #[name = "1800"]
    R1800,
    #[name = "1900"]
    R1900,
    #[name = "2000"]
    R2000,
    #[name = "2100"]
    R2100,
    #[name = "2500"]
    R2500,
    #[name = "2600"]
    R2600,
    #[name = "2700"]
    R2700,
    #[name = "2800"]
    R2800,
    #[name = "2900"]
    R2900,
    #[name = "3000"]
    R3000,
    #[name = "3100"]
    R3100,
    #[name = "3200"]
    R3200,
    #[name = "3300"]
    R3300,
    #[name = "3400"]
    R3400,
    #[name = "3500"]
    R3500,
}

impl RatingChoice {
    pub fn value(self) -> u32 {
        RATING_LADDER[self as usize]
    }
}

fn cp_guard(config: &BotConfig) -> ChannelGuard {
    ChannelGuard::new(config.cp_channel_id, CP_CHANNEL_LABEL)
}

pub fn problems_route(config: &BotConfig) -> CommandRoute {
    CommandRoute {
        name: "cf_problems",
        guard: cp_guard(config),
        policy: config.response_policy(false),
    }
}

// Every upcoming contest is listed, the result cap doesn't apply.
pub fn contests_route(config: &BotConfig) -> CommandRoute {
    CommandRoute {
        name: "cf_contests",
        guard: cp_guard(config),
        policy: config.response_policy(false).uncapped(),
    }
}

/// Get Codeforces problems filtered by tags and rating
#[poise::command(slash_command, guild_only)]
pub async fn cf_problems(
    ctx: Context<'_>,
    #[description = "Problem tag"] tag: TagChoice,
    #[description = "Problem rating"] rating: RatingChoice,
) -> Result<(), Error> {
    let data = ctx.data();
    let route = problems_route(&data.config);
    let query = ProblemQuery {
        tag: Some(tag.as_tag().to_string()),
        rating: Some(rating.value()),
    };
    let invocation = invocation_from(
        ctx,
        vec![
            ("tag", tag.as_tag().to_string()),
            ("rating", rating.value().to_string()),
        ],
    );

    let responder = PoiseResponder::new(ctx);
    dispatch(&route, &invocation, &responder, || {
        data.codeforces.find_problems(&query)
    })
    .await?;
    Ok(())
}

/// Get upcoming Codeforces contests
#[poise::command(slash_command, guild_only)]
pub async fn cf_contests(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let route = contests_route(&data.config);
    let invocation = invocation_from(ctx, Vec::new());

    let responder = PoiseResponder::new(ctx);
    dispatch(&route, &invocation, &responder, || {
        data.codeforces.upcoming_contests()
    })
    .await?;
    Ok(())
}
