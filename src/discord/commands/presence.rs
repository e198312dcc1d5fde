// Bot presence. Discord-layer glue only: it works with serenity's
// ActivityData/OnlineStatus and nothing from the core.

use poise::serenity_prelude as serenity;

const DEFAULT_ACTIVITY: &str = "Codeforces & Kaggle";

/// Resets the bot's status to the default message.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching(DEFAULT_ACTIVITY);
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
