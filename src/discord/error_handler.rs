use crate::discord::{Data, Error};

/// Shown when a command fails outside the relay's own error handling.
pub const UNEXPECTED_FAILURE_NOTICE: &str = "Something went wrong while running this command.";

/// Catch-all for errors that escape a command.
///
/// Relay failures (wrong channel, upstream down, empty results) are answered by
/// the dispatcher and never reach this point. What does is logged and answered
/// with a generic notice so the user isn't left waiting.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!(
                command = %ctx.command().qualified_name,
                user_id = ctx.author().id.get(),
                error = %error,
                "Command failed"
            );
            let reply = poise::CreateReply::default()
                .content(UNEXPECTED_FAILURE_NOTICE)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::warn!("Failed to report command failure: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling framework error: {}", e);
            }
        }
    }
}
