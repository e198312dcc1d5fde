// Discord side of the relay: turns `RelayMessage`s into embeds and implements
// `Responder` on top of a poise context.

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use crate::core::relay::{Accent, Invocation, RelayMessage, Responder, ResponderError};
use crate::discord::Context;

/// Wraps the invocation context so the core dispatcher can answer through it.
pub struct PoiseResponder<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseResponder<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl<'a> Responder for PoiseResponder<'a> {
    async fn acknowledge(&self, ephemeral: bool) -> Result<(), ResponderError> {
        if ephemeral {
            self.ctx.defer_ephemeral().await?;
        } else {
            self.ctx.defer().await?;
        }
        Ok(())
    }

    async fn notify(&self, text: String, ephemeral: bool) -> Result<(), ResponderError> {
        self.ctx
            .send(poise::CreateReply::default().content(text).ephemeral(ephemeral))
            .await?;
        Ok(())
    }

    async fn deliver(&self, message: RelayMessage, ephemeral: bool) -> Result<(), ResponderError> {
        self.ctx
            .send(
                poise::CreateReply::default()
                    .embed(build_embed(&message))
                    .ephemeral(ephemeral),
            )
            .await?;
        Ok(())
    }
}

/// Capture who invoked what, and where.
pub fn invocation_from(ctx: Context<'_>, parameters: Vec<(&'static str, String)>) -> Invocation {
    Invocation {
        channel_id: ctx.channel_id().get(),
        user_id: ctx.author().id.get(),
        user_name: ctx.author().name.clone(),
        parameters,
    }
}

pub fn accent_colour(accent: Accent) -> u32 {
    match accent {
        Accent::Gold => 0xF1C40F,
        Accent::Blue => 0x3498DB,
        Accent::Green => 0x2ECC71,
    }
}

pub fn build_embed(message: &RelayMessage) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&message.title)
        .color(accent_colour(message.accent));

    if let Some(description) = &message.description {
        embed = embed.description(description);
    }
    if let Some(url) = &message.url {
        embed = embed.url(url);
    }
    if let Some(thumbnail) = &message.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    for field in &message.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(footer) = &message.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }

    embed
}
