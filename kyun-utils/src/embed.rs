use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{
    EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

use crate::pagination::PageBody;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
/// Embed color for failures and empty results.
pub const ERROR_EMBED_COLOR: u32 = 0xC0_39_2B;

/// Build an embed from a rendered page body with an optional footer.
pub fn build_page_embed(body: &PageBody, footer: Option<&str>) -> anyhow::Result<Embed> {
    let mut builder = EmbedBuilder::new().title(&body.title).color(body.color);

    if !body.description.is_empty() {
        builder = builder.description(&body.description);
    }

    if let Some(url) = body.url.as_deref() {
        builder = builder.url(url);
    }

    if let Some(thumbnail) = body.thumbnail.as_deref() {
        builder = builder.thumbnail(ImageSource::url(thumbnail)?);
    }

    for field in &body.fields {
        let field_builder = EmbedFieldBuilder::new(&field.name, &field.value);
        builder = builder.field(if field.inline {
            field_builder.inline()
        } else {
            field_builder
        });
    }

    if let Some(text) = footer.filter(|text| !text.is_empty()) {
        builder = builder.footer(EmbedFooterBuilder::new(text));
    }

    Ok(builder.validate()?.build())
}

/// Build an error-coloured notice embed.
pub fn build_error_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    let body = PageBody::new(title)
        .description(description)
        .color(ERROR_EMBED_COLOR);
    build_page_embed(&body, None)
}
