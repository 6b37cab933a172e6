use chrono::Utc;
use serenity::all::{
    ChannelType, Context, CreateChannel, CreateMessage, Member, PermissionOverwrite,
    PermissionOverwriteType, Permissions, RoleId,
};
use tracing::{info, warn};

use crate::naming;
use crate::notify::{notify_onboarded, OnboardedPayload};
use crate::state::AppState;

/// One join event, end to end: attribute the invite, resolve the client's
/// firstname, carve out a private category + channel, post the welcome, and
/// fire the webhook. The first platform failure aborts this event only; no
/// rollback of whatever was already created.
pub async fn handle_member_join(
    ctx: &Context,
    state: &AppState,
    member: &Member,
) -> anyhow::Result<()> {
    let guild_id = member.guild_id;

    // Diff freshly fetched invite counts against the cache to find the
    // invite this join consumed. A failed fetch (missing Manage Guild
    // permission, usually) degrades to the name-fallback chain.
    let used_code = match guild_id.invites(&ctx.http).await {
        Ok(invites) => state
            .invite_uses
            .resync(invites.into_iter().map(|inv| (inv.code, inv.uses))),
        Err(e) => {
            warn!("Error fetching invites, falling back to display name: {e}");
            None
        }
    };

    let mapped = match &used_code {
        Some(code) => {
            let name = state.registry.lookup(code);
            if name.is_none() {
                warn!("No firstname mapped for invite {code}, falling back.");
            }
            name
        }
        None => {
            warn!("No used invite found for {}, falling back.", member.user.tag());
            None
        }
    };

    let firstname = naming::resolve_firstname(
        mapped.as_deref(),
        member.display_name(),
        &member.user.name,
    );
    let category_name = naming::category_name(&firstname, &state.config.business_name);

    info!("Creating {} category/channel for: {firstname}", state.config.business_name);

    let bot_id = ctx.cache.current_user().id;
    let allow = Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES;
    // The @everyone role id equals the guild id.
    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(member.user.id),
        },
        PermissionOverwrite {
            allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_id),
        },
    ];
    for role_id in &state.config.staff_role_ids {
        overwrites.push(PermissionOverwrite {
            allow,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(*role_id),
        });
    }

    let category = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(&category_name)
                .kind(ChannelType::Category)
                .permissions(overwrites),
        )
        .await?;

    let channel = guild_id
        .create_channel(
            &ctx.http,
            CreateChannel::new(naming::channel_name(&firstname, &state.config.business_name))
                .kind(ChannelType::Text)
                .category(category.id),
        )
        .await?;

    let welcome = naming::welcome_message(&state.config, member.user.id);
    channel
        .send_message(&ctx.http, CreateMessage::new().content(welcome))
        .await?;

    info!("Created category + channel for {firstname}");

    if let Some(url) = &state.config.zapier_webhook_url {
        notify_onboarded(
            url.clone(),
            OnboardedPayload {
                firstname,
                business_name: state.config.business_name.clone(),
                discord_id: member.user.id.to_string(),
                discord_tag: member.user.tag(),
                category_name,
                joined_at: Utc::now().to_rfc3339(),
            },
        );
    }

    Ok(())
}
