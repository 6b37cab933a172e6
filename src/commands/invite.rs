use serenity::all::{
    CommandDataOptionValue, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage, CreateInvite,
    RoleId,
};
use tracing::{error, info};

use crate::state::AppState;

/// Register `/invite` on the configured guild (guild commands propagate
/// immediately, unlike global ones).
pub async fn register(ctx: &Context, state: &AppState) -> serenity::Result<()> {
    state
        .config
        .guild_id
        .set_commands(
            &ctx.http,
            vec![CreateCommand::new("invite")
                .description("Generate a single-use client invite")
                .add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "firstname",
                        "The client's first name",
                    )
                    .required(true),
                )],
        )
        .await?;
    Ok(())
}

/// True when the staff-role set is empty (issuance open to all) or the
/// requester holds at least one configured staff role.
pub fn is_staff(staff_roles: &[RoleId], member_roles: &[RoleId]) -> bool {
    staff_roles.is_empty() || member_roles.iter().any(|r| staff_roles.contains(r))
}

/// Handle `/invite firstname:<string>`.
pub async fn handle(ctx: &Context, state: &AppState, cmd: &CommandInteraction) -> serenity::Result<()> {
    let member_roles: Vec<RoleId> = cmd
        .member
        .as_ref()
        .map(|m| m.roles.clone())
        .unwrap_or_default();

    if !is_staff(&state.config.staff_role_ids, &member_roles) {
        let response = CreateInteractionResponseMessage::new()
            .content("You are not allowed to generate client invites.")
            .ephemeral(true);
        cmd.create_response(&ctx.http, CreateInteractionResponse::Message(response))
            .await?;
        return Ok(());
    }

    let firstname = cmd
        .data
        .options
        .iter()
        .find(|opt| opt.name == "firstname")
        .and_then(|opt| match &opt.value {
            CommandDataOptionValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_default();

    let content = match issue_invite(ctx, state, &firstname).await {
        Ok(url) => format!("✅ Invite for **{}**: {url}", firstname.trim()),
        Err(e) => {
            error!("Failed to create invite for {firstname:?}: {e}");
            "❌ Could not create the invite. Check the bot's permissions and try again.".to_string()
        }
    };

    let response = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    cmd.create_response(&ctx.http, CreateInteractionResponse::Message(response))
        .await?;
    Ok(())
}

/// Create a single-use, non-expiring invite on the landing channel and
/// record the firstname mapping for the join handler to pick up.
pub async fn issue_invite(
    ctx: &Context,
    state: &AppState,
    firstname: &str,
) -> serenity::Result<String> {
    let invite = state
        .config
        .invite_channel_id
        .create_invite(
            &ctx.http,
            CreateInvite::new().max_uses(1).max_age(0).unique(true),
        )
        .await?;

    state.registry.insert(invite.code.clone(), firstname);
    info!("Mapped invite {} → {}", invite.code, firstname.trim());
    Ok(invite.url())
}
