use serenity::all::{
    ActionRowComponent, ComponentInteraction, Context, CreateActionRow, CreateInputText,
    CreateInteractionResponse, CreateInteractionResponseMessage, CreateModal, InputTextStyle,
    ModalInteraction, RoleId,
};
use tracing::{error, warn};

use crate::commands::invite::{is_staff, issue_invite};
use crate::state::AppState;
use crate::ui::INVITE_MODAL_ID;

/// Button click → open the one-field firstname modal. If the modal cannot
/// be opened the requester still gets an answer within the interaction
/// deadline: an ephemeral pointer at the slash command.
pub async fn open(ctx: &Context, component: &ComponentInteraction) -> serenity::Result<()> {
    let modal = CreateModal::new(INVITE_MODAL_ID, "Generate client invite").components(vec![
        CreateActionRow::InputText(
            CreateInputText::new(InputTextStyle::Short, "First name", "firstname")
                .placeholder("e.g. Maria")
                .required(true),
        ),
    ]);

    if let Err(e) = component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await
    {
        warn!("Could not open invite modal: {e}");
        let fallback = CreateInteractionResponseMessage::new()
            .content("❌ Could not open the form. Use `/invite firstname:<name>` instead.")
            .ephemeral(true);
        component
            .create_response(&ctx.http, CreateInteractionResponse::Message(fallback))
            .await?;
    }
    Ok(())
}

/// Modal submit → authorize, create the invite, reply with the URL.
pub async fn submit(ctx: &Context, state: &AppState, modal: &ModalInteraction) -> serenity::Result<()> {
    let member_roles: Vec<RoleId> = modal
        .member
        .as_ref()
        .map(|m| m.roles.clone())
        .unwrap_or_default();

    if !is_staff(&state.config.staff_role_ids, &member_roles) {
        let response = CreateInteractionResponseMessage::new()
            .content("You are not allowed to generate client invites.")
            .ephemeral(true);
        modal
            .create_response(&ctx.http, CreateInteractionResponse::Message(response))
            .await?;
        return Ok(());
    }

    let firstname = modal
        .data
        .components
        .first()
        .and_then(|row| row.components.first())
        .map(|component| match component {
            ActionRowComponent::InputText(input) => input.value.clone().unwrap_or_default(),
            _ => String::new(),
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
    modal
        .create_response(&ctx.http, CreateInteractionResponse::Message(response))
        .await?;
    Ok(())
}
