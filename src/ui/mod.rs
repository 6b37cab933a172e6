pub mod invite_modal;

use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, CreateMessage};

pub const OPEN_INVITE_MODAL_ID: &str = "open_invite_modal";
pub const INVITE_MODAL_ID: &str = "invite_modal";

/// The staff-facing prompt posted to the request channel. Clicking the
/// button opens the firstname modal.
pub fn invite_button_message(business_name: &str) -> CreateMessage {
    let buttons = CreateActionRow::Buttons(vec![CreateButton::new(OPEN_INVITE_MODAL_ID)
        .label("Generate client invite")
        .style(ButtonStyle::Primary)]);

    CreateMessage::new()
        .content(format!(
            "🔗 **{business_name} client invites**\nClick below to generate a single-use invite for a new client."
        ))
        .components(vec![buttons])
}
