pub mod onboarding;

use std::sync::Arc;

use serenity::all::{Context, EventHandler, Interaction, Member, Ready};
use serenity::async_trait;
use tracing::{error, info, warn};

use crate::state::AppState;
use crate::ui;

pub struct Handler {
    state: Arc<AppState>,
}

impl Handler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
        self.state.set_http(ctx.http.clone());

        if let Err(e) = crate::commands::register_commands(&ctx, &self.state).await {
            error!("Failed to register commands: {e}");
        }

        // Prime the usage cache so the first join has a baseline to diff
        // against.
        match self.state.config.guild_id.invites(&ctx.http).await {
            Ok(invites) => {
                self.state
                    .invite_uses
                    .resync(invites.into_iter().map(|inv| (inv.code, inv.uses)));
                info!("Cached existing invites.");
            }
            Err(e) => warn!("Error caching invites: {e}"),
        }

        if self.state.should_post_button() {
            let prompt = ui::invite_button_message(&self.state.config.business_name);
            if let Err(e) = self
                .state
                .config
                .invite_request_channel_id
                .send_message(&ctx.http, prompt)
                .await
            {
                warn!("Could not post the invite button: {e}");
            }
        }
    }

    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        if new_member.guild_id != self.state.config.guild_id {
            return;
        }
        if let Err(e) = onboarding::handle_member_join(&ctx, &self.state, &new_member).await {
            error!("Error onboarding {}: {e:#}", new_member.user.tag());
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(cmd) => {
                if cmd.data.name == "invite" {
                    if let Err(e) = crate::commands::invite::handle(&ctx, &self.state, &cmd).await {
                        error!("Error handling /invite: {e}");
                    }
                }
            }
            Interaction::Component(component) => {
                if component.data.custom_id == ui::OPEN_INVITE_MODAL_ID {
                    if let Err(e) = ui::invite_modal::open(&ctx, &component).await {
                        error!("Error showing invite modal: {e}");
                    }
                }
            }
            Interaction::Modal(modal) => {
                if modal.data.custom_id == ui::INVITE_MODAL_ID {
                    if let Err(e) = ui::invite_modal::submit(&ctx, &self.state, &modal).await {
                        error!("Error handling invite modal submit: {e}");
                    }
                }
            }
            _ => {}
        }
    }
}
