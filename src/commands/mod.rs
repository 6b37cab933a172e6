pub mod invite;

use serenity::all::Context;

use crate::state::AppState;

pub async fn register_commands(ctx: &Context, state: &AppState) -> anyhow::Result<()> {
    invite::register(ctx, state).await?;
    Ok(())
}
