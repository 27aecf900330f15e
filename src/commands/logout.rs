use crate::commands::{CmdCtx, CommandOutput, CommandResult};
use crate::input::parser::Intent;
use std::sync::Arc;

pub async fn logout(ctx: Arc<CmdCtx>, _intent: Intent) -> CommandResult<CommandOutput> {
    let mut out = CommandOutput::new();

    let Ok(user) = ctx.user() else {
        out.append("You must be logged in to log out.\n");
        out.failure();
        return Ok(out);
    };

    ctx.sess.write().logout();
    ctx.registry.set_online(&user, false);
    tracing::info!(%user, "player logged out");

    out.append("You have been logged out.\n");
    out.success();
    Ok(out)
}
