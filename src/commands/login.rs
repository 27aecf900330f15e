use crate::commands::{CmdCtx, CommandError, CommandOutput, CommandResult};
use crate::input::parser::Intent;
use crate::models::types::UserName;
use crate::renderer::Color;
use crate::renderer::ansi;
use crate::{failure, success};
use std::sync::Arc;

pub async fn login(ctx: Arc<CmdCtx>, intent: Intent) -> CommandResult<CommandOutput> {
    let Some(name) = intent.arg(0) else {
        return Err(CommandError::Usage("Usage: login <name>".into()));
    };

    let Some(user) = UserName::parse(name) else {
        return Err(CommandError::InvalidArgs(format!(
            "'{name}' is not a valid player name (letters, digits and _ only, at most 32)."
        )));
    };

    if let Ok(current) = ctx.user() {
        return Ok(failure!(format!("You are already logged in as {current}.\n")));
    }

    let protocol = {
        let mut sess = ctx.sess.write();
        sess.login(user.clone());
        sess.protocol()
    };
    ctx.registry.set_online(&user, true);
    tracing::info!(%user, ?protocol, "player logged in");

    Ok(success!(format!("Welcome, {}!\n", ansi::paint(user.as_str(), Color::Aqua))))
}
