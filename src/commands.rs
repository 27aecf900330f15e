use crate::Registry;
use crate::input::parser::{Verb, parse_command};
use crate::models::types::UserName;
use crate::renderer::ansi;
use crate::renderer::{Color, Decoration, Style};
use crate::services::ServiceError;
use crate::state::identity::CurrentUserLookup;
use crate::state::session::Session;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

mod login;
mod logout;
pub mod profile;
mod who;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl CommandError {
    /// Text to show the player. Storage failures are reduced to a generic line; the
    /// details were logged where they happened.
    pub fn user_message(&self) -> String {
        match self {
            CommandError::UnknownCommand(verb) => format!("Unknown command '{verb}'. Try `help`."),
            CommandError::Usage(usage) => usage.clone(),
            CommandError::NotLoggedIn => "This command can only be used by players. Please `login <name>` first.".to_string(),
            CommandError::InvalidArgs(msg) => msg.clone(),
            CommandError::Service(e) => e.user_message(),
        }
    }
}

/// Command context passed to command handlers
pub struct CmdCtx {
    /// Global service registry
    pub registry: Arc<Registry>,
    /// Player session
    pub sess: Arc<RwLock<Session>>,
}

impl CmdCtx {
    pub fn new(registry: Arc<Registry>, sess: Arc<RwLock<Session>>) -> Self {
        Self { registry, sess }
    }

    pub fn is_logged_in(&self) -> bool {
        self.sess.read().is_logged_in()
    }

    /// The acting player, as resolved from the session.
    pub fn user(&self) -> CommandResult<UserName> {
        self.sess.current_user().ok_or(CommandError::NotLoggedIn)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub message: String,
    pub is_error: bool,
    /// The client asked to end the connection
    pub disconnect: bool,
}

impl CommandOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, s: impl AsRef<str>) {
        self.message.push_str(s.as_ref());
    }

    pub fn line(&mut self, s: impl AsRef<str>) {
        self.append(s);
        self.message.push('\n');
    }

    pub fn success(&mut self) {
        self.is_error = false;
    }

    pub fn failure(&mut self) {
        self.is_error = true;
    }
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        $crate::commands::CommandOutput { is_error: false, message: $msg.to_string(), disconnect: false }
    };
}

#[macro_export]
macro_rules! failure {
    ($msg:expr) => {
        $crate::commands::CommandOutput { is_error: true, message: $msg.to_string(), disconnect: false }
    };
}

pub async fn process_command(raw: &str, ctx: Arc<CmdCtx>) -> CommandResult<CommandOutput> {
    let intent = parse_command(raw);

    match intent.verb {
        Verb::Help => Ok(success!(help_text())),
        Verb::Quit => Ok(CommandOutput {
            message: "Goodbye!\n".to_string(),
            is_error: false,
            disconnect: true,
        }),
        Verb::Who => who::who(ctx.clone()).await,
        Verb::Login => login::login(ctx.clone(), intent).await,
        Verb::Logout => logout::logout(ctx.clone(), intent).await,
        Verb::Profile => profile::profile(ctx.clone(), intent).await,
        Verb::Unknown => match intent.raw_verb {
            Some(verb) => Err(CommandError::UnknownCommand(verb)),
            None => Ok(CommandOutput::new()),
        },
    }
}

pub fn help_text() -> String {
    format!(
        r#"
{title}
------------------
  {login}   Identify yourself
  {logout}         Stop being identified
  {who}            List online players
  {profile}        Profile commands (see `profile help`)
  {quit}           Disconnect
"#,
        title = ansi::styled("Available commands", &Style::color(Color::Aqua).with(Decoration::Bold)),
        login = ansi::paint("login <name>", Color::Yellow),
        logout = ansi::paint("logout", Color::Yellow),
        who = ansi::paint("who", Color::Yellow),
        profile = ansi::paint("profile", Color::Yellow),
        quit = ansi::paint("quit", Color::Yellow),
    )
}
