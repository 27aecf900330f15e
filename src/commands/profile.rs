use crate::commands::{CmdCtx, CommandError, CommandOutput, CommandResult};
use crate::input::parser::{Intent, ProfileCommand, parse_profile_args};
use crate::models::profile::Profile;
use crate::models::types::UserName;
use crate::renderer::Color;
use crate::renderer::ansi::{paint, render_decorated};
use crate::services::{ProfileService, ServiceError};
use crate::state::identity::CurrentUserLookup;
use crate::{failure, success};
use std::sync::Arc;

pub async fn profile(ctx: Arc<CmdCtx>, intent: Intent) -> CommandResult<CommandOutput> {
    let cmd = parse_profile_args(&intent);
    execute(&ctx.registry.services.profile, ctx.sess.as_ref(), cmd).await
}

/// Run a parsed profile command. Mutations always target `actor`'s own profile and are
/// refused when there is no acting user.
pub async fn execute(
    svc: &ProfileService,
    actor: &dyn CurrentUserLookup,
    cmd: ProfileCommand,
) -> CommandResult<CommandOutput> {
    if !cmd.is_mutation() {
        return match cmd {
            ProfileCommand::View(name) => view(svc, &name).await,
            ProfileCommand::Usage(usage) => Ok(failure!(format!("{}\n", paint(usage, Color::Red)))),
            ProfileCommand::UnknownField(_) => Ok(failure!(format!(
                "{}\n",
                paint("Field must be 'bio', 'link', or 'all'.", Color::Red)
            ))),
            _ => Ok(success!(help_text())),
        };
    }

    let user = actor.current_user().ok_or(CommandError::NotLoggedIn)?;

    let msg = match cmd {
        ProfileCommand::AddBio(text) => {
            svc.set_bio(&user, &text).await?;
            "Your bio has been updated!".to_string()
        }
        ProfileCommand::AddLink { name, url } => {
            svc.add_link(&user, &name, &url).await?;
            format!("Link '{name}' added to your profile!")
        }
        ProfileCommand::DelBio => {
            svc.clear_bio(&user).await?;
            "Your bio has been deleted!".to_string()
        }
        ProfileCommand::DelLink(name) => {
            svc.remove_link(&user, &name).await?;
            format!("Link '{name}' removed from your profile!")
        }
        ProfileCommand::DelAll => {
            if svc.delete_profile(&user).await? {
                "Your entire profile has been deleted!".to_string()
            } else {
                "You don't have a profile to delete.".to_string()
            }
        }
        // read-only commands returned above
        _ => return Ok(CommandOutput::new()),
    };

    Ok(success!(format!("{}\n", paint(&msg, Color::Green))))
}

async fn view(svc: &ProfileService, name: &str) -> CommandResult<CommandOutput> {
    let user = UserName::parse(name).ok_or_else(|| ServiceError::InvalidUserName(name.to_string()))?;
    let profile = svc.get_profile(&user).await?;
    Ok(success!(render_profile(&profile)))
}

/// Player-facing rendering of a profile, ANSI coloured, one item per line.
pub fn render_profile(profile: &Profile) -> String {
    let name = paint(profile.owner.as_str(), Color::Aqua);

    if profile.is_empty() {
        return format!("{}{name}\n", paint("No profile found for ", Color::Red));
    }

    let mut out = format!("{}{name}\n", paint("Profile for ", Color::Gold));

    match &profile.bio {
        Some(bio) => out.push_str(&format!("{}{}\n", paint("Bio: ", Color::Gold), render_decorated(bio))),
        None => out.push_str(&format!("{}\n", paint("Bio: Not available", Color::Gray))),
    }

    match &profile.links {
        Some(links) => {
            for (label, url) in links {
                out.push_str(&render_decorated(&format!("• {label}: ")));
                out.push_str(&paint(url, Color::Blue));
                out.push('\n');
            }
        }
        None => out.push_str(&format!("{}\n", paint("Links: None added", Color::Gray))),
    }

    out
}

pub fn help_text() -> String {
    let mut out = String::new();
    let mut line = |text: &str, color: Color| {
        out.push_str(&paint(text, color));
        out.push('\n');
    };

    line(&format!("Profile Help (v{})", env!("CARGO_PKG_VERSION")), Color::Gold);
    line("Usage:", Color::Yellow);
    line("profile help - Show this help message", Color::Green);
    line("profile add bio <text> - Add or update your bio", Color::Green);
    line("profile add <label> <url> - Add a link", Color::Green);
    line("profile add link <label> <url> - Add a link", Color::Green);
    line("profile del bio - Delete your bio", Color::Red);
    line("profile del link <name> - Delete a named link", Color::Red);
    line("profile del all - Delete entire profile", Color::Red);
    line("profile <username> - View a player's profile", Color::Aqua);
    line("Bios understand &0-&f colours, &l bold, &m strike, &n underline, &o italic, &r reset.", Color::Gray);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::Links;
    use crate::renderer::ansi::strip_ansi;
    use crate::renderer::decoration;

    fn plain(s: &str) -> String {
        strip_ansi(s).into_owned()
    }

    fn owner() -> UserName {
        UserName::parse("Alex").unwrap()
    }

    #[test]
    fn renders_empty_profile_as_not_found() {
        let out = plain(&render_profile(&Profile::empty(owner())));
        assert_eq!(out, "No profile found for Alex\n");
    }

    #[test]
    fn renders_bio_and_links() {
        let mut p = Profile::empty(owner());
        p.bio = Some("&cHello &lWorld".into());
        let mut links = Links::new();
        links.insert("site".into(), "https://alex.dev".into());
        links.insert("gh".into(), "https://github.com/alex".into());
        p.links = Some(links);

        let out = plain(&render_profile(&p));
        assert_eq!(
            out,
            "Profile for Alex\nBio: Hello World\n• gh: https://github.com/alex\n• site: https://alex.dev\n"
        );
    }

    #[test]
    fn renders_missing_sections() {
        let mut p = Profile::empty(owner());
        p.links = Some(Links::new());
        let out = plain(&render_profile(&p));
        assert_eq!(out, "Profile for Alex\nBio: Not available\n");

        let mut p = Profile::empty(owner());
        p.bio = Some("hi".into());
        let out = plain(&render_profile(&p));
        assert_eq!(out, "Profile for Alex\nBio: hi\nLinks: None added\n");
    }

    #[test]
    fn help_mentions_every_subcommand() {
        let help = decoration::strip(&plain(&help_text()));
        for needle in ["add bio", "add <label>", "del bio", "del link", "del all", "<username>"] {
            assert!(help.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn stored_escape_sequences_do_not_reach_the_viewer() {
        let mut p = Profile::empty(owner());
        p.bio = Some("hi\x1b[2J\x1b]0;pwned\x07".into());
        let mut links = Links::new();
        links.insert("x\x1b[31m".into(), "https://a\x1b[8m.dev\u{9b}".into());
        p.links = Some(links);

        let out = render_profile(&p);
        assert!(!out.contains("\x1b[2J"));
        assert!(!out.contains('\x07'));
        assert!(!out.contains('\u{9b}'));
        assert_eq!(
            plain(&out),
            "Profile for Alex\nBio: hi[2J]0;pwned\n• x[31m: https://a[8m.dev\n"
        );
    }
}
