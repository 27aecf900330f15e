use parking_lot::RwLock;
use profiles::commands::profile::execute;
use profiles::commands::{CmdCtx, CommandError, CommandOutput};
use profiles::config::Config;
use profiles::input::parser::ProfileCommand;
use profiles::models::types::UserName;
use profiles::renderer::ansi::strip_ansi;
use profiles::renderer::decoration;
use profiles::services::{LinkError, ServiceError};
use profiles::state::identity::FixedUser;
use profiles::state::session::Protocol;
use profiles::store::repo::MemoryProfileRepository;
use profiles::{Registry, Session, process_command};
use std::sync::Arc;

fn plain(s: &str) -> String {
    strip_ansi(s).into_owned()
}

fn registry() -> Arc<Registry> {
    let repo = Arc::new(MemoryProfileRepository::new());
    Arc::new(Registry::with_repo(Arc::new(Config::default()), repo))
}

fn connect(registry: &Arc<Registry>) -> Arc<CmdCtx> {
    let sess = Arc::new(RwLock::new(Session::new(Protocol::Local)));
    Arc::new(CmdCtx::new(registry.clone(), sess))
}

async fn run(ctx: &Arc<CmdCtx>, line: &str) -> CommandOutput {
    process_command(line, ctx.clone()).await.unwrap()
}

async fn run_err(ctx: &Arc<CmdCtx>, line: &str) -> CommandError {
    process_command(line, ctx.clone()).await.unwrap_err()
}

#[tokio::test]
async fn mutations_require_login() {
    let reg = registry();
    let ctx = connect(&reg);

    let err = run_err(&ctx, "profile add bio hello").await;
    assert!(matches!(err, CommandError::NotLoggedIn));

    // viewing works anonymously
    let out = run(&ctx, "profile Notch").await;
    assert_eq!(plain(&out.message), "No profile found for Notch\n");
}

#[tokio::test]
async fn bio_and_links_through_commands() {
    let reg = registry();
    let ctx = connect(&reg);

    run(&ctx, "login Notch").await;
    assert_eq!(reg.who(), vec!["Notch".to_string()]);

    let out = run(&ctx, "profile add bio &cHello   &lWorld").await;
    assert!(!out.is_error);
    assert_eq!(plain(&out.message), "Your bio has been updated!\n");

    run(&ctx, "profile add link GitHub https://github.com/notch").await;
    run(&ctx, "/profile add site https://notch.dev").await;

    let out = run(&ctx, "profile Notch").await;
    assert_eq!(
        plain(&out.message),
        "Profile for Notch\nBio: Hello   World\n• GitHub: https://github.com/notch\n• site: https://notch.dev\n"
    );

    let out = run(&ctx, "profile del link site").await;
    assert_eq!(plain(&out.message), "Link 'site' removed from your profile!\n");

    let err = run_err(&ctx, "profile del link site").await;
    assert!(matches!(
        err,
        CommandError::Service(ServiceError::Link(LinkError::NotFound(ref n))) if n == "site"
    ));
    assert_eq!(err.user_message(), "No link with the name 'site' found in your profile.");
}

#[tokio::test]
async fn eleventh_link_and_duplicates_are_refused() {
    let reg = registry();
    let ctx = connect(&reg);
    run(&ctx, "login Linky").await;

    for i in 0..10 {
        run(&ctx, &format!("profile add link l{i} https://x/{i}")).await;
    }

    let err = run_err(&ctx, "profile add link l10 https://x/10").await;
    assert_eq!(err.user_message(), "You can only have up to 10 links.");

    // capacity wins over the duplicate check
    let err = run_err(&ctx, "profile add link l0 https://x/0").await;
    assert_eq!(err.user_message(), "You can only have up to 10 links.");

    run(&ctx, "profile del link l9").await;
    let err = run_err(&ctx, "profile add link l0 https://elsewhere").await;
    assert_eq!(err.user_message(), "A link with the name 'l0' already exists in your profile.");
}

#[tokio::test]
async fn delete_all_and_removing_from_empty() {
    let reg = registry();
    let ctx = connect(&reg);
    run(&ctx, "login Alex").await;

    let err = run_err(&ctx, "profile del link x").await;
    assert_eq!(err.user_message(), "You don't have any links in your profile.");

    let out = run(&ctx, "profile del all").await;
    assert_eq!(plain(&out.message), "You don't have a profile to delete.\n");

    run(&ctx, "profile add bio hi").await;
    let out = run(&ctx, "profile del all").await;
    assert_eq!(plain(&out.message), "Your entire profile has been deleted!\n");
    assert_eq!(reg.services.profile.profile_count().await.unwrap(), 0);
}

#[tokio::test]
async fn usage_and_invalid_names() {
    let reg = registry();
    let ctx = connect(&reg);

    let out = run(&ctx, "profile add").await;
    assert!(out.is_error);
    assert!(plain(&out.message).starts_with("Usage: profile add"));

    let out = run(&ctx, "profile del hat").await;
    assert!(out.is_error);

    let err = run_err(&ctx, "profile ../etc").await;
    assert!(matches!(err, CommandError::Service(ServiceError::InvalidUserName(_))));

    let err = run_err(&ctx, "login bad/name").await;
    assert!(matches!(err, CommandError::InvalidArgs(_)));

    let err = run_err(&ctx, "dance").await;
    assert!(matches!(err, CommandError::UnknownCommand(ref v) if v == "dance"));
}

#[tokio::test]
async fn logout_ends_identity() {
    let reg = registry();
    let ctx = connect(&reg);

    run(&ctx, "login Alex").await;
    assert!(ctx.is_logged_in());
    let out = run(&ctx, "logout").await;
    assert_eq!(out.message, "You have been logged out.\n");
    assert!(reg.who().is_empty());

    let err = run_err(&ctx, "profile del bio").await;
    assert!(matches!(err, CommandError::NotLoggedIn));

    let out = run(&ctx, "quit").await;
    assert!(out.disconnect);
}

#[tokio::test]
async fn execute_with_fixed_identity() {
    let reg = registry();
    let svc = &reg.services.profile;
    let alex = UserName::parse("Alex").unwrap();

    let out = execute(svc, &FixedUser::named(alex.clone()), ProfileCommand::AddBio("&eyo".into()))
        .await
        .unwrap();
    assert!(!out.is_error);

    let err = execute(svc, &FixedUser::anonymous(), ProfileCommand::DelBio).await.unwrap_err();
    assert!(matches!(err, CommandError::NotLoggedIn));

    let p = svc.get_profile(&alex).await.unwrap();
    assert_eq!(p.bio.as_deref().map(decoration::strip).as_deref(), Some("yo"));
}

#[tokio::test]
async fn viewer_never_receives_stored_control_sequences() {
    let reg = registry();
    let mallory = connect(&reg);
    let viewer = connect(&reg);

    run(&mallory, "login Mallory").await;
    run(&mallory, "profile add bio hi\x1b[2J\x1b]0;pwned\x07").await;

    // stored verbatim
    let p = reg
        .services
        .profile
        .get_profile(&UserName::parse("Mallory").unwrap())
        .await
        .unwrap();
    assert_eq!(p.bio.as_deref(), Some("hi\x1b[2J\x1b]0;pwned\x07"));

    let out = run(&viewer, "profile Mallory").await;
    assert!(!out.message.contains("\x1b[2J"));
    assert!(!out.message.contains("\x1b]0;"));
    assert!(!out.message.contains('\x07'));
    assert!(plain(&out.message).contains("Bio: hi[2J]0;pwned\n"));
}
