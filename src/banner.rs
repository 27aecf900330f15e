pub const ENTRY: &str = r#"
Player Profiles
------------------------------------------------
• Tell others who you are with a short bio
• Share up to ten named links
• Look up anyone with `profile <name>`
------------------------------------------------
Type: `login <name>` to identify yourself
`profile help` for profile commands | `quit` to exit
------------------------------------------------
"#;

pub const PROMPT: &str = "> ";
