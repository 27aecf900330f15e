//! Command parser for chat-style inputs.
//!
//! Examples:
//!   "profile add bio &cHi there"       -> Verb::Profile, ProfileCommand::AddBio("&cHi there")
//!   "/profile add link gh https://.."  -> Verb::Profile, ProfileCommand::AddLink { name: "gh", .. }
//!   "profile del link gh"              -> Verb::Profile, ProfileCommand::DelLink("gh")
//!   "profile Notch"                    -> Verb::Profile, ProfileCommand::View("Notch")
//!   "login Notch"                      -> Verb::Login, args=["Notch"]
//!
//! Verbs and sub-command keywords are case-insensitive. Everything else keeps its case, and
//! free text (bios, URLs) keeps its inner spacing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Help,
    Login,
    Logout,
    Who,
    Quit,
    Profile,
    /// Unrecognized; the raw verb is kept in `Intent::raw_verb`.
    Unknown,
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Help => "help",
            Verb::Login => "login",
            Verb::Logout => "logout",
            Verb::Who => "who",
            Verb::Quit => "quit",
            Verb::Profile => "profile",
            Verb::Unknown => "unknown",
        }
    }

    fn detect(word: &str) -> Self {
        match word.to_ascii_lowercase().as_str() {
            "help" | "?" => Verb::Help,
            "login" => Verb::Login,
            "logout" => Verb::Logout,
            "who" => Verb::Who,
            "quit" | "exit" => Verb::Quit,
            "profile" | "profiles" => Verb::Profile,
            _ => Verb::Unknown,
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    raw: String,
    // byte offset into `Intent::original`
    start: usize,
}

#[derive(Debug, Clone)]
pub struct Intent {
    pub verb: Verb,
    /// Trimmed input, case preserved.
    pub original: String,
    /// The raw args after the verb
    pub args: Vec<String>,
    /// If we couldn't canonicalize the verb, keep it here.
    pub raw_verb: Option<String>,

    tokens: Vec<Token>,
}

impl Intent {
    /// Original text starting at argument `idx`, inner whitespace untouched.
    /// Empty when there is no such argument.
    pub fn rest(&self, idx: usize) -> &str {
        // tokens[0] is the verb
        match self.tokens.get(idx + 1) {
            Some(t) => self.original[t.start..].trim_end(),
            None => "",
        }
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

pub fn parse_command(input: &str) -> Intent {
    let original = input.trim().trim_start_matches('/').to_string();
    let tokens = tokenize(&original);

    // Short-circuit: blank input
    let Some(first) = tokens.first() else {
        return Intent {
            verb: Verb::Unknown,
            original,
            args: vec![],
            raw_verb: None,
            tokens,
        };
    };

    let verb = Verb::detect(&first.raw);
    let raw_verb = (verb == Verb::Unknown).then(|| first.raw.clone());

    Intent {
        verb,
        args: tokens.iter().skip(1).map(|t| t.raw.clone()).collect(),
        original,
        raw_verb,
        tokens,
    }
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut toks = Vec::new();
    let mut start: Option<usize> = None;

    for (i, ch) in s.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(st)) => {
                toks.push(Token {
                    raw: s[st..i].to_string(),
                    start: st,
                });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(st) = start {
        toks.push(Token {
            raw: s[st..].to_string(),
            start: st,
        });
    }
    toks
}

pub const ADD_USAGE: &str = "Usage: profile add <bio|label> <value>";
pub const DEL_USAGE: &str = "Usage: profile del <bio|link|all> [name]";
pub const DEL_LINK_USAGE: &str = "Usage: profile del link <name>";

/// What a `profile ...` line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCommand {
    Help,
    AddBio(String),
    AddLink { name: String, url: String },
    DelBio,
    DelLink(String),
    DelAll,
    View(String),
    /// Not enough arguments; carries the usage line to show.
    Usage(&'static str),
    /// `del` with something other than bio/link/all
    UnknownField(String),
}

impl ProfileCommand {
    /// Whether this changes the caller's own profile (and so needs an acting user).
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ProfileCommand::AddBio(_)
                | ProfileCommand::AddLink { .. }
                | ProfileCommand::DelBio
                | ProfileCommand::DelLink(_)
                | ProfileCommand::DelAll
        )
    }
}

/// Interpret the arguments of a `profile` intent.
pub fn parse_profile_args(intent: &Intent) -> ProfileCommand {
    let args = &intent.args;
    let Some(sub) = args.first() else {
        return ProfileCommand::Help;
    };

    match sub.to_ascii_lowercase().as_str() {
        "help" => ProfileCommand::Help,
        "add" => parse_add(intent),
        "del" | "delete" | "rm" => parse_del(intent),
        _ if args.len() == 1 => ProfileCommand::View(sub.clone()),
        _ => ProfileCommand::Help,
    }
}

fn parse_add(intent: &Intent) -> ProfileCommand {
    let args = &intent.args;
    if args.len() < 3 {
        return ProfileCommand::Usage(ADD_USAGE);
    }

    let field = &args[1];
    if field.eq_ignore_ascii_case("bio") {
        return ProfileCommand::AddBio(intent.rest(2).to_string());
    }

    // "add link <name> <url...>", else the short form "add <label> <url...>"
    if field.eq_ignore_ascii_case("link") && args.len() >= 4 {
        return ProfileCommand::AddLink {
            name: args[2].clone(),
            url: intent.rest(3).to_string(),
        };
    }

    ProfileCommand::AddLink {
        name: field.clone(),
        url: intent.rest(2).to_string(),
    }
}

fn parse_del(intent: &Intent) -> ProfileCommand {
    let args = &intent.args;
    let Some(field) = args.get(1) else {
        return ProfileCommand::Usage(DEL_USAGE);
    };

    match field.to_ascii_lowercase().as_str() {
        "bio" => ProfileCommand::DelBio,
        "all" => ProfileCommand::DelAll,
        "link" => match args.get(2) {
            Some(name) => ProfileCommand::DelLink(name.clone()),
            None => ProfileCommand::Usage(DEL_LINK_USAGE),
        },
        _ => ProfileCommand::UnknownField(field.clone()),
    }
}
