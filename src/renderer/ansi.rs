use crate::renderer::decoration::{self, Color, Decoration, Style};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

pub const RESET: &str = "\x1b[0m";

// CSI sequences (SGR and friends) and OSC strings terminated by BEL or ST
static ANSI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").unwrap());

/// Build an ANSI SGR sequence for a style.
/// Returns "" for a plain style.
pub fn compose_sgr(style: &Style) -> String {
    let mut codes: Vec<&'static str> = Vec::new();

    if let Some(color) = style.color {
        codes.push(fg_code(color));
    }
    for (decoration, code) in [
        (Decoration::Bold, "1"),
        (Decoration::Italic, "3"),
        (Decoration::Underlined, "4"),
        (Decoration::Strikethrough, "9"),
    ] {
        if style.has(decoration) {
            codes.push(code);
        }
    }

    if codes.is_empty() {
        return String::new();
    }

    let mut s = String::from("\x1b[");
    for (i, c) in codes.iter().enumerate() {
        if i > 0 {
            s.push(';');
        }
        s.push_str(c);
    }
    s.push('m');
    s
}

fn fg_code(color: Color) -> &'static str {
    match color {
        Color::Black => "30",
        Color::DarkBlue => "34",
        Color::DarkGreen => "32",
        Color::DarkAqua => "36",
        Color::DarkRed => "31",
        Color::DarkPurple => "35",
        Color::Gold => "33",
        Color::Gray => "37",
        Color::DarkGray => "90",
        Color::Blue => "94",
        Color::Green => "92",
        Color::Aqua => "96",
        Color::Red => "91",
        Color::LightPurple => "95",
        Color::Yellow => "93",
        Color::White => "97",
    }
}

/// Wrap `text` in the given style, resetting afterwards. Control characters in `text`
/// (other than newline and tab) are dropped, so stored player text can never carry its
/// own escape sequences to another terminal.
pub fn styled(text: &str, style: &Style) -> String {
    let text = sanitize(text);
    if style.is_plain() {
        return text.into_owned();
    }
    format!("{}{text}{RESET}", compose_sgr(style))
}

/// `text` without C0/C1 control characters, newline and tab excepted.
pub fn sanitize(text: &str) -> Cow<'_, str> {
    let unsafe_char = |c: char| c.is_control() && c != '\n' && c != '\t';
    if !text.contains(unsafe_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| !unsafe_char(c)).collect())
}

/// Removes ANSI escape sequences, leaving the visible text.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(s, "")
}

pub fn paint(text: &str, color: Color) -> String {
    styled(text, &Style::color(color))
}

/// Render `&`-decorated text for a terminal. Every styled segment is self-contained
/// (ends with a reset), so the result can be embedded anywhere.
pub fn render_decorated(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for seg in decoration::parse(input) {
        out.push_str(&styled(seg.text, &seg.style));
    }
    out
}
