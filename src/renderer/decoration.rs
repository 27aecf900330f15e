//! Lexer for the `&`-marker decoration syntax used in bios.
//!
//! A marker is `&` followed by one code character. It starts a new segment and changes the
//! active style for everything up to the next marker:
//!
//!   `0`-`9`, `a`-`f`   one of 16 colours (replaces the colour, keeps decorations)
//!   `l` `m` `n` `o`    bold, strikethrough, underlined, italic (switched on)
//!   `r`                clears all decorations, the colour stays
//!
//! A marker with any other code is not a marker at all: its segment is emitted unstyled,
//! literal `&x` included, and the active style is left alone. A `&` at the very end of the
//! input, or followed by a line break, is plain text.
//!
//! Usage:
//!   for seg in decoration::parse("&cHello &lWorld") { /* ("Hello ", red), ("World", red+bold) */ }

pub const MARKER: char = '&';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl Color {
    pub const ALL: [Color; 16] = [
        Color::Black,
        Color::DarkBlue,
        Color::DarkGreen,
        Color::DarkAqua,
        Color::DarkRed,
        Color::DarkPurple,
        Color::Gold,
        Color::Gray,
        Color::DarkGray,
        Color::Blue,
        Color::Green,
        Color::Aqua,
        Color::Red,
        Color::LightPurple,
        Color::Yellow,
        Color::White,
    ];

    pub fn from_code(c: char) -> Option<Self> {
        let idx = match c {
            '0'..='9' => c as usize - '0' as usize,
            'a'..='f' => c as usize - 'a' as usize + 10,
            _ => return None,
        };
        Some(Self::ALL[idx])
    }

    pub fn code(self) -> char {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        char::from_digit(idx as u32, 16).unwrap_or('0')
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    Bold,
    Strikethrough,
    Underlined,
    Italic,
}

/// What a single marker code does to the active style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Color(Color),
    Decoration(Decoration),
    Reset,
}

impl Marker {
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'l' => Some(Marker::Decoration(Decoration::Bold)),
            'm' => Some(Marker::Decoration(Decoration::Strikethrough)),
            'n' => Some(Marker::Decoration(Decoration::Underlined)),
            'o' => Some(Marker::Decoration(Decoration::Italic)),
            'r' => Some(Marker::Reset),
            _ => Color::from_code(c).map(Marker::Color),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub strikethrough: bool,
    pub underlined: bool,
    pub italic: bool,
}

impl Style {
    pub fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    pub fn with(mut self, decoration: Decoration) -> Self {
        match decoration {
            Decoration::Bold => self.bold = true,
            Decoration::Strikethrough => self.strikethrough = true,
            Decoration::Underlined => self.underlined = true,
            Decoration::Italic => self.italic = true,
        }
        self
    }

    pub fn has(&self, decoration: Decoration) -> bool {
        match decoration {
            Decoration::Bold => self.bold,
            Decoration::Strikethrough => self.strikethrough,
            Decoration::Underlined => self.underlined,
            Decoration::Italic => self.italic,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, marker: Marker) -> Self {
        match marker {
            Marker::Color(c) => Self { color: Some(c), ..self },
            Marker::Decoration(d) => self.with(d),
            Marker::Reset => Self {
                color: self.color,
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: Style,
}

/// Lazily split `input` into styled segments. Clone the iterator before consuming it to
/// walk the same segments again.
pub fn parse(input: &str) -> Segments<'_> {
    Segments {
        input,
        pos: 0,
        style: Style::default(),
    }
}

/// The input with all recognised markers removed.
pub fn strip(input: &str) -> String {
    parse(input).map(|s| s.text).collect()
}

#[derive(Debug, Clone)]
pub struct Segments<'a> {
    input: &'a str,
    pos: usize,
    style: Style,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            let start = self.pos;

            let (text_start, scan_from, style) = match marker_at(self.input, start) {
                Some((code, len)) => match Marker::from_code(code) {
                    Some(m) => {
                        self.style = self.style.apply(m);
                        (start + len, start + len, self.style)
                    }
                    // not ours: keep the literal marker in the text
                    None => (start, start + len, Style::default()),
                },
                None => (start, start, self.style),
            };

            let end = next_marker(self.input, scan_from).unwrap_or(self.input.len());
            self.pos = end;

            let text = &self.input[text_start..end];
            if !text.is_empty() {
                return Some(Segment { text, style });
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

// If a marker starts at byte `i`, returns its code character and its length in bytes
fn marker_at(input: &str, i: usize) -> Option<(char, usize)> {
    let rest = input.get(i..)?;
    let mut chars = rest.chars();
    if chars.next()? != MARKER {
        return None;
    }
    let code = chars.next()?;
    if is_line_break(code) {
        return None;
    }
    Some((code, MARKER.len_utf8() + code.len_utf8()))
}

fn next_marker(input: &str, from: usize) -> Option<usize> {
    let b = input.as_bytes();
    (from..b.len()).find(|&i| b[i] == b'&' && marker_at(input, i).is_some())
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}
