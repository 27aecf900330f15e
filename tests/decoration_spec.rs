use profiles::renderer::ansi::render_decorated;
use profiles::renderer::decoration::{parse, strip};
use profiles::renderer::{Color, Decoration, Style};

fn segs(input: &str) -> Vec<(&str, Style)> {
    parse(input).map(|s| (s.text, s.style)).collect()
}

#[test]
fn colour_then_decoration_accumulates() {
    assert_eq!(
        segs("&cHello &lWorld"),
        vec![
            ("Hello ", Style::color(Color::Red)),
            ("World", Style::color(Color::Red).with(Decoration::Bold)),
        ]
    );
}

#[test]
fn plain_text_is_one_unstyled_segment() {
    assert_eq!(segs("just words"), vec![("just words", Style::default())]);
    assert!(segs("").is_empty());
}

#[test]
fn new_colour_keeps_decorations() {
    let s = segs("&l&nA&9B");
    assert_eq!(
        s,
        vec![
            ("A", Style::default().with(Decoration::Bold).with(Decoration::Underlined)),
            (
                "B",
                Style::color(Color::Blue).with(Decoration::Bold).with(Decoration::Underlined)
            ),
        ]
    );
}

#[test]
fn reset_clears_decorations_but_not_colour() {
    assert_eq!(
        segs("&a&oX&rY"),
        vec![
            ("X", Style::color(Color::Green).with(Decoration::Italic)),
            ("Y", Style::color(Color::Green)),
        ]
    );
}

#[test]
fn unknown_code_stays_literal() {
    assert_eq!(
        segs("&6gold &zodd"),
        vec![("gold ", Style::color(Color::Gold)), ("&zodd", Style::default())]
    );
    // the active style resumes afterwards
    assert_eq!(
        segs("&6a&zb&lc"),
        vec![
            ("a", Style::color(Color::Gold)),
            ("&zb", Style::default()),
            ("c", Style::color(Color::Gold).with(Decoration::Bold)),
        ]
    );
}

#[test]
fn codes_are_case_sensitive() {
    assert_eq!(segs("&CX"), vec![("&CX", Style::default())]);
    assert_eq!(segs("&LX"), vec![("&LX", Style::default())]);
}

#[test]
fn trailing_and_line_break_ampersands_are_text() {
    assert_eq!(segs("Tom &"), vec![("Tom &", Style::default())]);
    assert_eq!(segs("&cA&\nB"), vec![("A&\nB", Style::color(Color::Red))]);
}

#[test]
fn marker_only_input_yields_nothing() {
    assert!(segs("&c&l&r").is_empty());
}

#[test]
fn multibyte_text_survives() {
    assert_eq!(
        segs("&dñandú &e☃"),
        vec![("ñandú ", Style::color(Color::LightPurple)), ("☃", Style::color(Color::Yellow))]
    );
}

#[test]
fn iterator_is_restartable_by_clone() {
    let it = parse("&cA&bB");
    let first: Vec<_> = it.clone().collect();
    let second: Vec<_> = it.collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn every_colour_code_round_trips() {
    for c in Color::ALL {
        assert_eq!(Color::from_code(c.code()), Some(c));
        let input = format!("&{}x", c.code());
        assert_eq!(segs(&input), vec![("x", Style::color(c))]);
    }
}

#[test]
fn strip_and_render() {
    assert_eq!(strip("&cHello &lWorld&z!"), "Hello World&z!");
    assert_eq!(
        render_decorated("&cHi &lthere"),
        "\x1b[91mHi \x1b[0m\x1b[91;1mthere\x1b[0m"
    );
    assert_eq!(render_decorated("plain"), "plain");
}
