//! Immutable style descriptor.
//!
//! A [`Theme`] is chosen once per session from the client's colour support
//! and passed into every render. It never reads terminal state itself.

use ratatui::style::{Color, Modifier, Style};

/// Colour capability of the client terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSupport {
    /// 24-bit colour.
    TrueColor,
    /// xterm 256-colour palette.
    Ansi256,
    /// The 16 basic colours.
    #[default]
    Ansi16,
    /// No colour; modifiers only.
    Monochrome,
}

impl ColorSupport {
    /// Derive support from the client's `TERM` and optional `COLORTERM`.
    pub fn detect(term: &str, colorterm: Option<&str>) -> Self {
        if let Some(colorterm) = colorterm
            && matches!(colorterm.to_ascii_lowercase().as_str(), "truecolor" | "24bit")
        {
            return Self::TrueColor;
        }

        let term = term.to_ascii_lowercase();
        if term.is_empty() || term == "dumb" {
            Self::Monochrome
        } else if term.contains("truecolor") || term.contains("direct") {
            Self::TrueColor
        } else if term.contains("256color") {
            Self::Ansi256
        } else {
            Self::Ansi16
        }
    }
}

/// Palette entry expressed at every colour depth.
struct Swatch {
    rgb: (u8, u8, u8),
    indexed: u8,
    basic: Color,
}

impl Swatch {
    const fn new(rgb: (u8, u8, u8), indexed: u8, basic: Color) -> Self {
        Self { rgb, indexed, basic }
    }

    fn resolve(&self, colors: ColorSupport) -> Option<Color> {
        match colors {
            ColorSupport::TrueColor => Some(Color::Rgb(self.rgb.0, self.rgb.1, self.rgb.2)),
            ColorSupport::Ansi256 => Some(Color::Indexed(self.indexed)),
            ColorSupport::Ansi16 => Some(self.basic),
            ColorSupport::Monochrome => None,
        }
    }
}

const SIDEBAR_GREEN: Swatch = Swatch::new((0x04, 0xB5, 0x75), 35, Color::Green);
const ENTRY_FG: Swatch = Swatch::new((0xFA, 0xFA, 0xFA), 231, Color::White);
const ENTRY_BG: Swatch = Swatch::new((0x7D, 0x56, 0xF4), 99, Color::Magenta);
const SELECTED_FG: Swatch = Swatch::new((0x00, 0x00, 0x00), 16, Color::Black);
const SELECTED_BG: Swatch = Swatch::new((0xFF, 0xFF, 0x00), 226, Color::Yellow);
const FOOTER_GRAY: Swatch = Swatch::new((0x3C, 0x3C, 0x3C), 237, Color::DarkGray);
const DATE_GREEN: Swatch = Swatch::new((0x55, 0xFF, 0x55), 10, Color::LightGreen);
const TITLE_BLUE: Swatch = Swatch::new((0x55, 0x55, 0xFF), 12, Color::LightBlue);

fn styled(fg: Option<Color>, bg: Option<Color>, modifier: Modifier) -> Style {
    let mut style = Style::new().add_modifier(modifier);
    if let Some(fg) = fg {
        style = style.fg(fg);
    }
    if let Some(bg) = bg {
        style = style.bg(bg);
    }
    style
}

/// Styles for every element of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Sidebar border.
    pub sidebar_border: Style,
    /// Unselected campus entry.
    pub campus: Style,
    /// Selected campus entry.
    pub campus_selected: Style,
    /// Content pane border.
    pub content_border: Style,
    /// Date header line.
    pub date_header: Style,
    /// Restaurant title.
    pub restaurant: Style,
    /// Meal line.
    pub meal: Style,
    /// "No data" and similar in-pane notices.
    pub notice: Style,
    /// Full-screen messages (loading, too small).
    pub banner: Style,
    /// Key-binding hints.
    pub footer: Style,
}

impl Theme {
    /// Theme for the given colour support.
    pub fn for_colors(colors: ColorSupport) -> Self {
        let c = |swatch: &Swatch| swatch.resolve(colors);
        let mono = colors == ColorSupport::Monochrome;

        Self {
            sidebar_border: styled(c(&SIDEBAR_GREEN), None, Modifier::empty()),
            campus: styled(c(&ENTRY_FG), c(&ENTRY_BG), Modifier::BOLD),
            campus_selected: styled(
                c(&SELECTED_FG),
                c(&SELECTED_BG),
                if mono { Modifier::BOLD | Modifier::REVERSED } else { Modifier::BOLD },
            ),
            content_border: Style::new(),
            date_header: styled(c(&DATE_GREEN), None, Modifier::BOLD | Modifier::UNDERLINED),
            restaurant: styled(c(&TITLE_BLUE), None, Modifier::BOLD),
            meal: Style::new(),
            notice: styled(None, None, Modifier::ITALIC),
            banner: styled(None, None, Modifier::BOLD),
            footer: styled(c(&FOOTER_GRAY), None, Modifier::BOLD | Modifier::ITALIC),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_colors(ColorSupport::default())
    }
}
