use konf_store::StoreEntry;
use std::fmt;
use std::str::FromStr;

/// Length of the longest header word ("Context", "Cluster").
pub const MIN_COLUMN_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn to_console(self) -> console::Color {
        match self {
            Color::Black => console::Color::Black,
            Color::Red => console::Color::Red,
            Color::Green => console::Color::Green,
            Color::Yellow => console::Color::Yellow,
            Color::Blue => console::Color::Blue,
            Color::Magenta => console::Color::Magenta,
            Color::Cyan => console::Color::Cyan,
            Color::White => console::Color::White,
        }
    }
}

impl FromStr for Color {
    type Err = UnknownStyle;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            _ => return Err(UnknownStyle(name.to_string())),
        })
    }
}

/// One formatting transform applicable to a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Styling {
    Bold,
    Faint,
    Italic,
    Underline,
    Foreground(Color),
    Background(Color),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStyle(pub String);

impl fmt::Display for UnknownStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown style {:?}", self.0)
    }
}

impl std::error::Error for UnknownStyle {}

/// Accepts `bold`, `faint`, `italic`, `underline`, a colour name (`cyan`) or a background
/// colour (`bgCyan`).
impl FromStr for Styling {
    type Err = UnknownStyle;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lowered = name.to_ascii_lowercase();
        Ok(match lowered.as_str() {
            "bold" => Styling::Bold,
            "faint" => Styling::Faint,
            "italic" => Styling::Italic,
            "underline" => Styling::Underline,
            other => match other.strip_prefix("bg") {
                Some(color) => Styling::Background(
                    color
                        .parse()
                        .map_err(|_| UnknownStyle(name.to_string()))?,
                ),
                None => Styling::Foreground(
                    other.parse().map_err(|_| UnknownStyle(name.to_string()))?,
                ),
            },
        })
    }
}

/// Ordered set of stylings applied to every cell of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSet(Vec<Styling>);

impl StyleSet {
    pub fn plain() -> Self {
        Self(Vec::new())
    }

    /// Default look of the highlighted row.
    pub fn highlight() -> Self {
        Self(vec![Styling::Bold, Styling::Foreground(Color::Cyan)])
    }

    pub fn with(mut self, styling: Styling) -> Self {
        self.0.push(styling);
        self
    }

    pub fn is_plain(&self) -> bool {
        self.0.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        self.to_style().for_stderr().apply_to(text).to_string()
    }

    pub(crate) fn to_style(&self) -> console::Style {
        self.0
            .iter()
            .fold(console::Style::new(), |style, styling| match styling {
                Styling::Bold => style.bold(),
                Styling::Faint => style.dim(),
                Styling::Italic => style.italic(),
                Styling::Underline => style.underlined(),
                Styling::Foreground(color) => style.fg(color.to_console()),
                Styling::Background(color) => style.bg(color.to_console()),
            })
    }
}

impl FromIterator<Styling> for StyleSet {
    fn from_iter<I: IntoIterator<Item = Styling>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Row layout: a two-character marker followed by three fixed-width cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    marker: &'static str,
    width: usize,
    styles: StyleSet,
}

impl RowTemplate {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn render(&self, entry: &StoreEntry) -> String {
        let file = entry.file.display().to_string();
        let [context, cluster, file] = [
            entry.context.as_str(),
            entry.cluster.as_str(),
            file.as_str(),
        ]
        .map(|value| self.styles.apply(&fit(value, self.width)));
        format!("{}{context} | {cluster} | {file} |", self.marker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTemplates {
    pub inactive: RowTemplate,
    pub active: RowTemplate,
    pub label: String,
}

/// Build row templates and the header label for columns of at most `max_column_len`
/// characters.
///
/// Widths below [`MIN_COLUMN_LEN`] are raised to it so the header never misaligns. Both rows
/// share cell boundaries; moving the selection only changes marker and styling.
pub fn prepare_table(max_column_len: usize, active_styles: StyleSet) -> TableTemplates {
    let width = max_column_len.max(MIN_COLUMN_LEN);

    let inactive = RowTemplate {
        marker: "  ",
        width,
        styles: StyleSet::plain(),
    };
    let active = RowTemplate {
        marker: "▸ ",
        width,
        styles: active_styles,
    };
    let label = format!(
        "  Context{} | Cluster{} | File{} ",
        " ".repeat(width - 7),
        " ".repeat(width - 7),
        " ".repeat(width - 4)
    );

    TableTemplates {
        inactive,
        active,
        label,
    }
}

// pad, then cut to exactly `width` characters
fn fit(value: &str, width: usize) -> String {
    value
        .chars()
        .chain(std::iter::repeat(' '))
        .take(width)
        .collect()
}
