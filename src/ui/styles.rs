use crate::countdown::Urgency;
use ratatui::style::{Color, Modifier, Style};

const ORANGE: Color = Color::Rgb(234, 88, 12);
const AMBER: Color = Color::Rgb(180, 83, 9);

pub struct ScheduleStyles {
    pub headline: Style,
    pub subtitle: Style,
    pub notice: Style,
    pub text: Style,
    pub muted: Style,
    pub heading: Style,
    pub part: Style,
    pub notes: Style,
    pub verse: Style,
    pub expired: Style,
    pub critical: Style,
    pub imminent: Style,
    pub normal: Style,
}

impl ScheduleStyles {
    pub fn new(dark: bool) -> Self {
        let (text, muted, heading) = if dark {
            (Color::Gray, Color::DarkGray, Color::White)
        } else {
            (Color::Reset, Color::DarkGray, Color::Reset)
        };
        let pulse = Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
        Self {
            headline: Style::default()
                .fg(if dark { Color::White } else { Color::Blue })
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(text),
            notice: Style::default()
                .fg(if dark { Color::Yellow } else { AMBER })
                .add_modifier(Modifier::BOLD),
            text: Style::default().fg(text),
            muted: Style::default().fg(muted).add_modifier(Modifier::ITALIC),
            heading: Style::default().fg(heading).add_modifier(Modifier::BOLD),
            part: Style::default()
                .fg(if dark { Color::LightBlue } else { Color::Blue })
                .add_modifier(Modifier::BOLD),
            notes: Style::default().fg(if dark { Color::LightGreen } else { Color::Green }),
            verse: Style::default()
                .fg(if dark { Color::LightYellow } else { AMBER })
                .add_modifier(Modifier::BOLD),
            expired: pulse,
            critical: Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
            imminent: pulse,
            normal: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        }
    }

    /// Style for a countdown label. A missing countdown (nothing published
    /// yet) is styled like an expired one.
    pub fn urgency(&self, urgency: Option<Urgency>) -> Style {
        match urgency {
            None | Some(Urgency::Expired) => self.expired,
            Some(Urgency::Critical) => self.critical,
            Some(Urgency::Imminent) => self.imminent,
            Some(Urgency::Normal) => self.normal,
        }
    }
}

impl Default for ScheduleStyles {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Card header color for a schedule accent name. Unknown names get cyan.
pub fn accent_color(name: &str) -> Color {
    match name.trim().to_lowercase().as_str() {
        "green" | "emerald" => Color::Green,
        "blue" | "indigo" => Color::Blue,
        "purple" | "violet" => Color::Magenta,
        "orange" => ORANGE,
        "red" => Color::Red,
        "yellow" | "amber" => Color::Yellow,
        _ => Color::Cyan,
    }
}
