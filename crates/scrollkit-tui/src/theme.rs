use ratatui::style::{Color, Modifier, Style};

/// Colors for the list view and status bar
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub pinned_bg: Color,

    pub gutter_fg: Color,
    pub gutter_bg: Color,
    pub handle: Color,
    pub handle_active: Color,

    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,

    pub status_fg: Color,
    pub status_bg: Color,
    pub accent: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg: Color::Rgb(0x28, 0x28, 0x28),
            fg: Color::Rgb(0xd4, 0xbe, 0x98),
            muted: Color::Rgb(0x92, 0x83, 0x74),
            header_fg: Color::Rgb(0xd8, 0xa6, 0x57),
            header_bg: Color::Rgb(0x32, 0x30, 0x2f),
            pinned_bg: Color::Rgb(0x45, 0x40, 0x3d),
            gutter_fg: Color::Rgb(0x7c, 0x6f, 0x64),
            gutter_bg: Color::Rgb(0x32, 0x30, 0x2f),
            handle: Color::Rgb(0x50, 0x49, 0x45),
            handle_active: Color::Rgb(0x89, 0xb4, 0x82),
            scrollbar_track: Color::Rgb(0x32, 0x30, 0x2f),
            scrollbar_thumb: Color::Rgb(0xa8, 0x99, 0x84),
            status_fg: Color::Rgb(0xd4, 0xbe, 0x98),
            status_bg: Color::Rgb(0x45, 0x40, 0x3d),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}

impl Theme {
    pub fn row(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn header(&self, pinned: bool) -> Style {
        let bg = if pinned { self.pinned_bg } else { self.header_bg };
        Style::default()
            .fg(self.header_fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn gutter(&self) -> Style {
        Style::default().fg(self.gutter_fg).bg(self.gutter_bg)
    }

    pub fn handle(&self, active: bool) -> Style {
        let fg = if active { self.handle_active } else { self.handle };
        Style::default().fg(fg).bg(self.gutter_bg)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }
}
