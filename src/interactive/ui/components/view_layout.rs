use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Shared chrome for full-screen views: a title bar, a content area the
/// caller fills in, and a key-hint status bar.
pub struct ViewLayout {
    title: String,
    subtitle: Option<String>,
    subtitle_style: Option<Style>,
    status_text: Option<String>,
}

impl ViewLayout {
    pub fn new(title: String) -> Self {
        Self {
            title,
            subtitle: None,
            subtitle_style: None,
            status_text: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: String) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn with_subtitle_style(mut self, style: Style) -> Self {
        self.subtitle_style = Some(style);
        self
    }

    pub fn with_status_text(mut self, text: String) -> Self {
        self.status_text = Some(text);
        self
    }

    pub fn render<F>(&self, f: &mut Frame, area: Rect, render_content: F)
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(area);

        self.render_title_bar(f, chunks[0]);
        render_content(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);
    }

    fn render_title_bar(&self, f: &mut Frame, area: Rect) {
        let mut title_lines = vec![Line::from(vec![Span::styled(
            &self.title,
            Styles::title(),
        )])];
        if let Some(ref subtitle) = self.subtitle {
            title_lines.push(Line::from(Span::styled(
                subtitle.as_str(),
                self.subtitle_style.unwrap_or_else(Styles::dimmed),
            )));
        }

        let title_block = Paragraph::new(title_lines)
            .block(Block::default().borders(Borders::BOTTOM))
            .alignment(ratatui::layout::Alignment::Left);
        f.render_widget(title_block, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = self
            .status_text
            .as_deref()
            .unwrap_or("Enter: Search | Esc: Exit | ?: Help");

        let status_bar = Paragraph::new(status_text)
            .style(Styles::dimmed())
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(status_bar, area);
    }
}

// Helper struct for consistent color scheme
pub struct ColorScheme;

impl ColorScheme {
    pub const PRIMARY: Color = Color::Cyan;
    pub const SECONDARY: Color = Color::Yellow;
    pub const TEXT: Color = Color::White;
    pub const TEXT_DIM: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Red;
}

// Helper struct for consistent styling
pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default()
            .fg(ColorScheme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(ColorScheme::SECONDARY)
    }

    pub fn normal() -> Style {
        Style::default().fg(ColorScheme::TEXT)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(ColorScheme::TEXT_DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(ColorScheme::ERROR)
            .add_modifier(Modifier::BOLD)
    }
}
