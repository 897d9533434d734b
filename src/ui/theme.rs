//! Visual theme and styling.

use console::Style;

/// Styles used when printing validation reports.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// Style for the report header (red bold).
    pub header: Style,
    /// Style for file names (bold).
    pub file: Style,
    /// Style for error tags (red).
    pub error: Style,
    /// Style for fix suggestions (cyan dim).
    pub hint: Style,
    /// Style for rule ids in listings (bold).
    pub key: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    /// Create the coloured theme.
    pub fn new() -> Self {
        Self {
            header: Style::new().red().bold(),
            file: Style::new().bold(),
            error: Style::new().red(),
            hint: Style::new().cyan().dim(),
            key: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            file: Style::new(),
            error: Style::new(),
            hint: Style::new(),
            key: Style::new(),
            dim: Style::new(),
        }
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(msg))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_leaves_text_alone() {
        let theme = ReportTheme::plain();
        assert_eq!(theme.format_error("Error: boom"), "Error: boom");
        assert_eq!(theme.file.apply_to("config.yml").to_string(), "config.yml");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = ReportTheme::default();
        let new = ReportTheme::new();
        assert_eq!(default.format_error("boom"), new.format_error("boom"));
    }

    #[test]
    fn plain_slots_carry_no_styling() {
        let theme = ReportTheme::plain();
        for style in [&theme.header, &theme.hint, &theme.key, &theme.dim] {
            assert_eq!(style.apply_to("orphan-notes").to_string(), "orphan-notes");
        }
    }

    #[test]
    fn coloured_slots_emit_escape_codes() {
        let theme = ReportTheme::new();
        for style in [&theme.header, &theme.error, &theme.hint, &theme.key] {
            let styled = style.clone().force_styling(true).apply_to("orphan-notes").to_string();
            assert!(styled.contains("\x1b["), "{:?}", styled);
            assert!(styled.contains("orphan-notes"));
        }
    }
}
