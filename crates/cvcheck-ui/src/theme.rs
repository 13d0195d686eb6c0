use console::Style;
use cvcheck_types::Theme;

/// Terminal styles for one theme
#[derive(Debug, Clone)]
pub struct Palette {
    pub title: Style,
    pub accent: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub muted: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                title: Style::new().blue().bold(),
                accent: Style::new().blue(),
                success: Style::new().green(),
                warning: Style::new().yellow(),
                error: Style::new().red().bold(),
                muted: Style::new().black().bright(),
            },
            Theme::Dark => Self {
                title: Style::new().cyan().bold(),
                accent: Style::new().cyan(),
                success: Style::new().green().bright(),
                warning: Style::new().yellow().bright(),
                error: Style::new().red().bright().bold(),
                muted: Style::new().white().dim(),
            },
        }
    }

    /// Style for the score badge
    pub fn score(&self, score: f64) -> &Style {
        if score >= 7.0 {
            &self.success
        } else if score >= 5.0 {
            &self.warning
        } else {
            &self.error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced(style: &Style) -> String {
        style.apply_to("x").force_styling(true).to_string()
    }

    #[test]
    fn themes_use_different_accents() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(forced(&light.accent), forced(&dark.accent));
    }

    #[test]
    fn score_bands() {
        let palette = Palette::for_theme(Theme::Light);
        assert_eq!(forced(palette.score(8.0)), forced(&palette.success));
        assert_eq!(forced(palette.score(5.0)), forced(&palette.warning));
        assert_eq!(forced(palette.score(4.9)), forced(&palette.error));
    }
}
