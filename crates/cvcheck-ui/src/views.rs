//! Pure renderers for each terminal view. Every function returns the text to
//! print; nothing here touches the terminal.

use std::path::Path;

use cvcheck_config::upload::MAX_FILE_SIZE;
use cvcheck_core::upload::{Stage, StageState, format_file_size, stage_display};
use cvcheck_types::{AnalysisId, AnalysisResult, Language, Preferences, SelectedFile, Theme};

use crate::theme::Palette;

const APP_TITLE: &str = "Smart CV Checker";
const RULE: &str = "────────────────────────────────────────────────────────";

pub fn header(prefs: &Preferences, palette: &Palette) -> String {
    let theme_icon = match prefs.theme {
        Theme::Light => "☀",
        Theme::Dark => "☾",
    };

    format!(
        "{}   {}\n{}",
        palette.title.apply_to(APP_TITLE),
        palette.muted.apply_to(format!(
            "{} {}  {} {}",
            prefs.language.flag(),
            prefs.language.code().to_uppercase(),
            theme_icon,
            prefs.theme.as_str()
        )),
        palette.muted.apply_to(RULE)
    )
}

pub fn landing(palette: &Palette) -> String {
    let features = [
        ("✅", "Structure and formatting review"),
        ("🔑", "Missing keyword detection"),
        ("💬", "Actionable improvement suggestions"),
        ("⚠️", "Grammar and clarity checks"),
    ];

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        palette.title.apply_to("Get instant feedback on your CV")
    ));
    out.push_str("Upload your resume and receive a scored, structured review in minutes.\n\n");

    for (icon, text) in features {
        out.push_str(&format!("  {icon}  {text}\n"));
    }

    out.push_str(&format!(
        "\n{} {}",
        palette.accent.apply_to("Get started:"),
        "cvcheck upload <FILE>"
    ));
    out
}

pub fn upload_picker(palette: &Palette) -> String {
    format!(
        "{}\n\
         Enter the path of your CV, or pass it to `cvcheck upload <FILE>`.\n\n\
         {}\n  ✓ Accepted formats: PDF, DOCX\n  ✓ Maximum file size: {} MB\n  ✓ Ensure text is selectable (not scanned image)",
        palette.title.apply_to("Upload your CV"),
        palette.muted.apply_to("File requirements"),
        MAX_FILE_SIZE / (1024 * 1024)
    )
}

pub fn error(message: &str, palette: &Palette) -> String {
    format!("{}", palette.error.apply_to(format!("✗ {message}")))
}

/// File details plus the stage list at step 1
pub fn processing(file: &SelectedFile, palette: &Palette) -> String {
    let stages: Vec<String> = stage_display(1)
        .iter()
        .map(|s| stage(s, palette))
        .collect();

    format!(
        "{}\n  File: {}\n  Size: {}\n\n{}",
        palette.title.apply_to("Analyzing your CV"),
        file.name,
        format_file_size(file.size),
        stages.join("\n")
    )
}

pub fn stage(stage: &Stage, palette: &Palette) -> String {
    let line = format!("{} {}", stage.state.icon(), stage.label);
    let style = match stage.state {
        StageState::Complete => &palette.success,
        StageState::Current => &palette.accent,
        StageState::Pending => &palette.muted,
    };
    format!("  {}", style.apply_to(line))
}

pub fn loading(id: &AnalysisId, palette: &Palette) -> String {
    format!(
        "{}",
        palette
            .muted
            .apply_to(format!("Loading analysis results for {id}..."))
    )
}

pub fn results(result: &AnalysisResult, palette: &Palette) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", palette.title.apply_to("Your CV Analysis")));
    out.push_str("Here is a detailed breakdown of your resume.\n");

    let meta: Vec<&str> = [result.filename.as_deref(), result.analyzed_at.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        out.push_str(&format!("{}\n", palette.muted.apply_to(meta.join(" · "))));
    }

    out.push_str(&format!(
        "\n  {}\n",
        palette
            .score(result.overall_score)
            .apply_to(format!("[ Overall Score: {}/10 ]", result.overall_score))
            .bold()
    ));

    push_section(&mut out, "Strengths", &palette.success, &result.strengths);
    push_section(&mut out, "Weak Points", &palette.warning, &result.weak_points);

    out.push_str(&format!("\n{}\n", palette.accent.apply_to("Missing Keywords")));
    let chips: Vec<String> = result
        .missing_keywords
        .iter()
        .map(|k| format!("{}", palette.accent.apply_to(format!("[{k}]"))))
        .collect();
    out.push_str(&format!("  {}\n", chips.join(" ")));

    push_section(
        &mut out,
        "Suggested Improvements",
        &palette.accent,
        &result.suggestions,
    );

    out.push_str(&format!(
        "\n{}",
        palette
            .muted
            .apply_to("Export with --pdf, --copy or --print. Analyze another with `cvcheck upload`.")
    ));
    out
}

fn push_section(out: &mut String, title: &str, style: &console::Style, items: &[String]) {
    out.push_str(&format!("\n{}\n", style.apply_to(title)));
    for item in items {
        out.push_str(&format!("  • {item}\n"));
    }
}

pub fn preferences(prefs: &Preferences, palette: &Palette) -> String {
    let mut out = format!(
        "{} {}\n{}\n",
        palette.accent.apply_to("Theme:"),
        prefs.theme.as_str(),
        palette.accent.apply_to("Language:")
    );

    for language in Language::ALL {
        let marker = if language == prefs.language { "›" } else { " " };
        let line = format!(
            "{marker} {} {}  {}",
            language.flag(),
            language.code(),
            language.name()
        );
        if language == prefs.language {
            out.push_str(&format!("  {}\n", palette.success.apply_to(line)));
        } else {
            out.push_str(&format!("  {line}\n"));
        }
    }

    out.trim_end().to_string()
}

pub fn toast(message: &str, palette: &Palette) -> String {
    format!("{}", palette.success.apply_to(format!("✔ {message}")))
}

pub fn report_saved(path: &Path, palette: &Palette) -> String {
    toast(&format!("Report saved to {}", path.display()), palette)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use console::strip_ansi_codes;

    use super::*;

    fn palette() -> Palette {
        Palette::for_theme(Theme::Light)
    }

    fn plain(text: String) -> String {
        strip_ansi_codes(&text).into_owned()
    }

    fn sample() -> AnalysisResult {
        AnalysisResult {
            overall_score: 7.5,
            strengths: vec!["Clear structure".into()],
            weak_points: vec!["No metrics".into()],
            missing_keywords: vec!["Docker".into(), "AWS".into()],
            suggestions: vec!["Quantify results".into()],
            analysis_id: Some("abc123".into()),
            filename: Some("cv.pdf".into()),
            analyzed_at: None,
        }
    }

    #[test]
    fn header_shows_language_and_theme() {
        let prefs = Preferences {
            theme: Theme::Dark,
            language: Language::De,
        };
        let text = plain(header(&prefs, &palette()));
        assert!(text.starts_with("Smart CV Checker"));
        assert!(text.contains("DE"));
        assert!(text.contains("dark"));
    }

    #[test]
    fn picker_lists_requirements() {
        let text = plain(upload_picker(&palette()));
        assert!(text.contains("Accepted formats: PDF, DOCX"));
        assert!(text.contains("Maximum file size: 10 MB"));
    }

    #[test]
    fn processing_shows_size_in_mb() {
        let file = SelectedFile {
            path: PathBuf::from("/tmp/cv.pdf"),
            name: "cv.pdf".into(),
            size: 1024 * 1024 * 3 / 2,
        };
        let text = plain(processing(&file, &palette()));
        assert!(text.contains("File: cv.pdf"));
        assert!(text.contains("Size: 1.50 MB"));
        assert!(text.contains("  → File uploaded\n  ⋯ Text extracted"));
        assert!(text.ends_with("  ⋯ Generating report"));
    }

    #[test]
    fn stage_lines_use_icons() {
        let stages = stage_display(2);
        assert_eq!(plain(stage(&stages[0], &palette())), "  ✓ File uploaded");
        assert_eq!(plain(stage(&stages[1], &palette())), "  → Text extracted");
        assert_eq!(plain(stage(&stages[2], &palette())), "  ⋯ Running AI analysis");
    }

    #[test]
    fn results_render_sections_in_order() {
        let text = plain(results(&sample(), &palette()));

        assert!(text.contains("[ Overall Score: 7.5/10 ]"));
        assert!(text.contains("cv.pdf"));
        assert!(text.contains("[Docker] [AWS]"));

        let order = ["Strengths", "Weak Points", "Missing Keywords", "Suggested Improvements"];
        let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn preferences_mark_current_language() {
        let prefs = Preferences {
            theme: Theme::Light,
            language: Language::Fr,
        };
        let text = plain(preferences(&prefs, &palette()));
        assert!(text.contains("Theme: light"));
        assert!(text.lines().any(|l| l.contains("› ") && l.contains("fr")));
        assert_eq!(text.lines().filter(|l| l.contains('›')).count(), 1);
    }

    #[test]
    fn toast_and_error_prefixes() {
        assert_eq!(plain(toast("Feedback copied to clipboard!", &palette())), "✔ Feedback copied to clipboard!");
        assert_eq!(plain(error("Upload failed", &palette())), "✗ Upload failed");
    }
}
