use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cvcheck_types::{Language, Theme, UiEvent};

#[derive(Parser, Debug)]
#[command(name = "cvcheck", version, about = "Smart CV Checker terminal client")]
pub struct Cli {
    #[arg(long, global = true, help = "Base URL of the analysis service")]
    pub api_url: Option<String>,
    #[arg(long, global = true, help = "Never prompt; errors end the run with status 1")]
    pub no_input: bool,
    #[arg(long, global = true, help = "Write logs to stderr as JSON")]
    pub log_json: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the landing page
    Home,
    /// Upload a CV, wait for the analysis and show the results
    Upload {
        file: PathBuf,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Show the results of a finished analysis
    Results {
        id: String,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Navigate to a route such as `/upload` or `/results?id=abc`
    Open { path: String },
    /// Set the theme, or toggle it when omitted
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
    },
    /// Set the language, or list languages when omitted
    Language { code: Option<String> },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ExportArgs {
    #[arg(long, help = "Copy the feedback to the clipboard")]
    pub copy: bool,
    #[arg(long, help = "Save the PDF report")]
    pub pdf: bool,
    #[arg(long, help = "Print the plain-text feedback to stdout")]
    pub print: bool,
    #[arg(long, value_name = "DIR", help = "Directory for the PDF report")]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl ExportArgs {
    fn intents(&self) -> Vec<UiEvent> {
        let mut intents = Vec::new();
        if self.print {
            intents.push(UiEvent::PrintFeedback);
        }
        if self.copy {
            intents.push(UiEvent::CopyFeedback);
        }
        // --out alone implies --pdf
        if self.pdf || self.out.is_some() {
            intents.push(UiEvent::DownloadReport {
                dir: self.out.clone(),
            });
        }
        intents
    }
}

impl Cli {
    /// The intents this invocation queues for the UI
    pub fn script(&self) -> Vec<UiEvent> {
        match &self.command {
            None | Some(Commands::Home) => vec![UiEvent::Navigate("/".into())],
            Some(Commands::Upload { file, export }) => {
                let mut script = vec![
                    UiEvent::Navigate("/upload".into()),
                    UiEvent::SelectFile(file.clone()),
                ];
                script.extend(export.intents());
                script
            }
            Some(Commands::Results { id, export }) => {
                let mut script = vec![UiEvent::Navigate(format!(
                    "/results?id={}",
                    urlencoding::encode(id)
                ))];
                script.extend(export.intents());
                script
            }
            Some(Commands::Open { path }) => vec![UiEvent::Navigate(path.clone())],
            Some(Commands::Theme { theme: Some(theme) }) => vec![UiEvent::SetTheme((*theme).into())],
            Some(Commands::Theme { theme: None }) => vec![UiEvent::ToggleTheme],
            Some(Commands::Language { code: Some(code) }) => {
                let language = Language::from_code(code).unwrap_or_else(|| {
                    tracing::warn!("Unknown language {code}, using English");
                    Language::default()
                });
                vec![UiEvent::SetLanguage(language)]
            }
            Some(Commands::Language { code: None }) => vec![UiEvent::ShowPreferences],
        }
    }
}
