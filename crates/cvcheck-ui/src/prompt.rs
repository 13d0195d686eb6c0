use std::path::PathBuf;

use console::Term;

/// Read one line from the user. The terminal blocks, so this runs on the
/// blocking pool. End of input reads as an empty line.
pub async fn read_line(prompt: String) -> anyhow::Result<String> {
    let line = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
        let term = Term::stderr();
        term.write_str(&prompt)?;
        term.flush()?;
        match term.read_line() {
            Ok(line) => Ok(line),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(String::new()),
            Err(e) => Err(e),
        }
    })
    .await??;

    Ok(line)
}

/// Ask for a file path. Blank input means the user gave up.
pub async fn file_path(prompt: &str) -> anyhow::Result<Option<PathBuf>> {
    let line = read_line(format!("{prompt} ")).await?;
    Ok(parse_path(&line))
}

pub async fn confirm(question: &str) -> anyhow::Result<bool> {
    let line = read_line(format!("{question} [Y/n] ")).await?;
    Ok(parse_confirm(&line))
}

/// Offer single-letter choices; returns the chosen key, or None on blank or
/// unknown input
pub async fn choose(question: &str, options: &[(char, &str)]) -> anyhow::Result<Option<char>> {
    let listed: Vec<String> = options
        .iter()
        .map(|(key, label)| format!("[{key}] {label}"))
        .collect();
    let line = read_line(format!("{question} {} ", listed.join("  "))).await?;

    Ok(parse_choice(&line, options))
}

/// Terminals quote dropped files; strip that so drag-and-drop works
fn parse_path(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim().trim_matches(|c| c == '"' || c == '\'');
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

fn parse_confirm(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "" | "y" | "yes")
}

fn parse_choice(line: &str, options: &[(char, &str)]) -> Option<char> {
    let key = line.trim().chars().next()?.to_ascii_lowercase();
    options.iter().any(|(k, _)| *k == key).then_some(key)
}
