use chrono::{Local, NaiveDate};
use cvcheck_types::AnalysisResult;

const RULE_WIDTH: usize = 40;
const BULLET: &str = "•";

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn format_score(score: f64) -> String {
    format!("{score}/10")
}

/// Plain-text report for clipboard export. Deterministic for a given
/// result and date.
pub fn format_feedback(result: &AnalysisResult, generated: NaiveDate) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut text = String::new();

    text.push_str("SMART CV CHECKER - ANALYSIS REPORT\n");
    text.push_str(&format!("Generated: {}\n", format_date(generated)));
    text.push_str(&format!(
        "Overall Score: {}\n\n",
        format_score(result.overall_score)
    ));

    push_heading(&mut text, &rule, "STRENGTHS");
    push_bullets(&mut text, &result.strengths);
    text.push('\n');

    push_heading(&mut text, &rule, "WEAK POINTS");
    push_bullets(&mut text, &result.weak_points);
    text.push('\n');

    push_heading(&mut text, &rule, "MISSING KEYWORDS");
    text.push_str(&result.missing_keywords.join(", "));
    text.push_str("\n\n");

    push_heading(&mut text, &rule, "SUGGESTED IMPROVEMENTS");
    push_bullets(&mut text, &result.suggestions);

    text
}

/// `format_feedback` stamped with the local date
pub fn format_feedback_today(result: &AnalysisResult) -> String {
    format_feedback(result, Local::now().date_naive())
}

fn push_heading(text: &mut String, rule: &str, title: &str) {
    text.push_str(rule);
    text.push('\n');
    text.push_str(title);
    text.push('\n');
    text.push_str(rule);
    text.push('\n');
}

fn push_bullets(text: &mut String, items: &[String]) {
    for item in items {
        text.push_str(BULLET);
        text.push(' ');
        text.push_str(item);
        text.push('\n');
    }
}
