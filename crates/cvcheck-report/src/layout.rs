//! Page layout of the PDF report, independent of the PDF writer.
//!
//! Coordinates are millimetres on an A4 page measured from the top-left
//! corner; a text `y` is its baseline.

use chrono::NaiveDate;
use cvcheck_types::AnalysisResult;

use crate::metrics::text_width_mm;
use crate::text::{format_date, format_score};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

const CENTER_X: f32 = PAGE_WIDTH / 2.0;
const LEFT: f32 = 20.0;
const RULE_END: f32 = 190.0;
const TEXT_WIDTH: f32 = 170.0;
const LINE_HEIGHT: f32 = 7.0;
const PAGE_TOP: f32 = 20.0;
const FIRST_SECTION: f32 = 60.0;
const SECTION_GAP: f32 = 5.0;
const RULE_WIDTH: f32 = 0.5;

/// A section heading starting below this line moves to a new page
pub const SECTION_BREAK_Y: f32 = 250.0;
/// A list item starting below this line moves to a new page
pub const ITEM_BREAK_Y: f32 = 270.0;

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        text: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Line { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<Page>,
}

/// Greedy word wrap to `max_width` millimetres. Words wider than a whole
/// line are split between characters.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width_mm(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width_mm(word, font, size) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                current.push(c);
                if text_width_mm(&current, font, size) > max_width {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: 0.0,
        }
    }

    fn page(&mut self) -> &mut Page {
        // Never empty: created with one page and only ever grows
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn break_if_below(&mut self, threshold: f32) {
        if self.y > threshold {
            self.pages.push(Page::default());
            self.y = PAGE_TOP;
        }
    }

    fn text(&mut self, x: f32, size: f32, font: Font, text: impl Into<String>) {
        let y = self.y;
        self.page().ops.push(DrawOp::Text {
            x,
            y,
            size,
            font,
            text: text.into(),
        });
    }

    fn centered(&mut self, y: f32, size: f32, font: Font, text: String) {
        let x = CENTER_X - text_width_mm(&text, font, size) / 2.0;
        self.y = y;
        self.text(x, size, font, text);
    }

    fn lines(&mut self, lines: &[String]) {
        for line in lines {
            self.text(LEFT, BODY_SIZE, Font::Regular, line.clone());
            self.y += LINE_HEIGHT;
        }
    }

    fn heading(&mut self, title: &str) {
        self.break_if_below(SECTION_BREAK_Y);
        self.text(LEFT, HEADING_SIZE, Font::Bold, title);
        self.y += LINE_HEIGHT;

        let y = self.y;
        self.page().ops.push(DrawOp::Line {
            x1: LEFT,
            y1: y,
            x2: RULE_END,
            y2: y,
            width: RULE_WIDTH,
        });
        self.y += SECTION_GAP;
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            let lines = wrap_text(&format!("• {item}"), Font::Regular, BODY_SIZE, TEXT_WIDTH);
            self.break_if_below(ITEM_BREAK_Y);
            self.lines(&lines);
        }
    }
}

/// Lay the report out over as many pages as it needs
pub fn layout_report(result: &AnalysisResult, generated: NaiveDate) -> ReportLayout {
    let mut cursor = Cursor::new();

    cursor.centered(
        20.0,
        TITLE_SIZE,
        Font::Bold,
        "Smart CV Checker - Analysis Report".to_string(),
    );
    cursor.centered(
        30.0,
        BODY_SIZE,
        Font::Regular,
        format!("Generated: {}", format_date(generated)),
    );
    cursor.centered(
        40.0,
        HEADING_SIZE,
        Font::Bold,
        format!("Overall Score: {}", format_score(result.overall_score)),
    );

    cursor.y = FIRST_SECTION;

    cursor.heading("STRENGTHS");
    cursor.bullets(&result.strengths);
    cursor.y += SECTION_GAP;

    cursor.heading("WEAK POINTS");
    cursor.bullets(&result.weak_points);
    cursor.y += SECTION_GAP;

    cursor.heading("MISSING KEYWORDS");
    let keywords = wrap_text(
        &result.missing_keywords.join(", "),
        Font::Regular,
        BODY_SIZE,
        TEXT_WIDTH,
    );
    cursor.lines(&keywords);
    cursor.y += SECTION_GAP;

    cursor.heading("SUGGESTED IMPROVEMENTS");
    cursor.bullets(&result.suggestions);

    tracing::debug!("Report laid out on {} page(s)", cursor.pages.len());

    ReportLayout {
        pages: cursor.pages,
    }
}
