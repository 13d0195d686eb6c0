use chrono::NaiveDate;
use cvcheck_types::AnalysisResult;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::ReportError;
use crate::layout::{DrawOp, Font, PAGE_HEIGHT, PAGE_WIDTH, Page, layout_report};
use crate::metrics::encode_win_ansi;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

pub fn report_filename(date: NaiveDate) -> String {
    format!("CV_Analysis_Report_{}.pdf", date.format("%Y-%m-%d"))
}

/// Render the report as PDF bytes
pub fn generate_pdf(result: &AnalysisResult, generated: NaiveDate) -> Result<Vec<u8>, ReportError> {
    let layout = layout_report(result, generated);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let page_id = add_page(&mut doc, pages_id, page)?;
        kids.push(Object::from(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                (PAGE_WIDTH * POINTS_PER_MM).into(),
                (PAGE_HEIGHT * POINTS_PER_MM).into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Smart CV Checker - Analysis Report"),
        "Producer" => Object::string_literal("cvcheck"),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    tracing::debug!(
        "Generated PDF report: {} page(s), {} bytes",
        page_count,
        bytes.len()
    );

    Ok(bytes)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn add_page(doc: &mut Document, pages_id: ObjectId, page: &Page) -> Result<ObjectId, ReportError> {
    let content = Content {
        operations: page_operations(page),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    }))
}

/// Millimetres from the top-left to PDF points from the bottom-left
fn to_pdf(x: f32, y: f32) -> (f32, f32) {
    (x * POINTS_PER_MM, (PAGE_HEIGHT - y) * POINTS_PER_MM)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                text,
            } => {
                let (px, py) = to_pdf(*x, *y);
                let font_name = match font {
                    Font::Regular => REGULAR_FONT,
                    Font::Bold => BOLD_FONT,
                };
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font_name.into(), (*size).into()]));
                ops.push(Operation::new("Td", vec![px.into(), py.into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                let (sx, sy) = to_pdf(*x1, *y1);
                let (ex, ey) = to_pdf(*x2, *y2);
                ops.push(Operation::new("w", vec![(width * POINTS_PER_MM).into()]));
                ops.push(Operation::new("m", vec![sx.into(), sy.into()]));
                ops.push(Operation::new("l", vec![ex.into(), ey.into()]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(items: usize) -> AnalysisResult {
        AnalysisResult {
            overall_score: 9.0,
            strengths: vec!["Excellent project section with measurable outcomes".into(); items],
            weak_points: vec!["Summary is generic".into(); items],
            missing_keywords: vec!["Terraform".into(), "GraphQL".into()],
            suggestions: vec!["Lead with impact, not duties".into(); items],
            analysis_id: Some("abc123".into()),
            filename: Some("cv.pdf".into()),
            analyzed_at: None,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn filename_uses_iso_date() {
        assert_eq!(report_filename(date()), "CV_Analysis_Report_2026-10-19.pdf");
    }

    #[test]
    fn produces_loadable_pdf() {
        let bytes = generate_pdf(&sample(3), date()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn page_count_follows_layout() {
        let result = sample(40);
        let expected = layout_report(&result, date()).pages.len();
        assert!(expected > 1);

        let bytes = generate_pdf(&result, date()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), expected);
    }

    #[test]
    fn coordinates_flip_to_bottom_left() {
        let (x, y) = to_pdf(0.0, PAGE_HEIGHT);
        assert_eq!((x, y), (0.0, 0.0));

        let (_, top) = to_pdf(0.0, 0.0);
        assert!((top - 841.89).abs() < 0.01);
    }
}
