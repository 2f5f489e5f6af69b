use crate::types::Result;
use cert_layout::constants::{HELVETICA_CHAR_WIDTH_RATIO, POINTS_PER_MM};
use cert_layout::{
    DataRecord, FieldValueResolver, Page, PrintField, PrintJob, TextAlign, TextDirection,
};
use printpdf::*;
use std::borrow::Cow;
use std::path::Path;

/// Share of the font size between the top of a line and its baseline
const ASCENT_RATIO: f32 = 0.8;

/// Where a single line of text lands on the PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    /// Start of the text run from the left page edge
    pub x_mm: f32,
    /// Baseline from the bottom page edge
    pub y_mm: f32,
    pub font_size_pt: f32,
}

/// Text the builtin Helvetica font can draw.
///
/// Builtin fonts only encode printable ASCII reliably. Arabic-Indic digits
/// become ASCII digits, accented Latin letters lose their accent and any
/// other character is replaced with `?`.
pub fn builtin_font_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(|ch| ch == ' ' || ch.is_ascii_graphic()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(builtin_font_char).collect())
}

fn builtin_font_char(ch: char) -> char {
    match ch {
        c if c == ' ' || c.is_ascii_graphic() => c,
        '\u{0660}'..='\u{0669}' => ascii_digit(ch as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => ascii_digit(ch as u32 - 0x06F0),
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        c if c.is_whitespace() => ' ',
        _ => '?',
    }
}

fn ascii_digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('?')
}

/// Approximate width of a Helvetica run in millimeters
pub fn estimate_text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * HELVETICA_CHAR_WIDTH_RATIO / POINTS_PER_MM
}

/// Place resolved text for one field.
///
/// Field origins are measured from the top-left page corner while PDF
/// coordinates start bottom-left, so y is flipped. Fields with a width align
/// their text inside it; right-to-left text starts at the right edge.
pub fn place_text(
    page: &Page,
    field: &PrintField,
    text: &str,
    direction: TextDirection,
) -> TextPlacement {
    let template = &field.field;
    let text = builtin_font_text(text);
    let width = estimate_text_width_mm(&text, template.font_size);
    let box_width = template.width.unwrap_or(width);

    let align = match (template.align, direction) {
        (TextAlign::Left, TextDirection::Rtl) => TextAlign::Right,
        (align, _) => align,
    };
    let x_mm = match align {
        TextAlign::Left => template.position_x,
        TextAlign::Center => template.position_x + (box_width - width) / 2.0,
        TextAlign::Right => template.position_x + box_width - width,
    };
    let y_mm =
        page.height_mm - template.position_y - template.font_size * ASCENT_RATIO / POINTS_PER_MM;

    TextPlacement {
        text: text.into_owned(),
        x_mm,
        y_mm,
        font_size_pt: template.font_size,
    }
}

/// Placements for every field of one certificate
pub fn layout_certificate<R>(
    job: &PrintJob,
    record: &DataRecord,
    resolver: &R,
) -> Vec<TextPlacement>
where
    R: FieldValueResolver,
{
    job.fields
        .iter()
        .filter_map(|field| {
            let value = resolver.resolve(&field.field, record);
            if value.text.is_empty() {
                return None;
            }
            let direction = value.effective_direction(&field.field);
            Some(place_text(&job.page, field, &value.text, direction))
        })
        .collect()
}

/// A single page naming each field at its position, for checking a layout
/// without data.
pub fn layout_proof(job: &PrintJob) -> Vec<TextPlacement> {
    job.fields
        .iter()
        .map(|field| {
            let label = format!("[{}]", field.field.display_name());
            place_text(&job.page, field, &label, field.field.direction)
        })
        .collect()
}

/// Render one page per record, or a proof page when there are no records.
pub async fn render_certificates<R>(
    job: &PrintJob,
    records: &[DataRecord],
    resolver: &R,
) -> Result<Vec<u8>>
where
    R: FieldValueResolver,
{
    let pages: Vec<Vec<TextPlacement>> = if records.is_empty() {
        vec![layout_proof(job)]
    } else {
        records
            .iter()
            .map(|record| layout_certificate(job, record, resolver))
            .collect()
    };
    let title = job.template_name.clone();
    let page = job.page;

    // PDF generation is CPU-bound, spawn blocking
    let bytes =
        tokio::task::spawn_blocking(move || generate_pdf_bytes(&title, page, &pages)).await??;
    Ok(bytes)
}

/// Render and write the PDF to `output_path`.
pub async fn write_certificates<R>(
    job: &PrintJob,
    records: &[DataRecord],
    resolver: &R,
    output_path: impl AsRef<Path>,
) -> Result<()>
where
    R: FieldValueResolver,
{
    let bytes = render_certificates(job, records, resolver).await?;
    tokio::fs::write(output_path.as_ref(), bytes).await?;
    Ok(())
}

/// Content stream operations for one page of placements
pub fn page_ops(placements: &[TextPlacement]) -> Vec<Op> {
    let mut ops = Vec::new();
    for placement in placements {
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: Point {
                x: Mm(placement.x_mm).into_pt(),
                y: Mm(placement.y_mm).into_pt(),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            font: BuiltinFont::Helvetica,
            size: Pt(placement.font_size_pt),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(builtin_font_text(&placement.text).into_owned())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);
    }
    ops
}

fn generate_pdf_bytes(title: &str, page: Page, pages: &[Vec<TextPlacement>]) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(title);

    doc.pages = pages
        .iter()
        .map(|placements| {
            PdfPage::new(Mm(page.width_mm), Mm(page.height_mm), page_ops(placements))
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cert_layout::{EditorContext, EditorOptions, Template, TemplateField, TemplateId};

    fn print_job_for(fields: Vec<TemplateField>) -> PrintJob {
        let template = Template {
            id: TemplateId(1),
            name: "Graduation".to_string(),
            fields,
            ..Default::default()
        };
        EditorContext::new(template, EditorOptions::default())
            .unwrap()
            .print_job()
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let mut field = TemplateField::new(1, "student_name", 20.0, 30.0);
        field.font_size = 0.0;
        let job = print_job_for(vec![field]);

        let placement = place_text(&job.page, &job.fields[0], "Layla", TextDirection::Ltr);
        assert_eq!(placement.x_mm, 20.0);
        assert_eq!(placement.y_mm, 297.0 - 30.0);
    }

    #[test]
    fn test_alignment_within_width() {
        let mut centered = TemplateField::new(1, "thesis_title", 20.0, 80.0).with_width(100.0);
        centered.align = TextAlign::Center;
        let mut right = TemplateField::new(2, "remarks", 20.0, 120.0).with_width(100.0);
        right.align = TextAlign::Right;
        let job = print_job_for(vec![centered, right]);

        let text_width = estimate_text_width_mm("Thesis", 14.0);
        let center = place_text(&job.page, &job.fields[0], "Thesis", TextDirection::Ltr);
        assert!((center.x_mm - (20.0 + (100.0 - text_width) / 2.0)).abs() < 1e-4);

        let end = place_text(&job.page, &job.fields[1], "Thesis", TextDirection::Ltr);
        assert!((end.x_mm - (120.0 - text_width)).abs() < 1e-4);
    }

    #[test]
    fn test_rtl_text_starts_at_right_edge() {
        let field = TemplateField::new(1, "issue_date", 20.0, 80.0).with_width(60.0);
        let job = print_job_for(vec![field]);

        let placement = place_text(&job.page, &job.fields[0], "abc", TextDirection::Rtl);
        let width = estimate_text_width_mm("abc", 14.0);
        assert!((placement.x_mm - (80.0 - width)).abs() < 1e-4);
    }

    #[test]
    fn test_builtin_font_text_is_ascii() {
        assert!(matches!(builtin_font_text("05/03/2024"), Cow::Borrowed(_)));
        let eastern = "\u{660}\u{665}/\u{660}\u{663}/\u{662}\u{660}\u{662}\u{664}";
        assert_eq!(builtin_font_text(eastern), "05/03/2024");
        assert_eq!(builtin_font_text("\u{6F1}\u{6F9}"), "19");
        assert_eq!(builtin_font_text("José Müller"), "Jose Muller");
        assert_eq!(builtin_font_text("ليلى"), "????");
    }

    #[test]
    fn test_eastern_arabic_date_is_drawn_with_ascii_digits() {
        use cert_layout::{ClassifiedResolver, DateStyle, FieldClass};

        let field = TemplateField::new(1, "issue_date", 20.0, 60.0).with_width(60.0);
        let job = print_job_for(vec![field]);
        let resolver = ClassifiedResolver::new()
            .classify("issue_date", FieldClass::Date(DateStyle::EasternArabic));
        let record = DataRecord::new().with("issue_date", "2024-03-05");

        let placements = layout_certificate(&job, &record, &resolver);
        assert_eq!(placements[0].text, "05/03/2024");
        // Right-to-left values still start at the right edge of the field
        let width = estimate_text_width_mm("05/03/2024", 14.0);
        assert!((placements[0].x_mm - (80.0 - width)).abs() < 1e-4);

        let written: Vec<String> = page_ops(&placements)
            .into_iter()
            .filter_map(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => Some(items),
                _ => None,
            })
            .flatten()
            .filter_map(|item| match item {
                TextItem::Text(text) => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(written, vec!["05/03/2024".to_string()]);
        assert!(written.iter().all(|text| text.is_ascii()));
    }

    #[test]
    fn test_proof_uses_display_names() {
        let job = print_job_for(vec![
            TemplateField::new(1, "student_name", 20.0, 30.0).with_label("Student"),
            TemplateField::new(2, "issue_date", 20.0, 60.0).hidden(),
        ]);

        let proof = layout_proof(&job);
        assert_eq!(proof.len(), 1);
        assert_eq!(proof[0].text, "[Student]");
    }

    #[tokio::test]
    async fn test_render_produces_pdf() {
        let job = print_job_for(vec![TemplateField::new(1, "student_name", 20.0, 30.0)]);
        let records = vec![
            DataRecord::new().with("student_name", "Layla Haddad"),
            DataRecord::new().with("student_name", "Omar Nasser"),
        ];

        let bytes = render_certificates(&job, &records, &cert_layout::ClassifiedResolver::new())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
