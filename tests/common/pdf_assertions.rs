use lopdf::Document as LopdfDocument;
use lopdf::Object;
use lopdf::content::Content;

fn page_content(doc: &LopdfDocument, page: u32) -> Option<Content> {
    let page_id = *doc.get_pages().get(&page)?;
    let bytes = doc.get_page_content(page_id).ok()?;
    Content::decode(&bytes).ok()
}

fn as_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Operands of every `Tj` on a page, decoded as Latin text
pub fn shown_strings(doc: &LopdfDocument, page: u32) -> Vec<String> {
    let Some(content) = page_content(doc, page) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_str().ok())
        .map(|bytes| bytes.iter().map(|&b| char::from(b)).collect())
        .collect()
}

/// Operands of every `Td` on a page
pub fn line_origins(doc: &LopdfDocument, page: u32) -> Vec<(f32, f32)> {
    let Some(content) = page_content(doc, page) else {
        return Vec::new();
    };
    content
        .operations
        .iter()
        .filter(|op| op.operator == "Td" && op.operands.len() == 2)
        .filter_map(|op| Some((as_f32(&op.operands[0])?, as_f32(&op.operands[1])?)))
        .collect()
}

/// Width and height of a page's media box
pub fn media_size(doc: &LopdfDocument, page: u32) -> Option<(f32, f32)> {
    let page_id = *doc.get_pages().get(&page)?;
    let dict = doc.get_dictionary(page_id).ok()?;
    let media_box = dict.get(b"MediaBox").ok()?.as_array().ok()?;
    Some((as_f32(media_box.get(2)?)?, as_f32(media_box.get(3)?)?))
}

/// Assert that a PDF shows a line containing specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let shown = $pdf.strings();
        assert!(
            shown.iter().any(|line| line.contains($text)),
            "PDF should contain '{}', but shown lines were:\n{:#?}",
            $text,
            shown
        );
    };
}

/// Assert that PDF does NOT show specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let shown = $pdf.strings();
        assert!(
            !shown.iter().any(|line| line.contains($text)),
            "PDF should NOT contain '{}', but it was found in:\n{:#?}",
            $text,
            shown
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

/// Assert minimum number of pages
#[macro_export]
macro_rules! assert_pdf_min_pages {
    ($pdf:expr, $min:expr) => {
        assert!(
            $pdf.page_count() >= $min,
            "Expected at least {} pages, got {}",
            $min,
            $pdf.page_count()
        );
    };
}
