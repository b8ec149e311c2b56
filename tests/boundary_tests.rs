mod common;

use common::fixtures::*;
use common::{TestResult, convert, convert_with_page};
use docsplit::{Event, PageSize, PipelineError, Tag};
use docsplit::pipeline::ContextError;

#[test]
fn test_one_document_per_boundary_element() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let conversion = convert("book", "p", documents("book", "p", &["First", "Second", "Third"]))?;
    assert_eq!(conversion.summary.documents, 3);
    assert_eq!(conversion.factory.created(), 3);

    let pdfs = conversion.pdfs()?;
    assert_eq!(pdfs.len(), 3);
    for (pdf, title) in pdfs.iter().zip(["First", "Second", "Third"]) {
        assert_pdf_page_count!(pdf, 1);
        assert_pdf_contains_text!(pdf, title);
    }
    assert_pdf_not_contains_text!(pdfs[0], "Second");
    Ok(())
}

#[test]
fn test_percentage_margin_resolves_against_page_width() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let page = PageSize::Custom { width: 400.0, height: 600.0 };
    let open = styled("section", "margin-left: 10%; margin-top: 1in");
    let events = document("book", open, &["Margins"]);
    let conversion = convert_with_page("book", "section", page, events)?;

    let pdf = &conversion.pdfs()?[0];
    assert_eq!(pdf.media_size(), Some((400.0, 600.0)));
    let (x, y) = pdf.first_line_origin(1).ok_or("no text on page 1")?;
    assert!((x - 40.0).abs() < 0.01, "left margin was {}", x);
    assert!((y - (600.0 - 72.0 - 12.0)).abs() < 0.01, "first baseline was {}", y);
    Ok(())
}

#[test]
fn test_open_tag_is_case_insensitive_but_document_tag_is_not() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut events = document("book", styled("BODY", "margin-left: 20pt"), &["Upper"]);
    // A differently-cased document element is ordinary content.
    events.insert(1, Event::open(Tag::new("Book")));
    events.insert(2, Event::close("Book"));

    let conversion = convert("book", "body", events)?;
    assert_eq!(conversion.summary.documents, 1);
    let pdf = &conversion.pdfs()?[0];
    let (x, _) = pdf.first_line_origin(1).ok_or("no text on page 1")?;
    assert!((x - 20.0).abs() < 0.01);
    Ok(())
}

#[test]
fn test_document_without_open_element_is_empty() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = vec![
        Event::open(Tag::new("book")),
        Event::content("never written"),
        Event::close("book"),
    ];
    let conversion = convert("book", "p", events)?;
    assert_eq!(conversion.summary.documents, 1);

    let pdf = &conversion.pdfs()?[0];
    assert_pdf_page_count!(pdf, 1);
    assert!(pdf.strings().is_empty());
    Ok(())
}

#[test]
fn test_content_outside_documents_is_dropped() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut events = vec![Event::content("before")];
    events.extend(document("book", Tag::new("p"), &["inside"]));
    events.push(Event::content("after"));

    let conversion = convert("book", "p", events)?;
    let pdf = &conversion.pdfs()?[0];
    assert_eq!(pdf.strings(), ["inside"]);
    Ok(())
}

#[test]
fn test_nested_document_element_fails_without_second_sink() {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = vec![
        Event::open(Tag::new("book")),
        Event::open(Tag::new("book")),
    ];
    let err = convert("book", "p", events).err().expect("nested boundary must fail");
    assert!(matches!(err, PipelineError::DocumentAlreadyActive { .. }));
}

#[test]
fn test_unmatched_close_fails() {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = convert("book", "p", vec![Event::close("book")])
        .err()
        .expect("close without open must fail");
    assert!(matches!(err, PipelineError::Context(ContextError::NotFound { .. })));
}

#[test]
fn test_open_element_outside_document_fails() {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = convert("book", "p", vec![Event::open(Tag::new("p"))])
        .err()
        .expect("open element without document must fail");
    assert!(matches!(err, PipelineError::Context(ContextError::NotFound { .. })));
}

#[test]
fn test_invalid_margin_aborts_conversion() {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = document("book", styled("p", "margin-top: auto"), &["x"]);
    let err = convert("book", "p", events).err().expect("auto margin must fail");
    assert!(matches!(err, PipelineError::Style(_)));
}

#[test]
fn test_document_and_open_tag_may_coincide() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = vec![
        Event::open(styled("page", "margin-left: 5pt")),
        Event::content("Same element"),
        Event::close("page"),
    ];
    let conversion = convert("page", "page", events)?;
    let pdf = &conversion.pdfs()?[0];
    assert_pdf_contains_text!(pdf, "Same element");
    let (x, _) = pdf.first_line_origin(1).ok_or("no text on page 1")?;
    assert!((x - 5.0).abs() < 0.01);
    Ok(())
}

#[test]
fn test_each_open_element_keeps_its_own_margins() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let events = vec![
        Event::open(Tag::new("book")),
        Event::open(styled("p", "margin-left: 100pt")),
        Event::content("first"),
        Event::close("p"),
        Event::open(Tag::new("p")),
        Event::content("second"),
        Event::close("p"),
        Event::close("book"),
    ];
    let conversion = convert("book", "p", events)?;
    let pdf = &conversion.pdfs()?[0];

    // New margins take effect on a fresh page.
    assert_pdf_page_count!(pdf, 2);
    assert_eq!(pdf.page_strings(1), ["first"]);
    assert_eq!(pdf.page_strings(2), ["second"]);
    let (first_x, _) = pdf.first_line_origin(1).ok_or("no text on page 1")?;
    let (second_x, _) = pdf.first_line_origin(2).ok_or("no text on page 2")?;
    assert!((first_x - 100.0).abs() < 0.01, "first paragraph at x = {}", first_x);
    assert!(second_x.abs() < 0.01, "second paragraph at x = {}", second_x);
    Ok(())
}
