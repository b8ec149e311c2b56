use docsplit::{Event, StyleDeclarations, Tag};

/// An element with the given inline style, e.g. `"margin-left: 10%"`.
pub fn styled(name: &str, style: &str) -> Tag {
    Tag::new(name).with_css(StyleDeclarations::parse_inline(style))
}

/// `<document><open style>text</open></document>` as events.
pub fn document(document_tag: &str, open: Tag, paragraphs: &[&str]) -> Vec<Event> {
    let open_name = open.name().to_string();
    let mut events = vec![Event::open(Tag::new(document_tag)), Event::open(open)];
    for text in paragraphs {
        events.push(Event::open(Tag::new("p")));
        events.push(Event::content(*text));
        events.push(Event::close("p"));
    }
    events.push(Event::close(open_name));
    events.push(Event::close(document_tag));
    events
}

/// Several documents back to back, each with one titled paragraph.
pub fn documents(document_tag: &str, open_tag: &str, titles: &[&str]) -> Vec<Event> {
    titles
        .iter()
        .flat_map(|title| document(document_tag, Tag::new(open_tag), &[title]))
        .collect()
}

/// A paragraph long enough to wrap over many lines.
pub fn long_paragraph(words: usize) -> String {
    (1..=words)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}
