use crate::document::PdfDocument;
use crate::error::RenderError;
use crate::layout::{self, FONT_SIZE};
use docsplit_traits::Sink;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::fmt;
use std::io::Write;

/// Serializes a [`PdfDocument`] into the sink it was bound to.
///
/// The writer owns its sink; the sink is flushed and released when the
/// document is finalized.
pub struct PdfWriter {
    sink: Option<Box<dyn Sink>>,
    version: &'static str,
}

impl fmt::Debug for PdfWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfWriter")
            .field("version", &self.version)
            .field("finished", &self.sink.is_none())
            .finish()
    }
}

impl PdfWriter {
    pub fn new(sink: Box<dyn Sink>) -> Self {
        Self {
            sink: Some(sink),
            version: "1.7",
        }
    }

    /// Whether the sink has already been written and released.
    pub fn is_finished(&self) -> bool {
        self.sink.is_none()
    }

    /// Closes `document`, lays out its content and writes the PDF.
    /// Returns the number of pages written.
    pub fn finish(&mut self, document: &mut PdfDocument) -> Result<usize, RenderError> {
        let mut sink = self.sink.take().ok_or(RenderError::AlreadyClosed)?;
        document.close()?;

        let pages = layout::paginate(
            document.blocks(),
            document.page_width(),
            document.page_height(),
        );
        let mut pdf = self.build(document, &pages)?;
        pdf.save_to(&mut sink)?;
        sink.flush()?;

        debug!(
            "Wrote {} page(s) for {} paragraph(s)",
            pages.len(),
            document.blocks().len()
        );
        Ok(pages.len())
    }

    fn build(
        &self,
        document: &PdfDocument,
        pages: &[Vec<layout::PlacedLine>],
    ) -> Result<Document, RenderError> {
        let mut pdf = Document::with_version(self.version);
        let pages_id = pdf.new_object_id();

        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let (page_width, page_height) = (document.page_width(), document.page_height());
        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
        for lines in pages {
            let mut content = Content { operations: Vec::new() };
            for line in lines {
                content.operations.push(Operation::new("BT", vec![]));
                content
                    .operations
                    .push(Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]));
                content
                    .operations
                    .push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
                content.operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
                ));
                content.operations.push(Operation::new("ET", vec![]));
            }
            let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.encode()?));

            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.0f32.into(),
                    0.0f32.into(),
                    page_width.into(),
                    page_height.into(),
                ],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );

        let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        pdf.trailer.set("Root", catalog_id);
        Ok(pdf)
    }
}

/// Latin-1 code points map onto the font's single-byte encoding; anything
/// outside it is shown as `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
