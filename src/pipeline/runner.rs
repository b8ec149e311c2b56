use super::context::ConversionContext;
use super::queue::WriteQueue;
use super::tag::Event;
use super::writer::{PdfWriterStage, WriterContext};
use super::Pipeline;
use crate::error::PipelineError;
use log::{debug, info, warn};
use std::io::Read;
use std::time::Instant;

/// What one [`PipelineRunner::run`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Events dispatched through the chain.
    pub events: usize,
    /// Documents finalized and written to a sink.
    pub documents: usize,
}

/// Drives a sequence of events through a stage chain.
///
/// Every run gets a fresh [`ConversionContext`], so one runner can convert any
/// number of event streams, one after another.
#[derive(Debug)]
pub struct PipelineRunner {
    pipeline: Box<dyn Pipeline>,
}

impl PipelineRunner {
    pub fn new(pipeline: Box<dyn Pipeline>) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &dyn Pipeline {
        self.pipeline.as_ref()
    }

    /// Runs all events, stopping at the first error.
    pub fn run<I>(&self, events: I) -> Result<ConversionSummary, PipelineError>
    where
        I: IntoIterator<Item = Event>,
    {
        let start = Instant::now();
        let mut context = ConversionContext::new();
        self.init(&mut context)?;

        let mut summary = ConversionSummary::default();
        for event in events {
            self.dispatch(&mut context, &event)?;
            summary.events += 1;
        }

        if let Ok(slot) = context.get::<WriterContext>(PdfWriterStage::ID) {
            summary.documents = slot.finalized();
            if slot.has_document() {
                warn!("Event stream ended inside a document; it was never finalized");
            }
        }
        info!(
            "Processed {} event(s) into {} document(s) in {:.2?}",
            summary.events,
            summary.documents,
            start.elapsed()
        );
        Ok(summary)
    }

    /// Reads a JSON array of events and runs it.
    pub fn run_json<R: Read>(&self, reader: R) -> Result<ConversionSummary, PipelineError> {
        let events: Vec<Event> = serde_json::from_reader(reader)?;
        debug!("Loaded {} event(s)", events.len());
        self.run(events)
    }

    fn init(&self, context: &mut ConversionContext) -> Result<(), PipelineError> {
        let mut stage = Some(self.pipeline.as_ref());
        while let Some(current) = stage {
            current.init(context)?;
            stage = current.next();
        }
        Ok(())
    }

    /// Passes one event down the chain until a stage returns no successor.
    fn dispatch(
        &self,
        context: &mut ConversionContext,
        event: &Event,
    ) -> Result<(), PipelineError> {
        let mut queue = WriteQueue::new();
        let mut stage = Some(self.pipeline.as_ref());
        while let Some(current) = stage {
            stage = match event {
                Event::Open(tag) => current.open(context, tag, &mut queue)?,
                Event::Content(text) => current.content(context, text, &mut queue)?,
                Event::Close(tag) => current.close(context, tag, &mut queue)?,
            };
        }
        if !queue.is_empty() {
            warn!(
                "{} queued write(s) were not applied; is a {} missing from the chain?",
                queue.len(),
                PdfWriterStage::ID
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::tag::Tag;
    use crate::pipeline::text::TextStage;

    #[derive(Debug, Default)]
    struct Counting {
        next: Option<Box<dyn Pipeline>>,
    }

    impl Pipeline for Counting {
        fn id(&self) -> &'static str {
            "Counting"
        }

        fn init(&self, context: &mut ConversionContext) -> Result<(), PipelineError> {
            context.register(self.id(), 0usize);
            Ok(())
        }

        fn open(
            &self,
            context: &mut ConversionContext,
            _tag: &Tag,
            _queue: &mut WriteQueue,
        ) -> Result<Option<&dyn Pipeline>, PipelineError> {
            *context.get_mut::<usize>(self.id())? += 1;
            Ok(self.next())
        }

        fn next(&self) -> Option<&dyn Pipeline> {
            self.next.as_deref()
        }
    }

    #[test]
    fn test_run_counts_events_and_resets_context() {
        let runner = PipelineRunner::new(Box::new(Counting::default()));
        let events = vec![
            Event::open(Tag::new("a")),
            Event::content("x"),
            Event::close("a"),
        ];
        let summary = runner.run(events.clone()).unwrap();
        assert_eq!(summary, ConversionSummary { events: 3, documents: 0 });
        assert_eq!(runner.run(events).unwrap().events, 3);
    }

    #[test]
    fn test_every_stage_is_initialized() {
        let chain = Counting {
            next: Some(Box::new(TextStage::new().with_next(Box::new(PdfWriterStage::default())))),
        };
        let runner = PipelineRunner::new(Box::new(chain));
        let mut context = ConversionContext::new();
        runner.init(&mut context).unwrap();
        assert!(context.contains("Counting"));
        assert!(context.contains(PdfWriterStage::ID));
    }

    #[test]
    fn test_run_json_rejects_malformed_input() {
        let runner = PipelineRunner::new(Box::new(Counting::default()));
        let err = runner.run_json("[{\"bogus\": 1}]".as_bytes()).unwrap_err();
        assert!(matches!(err, PipelineError::Json(_)));
    }
}
