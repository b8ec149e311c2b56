use docsplit::{ConversionConfig, FilesystemSinkFactory, PipelineBuilder, PipelineError};
use std::env;
use std::fs::File;
use std::io::BufReader;

/// Converts a JSON array of markup events into one PDF per document element.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Splits a stream of markup events into numbered PDF documents.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/events.json> <output-dir> [path/to/config.json]",
            args.first().map(String::as_str).unwrap_or("docsplit")
        );
        std::process::exit(1);
    }

    let events_path = &args[1];
    let output_dir = &args[2];
    let config = match args.get(3) {
        Some(path) => {
            println!("Loading configuration from {}", path);
            ConversionConfig::from_file(path)?
        }
        None => ConversionConfig::default(),
    };

    let runner = PipelineBuilder::new()
        .with_config(config)
        .with_sink_factory(FilesystemSinkFactory::new(output_dir))
        .build()?;

    println!("Converting events from {}...", events_path);
    let summary = runner.run_json(BufReader::new(File::open(events_path)?))?;

    println!(
        "Wrote {} document(s) to {} from {} event(s)",
        summary.documents, output_dir, summary.events
    );
    Ok(())
}
