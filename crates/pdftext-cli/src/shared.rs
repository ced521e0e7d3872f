use std::path::Path;

use pdftext::Document;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` is honoured; otherwise only warnings are shown, or debug
/// output for the pdftext crates with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,pdftext=debug,pdftext_parse=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open a PDF file, printing the error to stderr on failure.
pub fn open_document(file: &Path, password: &str) -> Result<Document, i32> {
    Document::open_file(file, password).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })
}

/// Serialize a value as one line of JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), i32> {
    let line = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{line}");
    Ok(())
}
