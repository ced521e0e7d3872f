use std::path::Path;

use tracing::debug;

use crate::cli::OutputFormat;
use crate::page_list::parse_page_list;
use crate::shared::{open_document, print_json};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    password: &str,
    format: &OutputFormat,
) -> Result<(), i32> {
    // Reject a bad list before touching the file.
    let requested = pages.map(parse_page_list).transpose().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    let doc = open_document(file, password)?;
    let numbers = requested.unwrap_or_else(|| (1..=doc.page_count()).collect());
    debug!(pages = numbers.len(), "extracting page list");
    let texts = doc.extract_pages(&numbers);

    for (number, text) in numbers.iter().zip(&texts) {
        match format {
            OutputFormat::Text => {
                println!("--- Page {number} ---");
                println!("{text}");
            }
            OutputFormat::Json => print_json(&serde_json::json!({
                "page": number,
                "text": text,
            }))?,
        }
    }

    Ok(())
}
