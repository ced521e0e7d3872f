use std::path::Path;

use crate::cli::OutputFormat;
use crate::shared::{open_document, print_json};

pub fn run(file: &Path, number: usize, password: &str, format: &OutputFormat) -> Result<(), i32> {
    let doc = open_document(file, password)?;
    let text = doc.extract_page(number).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => print_json(&serde_json::json!({
            "page": number,
            "text": text,
        }))?,
    }

    Ok(())
}
