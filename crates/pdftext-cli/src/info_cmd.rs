use std::path::Path;

use pdftext::DocumentInfo;

use crate::cli::OutputFormat;
use crate::shared::{open_document, print_json};

/// Field labels in display order.
fn info_fields(info: &DocumentInfo) -> [(&'static str, Option<&str>); 8] {
    [
        ("Title", info.title.as_deref()),
        ("Author", info.author.as_deref()),
        ("Subject", info.subject.as_deref()),
        ("Keywords", info.keywords.as_deref()),
        ("Creator", info.creator.as_deref()),
        ("Producer", info.producer.as_deref()),
        ("CreationDate", info.creation_date.as_deref()),
        ("ModDate", info.modification_date.as_deref()),
    ]
}

pub fn run(file: &Path, password: &str, format: &OutputFormat) -> Result<(), i32> {
    let doc = open_document(file, password)?;
    let metadata = doc.metadata();

    match format {
        OutputFormat::Text => {
            println!("Pages: {}", metadata.page_count);
            let present: Vec<_> = info_fields(&metadata.info)
                .into_iter()
                .filter_map(|(label, value)| value.map(|v| (label, v)))
                .collect();
            if !present.is_empty() {
                println!("Info:");
                for (label, value) in present {
                    println!("  {label}: {value}");
                }
            }
        }
        OutputFormat::Json => print_json(&metadata)?,
    }

    Ok(())
}
