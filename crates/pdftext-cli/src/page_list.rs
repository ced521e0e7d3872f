/// Most page numbers a single list may expand to.
const MAX_LIST_LEN: usize = 100_000;

/// Parse a page list like "1,5,2" or "2-4,1" into 1-based page numbers.
///
/// Unlike a page range filter, the list is a request: order and repeats are
/// kept as written, and numbers past the end of the document are allowed
/// (they extract as empty text). Returns an error for page 0, malformed
/// entries, a descending range, or a list that expands past
/// [`MAX_LIST_LEN`] pages.
pub fn parse_page_list(input: &str) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start = parse_page(start_str)?;
            let end = parse_page(end_str)?;
            if start > end {
                return Err(format!("invalid page range: '{part}' (start is after end)"));
            }
            // end - start cannot overflow once start <= end
            if end - start >= MAX_LIST_LEN - pages.len() {
                return Err(format!(
                    "page range '{part}' expands past {MAX_LIST_LEN} pages"
                ));
            }
            pages.extend(start..=end);
        } else {
            if pages.len() >= MAX_LIST_LEN {
                return Err(format!("page list has more than {MAX_LIST_LEN} entries"));
            }
            pages.push(parse_page(part)?);
        }
    }

    if pages.is_empty() {
        return Err("page list is empty".to_string());
    }
    Ok(pages)
}

fn parse_page(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let page: usize = s
        .parse()
        .map_err(|_| format!("invalid page number: '{s}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}
