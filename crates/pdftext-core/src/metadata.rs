//! Document-level metadata types.
//!
//! [`InfoDictionary`] holds the raw strings read from the PDF /Info
//! dictionary. [`DocumentInfo`] is the caller-facing form with dates rendered
//! through [`INFO_DATE_FORMAT`], and [`DocumentMetadata`] pairs it with the
//! page count.
//!
//! # PDF Date Format
//!
//! Raw date strings follow `D:YYYYMMDDHHmmSSOHH'mm'`. Use [`parse_pdf_date`]
//! to turn one into a timestamp and [`format_info_date`] to render it.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

/// Pattern used for every date in [`DocumentInfo`]: `yyyy-MM-dd hh:mm:ss`.
///
/// The hour field is on a 12-hour clock (`01`-`12`) with no meridiem marker.
pub const INFO_DATE_FORMAT: &str = "%Y-%m-%d %I:%M:%S";

/// Raw values of the PDF /Info dictionary.
///
/// All fields are optional since PDFs may omit the /Info dictionary entirely
/// or include only a subset of fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoDictionary {
    /// Document title.
    pub title: Option<String>,
    /// Document author.
    pub author: Option<String>,
    /// Document subject / description.
    pub subject: Option<String>,
    /// Keywords associated with the document.
    pub keywords: Option<String>,
    /// Application that created the original document.
    pub creator: Option<String>,
    /// Application that produced the PDF.
    pub producer: Option<String>,
    /// Date the document was created (raw PDF date string).
    pub creation_date: Option<String>,
    /// Date the document was last modified (raw PDF date string).
    pub mod_date: Option<String>,
}

impl InfoDictionary {
    /// Returns `true` if all fields are `None`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
            && self.mod_date.is_none()
    }
}

/// Descriptive attributes of a document, as reported to callers.
///
/// Every field is independently optional. Dates are formatted with
/// [`INFO_DATE_FORMAT`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct DocumentInfo {
    /// /Author.
    pub author: Option<String>,
    /// /CreationDate, formatted in the caller's time zone.
    pub creation_date: Option<String>,
    /// /ModDate, formatted in the caller's time zone.
    pub modification_date: Option<String>,
    /// /Creator: the application that made the original document.
    pub creator: Option<String>,
    /// /Producer: the application that wrote the PDF.
    pub producer: Option<String>,
    /// /Keywords.
    pub keywords: Option<String>,
    /// /Title.
    pub title: Option<String>,
    /// /Subject.
    pub subject: Option<String>,
}

impl DocumentInfo {
    /// Build caller-facing info from a raw /Info dictionary.
    ///
    /// Dates are converted to `tz` before formatting. A date that cannot be
    /// parsed is reported as absent.
    pub fn from_dictionary<Tz>(dict: &InfoDictionary, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let render = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(parse_pdf_date)
                .map(|date| format_info_date(&date, tz))
        };

        Self {
            author: dict.author.clone(),
            creation_date: render(&dict.creation_date),
            modification_date: render(&dict.mod_date),
            creator: dict.creator.clone(),
            producer: dict.producer.clone(),
            keywords: dict.keywords.clone(),
            title: dict.title.clone(),
            subject: dict.subject.clone(),
        }
    }
}

/// Page count and descriptive attributes of a document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentMetadata {
    /// Total number of pages, including pages without extractable text.
    #[cfg_attr(feature = "serde", serde(rename = "length"))]
    pub page_count: usize,
    /// Descriptive attributes.
    pub info: DocumentInfo,
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSSOHH'mm'`).
///
/// The `D:` prefix is optional and every component after the year may be
/// omitted (month and day default to 1, time to midnight). A missing offset
/// is read as UTC. Returns `None` for anything that is not a valid date.
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let s = raw.trim();
    let s = s.strip_prefix("D:").unwrap_or(s);

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, rest) = s.split_at(digits_end);
    if digits.len() < 4 || digits.len() > 14 || digits.len() % 2 != 0 {
        return None;
    }

    let field = |start: usize, default: u32| -> Option<u32> {
        match digits.get(start..start + 2) {
            Some(f) => f.parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = digits[..4].parse().ok()?;
    let month = field(4, 1)?;
    let day = field(6, 1)?;
    let hour = field(8, 0)?;
    let minute = field(10, 0)?;
    let second = field(12, 0)?;

    let offset = parse_offset(rest)?;
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    offset.from_local_datetime(&naive).single()
}

/// Parse the `OHH'mm'` suffix of a PDF date.
fn parse_offset(rest: &str) -> Option<FixedOffset> {
    let mut chars = rest.chars();
    let sign = match chars.next() {
        None | Some('Z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };

    let tail: String = chars.filter(|&c| c != '\'').collect();
    if tail.len() > 4 || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = tail.get(0..2)?.parse().ok()?;
    let minutes: i32 = match tail.get(2..4) {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Render a date with [`INFO_DATE_FORMAT`] in the given time zone.
pub fn format_info_date<Tz>(date: &DateTime<FixedOffset>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.with_timezone(tz).format(INFO_DATE_FORMAT).to_string()
}
