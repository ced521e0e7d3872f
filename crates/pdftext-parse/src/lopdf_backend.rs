//! lopdf-based PDF parsing backend.
//!
//! Implements [`PdfBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate. This is the only backend shipped with pdftext-rs.

use pdftext_core::InfoDictionary;
use tracing::{debug, trace};

use crate::backend::PdfBackend;
use crate::error::BackendError;

/// A parsed, unlocked PDF document backed by lopdf.
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Ordered page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<lopdf::ObjectId>,
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based PDF backend.
///
/// # Example
///
/// ```ignore
/// use pdftext_parse::{LopdfBackend, PdfBackend};
///
/// let doc = LopdfBackend::open_with_password(pdf_bytes, "")?;
/// let count = LopdfBackend::page_count(&doc);
/// let text = LopdfBackend::page_text(&doc, 0)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error> {
        // Unencrypted documents load the same way whatever the password.
        let inner =
            lopdf::Document::load_mem_with_password(bytes, password).map_err(|e| match e {
                err @ lopdf::Error::InvalidPassword => BackendError::Decrypt(err.to_string()),
                other => BackendError::Parse(format!("failed to parse PDF: {other}")),
            })?;

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<lopdf::ObjectId> = inner.get_pages().values().copied().collect();
        debug!(pages = page_ids.len(), "opened PDF document");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn info_dictionary(doc: &Self::Document) -> InfoDictionary {
        read_info_dictionary(&doc.inner)
    }

    fn page_text(doc: &Self::Document, index: usize) -> Result<String, Self::Error> {
        let count = doc.page_ids.len();
        if index >= count {
            return Err(BackendError::PageOutOfRange { index, count });
        }
        let page_number =
            u32::try_from(index + 1).map_err(|_| BackendError::PageOutOfRange { index, count })?;

        trace!(page = page_number, "extracting page text");
        doc.inner
            .extract_text(&[page_number])
            .map_err(|e| BackendError::Text(format!("page {page_number}: {e}")))
    }
}

/// Follow an indirect reference, returning the object itself otherwise.
fn resolve<'a>(doc: &'a lopdf::Document, obj: &'a lopdf::Object) -> Option<&'a lopdf::Object> {
    match obj {
        lopdf::Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Decode a PDF text string.
///
/// UTF-16BE when it starts with a byte order mark, otherwise UTF-8 with a
/// Latin-1 fallback.
fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s.to_string()),
        Err(_) => Some(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Read a string entry from an /Info dictionary, accepting String and Name values.
fn info_string(doc: &lopdf::Document, dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    let obj = resolve(doc, dict.get(key).ok()?)?;
    match obj {
        lopdf::Object::String(bytes, _) => decode_text_string(bytes),
        lopdf::Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Read the /Info dictionary referenced from the trailer.
///
/// Anything missing or malformed yields an empty (or partial) dictionary.
fn read_info_dictionary(doc: &lopdf::Document) -> InfoDictionary {
    let Some(info) = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_dict().ok())
    else {
        return InfoDictionary::default();
    };

    InfoDictionary {
        title: info_string(doc, info, b"Title"),
        author: info_string(doc, info, b"Author"),
        subject: info_string(doc, info, b"Subject"),
        keywords: info_string(doc, info, b"Keywords"),
        creator: info_string(doc, info, b"Creator"),
        producer: info_string(doc, info, b"Producer"),
        creation_date: info_string(doc, info, b"CreationDate"),
        mod_date: info_string(doc, info, b"ModDate"),
    }
}

/// Assemble pages (one content stream each) into a saved PDF.
///
/// `None` content produces a page without a /Contents entry. An optional
/// /Info dictionary is attached to the trailer.
#[cfg(test)]
fn build_test_pdf(contents: &[Option<&[u8]>], info: Option<lopdf::Dictionary>) -> Vec<u8> {
    use lopdf::{Document, Object, ObjectId, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for content in contents {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        };
        if let Some(bytes) = content {
            let content_id = doc.add_object(Stream::new(dictionary! {}, bytes.to_vec()));
            page.set("Contents", Object::Reference(content_id));
        }
        kids.push(doc.add_object(page).into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => contents.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    if let Some(info) = info {
        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

/// A PDF whose pages each show one line of text.
#[cfg(test)]
fn create_text_pdf(texts: &[&str]) -> Vec<u8> {
    let streams: Vec<Vec<u8>> = texts
        .iter()
        .map(|t| format!("BT /F1 12 Tf 72 720 Td ({t}) Tj ET").into_bytes())
        .collect();
    let contents: Vec<Option<&[u8]>> = streams.iter().map(|s| Some(s.as_slice())).collect();
    build_test_pdf(&contents, None)
}

/// PDF standard password padding.
#[cfg(test)]
const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

#[cfg(test)]
fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j: usize = 0;
    for i in 0..256 {
        j = (j + s[i] as usize + key[i % key.len()] as usize) & 0xFF;
        s.swap(i, j);
    }
    let (mut i, mut j) = (0usize, 0usize);
    data.iter()
        .map(|&byte| {
            i = (i + 1) & 0xFF;
            j = (j + s[i] as usize) & 0xFF;
            s.swap(i, j);
            byte ^ s[(s[i] as usize + s[j] as usize) & 0xFF]
        })
        .collect()
}

/// A one-page PDF protected with the RC4 40-bit standard security handler.
#[cfg(test)]
fn create_encrypted_pdf(user_password: &[u8]) -> Vec<u8> {
    use lopdf::{Object, StringFormat, dictionary};

    let file_id = b"pdftextfixture01";
    let permissions: i32 = -4;

    let pw_len = user_password.len().min(32);
    let mut padded = user_password[..pw_len].to_vec();
    padded.extend_from_slice(&PAD_BYTES[..32 - pw_len]);

    let owner_value = rc4(&md5::compute(&padded)[..5], &padded);

    let mut key_input = padded.clone();
    key_input.extend_from_slice(&owner_value);
    key_input.extend_from_slice(&(permissions as u32).to_le_bytes());
    key_input.extend_from_slice(file_id);
    let key = md5::compute(&key_input)[..5].to_vec();
    let user_value = rc4(&key, &PAD_BYTES);

    let plain = build_test_pdf(&[Some(b"BT /F1 12 Tf 72 720 Td (Secret) Tj ET".as_slice())], None);
    let mut doc = lopdf::Document::load_mem(&plain).expect("reload fixture");

    for (&(num, generation), obj) in doc.objects.iter_mut() {
        let mut obj_key_input = key.clone();
        obj_key_input.extend_from_slice(&num.to_le_bytes()[..3]);
        obj_key_input.extend_from_slice(&generation.to_le_bytes()[..2]);
        let digest = md5::compute(&obj_key_input);
        let obj_key = &digest[..(key.len() + 5).min(16)];
        match obj {
            Object::Stream(stream) => {
                let encrypted = rc4(obj_key, &stream.content);
                stream.set_content(encrypted);
            }
            Object::String(content, _) => *content = rc4(obj_key, content),
            _ => {}
        }
    }

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1_i64,
        "R" => 2_i64,
        "Length" => 40_i64,
        "O" => Object::String(owner_value, StringFormat::Literal),
        "U" => Object::String(user_value, StringFormat::Literal),
        "P" => permissions as i64,
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(file_id.to_vec(), StringFormat::Literal),
            Object::String(file_id.to_vec(), StringFormat::Literal),
        ]),
    );

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save encrypted PDF");
    buf
}
