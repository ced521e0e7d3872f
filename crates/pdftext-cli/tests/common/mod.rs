//! Shared PDF fixtures for the command-line tests.
//!
//! Builds small documents with lopdf: text pages, an /Info dictionary, and
//! an RC4-protected document for password tests.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat, dictionary};

/// Build a PDF with one page per entry in `texts`, optionally attaching `info`.
pub fn pdf_with_pages_and_info(texts: &[&str], info: Option<Dictionary>) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in texts {
        let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => Object::Reference(font_id) },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => texts.len() as i64,
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
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Build a PDF with one page per entry in `texts` and no /Info dictionary.
pub fn pdf_with_pages(texts: &[&str]) -> Vec<u8> {
    pdf_with_pages_and_info(texts, None)
}

/// Literal PDF string object.
pub fn pdf_string(s: &str) -> Object {
    Object::String(s.as_bytes().to_vec(), StringFormat::Literal)
}

/// An /Info dictionary with every descriptive field set.
pub fn full_info() -> Dictionary {
    dictionary! {
        "Title" => pdf_string("Quarterly Report"),
        "Author" => pdf_string("Jane Doe"),
        "Subject" => pdf_string("Finance"),
        "Keywords" => pdf_string("q2, revenue"),
        "Creator" => pdf_string("Writer"),
        "Producer" => pdf_string("pdftext fixtures"),
        "CreationDate" => pdf_string("D:20240615153000Z"),
        "ModDate" => pdf_string("D:20240701090000+02'00'"),
    }
}

const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

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

/// Protect the pages in `texts` with the RC4 40-bit standard security
/// handler, using `user_password` as the user password.
pub fn encrypted_pdf(texts: &[&str], user_password: &[u8]) -> Vec<u8> {
    let file_id = b"pdftextfixture03";
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

    let plain = pdf_with_pages(texts);
    let mut doc = lopdf::Document::load_mem(&plain).unwrap();

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
    doc.save_to(&mut buf).unwrap();
    buf
}

/// Write PDF bytes to a temporary file and return the handle.
pub fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

/// Path of a temp file as an owned string.
pub fn path_of(f: &tempfile::NamedTempFile) -> String {
    f.path().to_str().unwrap().to_string()
}

/// The `pdftext` binary under test.
pub fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("pdftext").unwrap()
}
