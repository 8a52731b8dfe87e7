//! Plain-text extraction from PDF and DOCX files.
//!
//! The kind is sniffed from the leading bytes rather than the extension:
//! `%PDF` is a PDF, a local zip header (`PK\x03\x04`) is taken to be a DOCX.
//!
//! - **PDF** text comes from `lopdf`, page by page in page order.
//! - **DOCX** text comes from the `w:t` runs of `word/document.xml`. A
//!   paragraph end becomes a newline, `w:tab` a tab, `w:br`/`w:cr` a newline.

use lopdf::Document;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const DOCX_BODY: &str = "word/document.xml";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a PDF or DOCX file")]
    UnknownKind,
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("DOCX error: {0}")]
    Docx(String),
    #[error("XML error: {0}")]
    Xml(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(PDF_MAGIC) {
            Some(Self::Pdf)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Some(Self::Docx)
        } else {
            None
        }
    }
}

/// Read `path` and return its text.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path)?;
    let kind = DocumentKind::sniff(&bytes).ok_or(DocumentError::UnknownKind)?;
    log::debug!("{}: detected {:?}", path.display(), kind);
    match kind {
        DocumentKind::Pdf => pdf_text(&bytes),
        DocumentKind::Docx => docx_text(&bytes),
    }
}

/// Text of every page, in page order.
pub fn pdf_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| DocumentError::Pdf(format!("Failed to load PDF: {}", e)))?;

    let pages = doc.get_pages();
    let mut text = String::new();
    for page in pages.keys() {
        let page_text = doc
            .extract_text(&[*page])
            .map_err(|e| DocumentError::Pdf(format!("page {}: {}", page, e)))?;
        text.push_str(&page_text);
    }
    log::debug!("PDF: {} pages, {} chars", pages.len(), text.len());
    Ok(text)
}

/// Text of `word/document.xml` inside a DOCX archive.
pub fn docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Docx(format!("Invalid DOCX ZIP: {}", e)))?;
    let mut body = archive
        .by_name(DOCX_BODY)
        .map_err(|e| DocumentError::Docx(format!("Missing {}: {}", DOCX_BODY, e)))?;
    let mut xml = String::new();
    body.read_to_string(&mut xml)?;
    document_xml_text(&xml)
}

/// Walk WordprocessingML and collect the visible text.
pub fn document_xml_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = true,
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    let run = e
                        .unescape()
                        .map_err(|e| DocumentError::Xml(e.to_string()))?;
                    text.push_str(&run);
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DocumentError::Xml(format!(
                    "at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(text)
}
