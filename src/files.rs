//! Text extraction for uploaded files.

use std::path::Path;

/// Extensions decoded as plain text with encoding detection
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "html", "css", "json", "xml", "csv",
];

const PDF_MESSAGE: &str = "PDF file detected. Please convert to text format for translation.";
const WORD_MESSAGE: &str = "Word document detected. Please save as text file for translation.";

/// Outcome of extracting text from an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text(String),
    /// The format is recognised but not extractable; carries the message for
    /// the user
    Unsupported(&'static str),
}

/// Lowercase extension including the leading dot, or "" when absent.
pub fn file_type(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Extract text from an upload based on its filename extension.
pub fn extract_text(filename: &str, content: &[u8]) -> Extracted {
    let extension = file_type(filename);
    let extension = extension.trim_start_matches('.');

    match extension {
        "pdf" => Extracted::Unsupported(PDF_MESSAGE),
        "doc" | "docx" => Extracted::Unsupported(WORD_MESSAGE),
        ext if TEXT_EXTENSIONS.contains(&ext) => Extracted::Text(decode_text(content)),
        _ => Extracted::Text(String::from_utf8_lossy(content).into_owned()),
    }
}

/// UTF-8 first, then the encoding guessed by chardetng, then Latin-1.
pub fn decode_text(content: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(content) {
        return text.strip_prefix('\u{feff}').unwrap_or(text).to_string();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(content, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, had_errors) = encoding.decode(content);
    if !had_errors {
        return decoded.into_owned();
    }

    content.iter().map(|&b| b as char).collect()
}

/// First `max_chars` characters, with "..." appended when truncated.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}
