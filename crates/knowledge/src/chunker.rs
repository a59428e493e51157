//! Corpus segmentation into paragraph chunks.

use crate::types::{Chunk, ChunkId};
use navigator_core::text::trimmed_len;
use navigator_core::{AppError, AppResult};
use std::path::Path;

/// Line that separates top-level corpus sections.
pub const SECTION_DELIMITER: &str = "========================================";

/// Sections shorter than this (trimmed, in chars) are headers or noise.
pub const MIN_SECTION_CHARS: usize = 50;

/// Paragraphs must be strictly longer than this (trimmed, in chars).
pub const MIN_PARAGRAPH_CHARS: usize = 80;

/// Split raw corpus text into chunks, in source order.
///
/// Each kept paragraph is stored trimmed and its `ChunkId` is its position
/// in the output.
pub fn segment(raw_text: &str) -> Vec<Chunk> {
    let normalized = raw_text.replace("\r\n", "\n");
    let mut chunks = Vec::new();

    for section in normalized.split(SECTION_DELIMITER) {
        if trimmed_len(section) < MIN_SECTION_CHARS {
            continue;
        }

        for paragraph in section.split("\n\n") {
            if trimmed_len(paragraph) <= MIN_PARAGRAPH_CHARS {
                continue;
            }
            chunks.push(Chunk {
                id: ChunkId(chunks.len() as u32),
                text: paragraph.trim().to_string(),
            });
        }
    }

    tracing::debug!("Segmented corpus into {} chunks", chunks.len());

    chunks
}

/// Read the corpus file as UTF-8.
///
/// A missing, unreadable or whitespace-only file is an error.
pub fn load_corpus(path: &Path) -> AppResult<String> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Knowledge(format!("Failed to read corpus {:?}: {}", path, e))
    })?;

    if raw.trim().is_empty() {
        return Err(AppError::Knowledge(format!("Corpus {:?} is empty", path)));
    }

    Ok(raw)
}

/// Load and segment the corpus, refusing a corpus that yields no chunks.
pub fn load_chunks(path: &Path) -> AppResult<Vec<Chunk>> {
    let raw = load_corpus(path)?;
    let chunks = segment(&raw);

    if chunks.is_empty() {
        return Err(AppError::Knowledge(format!(
            "Corpus {:?} produced no chunks (paragraphs must exceed {} characters)",
            path, MIN_PARAGRAPH_CHARS
        )));
    }

    tracing::info!(chunks = chunks.len(), "Loaded corpus from {:?}", path);

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn paragraph(word: &str) -> String {
        format!("{} ", word).repeat(20).trim_end().to_string()
    }

    #[test]
    fn test_segment_splits_sections_and_paragraphs() {
        let raw = format!(
            "{}\n\n{}\n{}\n{}\n\n{}",
            paragraph("sleep"),
            paragraph("worry"),
            SECTION_DELIMITER,
            paragraph("rest"),
            paragraph("calm")
        );

        let chunks = segment(&raw);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].text, paragraph("sleep"));
        assert_eq!(chunks[3].text, paragraph("calm"));
        for (position, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.id, ChunkId(position as u32));
        }
    }

    #[test]
    fn test_segment_thresholds() {
        let exactly_80 = "a".repeat(MIN_PARAGRAPH_CHARS);
        let just_over = "b".repeat(MIN_PARAGRAPH_CHARS + 1);
        let raw = format!("{}\n\n{}", exactly_80, just_over);

        let chunks = segment(&raw);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, just_over);
    }

    #[test]
    fn test_segment_skips_short_sections() {
        let raw = format!(
            "Short header\n{}\n{}",
            SECTION_DELIMITER,
            paragraph("breathing")
        );
        let chunks = segment(&raw);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.starts_with("breathing"));
    }

    #[test]
    fn test_segment_normalizes_crlf() {
        let raw = format!("{}\r\n\r\n{}", paragraph("focus"), paragraph("energy"));
        let chunks = segment(&raw);
        assert_eq!(chunks.len(), 2);
        assert!(!chunks[0].text.contains('\r'));
    }

    #[test]
    fn test_chunks_never_contain_delimiter_and_exceed_threshold() {
        let raw = format!(
            "{d}\n{a}\n\n  {b}  \n{d}\n{d}\n{c}\n",
            d = SECTION_DELIMITER,
            a = paragraph("mood"),
            b = paragraph("stress"),
            c = paragraph("anger")
        );

        for chunk in segment(&raw) {
            assert!(!chunk.text.contains(SECTION_DELIMITER));
            assert!(trimmed_len(&chunk.text) > MIN_PARAGRAPH_CHARS);
            assert_eq!(chunk.text, chunk.text.trim());
        }
    }

    #[test]
    fn test_segment_multibyte_counts_chars() {
        // 41 two-byte chars: 82 bytes but only 41 chars
        let short = "é".repeat(41);
        assert!(segment(&format!("{}\n\n{}", short, short)).is_empty());
    }

    #[test]
    fn test_load_corpus_missing_file() {
        let result = load_corpus(Path::new("/nonexistent/kb.txt"));
        assert!(matches!(result, Err(AppError::Knowledge(_))));
    }

    #[test]
    fn test_load_corpus_whitespace_only() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "  \n\n \t").unwrap();
        assert!(load_corpus(file.path()).is_err());
    }

    #[test]
    fn test_load_chunks_rejects_zero_chunks() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "too short to keep").unwrap();
        let err = load_chunks(file.path()).unwrap_err();
        assert!(err.to_string().contains("no chunks"));
    }

    #[test]
    fn test_load_chunks_success() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), paragraph("gratitude")).unwrap();
        let chunks = load_chunks(file.path()).unwrap();
        assert_eq!(chunks.len(), 1);
    }
}
