//! Text chunking for token-bounded model calls.
//!
//! Oversized input is split with a strict three-tier fallback: paragraph
//! boundaries first, sentence boundaries for any paragraph that is too
//! large on its own, and fixed-width character windows for any single
//! sentence that still exceeds the limit. Chunk order always matches
//! source order, and the tier-1/2 joins reinsert the delimiter consumed
//! during splitting so concatenating the chunks reconstructs the
//! normalized input.

use serde::Serialize;

/// A bounded-size contiguous slice of the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextChunk {
    /// Ordinal position in the source text
    pub index: usize,

    /// Chunk text, at most `max_size` characters
    pub text: String,
}

/// Split text into chunks of at most `max_size` characters.
///
/// Text at or under the limit comes back as a single unchanged chunk.
/// Empty input yields a single empty chunk; callers treat that as a
/// degenerate pass-through case, not an error.
pub fn split_text(text: &str, max_size: usize) -> Vec<TextChunk> {
    if text.chars().count() <= max_size {
        return vec![TextChunk {
            index: 0,
            text: text.to_string(),
        }];
    }

    let mut pieces: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for paragraph in text.split("\n\n") {
        let paragraph_len = paragraph.chars().count();

        if paragraph_len > max_size {
            // Tier 2: the paragraph alone overflows; flush what we have
            // and fall back to sentence packing for this paragraph.
            flush(&mut pieces, &mut buffer);
            buffer = pack_sentences(paragraph, max_size, &mut pieces);
            continue;
        }

        if fits(&buffer, paragraph_len, max_size) {
            join_paragraph(&mut buffer, paragraph);
        } else {
            flush(&mut pieces, &mut buffer);
            buffer.push_str(paragraph);
        }
    }

    flush(&mut pieces, &mut buffer);

    // Whitespace-only input survives the length gate above but packs
    // nothing; keep the single-empty-chunk contract for that case too.
    if pieces.is_empty() {
        return vec![TextChunk {
            index: 0,
            text: String::new(),
        }];
    }

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk { index, text })
        .collect()
}

/// Tier-2 packing: greedy sentence accumulation for one oversized
/// paragraph. Returns the trailing partial buffer so the caller can
/// keep filling it with following paragraphs.
fn pack_sentences(paragraph: &str, max_size: usize, pieces: &mut Vec<String>) -> String {
    let mut buffer = String::new();

    for sentence in split_sentences(paragraph) {
        let sentence_len = sentence.chars().count();

        if sentence_len > max_size {
            // Tier 3: force-split a single indivisible sentence into
            // fixed-width windows. The only tier that may cut mid-word.
            flush(pieces, &mut buffer);
            let chars: Vec<char> = sentence.chars().collect();
            for window in chars.chunks(max_size) {
                pieces.push(window.iter().collect());
            }
            continue;
        }

        if fits(&buffer, sentence_len, max_size) {
            join_sentence(&mut buffer, sentence);
        } else {
            flush(pieces, &mut buffer);
            buffer.push_str(sentence);
        }
    }

    buffer
}

/// Split a paragraph on sentence terminators, dropping the terminator
/// run; `join_sentence` reinserts a normalized `. ` delimiter.
fn split_sentences(paragraph: &str) -> Vec<&str> {
    paragraph
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn fits(buffer: &str, addition_len: usize, max_size: usize) -> bool {
    if buffer.is_empty() {
        return addition_len <= max_size;
    }
    // +2 for the reinserted delimiter ("\n\n" or ". ")
    buffer.chars().count() + 2 + addition_len <= max_size
}

fn join_paragraph(buffer: &mut String, paragraph: &str) {
    if !buffer.is_empty() {
        buffer.push_str("\n\n");
    }
    buffer.push_str(paragraph);
}

fn join_sentence(buffer: &mut String, sentence: &str) {
    if !buffer.is_empty() {
        buffer.push_str(". ");
    }
    buffer.push_str(sentence);
}

fn flush(pieces: &mut Vec<String>, buffer: &mut String) {
    if !buffer.is_empty() {
        pieces.push(std::mem::take(buffer).trim().to_string());
    }
}
