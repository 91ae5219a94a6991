//! Splits long model output into pieces that fit in a Discord message.
//!
//! Discord rejects messages over 2000 characters, so the default limit keeps
//! a small margin below that.

/// Default chunk limit, in characters.
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 1950;

/// Split `content` into ordered chunks of at most `max_length` characters.
///
/// Words are kept whole and newlines inside a chunk are preserved. When word
/// wrapping cannot honour the limit (a single word longer than `max_length`),
/// the raw content is cut into fixed-width slices instead. Lengths are counted
/// in `char`s, so a chunk never ends inside a multi-byte character.
#[must_use]
pub fn split_message(content: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);

    if content.trim().is_empty() {
        return Vec::new();
    }
    if content.chars().count() <= max_length {
        return vec![content.to_string()];
    }

    let wrapped = wrap_words(content, max_length);
    if wrapped.is_empty() || wrapped.iter().any(|chunk| chunk.chars().count() > max_length) {
        return hard_split(content, max_length);
    }
    wrapped
}

/// Greedy word wrap that never breaks a word. A word longer than the limit
/// lands alone on an oversized line, which the caller treats as a failure.
fn wrap_words(content: &str, max_length: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for token in tokens(content) {
        let is_space = token.starts_with(char::is_whitespace);
        let token_len = token.chars().count();

        if line_len + token_len <= max_length {
            // Whitespace carried over from the previous chunk is dropped.
            if is_space && line.is_empty() && !chunks.is_empty() {
                continue;
            }
            line.push_str(token);
            line_len += token_len;
            continue;
        }

        flush_line(&mut chunks, &mut line);
        line_len = 0;
        if is_space {
            continue;
        }
        line.push_str(token);
        line_len = token_len;
    }

    flush_line(&mut chunks, &mut line);
    chunks
}

fn flush_line(chunks: &mut Vec<String>, line: &mut String) {
    let trimmed = line.trim_end();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
    line.clear();
}

/// Alternating runs of whitespace and non-whitespace.
fn tokens(content: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (idx, c) in content.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            tokens.push(&content[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < content.len() {
        tokens.push(&content[start..]);
    }
    tokens
}

/// Fixed-width slices of the raw content, skipping whitespace-only slices.
fn hard_split(content: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(max_length)
        .map(|chunk| chunk.iter().collect::<String>())
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}
