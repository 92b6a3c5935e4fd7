//! Code masking for text rewrites.
//!
//! Fenced blocks and inline code spans are swapped for opaque placeholders
//! before a rewrite runs and swapped back afterwards, so nothing inside code
//! is ever touched. Fenced blocks are masked first: inline-code syntax inside
//! a fence then disappears with the fence and is never matched on its own.

const FENCED_PLACEHOLDER: &str = "__FENCED_CODE_BLOCK_";
const INLINE_PLACEHOLDER: &str = "__INLINE_CODE_";

/// Original code text, indexed by placeholder number.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodeMask {
    fenced_blocks: Vec<String>,
    inline_codes: Vec<String>,
}

impl CodeMask {
    /// Mask fenced blocks, then inline spans. Returns the masked text and the
    /// map needed to undo it.
    #[must_use]
    pub fn mask(text: &str) -> (String, Self) {
        let mut mask = Self::default();
        let without_fences = mask.mask_fenced_blocks(text);
        let masked = mask.mask_inline_codes(&without_fences);
        (masked, mask)
    }

    /// Run `rewrite` on the masked form of `text` and restore the result.
    ///
    /// Restoration happens on every path out of `rewrite` that returns a value.
    #[must_use]
    pub fn scoped<F>(text: &str, rewrite: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        let (masked, mask) = Self::mask(text);
        mask.restore(rewrite(&masked))
    }

    /// Fallible variant of [`CodeMask::scoped`]. On error nothing is returned,
    /// so there is nothing to restore.
    ///
    /// # Errors
    ///
    /// Returns whatever error `rewrite` produces.
    pub fn try_scoped<F, E>(text: &str, rewrite: F) -> Result<String, E>
    where
        F: FnOnce(&str) -> Result<String, E>,
    {
        let (masked, mask) = Self::mask(text);
        rewrite(&masked).map(|rewritten| mask.restore(rewritten))
    }

    /// Put inline spans back, then fenced blocks.
    #[must_use]
    pub fn restore(self, text: String) -> String {
        let mut content = text;
        for (i, code) in self.inline_codes.iter().enumerate() {
            content = content.replace(&placeholder(INLINE_PLACEHOLDER, i), code);
        }
        for (i, block) in self.fenced_blocks.iter().enumerate() {
            content = content.replace(&placeholder(FENCED_PLACEHOLDER, i), block);
        }
        content
    }

    #[must_use]
    pub fn fenced_count(&self) -> usize {
        self.fenced_blocks.len()
    }

    #[must_use]
    pub fn inline_count(&self) -> usize {
        self.inline_codes.len()
    }

    fn mask_fenced_blocks(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some((start, end)) = find_fenced_block(text, pos) {
            out.push_str(&text[pos..start]);
            out.push_str(&placeholder(FENCED_PLACEHOLDER, self.fenced_blocks.len()));
            self.fenced_blocks.push(text[start..end].to_owned());
            pos = end;
        }
        out.push_str(&text[pos..]);
        out
    }

    fn mask_inline_codes(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some((start, end)) = find_inline_code(text, pos) {
            out.push_str(&text[pos..start]);
            out.push_str(&placeholder(INLINE_PLACEHOLDER, self.inline_codes.len()));
            self.inline_codes.push(text[start..end].to_owned());
            pos = end;
        }
        out.push_str(&text[pos..]);
        out
    }
}

fn placeholder(kind: &str, index: usize) -> String {
    format!("{kind}{index}__")
}

/// Fence run at the start of a line: `(fence_char, run_len, indent)` for 3+
/// backticks or tildes after optional indentation.
fn parse_fence(line: &str) -> Option<(u8, usize, usize)> {
    let indent = line.len() - line.trim_start().len();
    let rest = &line.as_bytes()[indent..];
    let fence_char = match rest.first() {
        Some(&c @ (b'`' | b'~')) => c,
        _ => return None,
    };
    let run = rest.iter().take_while(|&&c| c == fence_char).count();
    (run >= 3).then_some((fence_char, run, indent))
}

/// Byte offsets `[start, end)` of each line, newline included.
fn line_spans(text: &str, from: usize) -> impl Iterator<Item = (usize, &str)> {
    text[from..]
        .split_inclusive('\n')
        .scan(from, |offset, line| {
            let start = *offset;
            *offset += line.len();
            Some((start, line))
        })
}

/// Find the next complete fenced block at or after `from`.
///
/// The block starts at the opening fence characters and ends right after the
/// closing run, which must use the same character and be at least as long.
/// An opener with no closer is left alone and the search moves on.
fn find_fenced_block(text: &str, from: usize) -> Option<(usize, usize)> {
    for (line_start, line) in line_spans(text, from) {
        let Some((fence_char, open_len, indent)) = parse_fence(line) else {
            continue;
        };
        let body_start = line_start + line.len();
        if !line.ends_with('\n') {
            // Opener on the last line: nothing can close it.
            return None;
        }
        for (close_start, close_line) in line_spans(text, body_start) {
            // Shorter runs stay inside the block, so a four-backtick fence can
            // quote a three-backtick example. The earlier docs hook closed at
            // the first run of the same character instead.
            if let Some((c, close_len, close_indent)) = parse_fence(close_line)
                && c == fence_char
                && close_len >= open_len
            {
                return Some((line_start + indent, close_start + close_indent + close_len));
            }
        }
    }
    None
}

/// Find the next inline code span at or after `from`.
///
/// A span opens with a maximal run of N backticks and closes at the next
/// maximal run of exactly N; it may cross line breaks. A run with no matching
/// closer is literal text.
fn find_inline_code(text: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let open_len = backtick_run(bytes, i);
        let mut j = i + open_len;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let run = backtick_run(bytes, j);
                if run == open_len {
                    return Some((i, j + run));
                }
                j += run;
            } else {
                j += 1;
            }
        }
        i += open_len;
    }
    None
}

fn backtick_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&c| c == b'`').count()
}
