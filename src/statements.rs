//! Statement builder: turns source text into an ordered list of normalized
//! statement hashes for the clone detector.
//!
//! A statement is one non-blank, non-comment line of code, trimmed and hashed
//! with 64-bit FNV-1a. Comment stripping runs on a copy of the line with
//! string and char literals masked out, so comment markers inside literals
//! are inert. The output is deterministic and stable across runs for
//! unchanged input.

use std::io::BufRead;

use crate::lang::Lang;

/// One normalized statement: its content hash and the source lines it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub hash: u64,
    pub start_line: usize, // 1-based
    pub end_line: usize,   // 1-based, inclusive
}

/// 64-bit FNV-1a over a byte slice.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325; // offset basis
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x100000001b3); // prime
    }
    hash
}

/// Overwrite the contents of string and char literals with spaces so that
/// comment markers inside literals are not matched by the comment scanner.
/// Quote characters themselves are kept. Falls back to the original line if
/// masking would split a multi-byte character.
fn mask_literals(line: &str) -> String {
    let bytes = line.as_bytes();
    let mut masked = bytes.to_vec();
    let mut i = 0;

    while i < bytes.len() {
        let quote = bytes[i];
        i += 1;
        if quote != b'"' && quote != b'\'' {
            continue;
        }
        while i < bytes.len() && bytes[i] != quote {
            masked[i] = b' ';
            if bytes[i] == b'\\' && i + 1 < bytes.len() {
                masked[i + 1] = b' ';
                i += 1;
            }
            i += 1;
        }
        i += 1; // closing quote
    }

    String::from_utf8(masked).unwrap_or_else(|_| line.to_string())
}

/// Scanner state carried across lines: block comment nesting depth
/// (0 = not inside a comment; capped at 1 for non-nesting languages).
struct Scanner<'a> {
    lang: &'a Lang,
    depth: usize,
}

impl<'a> Scanner<'a> {
    fn new(lang: &'a Lang) -> Self {
        Scanner { lang, depth: 0 }
    }

    /// Extract the code portion of one line, with comments removed.
    /// `masked` and `line` have identical byte layout.
    fn code_of(&mut self, line: &str, masked: &str) -> String {
        let m = masked.as_bytes();
        let o = line.as_bytes();
        let mut code: Vec<u8> = Vec::new();
        let mut i = 0;

        while i < m.len() {
            if self.depth > 0 {
                if let Some((open, close)) = self.lang.block_comment {
                    if self.lang.nested_block_comments && m[i..].starts_with(open.as_bytes()) {
                        self.depth += 1;
                        i += open.len();
                        continue;
                    }
                    if m[i..].starts_with(close.as_bytes()) {
                        self.depth -= 1;
                        i += close.len();
                        continue;
                    }
                }
                i += 1;
                continue;
            }

            // Block open is checked before line comments so that markers
            // sharing a prefix (Lua "--[[" vs "--") resolve to the block.
            if let Some((open, _)) = self.lang.block_comment
                && m[i..].starts_with(open.as_bytes())
            {
                self.depth = 1;
                i += open.len();
                continue;
            }
            if self
                .lang
                .line_comments
                .iter()
                .any(|lc| m[i..].starts_with(lc.as_bytes()))
            {
                break; // rest of the line is a comment
            }
            code.push(o[i]);
            i += 1;
        }

        String::from_utf8_lossy(&code).trim().to_string()
    }
}

/// Build the ordered statement list for one file.
///
/// Read errors on individual lines are skipped, matching the tolerant
/// line-classification behavior used elsewhere in the tool.
pub fn build<R: BufRead>(reader: R, lang: &Lang) -> Vec<Statement> {
    let mut scanner = Scanner::new(lang);
    let mut statements = Vec::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = match line_result {
            Ok(l) => l,
            Err(_) => continue,
        };
        if line.trim().is_empty() && scanner.depth == 0 {
            continue;
        }

        let masked = mask_literals(&line);
        let code = scanner.code_of(&line, &masked);
        if code.is_empty() {
            continue;
        }

        let line_number = idx + 1;
        statements.push(Statement {
            hash: fnv1a(code.as_bytes()),
            start_line: line_number,
            end_line: line_number,
        });
    }

    statements
}

#[cfg(test)]
#[path = "statements_test.rs"]
mod tests;
