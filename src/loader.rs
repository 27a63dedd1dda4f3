use miette::{NamedSource, Result, SourceSpan};

use crate::error;
use crate::memory::MEMORY_MAX;

/// Parse a textual program image into bytes, loaded from address 0.
///
/// Every line holds at most one instruction byte written as a binary literal.
/// Anything after `#` is a comment. Lines left empty are skipped without
/// taking up an address.
pub fn parse_image(name: &str, src: &str) -> Result<Vec<u8>> {
    let mut image = Vec::new();
    let mut offset = 0;

    for line in src.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let code = line.split('#').next().unwrap_or_default();
        let literal = code.trim();
        if literal.is_empty() {
            continue;
        }
        let span = SourceSpan::from((start + code.len() - code.trim_start().len(), literal.len()));

        let Some(byte) = parse_binary(literal) else {
            return Err(error::load_bad_literal(span, named(name, src)));
        };
        if image.len() == MEMORY_MAX {
            return Err(error::load_too_large(span, named(name, src), MEMORY_MAX));
        }
        image.push(byte);
    }
    Ok(image)
}

/// 1 to 8 binary digits, nothing else.
fn parse_binary(literal: &str) -> Option<u8> {
    if literal.len() > 8 || !literal.chars().all(|ch| ch == '0' || ch == '1') {
        return None;
    }
    u8::from_str_radix(literal, 2).ok()
}

fn named(name: &str, src: &str) -> NamedSource<String> {
    NamedSource::new(name, src.to_string())
}
