//! Ordered decode fallback chain for project file contents.
//!
//! Repositories accumulate files with BOMs and legacy single-byte encodings;
//! each strategy is a pure function from bytes to an optional string, tried
//! in order until one succeeds. Latin-1 accepts any byte sequence, so the
//! entries after it exist only to keep the attempted-encodings list stable
//! for error reporting.

use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub struct DecodeStrategy {
    pub name: &'static str,
    decode: fn(&[u8]) -> Option<String>,
}

impl DecodeStrategy {
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        (self.decode)(bytes)
    }
}

/// Strategies in the order they are attempted.
pub const DECODE_CHAIN: &[DecodeStrategy] = &[
    DecodeStrategy {
        name: "utf-8",
        decode: decode_utf8,
    },
    DecodeStrategy {
        name: "utf-8-sig",
        decode: decode_utf8_sig,
    },
    DecodeStrategy {
        name: "latin-1",
        decode: decode_latin1,
    },
    DecodeStrategy {
        name: "windows-1252",
        decode: decode_windows_1252,
    },
    DecodeStrategy {
        name: "iso-8859-1",
        decode: decode_latin1,
    },
];

/// Runs the chain, returning the decoded text and the name of the strategy
/// that produced it.
pub fn decode_with_chain(bytes: &[u8]) -> Option<(String, &'static str)> {
    DECODE_CHAIN
        .iter()
        .find_map(|strategy| strategy.decode(bytes).map(|text| (text, strategy.name)))
}

#[must_use]
pub fn supported_encodings() -> Vec<&'static str> {
    DECODE_CHAIN.iter().map(|strategy| strategy.name).collect()
}

fn decode_utf8(bytes: &[u8]) -> Option<String> {
    if bytes.starts_with(UTF8_BOM) {
        // Defer to the BOM-aware strategy so the marker is stripped rather
        // than surfacing as a U+FEFF prefix.
        return None;
    }
    std::str::from_utf8(bytes).ok().map(str::to_owned)
}

fn decode_utf8_sig(bytes: &[u8]) -> Option<String> {
    let stripped = bytes.strip_prefix(UTF8_BOM)?;
    std::str::from_utf8(stripped).ok().map(str::to_owned)
}

fn decode_latin1(bytes: &[u8]) -> Option<String> {
    Some(encoding_rs::mem::decode_latin1(bytes).into_owned())
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    encoding_rs::WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}
