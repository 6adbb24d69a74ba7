//! Financial annotation codec.
//!
//! A record's notes are free text that may carry, on a line of its own, one
//! JSON block of the form `{"financial":{...}}`. Decoding is defensive:
//! a block that fails to parse is left in the text as-is.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::FinancialRecord;

/// Key wrapping the financial sub-record inside the embedded block.
pub const FINANCIAL_KEY: &str = "financial";

/// Notes split into human text and the embedded financial sub-record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAnnotations {
    /// Notes with the financial block removed
    pub clean_text: String,
    /// Embedded sub-record, if a well-formed block was found
    pub financial: Option<FinancialRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    financial: FinancialRecord,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    financial: &'a FinancialRecord,
}

// Opening of a candidate block; the body is handed to serde_json.
fn re_block_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\s*"financial"\s*:"#).expect("financial block regex should compile")
    })
}

/// Split notes into clean text and the first well-formed financial block.
///
/// Never fails: without a usable block the original text comes back
/// untouched alongside `None`.
pub fn decode(text: &str) -> DecodedAnnotations {
    for candidate in re_block_start().find_iter(text) {
        let start = candidate.start();
        let Some((financial, len)) = parse_block(&text[start..]) else {
            log::debug!("Ignoring malformed financial block at byte {}", start);
            continue;
        };

        return DecodedAnnotations {
            clean_text: remove_block(text, start, start + len),
            financial: Some(financial),
        };
    }

    DecodedAnnotations {
        clean_text: text.to_string(),
        financial: None,
    }
}

/// Append `financial` to `text` as a block on its own line, replacing any
/// block already present.
///
/// The record is normalized first, so an amount that is not a decimal is
/// left out rather than written as a block `decode` would reject.
pub fn encode(text: &str, financial: &FinancialRecord) -> String {
    let clean = decode(text).clean_text;
    let block = match serde_json::to_string(&EnvelopeRef {
        financial: &financial.normalized(),
    }) {
        Ok(block) => block,
        Err(e) => {
            log::warn!("Could not serialize financial block: {}", e);
            return clean;
        }
    };

    if clean.is_empty() {
        block
    } else {
        format!("{}\n{}", clean, block)
    }
}

/// Notes without any financial block.
pub fn strip(text: &str) -> String {
    decode(text).clean_text
}

/// Parse one JSON value at the start of `input`, returning the record and
/// the number of bytes it spans.
fn parse_block(input: &str) -> Option<(FinancialRecord, usize)> {
    let mut stream = serde_json::Deserializer::from_str(input).into_iter::<Envelope>();
    let envelope = stream.next()?.ok()?;
    let len = stream.byte_offset();

    let financial = envelope.financial;
    if financial.amount.is_some() && financial.amount_decimal().is_none() {
        return None;
    }
    Some((financial, len))
}

/// Remove `text[start..end]` plus the line break that separates it from
/// the surrounding text.
fn remove_block(text: &str, start: usize, end: usize) -> String {
    let before = &text[..start];
    let after = &text[end..];

    match before.strip_suffix('\n') {
        Some(before) => format!("{}{}", before, after),
        None => format!("{}{}", before, after.strip_prefix('\n').unwrap_or(after)),
    }
}
