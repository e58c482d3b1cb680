//! Extraction of individual telemetry frames from a raw transmission.
//!
//! A `.dat` file accumulates every transmission received over a deployment;
//! each frame is the text between a `[NOM]` opener and the `[FIN]`
//! terminator. Anything outside such a pair, including garbled partial
//! transmissions, is skipped.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\[NOM].+?)\[FIN]").expect("Invalid block regex"));

/// Iterate over the complete frames in a raw transmission, terminator
/// stripped.
pub fn frame_blocks(text: &str) -> impl Iterator<Item = &str> {
    BLOCK_REGEX
        .captures_iter(text)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
}
