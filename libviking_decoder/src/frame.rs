//! Whole-frame decoding: split a raw telemetry frame into its bracket-tagged
//! segments, dispatch each to its tag decoder and collect the results.
//!
//! A bad segment never aborts the frame; its tag is dropped, a warning is
//! logged, and the drop is counted in the frame summary. The one hard error
//! is a missing century hint on a tag that needs one; that is a caller
//! contract violation, not bad wire data, and it fails loudly.

use std::sync::LazyLock;

use fxhash::FxHashMap;
use regex::Regex;

use super::decoders::{decode_tag, TagOutcome};
use super::error::{FrameError, TagError};
use super::tag::{Separator, Tag};
use super::timestamp::Century;
use super::value::Record;

/// A segment is a known bracketed tag followed by everything up to the next
/// opening bracket, newlines included (the RTI segment spans two physical
/// lines). Anything that does not match, including unknown tags, is ignored.
static SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = Tag::ALL
        .iter()
        .filter(|t| **t != Tag::Fin)
        .map(|t| regex::escape(t.label()))
        .collect();
    Regex::new(&format!(r"\[({})\],?([^\[]*)", labels.join("|"))).expect("Invalid segment regex")
});

/// Aggregate decode metadata returned alongside the records.
#[derive(Debug, Clone, Default)]
pub struct FrameSummary {
    /// Number of segments that decoded successfully.
    pub decoded: usize,
    /// Tags dropped because their segment was malformed.
    pub malformed: Vec<Tag>,
    /// Tags recognized but carrying no decoder.
    pub unsupported: Vec<Tag>,
}

impl FrameSummary {
    pub fn dropped(&self) -> usize {
        self.malformed.len()
    }
}

/// The decoded result of one telemetry frame.
///
/// Built fresh per input frame and never mutated afterwards; it is handed as
/// a unit to the downstream writers.
#[derive(Debug, Clone, Default)]
pub struct DecodedFrame {
    records: FxHashMap<Tag, Vec<Record>>,
    pub summary: FrameSummary,
}

impl DecodedFrame {
    /// The first record decoded for a tag, if any.
    pub fn get(&self, tag: Tag) -> Option<&Record> {
        self.records.get(&tag).and_then(|records| records.first())
    }

    /// All records decoded for a tag. Most tags produce at most one record
    /// per frame; the RTI profiler may repeat.
    pub fn get_all(&self, tag: Tag) -> &[Record] {
        self.records.get(&tag).map_or(&[], Vec::as_slice)
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.records.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.records.keys().copied()
    }

    fn push(&mut self, tag: Tag, record: Record) {
        // Repeated weather-station lines refine one record; everything else
        // appends.
        if matches!(tag, Tag::Wxt520 | Tag::Wmt700) {
            if let Some(existing) = self.records.get_mut(&tag).and_then(|r| r.last_mut()) {
                existing.merge(record);
                return;
            }
        }
        self.records.entry(tag).or_default().push(record);
    }
}

/// Decode one raw telemetry frame.
///
/// `century` may be None when every tag in the stream carries full dates;
/// any tag that needs the hint will otherwise raise
/// [`FrameError::MissingCentury`].
pub fn decode_frame(raw: &str, century: Option<Century>) -> Result<DecodedFrame, FrameError> {
    let mut frame = DecodedFrame::default();

    for captures in SEGMENT_REGEX.captures_iter(raw) {
        let Some(tag) = Tag::from_label(&captures[1]) else {
            continue;
        };
        let body = captures[2].trim_end_matches(['\n', '\r', ',', ' ', '\t']);
        let fields = split_fields(tag, body);

        match decode_tag(tag, &fields, century) {
            TagOutcome::Decoded(record) => {
                frame.summary.decoded += 1;
                frame.push(tag, record);
            }
            TagOutcome::Unsupported => {
                log::debug!("No decoder for recognized tag [{}]", tag.label());
                frame.summary.unsupported.push(tag);
            }
            TagOutcome::Malformed(TagError::MissingCentury) => {
                return Err(FrameError::MissingCentury(tag.label()));
            }
            TagOutcome::Malformed(error) => {
                log::warn!("Dropping [{}] segment: {}", tag.label(), error);
                frame.summary.malformed.push(tag);
            }
        }
    }

    Ok(frame)
}

fn split_fields<'a>(tag: Tag, body: &'a str) -> Vec<&'a str> {
    match tag.separator() {
        Separator::Comma => body.split(',').map(str::trim).collect(),
        Separator::Tab => body.split('\t').map(str::trim).collect(),
        Separator::CommaOrNewline => body
            .split(|c| c == ',' || c == '\n')
            .map(str::trim)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOM_LINE: &str =
        "[NOM],PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W";

    #[test]
    fn test_decode_single_line_frame() {
        let frame = decode_frame(NOM_LINE, Some(Century(21))).unwrap();
        let nom = frame.get(Tag::Nom).expect("NOM record");
        assert_eq!(nom.get_str("buoy_name"), Some("PMZA-RIKI"));
        assert_eq!(nom.get_str("time"), Some("2021-05-24T11:00:00"));
        assert_eq!(frame.summary.decoded, 1);
    }

    #[test]
    fn test_partial_failure_keeps_good_tags() {
        let raw = format!(
            "{NOM_LINE}\n[CTD],not-a-number,2.45966,23.2697,18.1612\n[Debit],00000167"
        );
        let frame = decode_frame(&raw, Some(Century(21))).unwrap();
        assert!(frame.contains(Tag::Nom));
        assert!(frame.contains(Tag::Debit));
        assert!(!frame.contains(Tag::Ctd));
        assert_eq!(frame.summary.malformed, vec![Tag::Ctd]);
    }

    #[test]
    fn test_unknown_tag_is_ignored() {
        let raw = format!("{NOM_LINE}\n[ZZZZ],1,2,3");
        let frame = decode_frame(&raw, Some(Century(21))).unwrap();
        assert_eq!(frame.summary.decoded, 1);
        assert!(frame.summary.malformed.is_empty());
        assert!(frame.summary.unsupported.is_empty());
    }

    #[test]
    fn test_unsupported_tag_is_counted_not_fatal() {
        let raw = format!("{NOM_LINE}\n[OCR],29,220916");
        let frame = decode_frame(&raw, Some(Century(21))).unwrap();
        assert!(frame.contains(Tag::Nom));
        assert_eq!(frame.summary.unsupported, vec![Tag::Ocr]);
    }

    #[test]
    fn test_missing_century_fails_loudly() {
        match decode_frame(NOM_LINE, None) {
            Err(FrameError::MissingCentury("NOM")) => (),
            other => panic!("expected missing-century error, got {other:?}"),
        }
    }

    #[test]
    fn test_century_free_frame_decodes_without_hint() {
        let raw = "[CTD],7.3413,2.45966,23.2697,18.1612";
        let frame = decode_frame(raw, None).unwrap();
        let ctd = frame.get(Tag::Ctd).expect("CTD record");
        assert_eq!(ctd.get_f64("temperature"), Some(7.3413));
    }

    #[test]
    fn test_wxt520_lines_merge_into_one_record() {
        let raw = "[WXT520],Dn=163D,Dm=181D,Dx=192D,Sn=18.0K,Sm=22.7K,Sx=28.0K\n\
                   [WXT520],Rc=0.00M,Rd=0s,Ri=0.0M\n\
                   [WXT520],Ta=6.8C,Ua=45.0P,Pa=1025.4H";
        let frame = decode_frame(raw, None).unwrap();
        let records = frame.get_all(Tag::Wxt520);
        assert_eq!(records.len(), 1);
        let wxt = &records[0];
        assert_eq!(wxt.get_f64("Dm"), Some(181.0));
        assert_eq!(wxt.get_f64("Rc"), Some(0.0));
        assert_eq!(wxt.get_f64("Pa"), Some(1025.4));
    }

    #[test]
    fn test_rti_segment_spans_two_lines() {
        let raw = "[RTI],1,407,-258,-157,-263,-32,-160,-369,-202,-30,100,100,100,100,84,83,83,84\n\
                   Bot,-3,-6,-50,56,129,101,-4,-4,100,100,100,100,76,78,78,77";
        let frame = decode_frame(raw, None).unwrap();
        let rti = frame.get(Tag::Rti).expect("RTI record");
        assert_eq!(rti.get_i64("bin"), Some(1));
        assert_eq!(rti.get_f64("position_cm"), Some(407.0));
        assert_eq!(rti.get_f64("u"), Some(-160.0));
        assert_eq!(rti.get_f64("bt_beam1"), Some(-3.0));
        assert_eq!(rti.get_f64("bt_amp4"), Some(77.0));
    }

    #[test]
    fn test_ctd_with_padded_fields() {
        let raw = "[CTD],   7.3413,  2.45966,  23.2697, 18.1612,";
        let frame = decode_frame(raw, None).unwrap();
        let ctd = frame.get(Tag::Ctd).expect("CTD record");
        assert_eq!(ctd.get_f64("density"), Some(18.1612));
    }
}
