//! # viking_decoder
//!
//! viking_decoder is the tag-string decoder for the Viking buoy telemetry,
//! written in Rust. It takes the raw `.dat` transmission files collected by
//! a shore station, splits each transmission into its bracket-tagged
//! instrument segments (`[NOM]`, `[COMP]`, `[CTD]`, ...) and decodes every
//! segment into typed records, grouped per buoy and exported as YAML for
//! the downstream dataset writers.
//!
//! ## Wire format
//!
//! A Viking transmission is a multi-line frame between a `[NOM]` opener and
//! a `[FIN]` terminator; each line carries one bracket-tagged segment of
//! comma-separated fields:
//!
//! ```text
//! [NOM],PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W
//! [COMP],000DA1B4,FFC58202,-4.634,88.61,0.654,27.98,11.14,24.94
//! [CTD],   7.3413,  2.45966,  23.2697, 18.1612
//! [WXT520],Dn=163D,Dm=181D,Dx=192D,Sn=18.0K,Sm=22.7K,Sx=28.0K
//! [FIN]
//! ```
//!
//! Tags not in the vocabulary are skipped; a malformed segment drops only
//! its own tag and the rest of the frame still decodes. Dates are
//! transmitted as `DDMMYY`, so decoding needs an externally supplied
//! century hint; decoding fails loudly rather than guess one.
//!
//! The successor Metis logger transmits everything on one line between
//! `[INIT]` and `[END]` with full ISO dates; that grammar is handled by the
//! [`metis`] module and needs no century hint.
//!
//! ## Configuration
//!
//! Processing is driven by a YAML configuration file:
//!
//! ```yml
//! dat_path: /data/pmza/raw
//! export_path: /data/pmza/decoded
//! format: viking
//! century: 21
//! ```
//!
//! - `dat_path`: directory containing the raw `.dat` transmission files
//! - `export_path`: directory receiving one `<buoy>_decoded.yaml` per buoy
//! - `format`: `viking` or `metis`
//! - `century`: century hint for the compact 2-digit-year dates; required
//!   for the Viking format, ignored by Metis
//!
//! ## Library usage
//!
//! The decoding core is pure and usable without the file layer:
//!
//! ```
//! use libviking_decoder::frame::decode_frame;
//! use libviking_decoder::tag::Tag;
//! use libviking_decoder::timestamp::Century;
//!
//! let raw = "[NOM],PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W";
//! let frame = decode_frame(raw, Some(Century(21))).unwrap();
//! let nom = frame.get(Tag::Nom).unwrap();
//! assert_eq!(nom.get_str("time"), Some("2021-05-24T11:00:00"));
//! ```
pub mod block;
pub mod buoy_data;
pub mod config;
pub mod dat_stack;
pub mod decoders;
pub mod error;
pub mod export;
pub mod frame;
pub mod metis;
pub mod position;
pub mod process;
pub mod tag;
pub mod timestamp;
pub mod value;
pub mod worker_status;
