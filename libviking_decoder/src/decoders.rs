//! The per-tag segment decoders.
//!
//! All decoders share the signature
//! `fn(&[&str], Option<Century>) -> Result<Record, TagError>` and are only
//! reached through [`decode_tag`], which performs the arity check from the
//! static tag table before handing the fields to the tag's hook.

use std::sync::LazyLock;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use regex::Regex;

use super::error::{FieldError, TagError};
use super::tag::Tag;
use super::timestamp::{compact_timestamp, make_timestamp, ordinal_timestamp, Century};
use super::value::{parse_float, parse_int, round_places, Record, Value, NOT_A_TIME};

/// One pulse of the flow meter over its 60 s window, in m/s.
const FLOW_M_PER_PULSE: f64 = 0.001543;

/// Instrument identifiers such as `SATPRS1093` split into a model prefix and
/// a serial suffix.
static MODEL_SERIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)([0-9]+)").expect("Invalid model/serial regex"));

/// Weather-station fields are `Key=ValueUnit` pairs, e.g. `Ta=-6.8C`.
static KEY_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)=(-?\d+(?:\.\d+)?)").expect("Invalid key=value regex")
});

/// The outcome of decoding one tagged segment.
///
/// `Unsupported` marks a tag that is part of the vocabulary but carries no
/// decoder; it is deliberately distinct from an unknown tag (which never
/// reaches the decoder at all) so callers and tests can tell the two apart.
#[derive(Debug, Clone)]
pub enum TagOutcome {
    Decoded(Record),
    Unsupported,
    Malformed(TagError),
}

/// Decode the fields of one tagged segment.
///
/// Arity comes from the tag table; everything else is the tag hook's
/// business. Decoding is pure: no I/O, no shared state.
pub fn decode_tag(tag: Tag, fields: &[&str], century: Option<Century>) -> TagOutcome {
    if !tag.is_supported() {
        return TagOutcome::Unsupported;
    }
    let arity = tag.arity();
    if !arity.accepts(fields.len()) {
        return TagOutcome::Malformed(TagError::WrongFieldCount {
            expected: arity.expected(),
            found: fields.len(),
        });
    }
    let result = match tag {
        Tag::Nom => decode_nom(fields, century),
        Tag::Comp => decode_comp(fields),
        Tag::Triplet => decode_triplet(fields, century),
        Tag::ParDigi => decode_par_digi(fields, century),
        Tag::Suna => decode_suna(fields),
        Tag::Gps => decode_gps(fields, century),
        Tag::Ctd => decode_ctd(fields),
        Tag::Ctdo => decode_ctdo(fields),
        Tag::Rti => decode_rti(fields),
        Tag::Rdi => decode_rdi(fields, century),
        Tag::WaveM => decode_wave_m(fields),
        Tag::WaveS => decode_wave_s(fields),
        Tag::Wxt520 | Tag::Wmt700 => decode_weather(tag, fields),
        Tag::Wph => decode_wph(fields),
        Tag::Co2W | Tag::Co2A => decode_co2(fields),
        Tag::Debit => decode_debit(fields),
        Tag::Vemco => decode_vemco(fields),
        Tag::Mo | Tag::Ocr | Tag::P0 | Tag::P1 | Tag::Fin => unreachable!("unsupported tags are filtered above"),
    };
    match result {
        Ok(record) => TagOutcome::Decoded(record),
        Err(error) => TagOutcome::Malformed(error),
    }
}

fn require_century(century: Option<Century>) -> Result<Century, TagError> {
    century.ok_or(TagError::MissingCentury)
}

fn hex_bytes(field: &str) -> Result<Vec<u8>, FieldError> {
    let field = field.trim();
    if field.is_empty() || field.len() % 2 != 0 {
        return Err(FieldError::BadHex(field.to_string()));
    }
    (0..field.len())
        .step_by(2)
        .map(|i| {
            field
                .get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| FieldError::BadHex(field.to_string()))
        })
        .collect()
}

/// A compass accumulator word: 8 hex characters, big-endian i32.
fn hex_i32_be(field: &str) -> Result<i32, FieldError> {
    let bytes = hex_bytes(field)?;
    if bytes.len() != 4 {
        return Err(FieldError::BadHex(field.to_string()));
    }
    Ok(BigEndian::read_i32(&bytes))
}

/// An ADCP velocity blob: 16 hex characters, four little-endian i16 words.
fn hex_i16x4_le(field: &str) -> Result<[i16; 4], FieldError> {
    let bytes = hex_bytes(field)?;
    if bytes.len() != 8 {
        return Err(FieldError::BadHex(field.to_string()));
    }
    let mut words = [0i16; 4];
    for (i, word) in words.iter_mut().enumerate() {
        *word = LittleEndian::read_i16(&bytes[i * 2..i * 2 + 2]);
    }
    Ok(words)
}

fn split_model_serial(field: &str) -> Result<(String, String), FieldError> {
    let captures = MODEL_SERIAL_REGEX
        .captures(field)
        .ok_or_else(|| FieldError::BadInstrumentId(field.to_string()))?;
    Ok((captures[1].to_string(), captures[2].to_string()))
}

fn decode_nom(fields: &[&str], century: Option<Century>) -> Result<Record, TagError> {
    let century = require_century(century)?;
    let mut record = Record::default();
    record.insert("buoy_name", Value::Str(fields[0].to_string()));
    record.insert(
        "time",
        Value::Timestamp(compact_timestamp(century, fields[1], fields[2])?),
    );
    record.insert("firmware", Value::Str(fields[3].to_string()));
    record.insert("controller_sn", Value::Str(fields[4].to_string()));
    // Fields 5 and 6 are controller flash counters, not measurements.
    let (latitude, longitude) = if fields[7].contains('#') || fields[8].contains('#') {
        (f64::NAN, f64::NAN)
    } else {
        (
            super::position::decode_position(fields[7])?,
            super::position::decode_position(fields[8])?,
        )
    };
    record.insert("latitude", Value::Float(latitude));
    record.insert("longitude", Value::Float(longitude));
    if let Some(flag) = fields.get(9) {
        record.insert("water_detection", Value::Float(parse_float(flag)?));
    }
    Ok(record)
}

fn decode_comp(fields: &[&str]) -> Result<Record, TagError> {
    let tot_sin = hex_i32_be(fields[0])?;
    let tot_cos = hex_i32_be(fields[1])?;
    let heading = round_places((tot_sin as f64).atan2(tot_cos as f64).to_degrees(), 2);
    let mut record = Record::default();
    record.insert("tot_sin_head", Value::Int(tot_sin as i64));
    record.insert("tot_cos_head", Value::Int(tot_cos as i64));
    record.insert("heading", Value::Float(heading));
    record.insert("averaged_pitch", Value::Float(parse_float(fields[2])?));
    record.insert("std_pitch", Value::Float(parse_float(fields[3])?));
    record.insert("averaged_roll", Value::Float(parse_float(fields[4])?));
    record.insert("std_roll", Value::Float(parse_float(fields[5])?));
    record.insert("averaged_tilt", Value::Float(parse_float(fields[6])?));
    record.insert("std_tilt", Value::Float(parse_float(fields[7])?));
    Ok(record)
}

fn decode_triplet(fields: &[&str], century: Option<Century>) -> Result<Record, TagError> {
    let century = require_century(century)?;
    let date: Vec<&str> = fields[1].split('/').collect();
    let clock: Vec<&str> = fields[2].split(':').collect();
    if date.len() != 3 || clock.len() != 3 {
        return Err(FieldError::BadDate(format!("{},{}", fields[1], fields[2])).into());
    }
    let (model, serial) = fields[0]
        .split_once('-')
        .ok_or_else(|| FieldError::BadInstrumentId(fields[0].to_string()))?;

    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(make_timestamp(
            &century.full_year(date[2]),
            date[0],
            date[1],
            clock[0],
            clock[1],
            clock[2],
        )),
    );
    record.insert("model_number", Value::Str(model.to_string()));
    record.insert("serial_number", Value::Str(serial.to_string()));
    record.insert("wavelength_1", Value::Float(parse_float(fields[3])?));
    record.insert("raw_value_1", Value::Float(parse_float(fields[4])?));
    record.insert("calculated_value_1", Value::Float(parse_float(fields[5])?));
    record.insert("wavelength_2", Value::Float(parse_float(fields[6])?));
    record.insert("raw_value_2", Value::Float(parse_float(fields[7])?));
    record.insert("calculated_value_2", Value::Float(parse_float(fields[8])?));
    record.insert("wavelength_3", Value::Float(parse_float(fields[9])?));
    record.insert("raw_value_3", Value::Float(parse_float(fields[10])?));
    record.insert("calculated_value_3", Value::Float(parse_float(fields[11])?));
    Ok(record)
}

fn decode_par_digi(fields: &[&str], century: Option<Century>) -> Result<Record, TagError> {
    let century = require_century(century)?;
    let (model, serial) = split_model_serial(fields[2])?;
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(compact_timestamp(century, fields[0], fields[1])?),
    );
    record.insert("model_number", Value::Str(model));
    record.insert("serial_number", Value::Str(serial));
    record.insert("timer_s", Value::Float(parse_float(fields[3])?));
    record.insert("par", Value::Float(parse_float(fields[4])?));
    record.insert("pitch", Value::Float(parse_float(fields[5])?));
    record.insert("roll", Value::Float(parse_float(fields[6])?));
    record.insert("intern_temperature", Value::Float(parse_float(fields[7])?));
    Ok(record)
}

fn decode_suna(fields: &[&str]) -> Result<Record, TagError> {
    let (model, serial) = split_model_serial(fields[0])?;
    let time = if fields[1].contains('#') || fields[2].contains('#') {
        NOT_A_TIME.to_string()
    } else {
        ordinal_timestamp(fields[1], parse_float(fields[2])?)?
    };
    let mut record = Record::default();
    record.insert("time", Value::Timestamp(time));
    record.insert("model_number", Value::Str(model));
    record.insert("serial_number", Value::Str(serial));
    record.insert("nitrate", Value::Float(parse_float(fields[3])?));
    record.insert("nitrogen", Value::Float(parse_float(fields[4])?));
    record.insert("absorbance_254_31", Value::Float(parse_float(fields[5])?));
    record.insert("absorbance_350_16", Value::Float(parse_float(fields[6])?));
    record.insert("bromide", Value::Float(parse_float(fields[7])?));
    record.insert("spectrum_average", Value::Float(parse_float(fields[8])?));
    Ok(record)
}

fn decode_gps(fields: &[&str], century: Option<Century>) -> Result<Record, TagError> {
    let century = require_century(century)?;
    let variation_sign = match fields[10].chars().next() {
        Some('E') => 1.0,
        Some('W') => -1.0,
        _ => return Err(FieldError::BadHemisphere(fields[10].to_string()).into()),
    };
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(compact_timestamp(century, fields[0], fields[8])?),
    );
    record.insert(
        "latitude",
        Value::Float(super::position::decode_nmea_position(fields[2], fields[3])?),
    );
    record.insert(
        "longitude",
        Value::Float(super::position::decode_nmea_position(fields[4], fields[5])?),
    );
    record.insert("speed", Value::Float(parse_float(fields[6])?));
    record.insert("course", Value::Float(parse_float(fields[7])?));
    record.insert(
        "variation",
        Value::Float(variation_sign * parse_float(fields[9])?),
    );
    record.insert("validity", Value::Str(fields[1].to_string()));
    Ok(record)
}

fn decode_ctd(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    record.insert("temperature", Value::Float(parse_float(fields[0])?));
    record.insert("conductivity", Value::Float(parse_float(fields[1])?));
    record.insert("salinity", Value::Float(parse_float(fields[2])?));
    record.insert("density", Value::Float(parse_float(fields[3])?));
    Ok(record)
}

fn decode_ctdo(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    record.insert("temperature", Value::Float(parse_float(fields[0])?));
    record.insert("conductivity", Value::Float(parse_float(fields[1])?));
    record.insert("dissolved_oxygen", Value::Float(parse_float(fields[2])?));
    record.insert("salinity", Value::Float(parse_float(fields[3])?));
    Ok(record)
}

fn decode_rti(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    record.insert("bin", Value::Int(parse_int(fields[0])?));
    record.insert("position_cm", Value::Float(parse_float(fields[1])?));
    // Water-column row, then the bottom-track row after the "Bot" marker
    // at index 18.
    let groups: [(&[&'static str], usize); 8] = [
        (&["beam1", "beam2", "beam3", "beam4"], 2),
        (&["u", "v", "w", "e"], 6),
        (&["corr1", "corr2", "corr3", "corr4"], 10),
        (&["amp1", "amp2", "amp3", "amp4"], 14),
        (&["bt_beam1", "bt_beam2", "bt_beam3", "bt_beam4"], 19),
        (&["bt_u", "bt_v", "bt_w", "bt_e"], 23),
        (&["bt_corr1", "bt_corr2", "bt_corr3", "bt_corr4"], 27),
        (&["bt_amp1", "bt_amp2", "bt_amp3", "bt_amp4"], 31),
    ];
    for (names, start) in groups {
        for (offset, &name) in names.iter().enumerate() {
            record.insert(name, Value::Float(parse_float(fields[start + offset])?));
        }
    }
    Ok(record)
}

fn decode_rdi(fields: &[&str], century: Option<Century>) -> Result<Record, TagError> {
    let century = require_century(century)?;
    if fields[2] == "No Valid Speed" {
        return Err(TagError::NoReading);
    }
    let enu_mms = hex_i16x4_le(fields[2])?;
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(compact_timestamp(century, fields[0], fields[1])?),
    );
    record.insert("u", Value::Float(enu_mms[0] as f64));
    record.insert("v", Value::Float(enu_mms[1] as f64));
    record.insert("w", Value::Float(enu_mms[2] as f64));
    record.insert("e", Value::Float(enu_mms[3] as f64));
    Ok(record)
}

fn decode_wave_m(fields: &[&str]) -> Result<Record, TagError> {
    if fields[0].contains('#') {
        return Err(TagError::NoReading);
    }
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(format!("{}T{}", fields[0].replace('/', "-"), fields[1])),
    );
    record.insert("period", Value::Float(parse_float(fields[2])?));
    record.insert("average_height", Value::Float(parse_float(fields[3])?));
    record.insert("significant_height", Value::Float(parse_float(fields[4])?));
    record.insert("maximal_height", Value::Float(parse_float(fields[5])?));
    Ok(record)
}

fn decode_wave_s(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(fields[10].replace(' ', "T")),
    );
    record.insert("heading", Value::Float(parse_float(fields[1])?));
    record.insert("average_height", Value::Float(parse_float(fields[2])?));
    record.insert("dominant_period", Value::Float(parse_float(fields[3])?));
    record.insert("wave_direction", Value::Float(parse_float(fields[4])?));
    record.insert("hmax", Value::Float(parse_float(fields[5])?));
    record.insert("hmax2", Value::Float(parse_float(fields[6])?));
    record.insert("pmax", Value::Float(parse_float(fields[7])?));
    record.insert("roll", Value::Float(parse_float(fields[8])?));
    record.insert("pitch", Value::Float(parse_float(fields[9])?));
    Ok(record)
}

/// WXT520 and WMT700 transmit order-free `Key=ValueUnit` pairs, spread over
/// several physical lines for the WXT520. Keys outside the tag's table are
/// ignored.
fn decode_weather(tag: Tag, fields: &[&str]) -> Result<Record, TagError> {
    let known = tag.field_names();
    let mut record = Record::default();
    for field in fields {
        if let Some(captures) = KEY_VALUE_REGEX.captures(field) {
            if let Some(&name) = known.iter().find(|n| ***n == captures[1]) {
                record.insert(name, Value::Float(parse_float(&captures[2])?));
            }
        }
    }
    Ok(record)
}

fn decode_wph(fields: &[&str]) -> Result<Record, TagError> {
    let (model, serial) = split_model_serial(fields[0])?;
    let mut record = Record::default();
    record.insert("model", Value::Str(model));
    record.insert("serial_number", Value::Str(serial));
    record.insert("time", Value::Timestamp(fields[1].to_string()));
    record.insert("sample_number", Value::Float(parse_float(fields[2])?));
    record.insert("error_flag", Value::Float(parse_float(fields[3])?));
    record.insert("ext_ph", Value::Float(parse_float(fields[4])?));
    record.insert("int_ph", Value::Float(parse_float(fields[5])?));
    record.insert("ext_volt", Value::Float(parse_float(fields[6])?));
    record.insert("int_volt", Value::Float(parse_float(fields[7])?));
    record.insert("ph_temperature", Value::Float(parse_float(fields[8])?));
    record.insert("rel_humidity", Value::Float(parse_float(fields[9])?));
    record.insert("int_temperature", Value::Float(parse_float(fields[10])?));
    Ok(record)
}

fn decode_co2(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    record.insert(
        "time",
        Value::Timestamp(make_timestamp(
            fields[1], fields[2], fields[3], fields[4], fields[5], fields[6],
        )),
    );
    record.insert("auto_zero", Value::Float(parse_float(fields[7])?));
    record.insert("current", Value::Float(parse_float(fields[8])?));
    record.insert("co2_ppm", Value::Float(parse_float(fields[9])?));
    record.insert("irga_temperature", Value::Float(parse_float(fields[10])?));
    record.insert("humidity_mbar", Value::Float(parse_float(fields[11])?));
    record.insert(
        "humidity_sensor_temperature",
        Value::Float(parse_float(fields[12])?),
    );
    record.insert(
        "cell_gas_pressure_mbar",
        Value::Float(parse_float(fields[13])?),
    );
    Ok(record)
}

fn decode_debit(fields: &[&str]) -> Result<Record, TagError> {
    let mut record = Record::default();
    let flow = if fields[0].contains('#') {
        f64::NAN
    } else {
        let pulses = u32::from_str_radix(fields[0].trim(), 16)
            .map_err(|_| FieldError::BadHex(fields[0].to_string()))?;
        round_places(pulses as f64 * FLOW_M_PER_PULSE, 4)
    };
    record.insert("flow", Value::Float(flow));
    Ok(record)
}

fn decode_vemco(fields: &[&str]) -> Result<Record, TagError> {
    if fields[0].contains("No answer") {
        return Err(TagError::NoReading);
    }
    let mut record = Record::default();
    record.insert("time", Value::Timestamp(fields[0].replace(' ', "T")));
    record.insert("protocol", Value::Str(fields[1].to_string()));
    record.insert("serial_number", Value::Str(fields[2].to_string()));
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split(',').map(str::trim).collect()
    }

    #[test]
    fn test_decode_nom() {
        let fields = split("PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W");
        let record = match decode_tag(Tag::Nom, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded NOM, got {other:?}"),
        };
        assert_eq!(record.get_str("buoy_name"), Some("PMZA-RIKI"));
        assert_eq!(record.get_str("time"), Some("2021-05-24T11:00:00"));
        assert_eq!(record.get_str("firmware"), Some("8.3.1"));
        assert_eq!(record.get_str("controller_sn"), Some("000018C0D36B"));
        assert!((record.get_f64("latitude").unwrap() - 48.6618).abs() < 1e-4);
        assert!((record.get_f64("longitude").unwrap() + 68.5817).abs() < 1e-4);
        assert!(record.get("water_detection").is_none());
    }

    #[test]
    fn test_decode_nom_optional_water_detection() {
        let fields = split("PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W,1");
        let record = match decode_tag(Tag::Nom, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded NOM, got {other:?}"),
        };
        assert_eq!(record.get_f64("water_detection"), Some(1.0));
    }

    #[test]
    fn test_decode_nom_masked_position() {
        let fields = split("PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,## ##.##N,### ##.##W");
        let record = match decode_tag(Tag::Nom, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded NOM, got {other:?}"),
        };
        assert!(record.get_f64("latitude").unwrap().is_nan());
        assert!(record.get_f64("longitude").unwrap().is_nan());
    }

    #[test]
    fn test_nom_without_century_is_contract_violation() {
        let fields = split("PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W");
        match decode_tag(Tag::Nom, &fields, None) {
            TagOutcome::Malformed(TagError::MissingCentury) => (),
            other => panic!("expected missing-century, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_comp() {
        let fields = split("000DA1B4,FFC58202,-4.634,88.61,0.654,27.98,11.14,24.94");
        let record = match decode_tag(Tag::Comp, &fields, None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded COMP, got {other:?}"),
        };
        assert_eq!(record.get_i64("tot_sin_head"), Some(0x000DA1B4));
        assert_eq!(record.get_i64("tot_cos_head"), Some(0xFFC58202u32 as i32 as i64));
        assert_eq!(record.get_f64("averaged_pitch"), Some(-4.634));
        assert_eq!(record.get_f64("std_pitch"), Some(88.61));
        assert_eq!(record.get_f64("averaged_roll"), Some(0.654));
        assert_eq!(record.get_f64("std_tilt"), Some(24.94));
        // atan2(893364, -3833342) lands in the second quadrant.
        let heading = record.get_f64("heading").unwrap();
        assert!((heading - 166.88).abs() < 0.05, "heading {heading}");
    }

    #[test]
    fn test_decode_comp_wrong_field_count() {
        let fields = split("000DA1B4,FFC58202,-4.634");
        match decode_tag(Tag::Comp, &fields, None) {
            TagOutcome::Malformed(TagError::WrongFieldCount { expected: 8, found: 3 }) => (),
            other => panic!("expected arity failure, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rdi_velocities() {
        let fields = split("110000,240521,E3FFBB0022001400");
        let record = match decode_tag(Tag::Rdi, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded RDI, got {other:?}"),
        };
        assert_eq!(record.get_str("time"), Some("2021-05-24T11:00:00"));
        assert_eq!(record.get_f64("u"), Some(-29.0));
        assert_eq!(record.get_f64("v"), Some(187.0));
        assert_eq!(record.get_f64("w"), Some(34.0));
        assert_eq!(record.get_f64("e"), Some(20.0));
    }

    #[test]
    fn test_decode_rdi_no_valid_speed() {
        let fields = vec!["110000", "240521", "No Valid Speed"];
        match decode_tag(Tag::Rdi, &fields, Some(Century(21))) {
            TagOutcome::Malformed(TagError::NoReading) => (),
            other => panic!("expected no-reading, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_gps() {
        let fields = split("110132,A,4839.7541,N,06834.8903,W,003.7,004.4,240521,017.5,W,*7B");
        let record = match decode_tag(Tag::Gps, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded GPS, got {other:?}"),
        };
        assert_eq!(record.get_str("time"), Some("2021-05-24T11:01:32"));
        assert!((record.get_f64("latitude").unwrap() - 48.6626).abs() < 1e-4);
        assert!((record.get_f64("longitude").unwrap() + 68.5815).abs() < 1e-4);
        assert_eq!(record.get_f64("variation"), Some(-17.5));
        assert_eq!(record.get_str("validity"), Some("A"));
    }

    #[test]
    fn test_decode_suna() {
        let fields = split("SATSLC1363,2021145,12.000192,7.63,0.1068,0.2978,0.2471,0.00,0.000160");
        let record = match decode_tag(Tag::Suna, &fields, None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded SUNA, got {other:?}"),
        };
        assert_eq!(record.get_str("model_number"), Some("SATSLC"));
        assert_eq!(record.get_str("serial_number"), Some("1363"));
        assert_eq!(record.get_str("time"), Some("2021-05-26T12:00:00"));
        assert_eq!(record.get_f64("nitrate"), Some(7.63));
    }

    #[test]
    fn test_decode_triplet() {
        let fields: Vec<&str> =
            "BBFL2W-1688\t05/24/21\t10:59:03\t700\t1376\t2.786E-03\t695\t190\t1.066E+00\t460\t85\t3.454E+00"
                .split('\t')
                .collect();
        let record = match decode_tag(Tag::Triplet, &fields, Some(Century(21))) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded Triplet, got {other:?}"),
        };
        assert_eq!(record.get_str("time"), Some("2021-05-24T10:59:03"));
        assert_eq!(record.get_str("model_number"), Some("BBFL2W"));
        assert_eq!(record.get_f64("wavelength_1"), Some(700.0));
        assert_eq!(record.get_f64("calculated_value_1"), Some(2.786e-3));
    }

    #[test]
    fn test_decode_weather_pairs() {
        let fields = split("Dn=163D,Dm=181D,Dx=192D,Sn=18.0K,Sm=22.7K,Sx=28.0K");
        let record = match decode_tag(Tag::Wxt520, &fields, None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded WXT520, got {other:?}"),
        };
        assert_eq!(record.get_f64("Dn"), Some(163.0));
        assert_eq!(record.get_f64("Sm"), Some(22.7));
    }

    #[test]
    fn test_decode_weather_negative_temperature() {
        let fields = split("Ta=-6.8C,Ua=45.0P,Pa=1025.4H");
        let record = match decode_tag(Tag::Wxt520, &fields, None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded WXT520, got {other:?}"),
        };
        assert_eq!(record.get_f64("Ta"), Some(-6.8));
    }

    #[test]
    fn test_decode_debit() {
        let record = match decode_tag(Tag::Debit, &["00000167"], None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded Debit, got {other:?}"),
        };
        assert_eq!(record.get_f64("flow"), Some(0.5539));
    }

    #[test]
    fn test_decode_debit_masked() {
        let record = match decode_tag(Tag::Debit, &["########"], None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded Debit, got {other:?}"),
        };
        assert!(record.get_f64("flow").unwrap().is_nan());
    }

    #[test]
    fn test_decode_vemco() {
        let fields = vec!["2018-05-05 04:27:35", "A69-1602", "46179"];
        let record = match decode_tag(Tag::Vemco, &fields, None) {
            TagOutcome::Decoded(r) => r,
            other => panic!("expected decoded VEMCO, got {other:?}"),
        };
        assert_eq!(record.get_str("time"), Some("2018-05-05T04:27:35"));
        assert_eq!(record.get_str("protocol"), Some("A69-1602"));
    }

    #[test]
    fn test_unsupported_tag_does_not_crash() {
        match decode_tag(Tag::Mo, &["942+03272"], None) {
            TagOutcome::Unsupported => (),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_field_is_malformed() {
        let fields = split("abc,2.45966,23.2697,18.1612");
        match decode_tag(Tag::Ctd, &fields, None) {
            TagOutcome::Malformed(TagError::Field(_)) => (),
            other => panic!("expected malformed CTD, got {other:?}"),
        }
    }
}
