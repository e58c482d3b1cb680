//! The Metis logger format.
//!
//! The successor controller transmits every tag on a single line, with ISO
//! dates and degree-symbol positions, so no century hint is involved:
//!
//! ```text
//! [INIT]PMZA-RIKI,2024-02-08,23:30:00,48°38.459'N,068°09.406'W,...[CTD]22.1686,...[END]
//! ```
//!
//! Unlike the Viking grammar, field lists are zipped against the tag table:
//! a short segment yields a short record instead of a decode failure, which
//! is how the shore station has always treated these lines. `NAN`/`NA`
//! placeholders decode to NaN.

use std::sync::LazyLock;

use fxhash::FxHashMap;
use regex::Regex;

use super::error::FrameError;
use super::position::decode_degree_symbol_position;
use super::value::{Record, Value, NOT_A_TIME};

/// A tag of the Metis single-line vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetisTag {
    Init,
    Powr,
    Eco1,
    Ctd,
    Ph,
    No3,
    Wind,
    Atms,
    Wave,
    Adcp,
    Pco2,
    Wnch,
}

impl MetisTag {
    pub const ALL: [MetisTag; 12] = [
        MetisTag::Init,
        MetisTag::Powr,
        MetisTag::Eco1,
        MetisTag::Ctd,
        MetisTag::Ph,
        MetisTag::No3,
        MetisTag::Wind,
        MetisTag::Atms,
        MetisTag::Wave,
        MetisTag::Adcp,
        MetisTag::Pco2,
        MetisTag::Wnch,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetisTag::Init => "INIT",
            MetisTag::Powr => "POWR",
            MetisTag::Eco1 => "ECO1",
            MetisTag::Ctd => "CTD",
            MetisTag::Ph => "PH",
            MetisTag::No3 => "NO3",
            MetisTag::Wind => "WIND",
            MetisTag::Atms => "ATMS",
            MetisTag::Wave => "WAVE",
            MetisTag::Adcp => "ADCP",
            MetisTag::Pco2 => "PCO2",
            MetisTag::Wnch => "WNCH",
        }
    }

    pub fn from_label(label: &str) -> Option<MetisTag> {
        MetisTag::ALL.iter().find(|t| t.label() == label).copied()
    }

    /// Ordered wire field names. `date`/`time` pairs fuse into a single
    /// `time` field in the decoded record.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            MetisTag::Init => &[
                "buoy_name",
                "date",
                "time",
                "latitude",
                "longitude",
                "heading",
                "pitch",
                "roll",
                "pitch_std",
                "roll_std",
                "cog",
                "sog",
                "magnetic_declination",
                "water_detection",
            ],
            MetisTag::Powr => &[
                "volt_batt_1",
                "amp_batt_1",
                "volt_batt_2",
                "amp_batt_2",
                "volt_solar",
                "amp_solar",
                "amp_main",
                "amp_turbine",
                "amp_winch",
                "pm_rh",
                "relay_state",
            ],
            MetisTag::Eco1 => &["scattering", "chlorophyll", "fdom"],
            MetisTag::Ctd => &["temperature", "conductivity", "salinity", "density"],
            MetisTag::Ph => &["ext_ph_calc", "int_ph_calc", "error_flag", "ext_ph", "int_ph"],
            MetisTag::No3 => &["nitrate", "nitrogen", "bromide", "rmse"],
            MetisTag::Wind => &[
                "source",
                "wind_dir_min",
                "wind_dir_ave",
                "wind_dir_max",
                "wind_spd_min",
                "wind_spd_ave",
                "wind_spd_max",
            ],
            MetisTag::Atms => &[
                "air_temperature",
                "air_humidity",
                "air_pressure",
                "par",
                "rain_total",
                "rain_duration",
                "rain_intensity",
            ],
            MetisTag::Wave => &["date", "time", "period", "hm0", "h13", "hmax"],
            MetisTag::Adcp => &["date", "time", "u", "v", "w", "e"],
            MetisTag::Pco2 => &["co2_ppm_air", "co2_ppm_water"],
            MetisTag::Wnch => &["message"],
        }
    }

    /// Fields stored as floats; everything else stays a string.
    fn float_fields(&self) -> &'static [&'static str] {
        match self {
            MetisTag::Init => &[
                "latitude",
                "longitude",
                "heading",
                "pitch",
                "roll",
                "pitch_std",
                "roll_std",
                "cog",
                "sog",
                "magnetic_declination",
                "water_detection",
            ],
            MetisTag::Powr => &[
                "volt_batt_1",
                "amp_batt_1",
                "volt_batt_2",
                "amp_batt_2",
                "volt_solar",
                "amp_solar",
                "amp_main",
                "amp_turbine",
                "amp_winch",
            ],
            MetisTag::Eco1 => &["scattering", "chlorophyll", "fdom"],
            MetisTag::Ctd => &["temperature", "conductivity", "salinity", "density"],
            MetisTag::Ph => &["ext_ph_calc", "int_ph_calc", "error_flag", "ext_ph", "int_ph"],
            MetisTag::No3 => &["nitrate", "nitrogen", "bromide", "rmse"],
            MetisTag::Wind => &[
                "wind_dir_min",
                "wind_dir_ave",
                "wind_dir_max",
                "wind_spd_min",
                "wind_spd_ave",
                "wind_spd_max",
            ],
            MetisTag::Atms => &[
                "air_temperature",
                "air_humidity",
                "air_pressure",
                "par",
                "rain_total",
                "rain_duration",
                "rain_intensity",
            ],
            MetisTag::Wave => &["period", "hm0", "h13", "hmax"],
            MetisTag::Adcp => &["u", "v", "w", "e"],
            MetisTag::Pco2 => &["co2_ppm_air", "co2_ppm_water"],
            MetisTag::Wnch => &[],
        }
    }

    /// Tags whose leading `date`/`time` wire fields fuse into one timestamp.
    fn fuses_timestamp(&self) -> bool {
        matches!(self, MetisTag::Init | MetisTag::Wave | MetisTag::Adcp)
    }
}

static METIS_SEGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = MetisTag::ALL
        .iter()
        .map(|t| regex::escape(t.label()))
        .collect();
    Regex::new(&format!(r"\[({})\]([^\[]*)", labels.join("|")))
        .expect("Invalid metis segment regex")
});

/// The decoded result of one Metis line.
#[derive(Debug, Clone, Default)]
pub struct MetisFrame {
    records: FxHashMap<MetisTag, Record>,
}

impl MetisFrame {
    pub fn get(&self, tag: MetisTag) -> Option<&Record> {
        self.records.get(&tag)
    }

    pub fn contains(&self, tag: MetisTag) -> bool {
        self.records.contains_key(&tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = MetisTag> + '_ {
        self.records.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Decode one Metis transmission line. Unknown tags are ignored; the `[END]`
/// terminator carries no data and never reaches the table.
pub fn decode_metis_line(raw: &str) -> Result<MetisFrame, FrameError> {
    let mut frame = MetisFrame::default();

    for captures in METIS_SEGMENT_REGEX.captures_iter(raw) {
        let Some(tag) = MetisTag::from_label(&captures[1]) else {
            continue;
        };
        let body = captures[2].trim_end_matches(['\n', '\r', ',']);
        let record = decode_metis_segment(tag, body);
        frame.records.insert(tag, record);
    }

    Ok(frame)
}

fn decode_metis_segment(tag: MetisTag, body: &str) -> Record {
    let mut record = Record::default();
    let floats = tag.float_fields();

    let mut date_field: Option<String> = None;
    let mut time_field: Option<String> = None;

    for (&name, field) in tag.field_names().iter().zip(body.split(',')) {
        let field = field.trim();
        if tag.fuses_timestamp() && name == "date" {
            date_field = Some(field.to_string());
            continue;
        }
        if tag.fuses_timestamp() && name == "time" {
            time_field = Some(field.to_string());
            continue;
        }
        if name == "latitude" || name == "longitude" {
            let degrees = decode_degree_symbol_position(field).unwrap_or(f64::NAN);
            record.insert(name, Value::Float(degrees));
        } else if floats.contains(&name) {
            record.insert(name, Value::Float(lenient_float(field)));
        } else {
            record.insert(name, Value::Str(field.to_string()));
        }
    }

    if let (Some(date), Some(time)) = (date_field, time_field) {
        record.insert("time", Value::Timestamp(fuse_timestamp(&date, &time)));
    }

    record
}

/// The Metis feed marks missing values as `NA` or `NAN`; neither is an
/// error.
fn lenient_float(field: &str) -> f64 {
    field.parse::<f64>().unwrap_or(f64::NAN)
}

fn fuse_timestamp(date: &str, time: &str) -> String {
    let stamp = format!("{date}T{time}");
    if stamp.contains("NA") {
        NOT_A_TIME.to_string()
    } else {
        stamp
    }
}
