//! The fixed tag vocabulary of the Viking transmission format and the static
//! per-tag layout tables that drive the generic segment decoder.

/// How many comma-separated values a tag's segment is allowed to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Exactly `0` or `0 + 1` values; the last field is optional on the wire.
    OptionalLast(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, found: usize) -> bool {
        match *self {
            Arity::Exact(n) => found == n,
            Arity::OptionalLast(n) => found == n || found == n + 1,
            Arity::AtLeast(n) => found >= n,
        }
    }

    /// The mandatory field count, used in error messages.
    pub fn expected(&self) -> usize {
        match *self {
            Arity::Exact(n) | Arity::OptionalLast(n) | Arity::AtLeast(n) => n,
        }
    }
}

/// How a tag's segment body splits into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Comma,
    Tab,
    /// Commas and newlines both split; the segment spans physical lines.
    CommaOrNewline,
}

/// A bracketed instrument tag from the Viking transmission vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Nom,
    Comp,
    Triplet,
    ParDigi,
    Suna,
    Gps,
    Ctd,
    Ctdo,
    Rti,
    Rdi,
    WaveM,
    WaveS,
    Wxt520,
    Wmt700,
    Wph,
    Co2W,
    Co2A,
    Debit,
    Vemco,
    Mo,
    Ocr,
    P0,
    P1,
    Fin,
}

impl Tag {
    pub const ALL: [Tag; 24] = [
        Tag::Nom,
        Tag::Comp,
        Tag::Triplet,
        Tag::ParDigi,
        Tag::Suna,
        Tag::Gps,
        Tag::Ctdo,
        Tag::Ctd,
        Tag::Rti,
        Tag::Rdi,
        Tag::WaveM,
        Tag::WaveS,
        Tag::Wxt520,
        Tag::Wmt700,
        Tag::Wph,
        Tag::Co2W,
        Tag::Co2A,
        Tag::Debit,
        Tag::Vemco,
        Tag::Mo,
        Tag::Ocr,
        Tag::P0,
        Tag::P1,
        Tag::Fin,
    ];

    /// The label as it appears between brackets on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            Tag::Nom => "NOM",
            Tag::Comp => "COMP",
            Tag::Triplet => "Triplet",
            Tag::ParDigi => "Par_digi",
            Tag::Suna => "SUNA",
            Tag::Gps => "GPS",
            Tag::Ctd => "CTD",
            Tag::Ctdo => "CTDO",
            Tag::Rti => "RTI",
            Tag::Rdi => "RDI",
            Tag::WaveM => "WAVE_M",
            Tag::WaveS => "WAVE_S",
            Tag::Wxt520 => "WXT520",
            Tag::Wmt700 => "WMT700",
            Tag::Wph => "WpH",
            Tag::Co2W => "CO2_W",
            Tag::Co2A => "CO2_A",
            Tag::Debit => "Debit",
            Tag::Vemco => "VEMCO",
            Tag::Mo => "MO",
            Tag::Ocr => "OCR",
            Tag::P0 => "p0",
            Tag::P1 => "p1",
            Tag::Fin => "FIN",
        }
    }

    pub fn from_label(label: &str) -> Option<Tag> {
        Tag::ALL.iter().find(|t| t.label() == label).copied()
    }

    /// Tags the decoder recognizes but carries no decoder for. The power and
    /// winch-status tags are transmitted by the controller but hold no
    /// measurement of interest; OCR decoding was never documented by the
    /// vendor.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Tag::Mo | Tag::Ocr | Tag::P0 | Tag::P1 | Tag::Fin)
    }

    /// Tags whose date is transmitted as a 2-digit year and therefore need
    /// the externally supplied century hint.
    pub fn needs_century(&self) -> bool {
        matches!(
            self,
            Tag::Nom | Tag::Triplet | Tag::ParDigi | Tag::Gps | Tag::Rdi
        )
    }

    pub fn arity(&self) -> Arity {
        match self {
            Tag::Nom => Arity::OptionalLast(9),
            Tag::Comp => Arity::Exact(8),
            Tag::Triplet => Arity::Exact(12),
            Tag::ParDigi => Arity::Exact(9),
            Tag::Suna => Arity::Exact(9),
            // The GPS and Seaview segments may carry a trailing checksum field.
            Tag::Gps => Arity::OptionalLast(11),
            Tag::Ctd | Tag::Ctdo => Arity::Exact(4),
            Tag::Rti => Arity::Exact(35),
            Tag::Rdi => Arity::Exact(3),
            Tag::WaveM => Arity::Exact(6),
            Tag::WaveS => Arity::OptionalLast(11),
            Tag::Wxt520 | Tag::Wmt700 => Arity::AtLeast(1),
            Tag::Wph => Arity::Exact(11),
            Tag::Co2W | Tag::Co2A => Arity::Exact(15),
            Tag::Debit => Arity::Exact(1),
            Tag::Vemco => Arity::Exact(3),
            Tag::Mo | Tag::Ocr | Tag::P0 | Tag::P1 | Tag::Fin => Arity::AtLeast(0),
        }
    }

    pub fn separator(&self) -> Separator {
        match self {
            Tag::Triplet => Separator::Tab,
            Tag::Rti => Separator::CommaOrNewline,
            _ => Separator::Comma,
        }
    }

    /// The ordered field names of the decoded record produced for this tag.
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Tag::Nom => &[
                "buoy_name",
                "time",
                "firmware",
                "controller_sn",
                "latitude",
                "longitude",
                "water_detection",
            ],
            Tag::Comp => &[
                "tot_sin_head",
                "tot_cos_head",
                "heading",
                "averaged_pitch",
                "std_pitch",
                "averaged_roll",
                "std_roll",
                "averaged_tilt",
                "std_tilt",
            ],
            Tag::Triplet => &[
                "time",
                "model_number",
                "serial_number",
                "wavelength_1",
                "raw_value_1",
                "calculated_value_1",
                "wavelength_2",
                "raw_value_2",
                "calculated_value_2",
                "wavelength_3",
                "raw_value_3",
                "calculated_value_3",
            ],
            Tag::ParDigi => &[
                "time",
                "model_number",
                "serial_number",
                "timer_s",
                "par",
                "pitch",
                "roll",
                "intern_temperature",
            ],
            Tag::Suna => &[
                "time",
                "model_number",
                "serial_number",
                "nitrate",
                "nitrogen",
                "absorbance_254_31",
                "absorbance_350_16",
                "bromide",
                "spectrum_average",
            ],
            Tag::Gps => &[
                "time",
                "latitude",
                "longitude",
                "speed",
                "course",
                "variation",
                "validity",
            ],
            Tag::Ctd => &["temperature", "conductivity", "salinity", "density"],
            Tag::Ctdo => &[
                "temperature",
                "conductivity",
                "dissolved_oxygen",
                "salinity",
            ],
            Tag::Rti => &[
                "bin",
                "position_cm",
                "beam1",
                "beam2",
                "beam3",
                "beam4",
                "u",
                "v",
                "w",
                "e",
                "corr1",
                "corr2",
                "corr3",
                "corr4",
                "amp1",
                "amp2",
                "amp3",
                "amp4",
                "bt_beam1",
                "bt_beam2",
                "bt_beam3",
                "bt_beam4",
                "bt_u",
                "bt_v",
                "bt_w",
                "bt_e",
                "bt_corr1",
                "bt_corr2",
                "bt_corr3",
                "bt_corr4",
                "bt_amp1",
                "bt_amp2",
                "bt_amp3",
                "bt_amp4",
            ],
            Tag::Rdi => &["time", "u", "v", "w", "e"],
            Tag::WaveM => &[
                "time",
                "period",
                "average_height",
                "significant_height",
                "maximal_height",
            ],
            Tag::WaveS => &[
                "time",
                "heading",
                "average_height",
                "dominant_period",
                "wave_direction",
                "hmax",
                "hmax2",
                "pmax",
                "roll",
                "pitch",
            ],
            Tag::Wxt520 => &[
                "Dn", "Dm", "Dx", "Sn", "Sm", "Sx", "Rc", "Rd", "Ri", "Hc", "Hd", "Hi", "Ta",
                "Ua", "Pa", "Th", "Vh", "Vs", "Vr",
            ],
            Tag::Wmt700 => &["Dn", "Dm", "Dx", "Sn", "Sm", "Sx"],
            Tag::Wph => &[
                "model",
                "serial_number",
                "time",
                "sample_number",
                "error_flag",
                "ext_ph",
                "int_ph",
                "ext_volt",
                "int_volt",
                "ph_temperature",
                "rel_humidity",
                "int_temperature",
            ],
            Tag::Co2W | Tag::Co2A => &[
                "time",
                "auto_zero",
                "current",
                "co2_ppm",
                "irga_temperature",
                "humidity_mbar",
                "humidity_sensor_temperature",
                "cell_gas_pressure_mbar",
            ],
            Tag::Debit => &["flow"],
            Tag::Vemco => &["time", "protocol", "serial_number"],
            Tag::Mo | Tag::Ocr | Tag::P0 | Tag::P1 | Tag::Fin => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_label(tag.label()), Some(tag));
        }
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(Tag::from_label("ZZZZ"), None);
    }

    #[test]
    fn test_century_needing_tags() {
        let needing: Vec<&str> = Tag::ALL
            .iter()
            .filter(|t| t.needs_century())
            .map(|t| t.label())
            .collect();
        assert_eq!(needing, vec!["NOM", "Triplet", "Par_digi", "GPS", "RDI"]);
    }

    #[test]
    fn test_optional_last_arity() {
        let arity = Tag::Nom.arity();
        assert!(arity.accepts(9));
        assert!(arity.accepts(10));
        assert!(!arity.accepts(8));
        assert!(!arity.accepts(11));
    }
}
