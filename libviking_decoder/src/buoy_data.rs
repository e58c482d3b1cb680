//! Per-buoy accumulation of decoded frames.
//!
//! A single directory of transmission files can interleave several buoys;
//! each frame declares its buoy in the `NOM` (Viking) or `INIT` (Metis)
//! record, and the fleet splits frames accordingly before export.

use fxhash::FxHashMap;
use serde::Serialize;

use super::frame::DecodedFrame;
use super::metis::{MetisFrame, MetisTag};
use super::tag::Tag;
use super::value::Record;

/// Everything decoded for one buoy over a processing run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuoyData {
    pub buoy_name: String,
    /// Firmware versions seen across the deployment (upgrades happen).
    pub firmware: Vec<String>,
    pub controller_sn: Vec<String>,
    pub frames: usize,
    pub malformed_tags: usize,
    pub unsupported_tags: usize,
    /// Decoded records keyed by tag label, in frame order.
    pub records: FxHashMap<String, Vec<Record>>,
}

impl BuoyData {
    fn new(buoy_name: &str) -> Self {
        BuoyData {
            buoy_name: buoy_name.to_string(),
            ..Default::default()
        }
    }

    fn note_version(&mut self, firmware: Option<&str>, controller_sn: Option<&str>) {
        if let Some(firmware) = firmware {
            if !self.firmware.iter().any(|f| f == firmware) {
                self.firmware.push(firmware.to_string());
            }
        }
        if let Some(sn) = controller_sn {
            if !self.controller_sn.iter().any(|s| s == sn) {
                self.controller_sn.push(sn.to_string());
            }
        }
    }

    fn push_record(&mut self, label: &str, record: Record) {
        self.records.entry(label.to_string()).or_default().push(record);
    }
}

/// All buoys seen during a processing run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetData {
    buoys: FxHashMap<String, BuoyData>,
}

impl FleetData {
    pub fn buoys(&self) -> impl Iterator<Item = &BuoyData> {
        self.buoys.values()
    }

    pub fn len(&self) -> usize {
        self.buoys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buoys.is_empty()
    }

    pub fn get(&self, buoy_name: &str) -> Option<&BuoyData> {
        self.buoys.get(buoy_name)
    }

    pub fn total_frames(&self) -> usize {
        self.buoys.values().map(|b| b.frames).sum()
    }

    /// Absorb one decoded Viking frame. Frames without a usable `NOM` record
    /// have no buoy identity and are skipped with a warning.
    pub fn absorb(&mut self, frame: DecodedFrame) {
        let Some(name) = frame
            .get(Tag::Nom)
            .and_then(|nom| nom.get_str("buoy_name"))
            .map(String::from)
        else {
            log::warn!("Frame carries no NOM record; cannot attribute it to a buoy");
            return;
        };

        let buoy = self
            .buoys
            .entry(name.clone())
            .or_insert_with(|| BuoyData::new(&name));

        if let Some(nom) = frame.get(Tag::Nom) {
            buoy.note_version(nom.get_str("firmware"), nom.get_str("controller_sn"));
        }
        buoy.frames += 1;
        buoy.malformed_tags += frame.summary.malformed.len();
        buoy.unsupported_tags += frame.summary.unsupported.len();

        let tags: Vec<Tag> = frame.tags().collect();
        for tag in tags {
            for record in frame.get_all(tag) {
                buoy.push_record(tag.label(), record.clone());
            }
        }
    }

    /// Absorb one decoded Metis line, keyed by its `INIT` record.
    pub fn absorb_metis(&mut self, frame: MetisFrame) {
        let Some(name) = frame
            .get(MetisTag::Init)
            .and_then(|init| init.get_str("buoy_name"))
            .map(String::from)
        else {
            log::warn!("Metis line carries no INIT record; cannot attribute it to a buoy");
            return;
        };

        let buoy = self
            .buoys
            .entry(name.clone())
            .or_insert_with(|| BuoyData::new(&name));
        buoy.frames += 1;

        let tags: Vec<MetisTag> = frame.tags().collect();
        for tag in tags {
            if let Some(record) = frame.get(tag) {
                buoy.push_record(tag.label(), record.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::decode_frame;
    use crate::metis::decode_metis_line;
    use crate::timestamp::Century;

    #[test]
    fn test_absorb_splits_by_buoy() {
        let mut fleet = FleetData::default();
        for (name, time) in [("PMZA-RIKI", "110000"), ("IML-4", "120000"), ("PMZA-RIKI", "130000")] {
            let raw = format!(
                "[NOM],{name},{time},240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W"
            );
            fleet.absorb(decode_frame(&raw, Some(Century(21))).unwrap());
        }
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.get("PMZA-RIKI").unwrap().frames, 2);
        assert_eq!(fleet.get("IML-4").unwrap().frames, 1);
        assert_eq!(fleet.total_frames(), 3);
    }

    #[test]
    fn test_absorb_without_nom_is_skipped() {
        let mut fleet = FleetData::default();
        let frame = decode_frame("[CTD],7.3413,2.45966,23.2697,18.1612", None).unwrap();
        fleet.absorb(frame);
        assert!(fleet.is_empty());
    }

    #[test]
    fn test_absorb_counts_dropped_tags() {
        let mut fleet = FleetData::default();
        let raw = "[NOM],PMZA-RIKI,110000,240521,8.3.1,000018C0D36B,00.3,00.0,48 39.71N,068 34.90W\n\
                   [CTD],bad,2.45966,23.2697,18.1612\n[OCR],29,220916";
        fleet.absorb(decode_frame(raw, Some(Century(21))).unwrap());
        let buoy = fleet.get("PMZA-RIKI").unwrap();
        assert_eq!(buoy.malformed_tags, 1);
        assert_eq!(buoy.unsupported_tags, 1);
    }

    #[test]
    fn test_absorb_metis() {
        let mut fleet = FleetData::default();
        let frame =
            decode_metis_line("[INIT]IML-6,2024-02-08,23:30:00,48°38.459'N,068°09.406'W,-9.04,0.1,0.4,NAN,NAN,17.6,1.2[CTD]22.1686,4e-05,0.0108,-2.2537[END]")
                .unwrap();
        fleet.absorb_metis(frame);
        let buoy = fleet.get("IML-6").unwrap();
        assert_eq!(buoy.frames, 1);
        assert!(buoy.records.contains_key("CTD"));
        assert!(buoy.records.contains_key("INIT"));
    }
}
