use std::sync::mpsc::Sender;

use super::block::frame_blocks;
use super::buoy_data::FleetData;
use super::config::{Config, TelemetryFormat};
use super::dat_stack::DatStack;
use super::error::ProcessorError;
use super::frame::decode_frame;
use super::metis::decode_metis_line;
use super::timestamp::Century;
use super::worker_status::{BarColor, WorkerStatus};

/// The main loop of viking_decoder.
///
/// Walks the dat stack, extracts and decodes every frame, accumulates the
/// results per buoy and writes the YAML exports. Per-segment decode failures
/// were already absorbed into the frame summaries; a missing century hint on
/// a format that needs one aborts the run.
pub fn process_directory(config: &Config, tx: &Sender<WorkerStatus>) -> Result<(), ProcessorError> {
    let dat_dir = config.get_dat_directory()?;
    let export_dir = config.get_export_directory()?;
    let century = config.century.map(Century);

    let mut stack = DatStack::new(&dat_dir)?;
    let total_data_size = stack.total_stack_size_bytes;
    log::info!(
        "Total transmission size: {}",
        human_bytes::human_bytes(total_data_size as f64)
    );

    let flush_frac: f32 = 0.01;
    let flush_val = (total_data_size as f64 * flush_frac as f64) as u64;
    let mut count: u64 = 0;
    let mut progress: f32 = 0.0;
    let mut file_number: usize = 0;

    let mut fleet = FleetData::default();

    tx.send(WorkerStatus::new(0.0, file_number, BarColor::CYAN))?;
    while let Some((path, contents)) = stack.next_file()? {
        file_number += 1;
        log::info!("Decoding {}...", path.to_string_lossy());

        match config.format {
            TelemetryFormat::Viking => {
                for block in frame_blocks(&contents) {
                    let frame = decode_frame(block, century)?;
                    if frame.summary.dropped() > 0 {
                        log::warn!(
                            "Frame in {} dropped {} tag(s)",
                            path.to_string_lossy(),
                            frame.summary.dropped()
                        );
                    }
                    fleet.absorb(frame);
                }
            }
            TelemetryFormat::Metis => {
                for line in contents.lines().filter(|line| line.contains('[')) {
                    let frame = decode_metis_line(line)?;
                    if !frame.is_empty() {
                        fleet.absorb_metis(frame);
                    }
                }
            }
        }

        count += contents.len() as u64;
        if count > flush_val {
            count = 0;
            progress += flush_frac;
            tx.send(WorkerStatus::new(progress, file_number, BarColor::CYAN))?;
        }
    }

    log::info!(
        "Decoded {} frame(s) from {} buoy(s).",
        fleet.total_frames(),
        fleet.len()
    );

    tx.send(WorkerStatus::new(1.0, file_number, BarColor::GREEN))?;
    let written = super::export::write_fleet(&fleet, &export_dir)?;
    for path in written {
        log::info!("Wrote {}", path.to_string_lossy());
    }
    Ok(())
}
