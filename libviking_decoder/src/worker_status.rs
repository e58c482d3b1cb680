#[derive(Debug, Clone, Default)]
pub enum BarColor {
    #[default]
    CYAN,
    GREEN,
}

/// Progress report sent from the processing thread to the UI layer.
#[derive(Debug, Clone, Default)]
pub struct WorkerStatus {
    pub progress: f32,
    pub file_number: usize,
    pub color: BarColor,
}

impl WorkerStatus {
    pub fn new(progress: f32, file_number: usize, color: BarColor) -> Self {
        Self {
            progress,
            file_number,
            color,
        }
    }
}
