pub mod averager;
pub mod history;
pub mod merge;
pub mod peaks;
pub mod rank;
pub mod threshold;

pub use averager::SweepAverager;
pub use history::{DetectionHistory, HistoryPoint, PeakHistory};
pub use merge::merge_peaks;
pub use peaks::{find_first_crossing, find_peaks};
pub use rank::sort_peaks;
pub use threshold::{ThresholdCurve, ThresholdEngine};
