pub mod descriptive_statistics;
pub mod timing_sequence;

pub use descriptive_statistics::{speedup, DescriptiveStatistics};
pub use timing_sequence::TimingSequence;
