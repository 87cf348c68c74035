pub mod clock;

pub use clock::{parse_clock_label, MeridiemRules};
