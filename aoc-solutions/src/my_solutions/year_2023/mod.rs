pub mod day_16;
pub mod day_17;
pub mod day_23;
