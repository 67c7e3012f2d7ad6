pub mod analysis;
pub mod mode;
pub mod survey;
