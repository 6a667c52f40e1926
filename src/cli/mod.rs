pub mod generate;
pub mod options;
pub mod status;
