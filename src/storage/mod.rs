pub mod csv_writer;
pub mod sink;
pub mod status;
pub mod utils;
