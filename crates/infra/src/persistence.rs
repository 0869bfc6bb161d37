// crates/infra/src/persistence.rs
pub mod file_writer;
pub mod listing;

pub use file_writer::FileWriter;
pub use listing::ListingWriter;
