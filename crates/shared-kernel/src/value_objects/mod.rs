pub mod entry_kind;
pub mod file_record;
pub mod file_size;
pub mod timestamp;

pub use entry_kind::EntryKind;
pub use file_record::{FileRecord, SizeRecord};
pub use file_size::{FileSize, parse_byte_size};
pub use timestamp::Timestamp;
