// crates/infra/src/persistence/listing.rs
use std::{io::Write, path::Path};

use dwalk_ports::NameResolver;
use dwalk_shared_kernel::{FileSize, InfraResult, SizeRecord};
use log::info;

use super::FileWriter;

/// Plain-text listing of records, one per line:
/// `<type> <user> <group> <size> <units> <mtime> <path>`.
pub struct ListingWriter<'a> {
    resolver: &'a dyn NameResolver,
}

impl<'a> ListingWriter<'a> {
    pub fn new(resolver: &'a dyn NameResolver) -> Self {
        Self { resolver }
    }

    pub fn format_line<R: SizeRecord + ?Sized>(&self, record: &R) -> String {
        let user = self.resolver.uid_to_name(record.uid()).unwrap_or_else(|| record.uid().to_string());
        let group = self.resolver.gid_to_name(record.gid()).unwrap_or_else(|| record.gid().to_string());
        let (value, units) = FileSize::new(record.size()).to_units();
        format!(
            "{} {user:<8} {group:<8} {value:7.3} {units:>2} {} {}",
            record.kind().type_char(),
            record.mtime(),
            record.path().display()
        )
    }

    pub fn write<W: Write, R: SizeRecord>(&self, writer: &mut W, records: &[R]) -> std::io::Result<()> {
        for record in records {
            writeln!(writer, "{}", self.format_line(record))?;
        }
        Ok(())
    }

    /// Writes the listing to `path` (`--text-output`).
    pub fn write_to_path<R: SizeRecord>(&self, path: &Path, records: &[R]) -> InfraResult<()> {
        FileWriter::write_with(path, |w| self.write(w, records))?;
        info!("Wrote {} items to {}", records.len(), path.display());
        Ok(())
    }
}
