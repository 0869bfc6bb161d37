use std::fmt;

use dwalk_shared_kernel::FileSize;
use serde::Serialize;

use super::BucketSource;

/// Upper bound of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Bytes(u64),
    /// Open-ended overflow bin of a user-supplied distribution.
    Max,
}

/// One histogram line: `(lower, upper]` and its global count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BinRow {
    pub lower: u64,
    pub upper: Bound,
    pub count: u64,
}

/// Global size distribution, identical on every worker after the reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionReport {
    source: BucketSource,
    rows: Vec<BinRow>,
}

impl DistributionReport {
    pub fn new(rows: Vec<BinRow>, source: BucketSource) -> Self {
        Self { source, rows }
    }

    pub fn rows(&self) -> &[BinRow] {
        &self.rows
    }

    pub fn source(&self) -> BucketSource {
        self.source
    }

    pub fn counts(&self) -> Vec<u64> {
        self.rows.iter().map(|row| row.count).collect()
    }

    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }
}

struct Units(u64);

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, units) = FileSize::new(self.0).to_units();
        write!(f, "{value:7.3} {units:>2}")
    }
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<27} Number", "Range")?;
        for row in &self.rows {
            write!(f, "[ {} - ", Units(row.lower))?;
            match row.upper {
                Bound::Bytes(upper) => write!(f, "{}", Units(upper))?,
                Bound::Max => write!(f, "{:>10}", "MAX")?,
            }
            writeln!(f, " ) {}", row.count)?;
        }
        Ok(())
    }
}
