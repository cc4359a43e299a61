//! Reader and writer traits, and writer options

use std::fmt;
use std::str::FromStr;

use pdbstruct_mol::Structure;

use crate::error::{IoError, IoResult};

/// Trait for reading a structure from a source
pub trait StructureReader {
    /// Read the whole source into one structure
    fn read(&mut self) -> IoResult<Structure>;
}

/// Trait for writing structures to a destination
pub trait StructureWriter {
    /// Write one structure
    fn write(&mut self, structure: &Structure) -> IoResult<()>;

    /// Flush any buffered data
    fn flush(&mut self) -> IoResult<()>;
}

/// Which conformers the writer emits for atoms with alternate locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AltlocPolicy {
    /// Primary atom followed by every alternate, each as its own record
    #[default]
    All,
    /// Only the primary (first-read) conformer
    First,
    /// The conformer with the greatest occupancy, with its altloc cleared
    Occupancy,
}

impl AltlocPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AltlocPolicy::All => "all",
            AltlocPolicy::First => "first",
            AltlocPolicy::Occupancy => "occupancy",
        }
    }
}

impl FromStr for AltlocPolicy {
    type Err = IoError;

    fn from_str(s: &str) -> IoResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(AltlocPolicy::All),
            "first" => Ok(AltlocPolicy::First),
            "occupancy" => Ok(AltlocPolicy::Occupancy),
            _ => Err(IoError::invalid_option("altlocs", s)),
        }
    }
}

impl fmt::Display for AltlocPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for writing PDB files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Reassign atom and residue numbers densely from 1 in output order
    pub renumber: bool,
    /// Alternate conformer selection
    pub altlocs: AltlocPolicy,
    /// Write header records (HEADER, TITLE, JRNL, ...) before the coordinates
    pub write_metadata: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            renumber: true,
            altlocs: AltlocPolicy::All,
            write_metadata: true,
        }
    }
}

impl WriteOptions {
    /// Create default write options
    pub fn new() -> Self {
        WriteOptions::default()
    }

    pub fn with_renumber(mut self, renumber: bool) -> Self {
        self.renumber = renumber;
        self
    }

    pub fn with_altlocs(mut self, altlocs: AltlocPolicy) -> Self {
        self.altlocs = altlocs;
        self
    }

    /// Set the altloc policy from its name (`"all"`, `"first"`, `"occupancy"`)
    pub fn with_altlocs_str(self, altlocs: &str) -> IoResult<Self> {
        Ok(self.with_altlocs(altlocs.parse()?))
    }

    pub fn with_metadata(mut self, write_metadata: bool) -> Self {
        self.write_metadata = write_metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = WriteOptions::new();
        assert!(opts.renumber);
        assert_eq!(opts.altlocs, AltlocPolicy::All);
        assert!(opts.write_metadata);
    }

    #[test]
    fn test_parse_altloc_policy() {
        assert_eq!("all".parse::<AltlocPolicy>().unwrap(), AltlocPolicy::All);
        assert_eq!("First".parse::<AltlocPolicy>().unwrap(), AltlocPolicy::First);
        assert_eq!(
            " occupancy ".parse::<AltlocPolicy>().unwrap(),
            AltlocPolicy::Occupancy
        );
        assert!(matches!(
            "best".parse::<AltlocPolicy>(),
            Err(IoError::InvalidOption { option: "altlocs", .. })
        ));
    }

    #[test]
    fn test_builder() {
        let opts = WriteOptions::new()
            .with_renumber(false)
            .with_altlocs_str("occupancy")
            .unwrap()
            .with_metadata(false);
        assert!(!opts.renumber);
        assert_eq!(opts.altlocs, AltlocPolicy::Occupancy);
        assert!(!opts.write_metadata);
        assert!(WriteOptions::new().with_altlocs_str("none").is_err());
    }
}
