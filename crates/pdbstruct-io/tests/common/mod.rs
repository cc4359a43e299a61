#![allow(dead_code)]

use std::path::PathBuf;

use pdbstruct_io::{read_pdb, read_pdb_str, write_pdb, WriteOptions};
use pdbstruct_mol::Structure;

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn read_fixture(name: &str) -> Structure {
    read_pdb(&data_path(name)).unwrap()
}

pub fn write_to_string(structure: &Structure, options: &WriteOptions) -> String {
    let mut out = Vec::new();
    write_pdb(structure, &mut out, options).unwrap();
    String::from_utf8(out).unwrap()
}

/// Write then read back
pub fn round_trip(structure: &Structure, options: &WriteOptions) -> Structure {
    read_pdb_str(&write_to_string(structure, options)).unwrap()
}
