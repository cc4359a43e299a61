mod common;

use std::fs;

use common::{read_fixture, round_trip, write_to_string};
use pdbstruct_io::{read_pdb, write_pdb, write_pdb_file, IoError, PdbWrite, WriteOptions};
use pdbstruct_mol::{CoordFrame, Structure, Vec3, NO_ALTLOC};

fn positions_close(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3 && (a.z - b.z).abs() < 1e-3
}

fn altloc_keys(s: &Structure) -> Vec<(usize, Vec<char>)> {
    s.atoms()
        .filter(|a| !a.other_locations.is_empty())
        .map(|a| (a.idx, a.other_locations.keys().copied().collect()))
        .collect()
}

#[test]
fn identity_round_trip() {
    let original = read_fixture("ala_ala_ala.pdb");
    let copy = round_trip(&original, &WriteOptions::new());

    assert_eq!(copy.atom_count(), original.atom_count());
    assert_eq!(copy.residue_count(), original.residue_count());
    for (a, b) in original.atoms().zip(copy.atoms()) {
        assert_eq!(a.atomic_number(), b.atomic_number());
        assert_eq!(a.name, b.name);
        assert_eq!(a.atom_type, b.atom_type);
        assert_eq!(a.mass, b.mass);
        assert_eq!(a.charge, b.charge);
        assert_eq!(a.bfactor, b.bfactor);
        assert_eq!(a.altloc, b.altloc);
        assert_eq!(a.number, b.number);
        assert!(positions_close(a.position, b.position), "{} moved", a.name);
    }
    for (a, b) in original.residues().iter().zip(copy.residues()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.number, b.number);
        assert_eq!(a.chain, b.chain);
    }
}

#[test]
fn all_conformers_survive() {
    let original = read_fixture("4lzt_fragment.pdb");
    let copy = round_trip(&original, &WriteOptions::new());

    assert_eq!(copy.atom_count(), 45);
    assert_eq!(copy.alternate_count(), 3);
    assert_eq!(altloc_keys(&copy), altloc_keys(&original));

    let cb = copy.residues()[2].find_by_name("CB").unwrap();
    let cb_b = &cb.other_locations[&'B'];
    assert_eq!(cb_b.occupancy, 0.63);
    assert!(positions_close(cb_b.position, Vec3::new(-4.157, 14.955, -0.513)));
}

#[test]
fn first_conformer_only() {
    let original = read_fixture("4lzt_fragment.pdb");
    let options = WriteOptions::new().with_altlocs_str("first").unwrap();
    let copy = round_trip(&original, &options);

    assert_eq!(copy.atom_count(), 45);
    assert_eq!(copy.alternate_count(), 0);
    let cb = copy.residues()[2].find_by_name("CB").unwrap();
    assert_eq!(cb.occupancy, 0.37);
    assert_eq!(cb.altloc, 'A');
    assert!(positions_close(cb.position, Vec3::new(-4.162, 14.530, -1.532)));
}

#[test]
fn highest_occupancy_conformer() {
    let original = read_fixture("4lzt_fragment.pdb");
    let options = WriteOptions::new().with_altlocs_str("occupancy").unwrap();
    let text = write_to_string(&original, &options);
    let copy = pdbstruct_io::read_pdb_str(&text).unwrap();

    assert_eq!(copy.atom_count(), 45);
    assert_eq!(copy.alternate_count(), 0);
    assert!(copy.atoms().all(|a| a.altloc == NO_ALTLOC));

    let ser = &copy.residues()[2];
    let cb = ser.find_by_name("CB").unwrap();
    assert_eq!(cb.occupancy, 0.63);
    assert!(positions_close(cb.position, Vec3::new(-4.157, 14.955, -0.513)));
    let og = ser.find_by_name("OG").unwrap();
    assert!(positions_close(og.position, Vec3::new(14.175, 13.596, 8.648)));

    // Equal occupancies keep the conformer read first
    let nh1 = copy.residues()[3].find_by_name("NH1").unwrap();
    assert_eq!(nh1.occupancy, 0.51);
    assert!(positions_close(nh1.position, Vec3::new(24.559, 1.137, 6.612)));
}

#[test]
fn renumbering_is_dense() {
    let original = read_fixture("4lzt_fragment.pdb");
    let copy = round_trip(&original, &WriteOptions::new());

    let numbers: Vec<i32> = copy
        .atoms()
        .flat_map(|a| a.conformers())
        .map(|c| c.number)
        .collect();
    assert_eq!(numbers, (1..=48).collect::<Vec<i32>>());

    let residues: Vec<i32> = copy.residues().iter().map(|r| r.number).collect();
    assert_eq!(residues, (1..=8).collect::<Vec<i32>>());
}

#[test]
fn original_numbers_without_renumbering() {
    let original = read_fixture("4lzt_fragment.pdb");
    let copy = round_trip(&original, &WriteOptions::new().with_renumber(false));

    let residues: Vec<i32> = copy.residues().iter().map(|r| r.number).collect();
    assert_eq!(residues, vec![1, 2, 85, 128, 129, 201, 202, 203]);
    for (a, b) in original.atoms().zip(copy.atoms()) {
        assert_eq!(a.number, b.number);
    }
    assert_eq!(copy.residues()[5][0].number, 47);
}

#[test]
fn ter_flags_survive() {
    let original = read_fixture("4lzt_fragment.pdb");
    let text = write_to_string(&original, &WriteOptions::new());
    assert_eq!(text.lines().filter(|l| l.starts_with("TER")).count(), 1);

    let copy = pdbstruct_io::read_pdb_str(&text).unwrap();
    let ter: Vec<bool> = copy.residues().iter().map(|r| r.ter).collect();
    let expected: Vec<bool> = original.residues().iter().map(|r| r.ter).collect();
    assert_eq!(ter, expected);
}

#[test]
fn metadata_and_cell_survive() {
    let original = read_fixture("4lzt_fragment.pdb");
    let copy = round_trip(&original, &WriteOptions::new());

    assert_eq!(copy.metadata, original.metadata);
    assert_eq!(copy.box_dims(), original.box_dims());
    assert_eq!(copy.space_group(), Some("P 1"));
}

#[test]
fn title_wrapped_at_comma_survives() {
    let mut original = read_fixture("ala_ala_ala.pdb");
    let title = "CRYSTAL STRUCTURE OF HEN EGG-WHITE LYSOZYME BOUND TO CHITOBIOSE, TRIS AND SULFATE";
    original.metadata.title = Some(title.to_string());

    let text = write_to_string(&original, &WriteOptions::new());
    let first = text.lines().next().unwrap();
    assert!(first.ends_with("CHITOBIOSE,"), "{}", first);

    let copy = pdbstruct_io::read_pdb_str(&text).unwrap();
    assert_eq!(copy.metadata.title.as_deref(), Some(title));
}

#[test]
fn metadata_can_be_skipped() {
    let original = read_fixture("4lzt_fragment.pdb");
    let text = write_to_string(&original, &WriteOptions::new().with_metadata(false));
    assert!(text.starts_with("CRYST1"));
    let copy = pdbstruct_io::read_pdb_str(&text).unwrap();
    assert!(copy.metadata.is_empty());
}

#[test]
fn ensemble_frames_survive() {
    let original = read_fixture("2koc_fragment.pdb");
    let text = write_to_string(&original, &WriteOptions::new());
    assert_eq!(text.lines().filter(|l| l.starts_with("MODEL")).count(), 3);
    assert_eq!(text.lines().filter(|l| *l == "ENDMDL").count(), 3);

    let copy = pdbstruct_io::read_pdb_str(&text).unwrap();
    assert_eq!(copy.frame_count(), 3);
    assert_eq!(copy.pdbxyz(), original.pdbxyz());
}

#[test]
fn added_frame_with_alternates() {
    let mut original = read_fixture("4lzt_fragment.pdb");
    let shifted: Vec<Vec3> = original
        .atoms()
        .map(|a| Vec3::new(a.position.x + 1.0, a.position.y, a.position.z - 2.0))
        .collect();
    original.push_frame(CoordFrame::from_vec3(&shifted)).unwrap();

    let copy = round_trip(&original, &WriteOptions::new());
    assert_eq!(copy.frame_count(), 2);
    assert_eq!(copy.atom_count(), 45);
    assert_eq!(copy.alternate_count(), 3);
    for (i, expected) in shifted.iter().enumerate() {
        let pos = copy.position(1, i).unwrap();
        assert!(positions_close(pos, *expected), "atom {} in frame 1", i);
    }
}

#[test]
fn invalid_altloc_policy_writes_nothing() {
    let s = read_fixture("ala_ala_ala.pdb");
    let mut out: Vec<u8> = Vec::new();
    let result = WriteOptions::new()
        .with_altlocs_str("best")
        .and_then(|o| write_pdb(&s, &mut out, &o));
    assert!(matches!(result, Err(IoError::InvalidOption { option: "altlocs", .. })));
    assert!(out.is_empty());
}

#[test]
fn gzip_output_for_gz_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdb.gz");
    let original = read_fixture("4lzt_fragment.pdb");
    write_pdb_file(&path, &original, &WriteOptions::new()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b]);

    let copy = read_pdb(&path).unwrap();
    assert_eq!(copy.atom_count(), 45);
    assert_eq!(copy.metadata, original.metadata);
}

#[test]
fn plain_output_for_other_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdb");
    let original = read_fixture("ala_ala_ala.pdb");
    original.write_pdb_file(&path, &WriteOptions::new()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ATOM      1  N   ALA     1"));
    assert!(text.ends_with("END\n"));
}

#[test]
fn method_and_function_agree() {
    let s = read_fixture("2koc_fragment.pdb");
    let options = WriteOptions::new().with_renumber(false);
    let mut via_method = Vec::new();
    s.write_pdb(&mut via_method, &options).unwrap();
    assert_eq!(String::from_utf8(via_method).unwrap(), write_to_string(&s, &options));
}
