use m4ameta::atoms::FourCC;
use m4ameta::parser::{ParseError, parse_root};

/// size + type header followed by the payload verbatim.
fn atom(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&((8 + payload.len()) as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

#[test]
fn parse_single_ftyp() {
    let mut data = atom(b"ftyp", b"M4A ");
    data.extend_from_slice(&0u32.to_be_bytes()); // minor version
    // declared size covers the extra 4 bytes
    data[..4].copy_from_slice(&16u32.to_be_bytes());

    let atoms = parse_root(&data).expect("parse_root failed");
    assert_eq!(atoms.len(), 1);
    assert_eq!(atoms[0].typ, FourCC(*b"ftyp"));
    assert_eq!(atoms[0].offset, 0);
    assert_eq!(atoms[0].payload.len(), 16 - 8);
    assert!(atoms[0].children.is_empty());
    assert!(!atoms[0].extended_size);
}

#[test]
fn parse_consumes_buffer_exactly() {
    let mut data = atom(b"ftyp", b"M4A \x00\x00\x00\x00");
    data.extend_from_slice(&atom(b"free", &[]));
    data.extend_from_slice(&atom(b"mdat", &[0u8; 9]));

    let atoms = parse_root(&data).expect("parse_root failed");
    assert_eq!(atoms.len(), 3);
    assert_eq!(atoms[1].typ, FourCC(*b"free"));
    assert_eq!(atoms[1].offset, 16);
    assert_eq!(atoms[2].payload.len(), 9);

    let total: usize = atoms.iter().map(|a| a.size()).sum();
    assert_eq!(total, data.len());
}

#[test]
fn short_buffer_is_invalid_file() {
    let err = parse_root(b"short").unwrap_err();
    assert!(matches!(err, ParseError::InvalidFile));
}

#[test]
fn unknown_root_type_aborts() {
    let mut data = atom(b"ftyp", b"M4A \x00\x00\x00\x00");
    data.extend_from_slice(&atom(b"zzzz", &[1, 2, 3]));

    let err = parse_root(&data).unwrap_err();
    match err {
        ParseError::InvalidBlockType(cc) => assert_eq!(cc, FourCC(*b"zzzz")),
        other => panic!("expected InvalidBlockType, got {other:?}"),
    }
}

#[test]
fn oversized_root_atom_is_rejected() {
    let mut data = atom(b"free", &[0u8; 4]);
    // declared size runs past the end of the buffer
    data[..4].copy_from_slice(&100u32.to_be_bytes());

    let err = parse_root(&data).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { offset: 0, size: 100 }));
}

#[test]
fn undersized_root_atom_is_rejected() {
    let mut data = atom(b"free", &[0u8; 4]);
    data[..4].copy_from_slice(&4u32.to_be_bytes());

    let err = parse_root(&data).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { size: 4, .. }));
}

#[test]
fn trailing_garbage_is_rejected() {
    let mut data = atom(b"free", &[]);
    data.extend_from_slice(&[0u8; 7]); // not enough for another header

    let err = parse_root(&data).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { offset: 8, size: 7 }));
}

#[test]
fn mdat_size_one_reads_extended_size() {
    // mdat with size field 1: the real size sits 12 bytes into the atom.
    let real_size = 28u32;
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0u8; 4]); // high half of the 64-bit size, ignored
    data.extend_from_slice(&real_size.to_be_bytes());
    data.extend_from_slice(&[0xaa; 12]); // media bytes up to the declared size

    assert_eq!(data.len(), real_size as usize);

    let atoms = parse_root(&data).expect("parse_root failed");
    assert_eq!(atoms.len(), 1);
    assert_eq!(atoms[0].typ, FourCC(*b"mdat"));
    assert!(atoms[0].extended_size);
    // payload spans from the 8-byte header to the resolved size, so it still
    // contains the extended-size field itself
    assert_eq!(atoms[0].payload.len(), real_size as usize - 8);
}

#[test]
fn mdat_size_one_needs_room_for_extended_size() {
    let mut data = Vec::new();
    data.extend_from_slice(&1u32.to_be_bytes());
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0u8; 4]); // truncated before the size field

    let err = parse_root(&data).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { .. }));
}

#[test]
fn moov_expands_children() {
    let free = atom(b"free", &[1, 2, 3]);
    let data = atom(b"moov", &free);

    let atoms = parse_root(&data).expect("parse_root failed");
    assert_eq!(atoms[0].children.len(), 1);
    assert_eq!(atoms[0].children[0].typ, FourCC(*b"free"));
    assert_eq!(atoms[0].children[0].payload, &[1, 2, 3]);
}

#[test]
fn nested_types_are_not_checked_against_root_list() {
    // zzzz is rejected at the root but fine inside moov
    let child = atom(b"zzzz", &[9; 5]);
    let data = atom(b"moov", &child);

    let atoms = parse_root(&data).expect("parse_root failed");
    assert_eq!(atoms[0].children[0].typ, FourCC(*b"zzzz"));
}

#[test]
fn meta_skips_reserved_bytes() {
    let ilst = atom(b"ilst", &[]);
    let mut meta_payload = vec![0u8; 4];
    meta_payload.extend_from_slice(&ilst);
    let meta = atom(b"meta", &meta_payload);
    let udta = atom(b"udta", &meta);
    let data = atom(b"moov", &udta);

    let atoms = parse_root(&data).expect("parse_root failed");
    let meta = &atoms[0].children[0].children[0];
    assert_eq!(meta.typ, FourCC(*b"meta"));
    assert_eq!(meta.children.len(), 1);
    assert_eq!(meta.children[0].typ, FourCC(*b"ilst"));
}

#[test]
fn ilst_children_expand_one_level() {
    let data_atom = atom(b"data", &[0u8; 12]);
    let nam = atom(&[0xa9, b'n', b'a', b'm'], &data_atom);
    let ilst = atom(b"ilst", &nam);
    let mut meta_payload = vec![0u8; 4];
    meta_payload.extend_from_slice(&ilst);
    let meta = atom(b"meta", &meta_payload);
    let udta = atom(b"udta", &meta);
    let file = atom(b"moov", &udta);

    let atoms = parse_root(&file).expect("parse_root failed");
    let ilst = &atoms[0].children[0].children[0].children[0];
    assert_eq!(ilst.typ, FourCC(*b"ilst"));

    // the keyed entry expands because its parent is ilst...
    let nam = &ilst.children[0];
    assert_eq!(nam.typ, FourCC([0xa9, b'n', b'a', b'm']));
    assert_eq!(nam.children.len(), 1);

    // ...but its data child is a leaf
    let data = &nam.children[0];
    assert_eq!(data.typ, FourCC(*b"data"));
    assert!(data.children.is_empty());
}

#[test]
fn leaf_payload_is_stored_verbatim() {
    // an atom-shaped payload inside a non-container type must not recurse
    let inner = atom(b"free", &[7; 4]);
    let data = atom(b"mdat", &inner);

    let atoms = parse_root(&data).expect("parse_root failed");
    assert!(atoms[0].children.is_empty());
    assert_eq!(atoms[0].payload, inner.as_slice());
}

#[test]
fn corrupt_nested_size_aborts() {
    let mut child = atom(b"free", &[0u8; 4]);
    child[..4].copy_from_slice(&200u32.to_be_bytes());
    let data = atom(b"moov", &child);

    let err = parse_root(&data).unwrap_err();
    assert!(matches!(err, ParseError::InvalidSize { size: 200, .. }));
}
