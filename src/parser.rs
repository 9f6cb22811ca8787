use crate::atoms::{Atom, FourCC};
use byteorder::{BigEndian, ByteOrder};

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// Buffer too short to hold a single atom header.
    #[error("not a valid M4A file")]
    InvalidFile,
    /// Root-level atom type outside the recognized set.
    #[error("invalid block type `{0}`")]
    InvalidBlockType(FourCC),
    /// A declared atom size that cannot fit its container.
    #[error("invalid atom size {size} at offset {offset}")]
    InvalidSize { offset: usize, size: u64 },
}

pub type Result<T> = std::result::Result<T, ParseError>;

// Types accepted at the file root. Nested atoms are not checked.
fn is_root_type(cc: FourCC) -> bool {
    matches!(&cc.0,
        b"ftyp" | b"mdat" | b"moov" | b"pnot" | b"udta" |
        b"uuid" | b"moof" | b"free" | b"skip" | b"jP2 " |
        b"wide" | b"load" | b"ctab" | b"imap" | b"matt" |
        b"kmat" | b"clip" | b"crgn" | b"sync" | b"chap" |
        b"tmcd" | b"scpt" | b"ssrc" | b"PICT"
    )
}

// An atom is expanded into children only if it is one of the metadata-path
// containers, or if it sits directly inside an ilst container.
fn is_expanded(typ: FourCC, parent: Option<FourCC>) -> bool {
    matches!(&typ.0, b"moov" | b"udta" | b"meta" | b"ilst")
        || parent.is_some_and(|p| &p.0 == b"ilst")
}

/// Parse the root atom sequence of a complete file buffer.
///
/// Fails with [`ParseError::InvalidFile`] on buffers shorter than one atom
/// header, [`ParseError::InvalidBlockType`] on an unrecognized root type,
/// and [`ParseError::InvalidSize`] when a declared size overruns the buffer.
/// No partial tree is ever returned.
pub fn parse_root(data: &[u8]) -> Result<Vec<Atom<'_>>> {
    if data.len() < 8 {
        return Err(ParseError::InvalidFile);
    }

    let mut atoms = Vec::new();
    let mut index = 0usize;
    while index < data.len() {
        let remaining = data.len() - index;
        // A corrupt size from the previous atom never lands exactly on the
        // buffer end.
        if remaining < 8 {
            return Err(ParseError::InvalidSize { offset: index, size: remaining as u64 });
        }

        let mut size = BigEndian::read_u32(&data[index..index + 4]) as usize;
        let typ = FourCC([data[index + 4], data[index + 5], data[index + 6], data[index + 7]]);

        if !is_root_type(typ) {
            return Err(ParseError::InvalidBlockType(typ));
        }

        let mut extended = false;
        if size == 1 && &typ.0 == b"mdat" {
            // mdat sometimes carries size 1 with the real size 12 bytes into
            // the atom. Only the low 32 bits of the extended size field are
            // read, so declared sizes above 4 GiB truncate.
            if remaining < 16 {
                return Err(ParseError::InvalidSize { offset: index, size: remaining as u64 });
            }
            size = BigEndian::read_u32(&data[index + 12..index + 16]) as usize;
            extended = true;
        }

        if size < 8 || size > remaining {
            return Err(ParseError::InvalidSize { offset: index, size: size as u64 });
        }

        let payload = &data[index + 8..index + size];
        let mut atom = build_atom(typ, index, payload, None)?;
        atom.extended_size = extended;
        atoms.push(atom);

        index += size;
    }

    Ok(atoms)
}

/// Build one atom node, recursing into its payload when the type calls for it.
pub(crate) fn build_atom<'a>(
    typ: FourCC,
    offset: usize,
    payload: &'a [u8],
    parent: Option<FourCC>,
) -> Result<Atom<'a>> {
    let mut children = Vec::new();

    if is_expanded(typ, parent) {
        // The first 4 bytes of meta are reserved.
        let mut index = if &typ.0 == b"meta" { 4.min(payload.len()) } else { 0 };

        while index < payload.len() {
            let remaining = payload.len() - index;
            if remaining < 8 {
                return Err(ParseError::InvalidSize {
                    offset: offset + 8 + index,
                    size: remaining as u64,
                });
            }

            let size = BigEndian::read_u32(&payload[index..index + 4]) as usize;
            let child_typ = FourCC([
                payload[index + 4],
                payload[index + 5],
                payload[index + 6],
                payload[index + 7],
            ]);

            if size < 8 || size > remaining {
                return Err(ParseError::InvalidSize {
                    offset: offset + 8 + index,
                    size: size as u64,
                });
            }

            let child_payload = &payload[index + 8..index + size];
            children.push(build_atom(child_typ, offset + 8 + index, child_payload, Some(typ))?);

            index += size;
        }
    }

    Ok(Atom { typ, offset, payload, children, extended_size: false })
}
