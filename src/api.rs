use crate::atoms::{Atom, FourCC};
use crate::catalog::{self, ImageKey, PairKey, StringKey, Uint16Key, Uint32Key, Uint64Key, Uint8Key};
use crate::metadata;
use crate::parser::{Result, parse_root};
use log::info;

/// Read-only reflection of one M4A file's atom structure.
///
/// Borrows the caller's buffer for its lifetime; large payload regions
/// (`mdat`, artwork) stay views into that buffer and are never copied.
///
/// # Example
/// ```no_run
/// use m4ameta::{M4aFile, StringKey};
///
/// let data = std::fs::read("song.m4a")?;
/// let file = M4aFile::parse(&data)?;
/// if let Some(title) = file.string_metadata(StringKey::Title) {
///     println!("{title}");
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct M4aFile<'a> {
    atoms: Vec<Atom<'a>>,
}

impl<'a> M4aFile<'a> {
    /// Parse a complete file buffer into the root atom list.
    ///
    /// Construction is all-or-nothing; see [`crate::ParseError`] for the
    /// failure cases. Metadata problems never fail the parse — ilst entries
    /// with no catalog counterpart are only reported through `log`.
    pub fn parse(data: &'a [u8]) -> Result<M4aFile<'a>> {
        let atoms = parse_root(data)?;
        let file = M4aFile { atoms };

        if let Some(ilst) = file.metadata_block() {
            for child in &ilst.children {
                if catalog::lookup(child.typ).is_none() {
                    info!("unrecognized metadata type: {}", child.typ);
                }
            }
        }

        Ok(file)
    }

    /// The ordered root-level atoms.
    pub fn atoms(&self) -> &[Atom<'a>] {
        &self.atoms
    }

    /// The `ilst` metadata container, if the file carries the full
    /// `moov/udta/meta/ilst` chain.
    pub fn metadata_block(&self) -> Option<&Atom<'a>> {
        metadata::metadata_block(&self.atoms)
    }

    fn metadata_child(&self, code: FourCC) -> Option<&Atom<'a>> {
        self.metadata_block()?.child(code)
    }

    pub fn string_metadata(&self, key: StringKey) -> Option<String> {
        let atom = self.metadata_child(key.code())?;
        let data = metadata::unwrap_data_atom(atom)?;
        Some(metadata::decode_text(data))
    }

    pub fn uint8_metadata(&self, key: Uint8Key) -> Option<u8> {
        let atom = self.metadata_child(key.code())?;
        metadata::decode_u8(metadata::unwrap_data_atom(atom)?)
    }

    pub fn uint16_metadata(&self, key: Uint16Key) -> Option<u16> {
        let atom = self.metadata_child(key.code())?;
        metadata::decode_u16(metadata::unwrap_data_atom(atom)?)
    }

    pub fn uint32_metadata(&self, key: Uint32Key) -> Option<u32> {
        let atom = self.metadata_child(key.code())?;
        metadata::decode_u32(metadata::unwrap_data_atom(atom)?)
    }

    pub fn uint64_metadata(&self, key: Uint64Key) -> Option<u64> {
        let atom = self.metadata_child(key.code())?;
        metadata::decode_u64(metadata::unwrap_data_atom(atom)?)
    }

    /// Position/total pair, e.g. track 3 of 12.
    pub fn int_pair_metadata(&self, key: PairKey) -> Option<(u16, u16)> {
        let atom = self.metadata_child(key.code())?;
        metadata::decode_pair(metadata::unwrap_data_atom(atom)?)
    }

    /// Raw artwork bytes, borrowed from the source buffer. The image format
    /// is whatever the file embedded; callers sniff it themselves.
    pub fn image_metadata(&self, key: ImageKey) -> Option<&'a [u8]> {
        let atom = self.metadata_child(key.code())?;
        Some(metadata::decode_image(metadata::unwrap_data_atom(atom)?))
    }
}
