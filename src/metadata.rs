use crate::atoms::{Atom, FourCC};
use crate::catalog::MetadataKind;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::warn;

/// Class marker carried by `data` atoms wrapping text values.
pub const STRING_MARKER: [u8; 8] = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00];
/// Class marker carried by `data` atoms wrapping integer values.
pub const INT_MARKER: [u8; 8] = [0x00, 0x00, 0x00, 0x15, 0x00, 0x00, 0x00, 0x00];

/// Resolve the `moov → udta → meta → ilst` chain over immediate children.
///
/// Returns `None` the moment any hop is missing.
pub fn metadata_block<'f, 'a>(roots: &'f [Atom<'a>]) -> Option<&'f Atom<'a>> {
    let moov = roots.iter().find(|a| &a.typ.0 == b"moov")?;
    let udta = moov.child(FourCC(*b"udta"))?;
    let meta = udta.child(FourCC(*b"meta"))?;
    meta.child(FourCC(*b"ilst"))
}

/// Unwrap the single nested `data` record inside an ilst child.
///
/// The payload must be exactly one record: u32 size, `data` tag, 8-byte
/// class marker, value bytes, with the declared size covering all of it.
/// Returns the record's own payload — the marker followed by the value.
/// Every violation is non-fatal and yields `None`.
pub(crate) fn unwrap_data_atom<'a>(atom: &Atom<'a>) -> Option<&'a [u8]> {
    let payload = atom.payload;
    if payload.len() < 16 {
        warn!("metadata atom `{}` too short to hold a data record", atom.typ);
        return None;
    }

    let size = BigEndian::read_u32(&payload[..4]) as usize;
    if &payload[4..8] != b"data" {
        warn!("could not read metadata entry type for `{}`", atom.typ);
        return None;
    }

    let marker = &payload[8..16];
    if marker != STRING_MARKER && marker != INT_MARKER {
        return None;
    }

    if size != payload.len() {
        warn!("metadata atom `{}` declared size does not match its data record", atom.typ);
        return None;
    }

    Some(&payload[8..])
}

pub(crate) fn decode_text(data: &[u8]) -> String {
    String::from_utf8_lossy(&data[8..]).into_owned()
}

pub(crate) fn decode_u8(data: &[u8]) -> Option<u8> {
    if data.len() != 9 {
        warn!("uint8 metadata should carry 1 byte of data");
        return None;
    }
    Some(data[8])
}

// The fixed-width integer values below are assembled little-endian, reversed
// relative to the big-endian convention everywhere else in the format.

pub(crate) fn decode_u16(data: &[u8]) -> Option<u16> {
    if data.len() != 10 {
        warn!("uint16 metadata should carry 2 bytes of data");
        return None;
    }
    Some(LittleEndian::read_u16(&data[8..10]))
}

pub(crate) fn decode_u32(data: &[u8]) -> Option<u32> {
    if data.len() != 12 {
        warn!("uint32 metadata should carry 4 bytes of data");
        return None;
    }
    Some(LittleEndian::read_u32(&data[8..12]))
}

pub(crate) fn decode_u64(data: &[u8]) -> Option<u64> {
    if data.len() != 16 {
        warn!("uint64 metadata should carry 8 bytes of data");
        return None;
    }
    Some(LittleEndian::read_u64(&data[8..16]))
}

/// Position/total pair layout: 2 padding bytes after the marker, then two
/// big-endian 16-bit fields at offsets 10 and 12.
pub(crate) fn decode_pair(data: &[u8]) -> Option<(u16, u16)> {
    if data.len() != 16 {
        warn!("invalid two int metadata read attempted");
        return None;
    }
    let first = BigEndian::read_u16(&data[10..12]);
    let second = BigEndian::read_u16(&data[12..14]);
    Some((first, second))
}

pub(crate) fn decode_image(data: &[u8]) -> &[u8] {
    &data[8..]
}

/// Human-readable rendition of a recognized ilst child, for tool output.
pub fn display_value(atom: &Atom<'_>, kind: MetadataKind) -> Option<String> {
    let data = unwrap_data_atom(atom)?;
    match kind {
        MetadataKind::Text => Some(decode_text(data)),
        MetadataKind::UInt8 => decode_u8(data).map(|v| v.to_string()),
        MetadataKind::UInt16 => decode_u16(data).map(|v| v.to_string()),
        MetadataKind::UInt32 => decode_u32(data).map(|v| v.to_string()),
        MetadataKind::UInt64 => decode_u64(data).map(|v| v.to_string()),
        MetadataKind::IntPair => decode_pair(data).map(|(pos, total)| format!("{pos}/{total}")),
        MetadataKind::Image => Some(format!("{} bytes", decode_image(data).len())),
    }
}
