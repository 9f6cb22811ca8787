use std::fmt;

/// Glyphs for the high half (0x80..=0xFF) of the classic Mac Roman code page.
///
/// Atom type tags predate UTF-8 and use single-byte Mac Roman characters;
/// several iTunes metadata tags start with 0xA9 (`©`), which is not valid
/// standalone UTF-8, so type tags must never go through a UTF-8 decoder.
const MAC_ROMAN_HIGH: [char; 128] = [
    'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
    'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
    '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
    '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
    '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{a0}', 'À', 'Ã', 'Õ', 'Œ', 'œ',
    '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '€', '‹', '›', 'ﬁ', 'ﬂ',
    '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô',
    '\u{f8ff}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ',
];

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }

    /// Decode the tag through the Mac Roman table.
    ///
    /// Control bytes render as `.`; everything else is a real character.
    pub fn decode(&self) -> String {
        self.0.iter().map(|&c| match c {
            0x20..=0x7e => c as char,
            0x80..=0xff => MAC_ROMAN_HIGH[(c - 0x80) as usize],
            _ => '.',
        }).collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.decode()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.decode()) } }

/// One atom in the parsed tree.
///
/// `payload` is a view into the caller's buffer, excluding the 8-byte
/// size+type header. Container atoms keep their payload as well as the
/// children parsed out of it.
#[derive(Debug)]
pub struct Atom<'a> {
    pub typ: FourCC,
    /// Absolute offset of the atom header in the source buffer.
    pub offset: usize,
    pub payload: &'a [u8],
    pub children: Vec<Atom<'a>>,
    /// Set when the size came from the `mdat` size==1 extended-size field.
    pub extended_size: bool,
}

impl<'a> Atom<'a> {
    /// Total declared size of the atom, header included.
    pub fn size(&self) -> usize {
        8 + self.payload.len()
    }

    /// First immediate child with the given type, if any.
    pub fn child(&self, typ: FourCC) -> Option<&Atom<'a>> {
        self.children.iter().find(|c| c.typ == typ)
    }
}
