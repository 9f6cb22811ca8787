use crate::atoms::FourCC;
use std::collections::HashMap;
use std::sync::OnceLock;

// 0xA9 is `©` in Mac Roman; it prefixes most of the classic iTunes tags.
const C: u8 = 0xa9;

/// Wire layout of a metadata value inside its `data` atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    Text,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    IntPair,
    Image,
}

/// Text metadata, variable length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringKey {
    Album,
    Artist,
    AlbumArtist,
    Comment,
    Title,
    GenreCustom,
    Composer,
    Encoder,
    Copyright,
    Compilation,
    Lyrics,
    PurchaseDate,
    Grouping,
    Misc,
    SortingTitle,
    SortingAlbum,
    SortingArtist,
    SortingAlbumArtist,
    SortingComposer,
    AppleId,
    Owner,
    Xid,
    Work,
    Movement,
}

impl StringKey {
    pub const ALL: &'static [StringKey] = &[
        StringKey::Album,
        StringKey::Artist,
        StringKey::AlbumArtist,
        StringKey::Comment,
        StringKey::Title,
        StringKey::GenreCustom,
        StringKey::Composer,
        StringKey::Encoder,
        StringKey::Copyright,
        StringKey::Compilation,
        StringKey::Lyrics,
        StringKey::PurchaseDate,
        StringKey::Grouping,
        StringKey::Misc,
        StringKey::SortingTitle,
        StringKey::SortingAlbum,
        StringKey::SortingArtist,
        StringKey::SortingAlbumArtist,
        StringKey::SortingComposer,
        StringKey::AppleId,
        StringKey::Owner,
        StringKey::Xid,
        StringKey::Work,
        StringKey::Movement,
    ];

    pub const fn code(self) -> FourCC {
        match self {
            StringKey::Album => FourCC([C, b'a', b'l', b'b']),
            StringKey::Artist => FourCC([C, b'A', b'R', b'T']),
            StringKey::AlbumArtist => FourCC(*b"aART"),
            StringKey::Comment => FourCC([C, b'c', b'm', b't']),
            StringKey::Title => FourCC([C, b'n', b'a', b'm']),
            StringKey::GenreCustom => FourCC([C, b'g', b'e', b'n']),
            StringKey::Composer => FourCC([C, b'w', b'r', b't']),
            StringKey::Encoder => FourCC([C, b't', b'o', b'o']),
            StringKey::Copyright => FourCC(*b"cprt"),
            StringKey::Compilation => FourCC(*b"cpil"),
            StringKey::Lyrics => FourCC([C, b'l', b'y', b'r']),
            StringKey::PurchaseDate => FourCC(*b"purd"),
            StringKey::Grouping => FourCC(*b"@grp"),
            StringKey::Misc => FourCC(*b"----"),
            StringKey::SortingTitle => FourCC(*b"sonm"),
            StringKey::SortingAlbum => FourCC(*b"soal"),
            StringKey::SortingArtist => FourCC(*b"soar"),
            StringKey::SortingAlbumArtist => FourCC(*b"soaa"),
            StringKey::SortingComposer => FourCC(*b"soco"),
            StringKey::AppleId => FourCC(*b"apID"),
            StringKey::Owner => FourCC(*b"ownr"),
            StringKey::Xid => FourCC(*b"xid "),
            StringKey::Work => FourCC([C, b'w', b'r', b'k']),
            StringKey::Movement => FourCC([C, b'm', b'v', b'n']),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            StringKey::Album => "album",
            StringKey::Artist => "artist",
            StringKey::AlbumArtist => "album_artist",
            StringKey::Comment => "comment",
            StringKey::Title => "title",
            StringKey::GenreCustom => "genre",
            StringKey::Composer => "composer",
            StringKey::Encoder => "encoder",
            StringKey::Copyright => "copyright",
            StringKey::Compilation => "compilation",
            StringKey::Lyrics => "lyrics",
            StringKey::PurchaseDate => "purchase_date",
            StringKey::Grouping => "grouping",
            StringKey::Misc => "misc",
            StringKey::SortingTitle => "sorting_title",
            StringKey::SortingAlbum => "sorting_album",
            StringKey::SortingArtist => "sorting_artist",
            StringKey::SortingAlbumArtist => "sorting_album_artist",
            StringKey::SortingComposer => "sorting_composer",
            StringKey::AppleId => "apple_id",
            StringKey::Owner => "owner",
            StringKey::Xid => "xid",
            StringKey::Work => "work",
            StringKey::Movement => "movement",
        }
    }
}

/// 8-bit integer metadata; the data atom payload takes 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uint8Key {
    Rating,
    Gapless,
    MediaType,
    GenreId,
    Compilation,
    ShowMovement,
}

impl Uint8Key {
    pub const ALL: &'static [Uint8Key] = &[
        Uint8Key::Rating,
        Uint8Key::Gapless,
        Uint8Key::MediaType,
        Uint8Key::GenreId,
        Uint8Key::Compilation,
        Uint8Key::ShowMovement,
    ];

    pub const fn code(self) -> FourCC {
        match self {
            Uint8Key::Rating => FourCC(*b"rtng"),
            Uint8Key::Gapless => FourCC(*b"pgap"),
            Uint8Key::MediaType => FourCC(*b"stik"),
            Uint8Key::GenreId => FourCC(*b"gnre"),
            Uint8Key::Compilation => FourCC(*b"cpil"),
            Uint8Key::ShowMovement => FourCC(*b"shwm"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Uint8Key::Rating => "rating",
            Uint8Key::Gapless => "gapless",
            Uint8Key::MediaType => "media_type",
            Uint8Key::GenreId => "genre_id",
            Uint8Key::Compilation => "compilation",
            Uint8Key::ShowMovement => "show_movement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uint16Key {
    Bpm,
    MovementNumber,
    MovementCount,
}

impl Uint16Key {
    pub const ALL: &'static [Uint16Key] = &[
        Uint16Key::Bpm,
        Uint16Key::MovementNumber,
        Uint16Key::MovementCount,
    ];

    pub const fn code(self) -> FourCC {
        match self {
            Uint16Key::Bpm => FourCC(*b"tmpo"),
            Uint16Key::MovementNumber => FourCC([C, b'm', b'v', b'i']),
            Uint16Key::MovementCount => FourCC([C, b'm', b'v', b'c']),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Uint16Key::Bpm => "bpm",
            Uint16Key::MovementNumber => "movement_number",
            Uint16Key::MovementCount => "movement_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uint32Key {
    ArtistId,
    GenreId,
    CatalogId,
    CountryCode,
    ComposerId,
}

impl Uint32Key {
    pub const ALL: &'static [Uint32Key] = &[
        Uint32Key::ArtistId,
        Uint32Key::GenreId,
        Uint32Key::CatalogId,
        Uint32Key::CountryCode,
        Uint32Key::ComposerId,
    ];

    pub const fn code(self) -> FourCC {
        match self {
            Uint32Key::ArtistId => FourCC(*b"atID"),
            Uint32Key::GenreId => FourCC(*b"geID"),
            Uint32Key::CatalogId => FourCC(*b"cnID"),
            Uint32Key::CountryCode => FourCC(*b"sfID"),
            Uint32Key::ComposerId => FourCC(*b"cmID"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Uint32Key::ArtistId => "artist_id",
            Uint32Key::GenreId => "genre_id",
            Uint32Key::CatalogId => "catalog_id",
            Uint32Key::CountryCode => "country_code",
            Uint32Key::ComposerId => "composer_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uint64Key {
    CollectionId,
}

impl Uint64Key {
    pub const ALL: &'static [Uint64Key] = &[Uint64Key::CollectionId];

    pub const fn code(self) -> FourCC {
        match self {
            Uint64Key::CollectionId => FourCC(*b"plID"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Uint64Key::CollectionId => "collection_id",
        }
    }
}

/// Two 16-bit values sharing one data atom (position and total).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKey {
    Track,
    Disc,
}

impl PairKey {
    pub const ALL: &'static [PairKey] = &[PairKey::Track, PairKey::Disc];

    pub const fn code(self) -> FourCC {
        match self {
            PairKey::Track => FourCC(*b"trkn"),
            PairKey::Disc => FourCC(*b"disc"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PairKey::Track => "track",
            PairKey::Disc => "disc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKey {
    Artwork,
}

impl ImageKey {
    pub const ALL: &'static [ImageKey] = &[ImageKey::Artwork];

    pub const fn code(self) -> FourCC {
        match self {
            ImageKey::Artwork => FourCC(*b"covr"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ImageKey::Artwork => "artwork",
        }
    }
}

/// Reverse index over every catalog table, FourCC → (kind, semantic name).
///
/// Built once on first use. A handful of codes appear in more than one table
/// (`cpil` is both text and uint8); the text entry wins, matching the order
/// the tables are consulted in.
pub fn lookup(code: FourCC) -> Option<(MetadataKind, &'static str)> {
    static INDEX: OnceLock<HashMap<FourCC, (MetadataKind, &'static str)>> = OnceLock::new();

    let index = INDEX.get_or_init(|| {
        let mut map = HashMap::new();
        for k in StringKey::ALL {
            map.entry(k.code()).or_insert((MetadataKind::Text, k.name()));
        }
        for k in Uint8Key::ALL {
            map.entry(k.code()).or_insert((MetadataKind::UInt8, k.name()));
        }
        for k in Uint16Key::ALL {
            map.entry(k.code()).or_insert((MetadataKind::UInt16, k.name()));
        }
        for k in Uint32Key::ALL {
            map.entry(k.code()).or_insert((MetadataKind::UInt32, k.name()));
        }
        for k in Uint64Key::ALL {
            map.entry(k.code()).or_insert((MetadataKind::UInt64, k.name()));
        }
        for k in PairKey::ALL {
            map.entry(k.code()).or_insert((MetadataKind::IntPair, k.name()));
        }
        for k in ImageKey::ALL {
            map.entry(k.code()).or_insert((MetadataKind::Image, k.name()));
        }
        map
    });

    index.get(&code).copied()
}
