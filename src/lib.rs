pub mod api;
pub mod atoms;
pub mod catalog;
pub mod json_api;
pub mod metadata;
pub mod parser;

pub use api::M4aFile;
pub use atoms::{Atom, FourCC};
pub use catalog::{
    ImageKey, MetadataKind, PairKey, StringKey, Uint8Key, Uint16Key, Uint32Key, Uint64Key,
};
pub use json_api::{JsonAtom, analyze};
pub use parser::{ParseError, parse_root};
