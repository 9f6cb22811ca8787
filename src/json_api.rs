use crate::api::M4aFile;
use crate::atoms::Atom;
use crate::catalog;
use crate::metadata;
use serde::Serialize;

/// A JSON-serializable representation of a single atom.
///
/// This is designed for UIs and for JSON output in tools like `m4adump`.
#[derive(Serialize)]
pub struct JsonAtom {
    pub offset: usize,
    /// Total size including the 8-byte header.
    pub size: usize,
    pub typ: String,
    /// "container" when the atom was expanded into children, else "leaf".
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_size: Option<usize>,
    pub extended_size: bool,

    /// Semantic catalog name, for recognized ilst children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Decoded value when `decode` was requested and a catalog entry exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<JsonAtom>>,
}

/// Parse a file buffer and return the atom tree as JSON-serializable
/// structures. With `decode`, recognized metadata entries carry their
/// decoded value and semantic name.
pub fn analyze(data: &[u8], decode: bool) -> anyhow::Result<Vec<JsonAtom>> {
    let file = M4aFile::parse(data)?;
    Ok(atom_tree(&file, decode))
}

/// Build the JSON tree for an already-parsed file.
pub fn atom_tree(file: &M4aFile<'_>, decode: bool) -> Vec<JsonAtom> {
    file.atoms()
        .iter()
        .map(|a| build_json_atom(a, false, decode))
        .collect()
}

fn build_json_atom(atom: &Atom<'_>, in_ilst: bool, decode: bool) -> JsonAtom {
    let entry = if in_ilst { catalog::lookup(atom.typ) } else { None };

    let decoded = if decode {
        entry.and_then(|(kind, _)| metadata::display_value(atom, kind))
    } else {
        None
    };

    let is_ilst = &atom.typ.0 == b"ilst";
    let (kind, payload_size, children) = if atom.children.is_empty() {
        ("leaf".to_string(), Some(atom.payload.len()), None)
    } else {
        let kids = atom
            .children
            .iter()
            .map(|c| build_json_atom(c, is_ilst, decode))
            .collect();
        ("container".to_string(), None, Some(kids))
    };

    JsonAtom {
        offset: atom.offset,
        size: atom.size(),
        typ: atom.typ.to_string(),
        kind,
        payload_size,
        extended_size: atom.extended_size,
        field: entry.map(|(_, name)| name.to_string()),
        decoded,
        children,
    }
}
