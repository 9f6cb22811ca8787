use clap::{ArgAction, Parser};
use m4ameta::{
    atoms::{Atom, FourCC},
    catalog, metadata, M4aFile,
};

#[derive(Parser, Debug)]
#[command(version, about = "Minimal M4A/MP4 atom explorer")]
struct Args {
    /// M4A/MP4 file path
    path: String,

    /// Dump raw payload of this 4CC (e.g. --raw covr)
    #[arg(long = "raw")]
    raw: Option<String>,

    /// Limit recursion depth (for text/tree output)
    #[arg(long, default_value_t = 64)]
    max_depth: usize,

    /// Print decoded values for recognized metadata atoms
    #[arg(long, action = ArgAction::SetTrue)]
    decode: bool,

    /// Byte count when dumping raw (0 means entire atom payload)
    #[arg(long, default_value_t = 0)]
    bytes: usize,

    /// Emit JSON instead of a human-readable tree
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let data = std::fs::read(&args.path)?;
    let file = M4aFile::parse(&data)?;

    // JSON mode: output JSON and exit (no tree or raw to keep output clean)
    if args.json {
        let tree = m4ameta::json_api::atom_tree(&file, args.decode);
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    // Text tree
    for atom in file.atoms() {
        print_atom(atom, 0, args.max_depth, args.decode, false);
    }

    // Optional raw dump
    if let Some(sel) = args.raw.as_ref() {
        dump_raw(file.atoms(), sel, args.bytes);
    }

    Ok(())
}

// ---------- Human-readable tree ----------

fn print_atom(atom: &Atom<'_>, depth: usize, max_depth: usize, decode: bool, in_ilst: bool) {
    let indent = "  ".repeat(depth);

    if atom.children.is_empty() {
        let extended = if atom.extended_size { " (extended size)" } else { "" };
        println!(
            "{indent}{:>6} {:>10} {}{}",
            format!("{:#x}", atom.offset),
            atom.size(),
            atom.typ,
            extended
        );
    } else {
        println!(
            "{indent}{:>6} {:>10} {} (container)",
            format!("{:#x}", atom.offset),
            atom.size(),
            atom.typ
        );
    }

    if decode && in_ilst
        && let Some((kind, name)) = catalog::lookup(atom.typ)
        && let Some(value) = metadata::display_value(atom, kind)
    {
        println!("{indent}        -> {name} = {value}");
    }

    if depth + 1 <= max_depth {
        let is_ilst = &atom.typ.0 == b"ilst";
        for c in &atom.children {
            print_atom(c, depth + 1, max_depth, decode, is_ilst);
        }
    }
}

// ---------- Raw dump ----------

fn dump_raw(atoms: &[Atom<'_>], sel: &str, limit: usize) {
    let target = match FourCC::from_str(sel) {
        Some(cc) => cc,
        None => {
            eprintln!("--raw expects a 4-character atom type, got {sel:?}");
            return;
        }
    };

    let mut matches = Vec::new();
    select_atoms(atoms, target, &mut matches);

    for (i, atom) in matches.into_iter().enumerate() {
        dump_payload(i, atom, limit);
    }
}

/// Hex rows over an atom's payload, addressed by its position in the file.
fn dump_payload(index: usize, atom: &Atom<'_>, limit: usize) {
    let len = if limit == 0 || limit > atom.payload.len() {
        atom.payload.len()
    } else {
        limit
    };
    let payload_offset = atom.offset + 8;

    println!(
        "\n== Dump {} ({}) payload: offset={:#x}, len={} ==",
        index, atom.typ, payload_offset, len
    );
    for (row, chunk) in atom.payload[..len].chunks(16).enumerate() {
        let hexs: String = chunk.iter().map(|b| format!("{b:02x} ")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        println!("{:08x}  {hexs:<48}  |{ascii}|", payload_offset + row * 16);
    }
}

fn select_atoms<'f, 'a>(list: &'f [Atom<'a>], target: FourCC, out: &mut Vec<&'f Atom<'a>>) {
    for atom in list {
        if atom.typ == target {
            out.push(atom);
        }
        select_atoms(&atom.children, target, out);
    }
}
