use clap::Parser;
use m4ameta::catalog::{ImageKey, PairKey, StringKey, Uint8Key, Uint16Key, Uint32Key, Uint64Key};
use m4ameta::M4aFile;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Print iTunes-style metadata from an M4A file")]
struct Args {
    /// M4A/MP4 file path
    path: String,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Tag {
    name: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct ArtworkInfo {
    bytes: usize,
    /// First bytes of the blob, hex-encoded; enough to sniff the format.
    preview: String,
}

#[derive(Debug, Serialize)]
struct TagSummary {
    file: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Tag>,

    #[serde(skip_serializing_if = "Option::is_none")]
    artwork: Option<ArtworkInfo>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let path = PathBuf::from(&args.path);

    let data = std::fs::read(&path)?;
    let file = M4aFile::parse(&data)?;

    let mut summary = TagSummary {
        file: path.display().to_string(),
        tags: Vec::new(),
        artwork: None,
    };

    for k in StringKey::ALL {
        if let Some(v) = file.string_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: v });
        }
    }
    for k in PairKey::ALL {
        if let Some((pos, total)) = file.int_pair_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: format!("{pos}/{total}") });
        }
    }
    for k in Uint8Key::ALL {
        if let Some(v) = file.uint8_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: v.to_string() });
        }
    }
    for k in Uint16Key::ALL {
        if let Some(v) = file.uint16_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: v.to_string() });
        }
    }
    for k in Uint32Key::ALL {
        if let Some(v) = file.uint32_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: v.to_string() });
        }
    }
    for k in Uint64Key::ALL {
        if let Some(v) = file.uint64_metadata(*k) {
            summary.tags.push(Tag { name: k.name(), value: v.to_string() });
        }
    }

    for k in ImageKey::ALL {
        if let Some(blob) = file.image_metadata(*k) {
            summary.artwork = Some(ArtworkInfo {
                bytes: blob.len(),
                preview: hex::encode(&blob[..blob.len().min(16)]),
            });
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_human(&summary);
    }

    Ok(())
}

fn print_human(summary: &TagSummary) {
    println!("File: {}", summary.file);

    if summary.tags.is_empty() && summary.artwork.is_none() {
        println!("  (no metadata)");
        return;
    }

    for tag in &summary.tags {
        println!("  {:>20}: {}", tag.name, tag.value);
    }

    if let Some(art) = &summary.artwork {
        println!("  {:>20}: {} bytes ({}…)", "artwork", art.bytes, art.preview);
    }
}
