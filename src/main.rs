use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use huff::{decode, encode};

/// Huffman compression.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Compress a file.
    Encode {
        /// File to compress.
        input: PathBuf,

        /// Where to write the compressed stream.
        #[clap(short, long)]
        output: PathBuf,
    },

    /// Decompress a file.
    Decode {
        /// File to decompress.
        input: PathBuf,

        /// Where to write the original contents.
        #[clap(short, long)]
        output: PathBuf,
    },
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    match args.mode {
        Mode::Encode { input, output } => {
            eprintln!("encoding {} -> {}", input.display(), output.display());
            let original = fs::read(&input)?;
            let compressed = encode(&original)?;
            write_atomic(&output, &compressed)
        }
        Mode::Decode { input, output } => {
            eprintln!("decoding {} -> {}", input.display(), output.display());
            let compressed = fs::read(&input)?;
            let original = decode(&compressed)?;
            write_atomic(&output, &original)
        }
    }
}

/// Write to a sibling temp file and rename into place, so a failure never
/// leaves a truncated file at `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
