use std::{
    fs::{self, create_dir_all, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use bnkextr::{BankExtractor, ExtractOptions, Extracted};
use clap::Parser;
use env_logger::Env;
use log::info;

mod report;

#[derive(Parser)]
#[command(version)]
/// Extracts wem files and object info from Wwise sound banks
pub struct Args {
    /// Path to the bnk file
    bnk_path: PathBuf,
    #[arg(short, long)]
    /// Swap byte order, for banks made for big endian platforms
    swap: bool,
    #[arg(short, long)]
    /// Put the wem files next to the bank instead of into a directory named after it
    no_dir: bool,
    #[arg(short, long)]
    /// Also write an objects.txt with the decoded objects
    obj: bool,
    #[arg(short, long)]
    /// Output directory, overrides where the wem files would go otherwise
    dest: Option<PathBuf>,
}

/// directory the wem files and objects.txt end up in
fn output_dir(bnk_path: &Path, no_dir: bool, dest: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dest) = dest {
        return Ok(dest.to_owned());
    }
    let parent = match bnk_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
        _ => PathBuf::from("."),
    };
    if no_dir {
        return Ok(parent);
    }
    let stem = bnk_path
        .file_stem()
        .with_context(|| format!("{bnk_path:?} has no file name"))?;
    Ok(parent.join(stem))
}

fn main() -> anyhow::Result<()> {
    let env = Env::new().default_filter_or("info");
    env_logger::init_from_env(env);
    let args = Args::parse();

    let out_dir = output_dir(&args.bnk_path, args.no_dir, args.dest.as_deref())?;
    let bnk_file =
        File::open(&args.bnk_path).with_context(|| format!("couldn't open {:?}", args.bnk_path))?;
    create_dir_all(&out_dir).with_context(|| format!("couldn't create {out_dir:?}"))?;
    info!("extracting {:?} to {:?}", args.bnk_path, out_dir);

    let mut extractor = BankExtractor::new(
        BufReader::new(bnk_file),
        ExtractOptions {
            swap_byte_order: args.swap,
        },
    );
    let mut objects = Vec::new();
    let mut wem_count = 0;
    for item in extractor.by_ref() {
        match item.with_context(|| format!("error reading {:?}", args.bnk_path))? {
            Extracted::Wem(wem) => {
                let wem_path = out_dir.join(format!("{}.wem", wem.index.id));
                fs::write(&wem_path, &wem.data)
                    .with_context(|| format!("couldn't write {wem_path:?}"))?;
                info!("wrote {:?} ({} bytes)", wem_path, wem.data.len());
                wem_count += 1;
            }
            Extracted::Object(header) => objects.push(header),
        }
    }
    let context = extractor.into_context();
    info!("{wem_count} wem files, {} objects", objects.len());

    if args.obj {
        let report_path = out_dir.join("objects.txt");
        report::write_objects(&report_path, &objects, &context)
            .with_context(|| format!("couldn't write {report_path:?}"))?;
        info!("wrote {report_path:?}");
    }
    Ok(())
}
