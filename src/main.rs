use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use romdir_reader::{Directory, DirectoryOptions, ImageSource, Result, RomdirError};
use tracing_subscriber::EnvFilter;

/// Inspect and extract ROMDIR tables from BIOS images.
#[derive(Debug, Parser)]
#[command(name = "romdir", version, about)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Memory-map the image instead of reading it into memory.
    #[arg(long, global = true)]
    mmap: bool,

    /// Compare literal names on lookup, not only name hashes.
    #[arg(long, global = true)]
    strict: bool,

    /// Also list and extract the RESET record.
    #[arg(long, global = true)]
    keep_reset: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the directory table.
    List { image: PathBuf },

    /// Extract entries into a directory, one file per entry.
    Extract {
        image: PathBuf,

        /// Destination directory.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Entries to extract. All entries when omitted.
        names: Vec<String>,
    },

    /// Write (part of) one entry to stdout.
    Cat {
        image: PathBuf,
        name: String,

        #[arg(long, default_value_t = 0)]
        offset: u64,

        /// Bytes to write. Defaults to the rest of the entry.
        #[arg(long)]
        length: Option<u64>,

        /// Read the entry's extended info instead of its data.
        #[arg(long)]
        aux: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open(cli: &Cli, image: &Path) -> Result<Directory> {
    let source = if cli.mmap {
        ImageSource::map(image)?
    } else {
        ImageSource::read(image)?
    };
    let options = DirectoryOptions::new()
        .strict_names(cli.strict)
        .keep_sentinel(cli.keep_reset);
    Directory::with_options(source, options)
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::List { image } => {
            let dir = open(cli, image)?;
            list(&dir)
        }
        Command::Extract {
            image,
            output,
            names,
        } => {
            let dir = open(cli, image)?;
            extract(&dir, output, names)
        }
        Command::Cat {
            image,
            name,
            offset,
            length,
            aux,
        } => {
            let dir = open(cli, image)?;
            let entry = dir
                .find_by_name(name)
                .ok_or_else(|| RomdirError::FileNotFound(name.clone()))?;
            let length = length.unwrap_or(u64::MAX);
            let bytes = if *aux {
                dir.read_aux(entry, *offset, length)?
            } else {
                dir.read_range(entry, *offset, length)?
            };
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn list(dir: &Directory) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{:<10} {:<17} {:>8} {:>4}", "filename", "offset", "size", "ext")?;
    for entry in dir.iter() {
        writeln!(
            out,
            "{:<10} {:08x}-{:08x} {:>8} {:>4}",
            entry.name,
            entry.data_offset,
            entry.data_end(),
            entry.data_size,
            entry.aux_size
        )?;
    }
    Ok(())
}

/// Extracts the requested entries, reporting failures per entry and carrying on.
fn extract(dir: &Directory, output: &Path, names: &[String]) -> Result<()> {
    std::fs::create_dir_all(output)?;

    let selected: Vec<_> = if names.is_empty() {
        dir.iter().collect()
    } else {
        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            match dir.find_by_name(name) {
                Some(entry) => selected.push(entry),
                None => eprintln!("ERROR: {}", RomdirError::FileNotFound(name.clone())),
            }
        }
        selected
    };

    let mut failures = 0usize;
    for entry in &selected {
        let result = dir
            .output_path(entry, output)
            .and_then(|path| dir.extract_entry(entry, &path));
        if let Err(e) = result {
            eprintln!("ERROR: could not extract file {}: {}", entry.name, e);
            failures += 1;
        }
    }

    println!(
        "Extracted {} of {} entries to {}",
        selected.len() - failures,
        selected.len(),
        output.display()
    );
    Ok(())
}
