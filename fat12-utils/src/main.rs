mod chains;
mod check;
mod info;
mod table;

use std::io;

use clap::Parser;
use fat12::error::GeometryError;
use fat12::io::std::FileIO;
use fat12::FAT12;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    FAT12(#[from] fat12::error::Error<io::Error>),
    #[error("{0}")]
    Geometry(#[from] GeometryError),
    #[error("{0} chains rejected")]
    Corrupted(usize),
}

#[derive(Debug, clap::Args)]
struct Info {
    /// Dump boot sector record in hex
    #[clap(long)]
    raw: bool,
}

#[derive(Debug, clap::Args)]
struct Table {
    /// Include free clusters
    #[clap(short, long)]
    all: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Print boot sector geometry and derived layout
    Info(Info),
    /// Print decoded FAT entries
    Fat(Table),
    /// Print cluster chains and rejected candidates
    Chains,
    /// Validate FAT copies and cluster chains
    Check,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Disk image formatted with FAT12
    #[clap(short, long)]
    device: String,
    #[clap(subcommand)]
    action: Action,
}

fn open(device: &str) -> Result<FAT12<FileIO>, Error> {
    let io = FileIO::open(device).map_err(|e| fat12::error::Error::InvalidSource(e))?;
    Ok(FAT12::new(io)?)
}

fn run(args: Args) -> Result<(), Error> {
    let mut fat12 = open(&args.device)?;
    match args.action {
        Action::Info(info) => info::info(fat12, info.raw),
        Action::Fat(table) => table::table(&mut fat12, table.all),
        Action::Chains => chains::chains(&mut fat12),
        Action::Check => check::check(&mut fat12),
    }
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    if let Some(error) = run(args).err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
