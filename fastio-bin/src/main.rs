use std::path::PathBuf;

use structopt::clap::AppSettings::*;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Debug, StructOpt)]
enum Commands {
    #[structopt(
        name = "sum",
        about = "Read a count N followed by N integers and print their sum"
    )]
    Sum {
        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "Read from this file instead of stdin"
        )]
        input: Option<PathBuf>,

        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "Write to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "fastio",
    about = "Fast whitespace-delimited text I/O.",
    settings = &[SubcommandRequiredElseHelp, DisableHelpSubcommand, VersionlessSubcommands]
)]
struct CliOpts {
    #[structopt(short, long, help = "Show verbose output", global = true)]
    verbose: bool,

    #[structopt(subcommand)]
    cmd: Commands,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = CliOpts::from_iter(wild::args_os());
    init_logging(opts.verbose);

    let result = match opts.cmd {
        Commands::Sum { input, output } => commands::sum(input, output),
    };

    if let Err(e) = result {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
