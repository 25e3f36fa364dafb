use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kvtree_cli::settings::{self, Overrides};
use kvtree_cli::{commands, Error};
use kvtree_http::HttpTransport;
use kvtree_projector::KvTreeClient;
use tracing_subscriber::EnvFilter;

/// kvtree - read and write nested configuration in a key-value store
#[derive(Parser, Debug)]
#[command(name = "kvtree")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (default: <config dir>/kvtree/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store address, e.g. http://127.0.0.1:8500
    #[arg(long, global = true)]
    address: Option<String>,

    /// Access token
    #[arg(long, global = true)]
    token: Option<String>,

    /// Namespace separator
    #[arg(long, global = true)]
    separator: Option<char>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print everything under a namespace as JSON
    Get { namespace: String },

    /// Write a JSON document under a namespace
    Put {
        namespace: String,
        /// JSON file to write, or `-` for stdin
        #[arg(default_value = "-")]
        file: String,
    },

    /// List the immediate children of a namespace
    Keys {
        #[arg(default_value = "")]
        namespace: String,
        /// Also list children that exist only as directory markers
        #[arg(long)]
        include_directories: bool,
    },

    /// Delete a namespace
    Delete {
        namespace: String,
        /// Delete everything below the namespace too
        #[arg(short, long)]
        recursive: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), Error> {
    let overrides = Overrides {
        address: args.address,
        token: args.token,
        separator: args.separator,
    };
    let config = settings::resolve(args.config.as_deref(), &overrides, |name| {
        std::env::var(name).ok()
    })?;

    let transport = HttpTransport::new(&config)?;
    let mut client = KvTreeClient::new(transport, config);
    let mut out = io::stdout().lock();

    match args.command {
        Command::Get { namespace } => commands::get(&mut client, &namespace, &mut out),
        Command::Put { namespace, file } => {
            let written = if file == "-" {
                commands::put(&mut client, &namespace, io::stdin().lock(), &mut out)
            } else {
                let input = std::fs::File::open(&file)?;
                commands::put(&mut client, &namespace, io::BufReader::new(input), &mut out)
            };
            written.map(|_| ())
        }
        Command::Keys {
            namespace,
            include_directories,
        } => commands::keys(&mut client, &namespace, include_directories, &mut out),
        Command::Delete {
            namespace,
            recursive,
        } => commands::delete(&mut client, &namespace, recursive),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
