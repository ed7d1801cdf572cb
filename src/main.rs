use bookcipher::cli::{
    build_codebooks, decrypt_message, encrypt_message, run_menu, show_info, BuildOptions,
};
use bookcipher::{CipherConfig, FlushPolicy, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("BOOKCIPHER_VERSION");
const BUILD: &str = env!("BOOKCIPHER_BUILD");
const PROFILE: &str = env!("BOOKCIPHER_PROFILE");
const GIT_HASH: &str = env!("BOOKCIPHER_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "bookcipher")]
#[command(author, about = "Running-key book cipher over a reference corpus", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Forward codebook cache file
    #[arg(long, global = true)]
    codebook: Option<PathBuf>,

    /// Reverse index cache file
    #[arg(long, global = true)]
    reverse: Option<PathBuf>,

    /// Corpus file; repeat the flag for several files, in order (replaces the configured list)
    #[arg(long, global = true, action = ArgAction::Append)]
    corpus: Vec<PathBuf>,

    /// End-of-file handling: continuous or per-book
    #[arg(long, global = true, value_parser = parse_flush)]
    flush: Option<FlushPolicy>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message
    #[command(alias = "e")]
    Encrypt {
        /// Message to encrypt
        message: String,
    },

    /// Decrypt a ciphertext
    #[command(alias = "d")]
    Decrypt {
        /// Ciphertext of page-line-position triples
        ciphertext: String,
    },

    /// Build the codebook and reverse index cache files
    #[command(alias = "b")]
    Build {
        /// Rebuild even if the cache files exist
        #[arg(long)]
        force: bool,
    },

    /// Show corpus and cache information
    #[command(alias = "i")]
    Info,

    /// Interactive encrypt/decrypt menu
    #[command(alias = "m")]
    Menu,
}

fn parse_flush(s: &str) -> std::result::Result<FlushPolicy, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn load_config(cli: &Cli) -> Result<CipherConfig> {
    let mut config = match &cli.config {
        Some(path) => CipherConfig::from_file(path)?,
        None => CipherConfig::default(),
    };
    if let Some(path) = &cli.codebook {
        config.codebook_path = path.clone();
    }
    if let Some(path) = &cli.reverse {
        config.reverse_path = path.clone();
    }
    if !cli.corpus.is_empty() {
        config.corpus = cli.corpus.clone();
    }
    if let Some(flush) = cli.flush {
        config.layout.flush = flush;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli, command: Commands) -> Result<()> {
    let config = load_config(&cli)?;
    debug!(?config, "loaded configuration");

    match command {
        Commands::Encrypt { message } => {
            println!("{}", encrypt_message(&config, &message)?);
        }
        Commands::Decrypt { ciphertext } => {
            println!("{}", decrypt_message(&config, &ciphertext)?);
        }
        Commands::Build { force } => {
            print!("{}", build_codebooks(&config, &BuildOptions { force })?);
        }
        Commands::Info => {
            print!("{}", show_info(&config)?);
        }
        Commands::Menu => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_menu(&config, &mut stdin.lock(), &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookcipher=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut cli = Cli::parse();

    if cli.version {
        println!("bookcipher {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command.take() {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            let _ = Cli::command().print_help();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    match run(cli, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
