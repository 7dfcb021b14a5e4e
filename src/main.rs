use std::process;

use clap::{command, Parser, ValueHint};
use log::{error, LevelFilter};

use innertube::{client::YtMusic, config::Config, model::PrivacyStatus, secrets};

/// Group name for mutually exclusive logging options.
const ARGS_GROUP_LOGGING: &str = "logging";

/// Command line arguments as parsed by `clap`.
#[derive(Clone, Debug, Default, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Secrets file
    ///
    /// Ensure that this file is kept secure and not shared publicly, as it
    /// contains the cookies or token that grant access to your YouTube
    /// Music account.
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath, default_value_t = String::from("secrets.toml"))]
    secrets_file: String,

    /// Playlist id to fetch
    ///
    /// With or without the VL browse prefix; "LM" fetches your liked
    /// music.
    #[arg(short, long, value_name = "ID", conflicts_with = "library")]
    playlist: Option<String>,

    /// List the playlists in your library instead of fetching one
    #[arg(long, default_value_t = false)]
    library: bool,

    /// Stop after roughly this many results
    ///
    /// Unset fetches everything.
    #[arg(short, long, value_name = "COUNT")]
    limit: Option<usize>,

    /// Create a playlist with this title, then exit
    #[arg(long, value_name = "TITLE", conflicts_with_all = ["playlist", "library"])]
    create: Option<String>,

    /// Suppresses all output except warnings and errors.
    #[arg(short, long, default_value_t = false, group = ARGS_GROUP_LOGGING)]
    quiet: bool,

    /// Enable verbose logging
    ///
    /// Specify twice for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count, group = ARGS_GROUP_LOGGING)]
    verbose: u8,
}

/// Initializes the logger facade.
///
/// The logging level is determined as follows, in order of precedence from
/// highest to lowest:
/// 1. Command line arguments
/// 2. `RUST_LOG` environment variable
/// 3. Hard coded default
fn init_logger(args: &Args) {
    let mut logger = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );

    if args.quiet || args.verbose > 0 {
        let level = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        // Filter log messages of external crates. The library target
        // shares the crate name, so one filter covers both.
        logger.filter_module(module_path!(), level);
    }

    logger.init();
}

async fn run(args: Args) -> innertube::error::Result<()> {
    let credentials = secrets::load(&args.secrets_file)
        .map_err(|e| innertube::error::Error::Auth(e.to_string()))?;
    let client = YtMusic::new(Config::with_credentials(credentials))?;

    if let Some(title) = &args.create {
        let playlist_id = client
            .create_playlist(title, "", PrivacyStatus::Private, &[])
            .await?;
        println!("{playlist_id}");
        return Ok(());
    }

    if args.library {
        let playlists = client.get_library_playlists(args.limit).await?;
        println!("{}", serde_json::to_string_pretty(&playlists)?);
        return Ok(());
    }

    let playlist_id = args.playlist.as_deref().unwrap_or("LM");
    let detail = client.get_playlist(playlist_id, args.limit).await?;
    println!("{}", serde_json::to_string_pretty(&detail)?);

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(&args);

    if let Err(e) = run(args).await {
        error!("{e}");
        process::exit(1);
    }
}
