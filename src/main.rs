use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use echofind::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Create a local account
    Register(RegisterOptions),

    /// Sign in to a local account
    Login(LoginOptions),

    /// Sign out of the current account
    Logout,

    /// Show the signed-in account and its interaction counters
    Profile,

    #[clap(about = "Swipe through previews and grow recommendations")]
    Discover(DiscoverOptions),

    /// Handle liked and disliked songs
    Songs(SongsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RegisterOptions {
    /// Email address for the new account
    #[clap(long)]
    pub email: Option<String>,

    /// Display name for the new account
    #[clap(long)]
    pub username: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    /// Email address of the account
    #[clap(long)]
    pub email: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverOptions {
    /// Playlist the deck is seeded from (defaults to the configured one)
    #[clap(long)]
    pub playlist: Option<String>,

    /// Bypass the recommendation cache
    #[clap(long)]
    pub refresh: bool,

    /// Skip preview playback
    #[clap(long)]
    pub quiet: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle liked and disliked songs",
    args_conflicts_with_subcommands = true // disallow mixing query flags with `remove`
)]
pub struct SongsOptions {
    /// List the disliked store instead of the liked one
    #[clap(long)]
    pub disliked: bool,

    /// Filter by title or artist
    #[clap(long)]
    pub search: Option<String>,

    /// Subcommands under `songs` (e.g., `remove`)
    #[command(subcommand)]
    pub command: Option<SongsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SongsSubcommand {
    /// Remove saved songs by title
    Remove(SongsRemoveOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct SongsRemoveOpts {
    /// Exact title of the song(s) to remove
    pub title: String,

    /// Remove from the disliked store instead of the liked one
    #[clap(long)]
    pub disliked: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Register(opt) => cli::register(opt.email, opt.username).await,
        Command::Login(opt) => cli::login(opt.email).await,
        Command::Logout => cli::logout().await,
        Command::Profile => cli::profile().await,
        Command::Discover(opt) => cli::discover(opt.playlist, opt.refresh, opt.quiet).await,

        Command::Songs(opt) => match opt.command {
            Some(SongsSubcommand::Remove(r)) => cli::remove_song(r.title, r.disliked).await,
            None => cli::songs(opt.disliked, opt.search).await,
        },

        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
