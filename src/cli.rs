use crate::{
    config::{self, Credentials},
    playlist::AddMode,
    report::MissFilePolicy,
    spotify,
    sync::{self, SyncOptions},
    title::{Strategy, UntaggedPolicy},
    Error, IoSnafu, Result,
};
use clap::Parser;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use snafu::ResultExt;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about = "local folder to spotify playlist", long_about = None)]
struct Cli {
    /// Folder to scan for audio files. (prompted for if missing)
    #[clap(value_parser)]
    pub folder: Option<PathBuf>,

    /// Name of the playlist to create. (prompted for if missing)
    #[clap(short, long)]
    pub name: Option<String>,

    /// Where each track's title comes from.
    #[clap(short, long, value_enum, default_value_t = Strategy::Filename)]
    pub strategy: Strategy,

    /// What to do with files that lack title or artist tags.
    #[clap(long, value_enum, default_value_t = UntaggedPolicy::Skip)]
    pub untagged: UntaggedPolicy,

    /// Add matches at the end of the run or as they are found.
    #[clap(short, long, value_enum, default_value_t = AddMode::Bulk)]
    pub add_mode: AddMode,

    /// Where to write the list of songs that were not found.
    #[clap(short, long, value_enum, default_value_t = MissFilePolicy::WorkingDir)]
    pub miss_file: MissFilePolicy,

    #[clap(long, env = "SPOTIPY_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    #[clap(long, env = "SPOTIPY_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    #[clap(long, env = "SPOTIPY_REDIRECT_URI")]
    pub redirect_uri: Option<String>,
}

fn prompt(message: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(message).interact_text()?;

    Ok(value.trim().to_string())
}

pub async fn run() -> Result<()> {
    pretty_env_logger::init();
    config::load_env_file();

    let cli = Cli::parse();

    let folder = match cli.folder {
        Some(folder) => folder,
        None => PathBuf::from(prompt("Enter the path to your music folder")?),
    };
    if !folder.is_dir() {
        return Err(Error::FolderNotFound { path: folder });
    }

    let playlist_name = match cli.name {
        Some(name) => name,
        None => prompt("Enter the name for the new Spotify playlist")?,
    };

    let creds = Credentials::new(cli.client_id, cli.client_secret, cli.redirect_uri)?;
    let client = spotify::new(&creds, config::token_cache_path()?).await?;

    let miss_dir = std::env::current_dir().context(IoSnafu {
        path: PathBuf::from("."),
    })?;

    let options = SyncOptions {
        folder,
        playlist_name,
        strategy: cli.strategy,
        untagged: cli.untagged,
        add_mode: cli.add_mode,
        miss_file: cli.miss_file,
        miss_dir,
    };

    let progress = ProgressBar::new(0).with_prefix("matching");
    if let Ok(style) =
        ProgressStyle::default_bar().template("{prefix} {wide_bar:.cyan/blue} [{pos}/{len}] {msg}")
    {
        progress.set_style(style);
    }

    let summary = sync::run(&client, &options, &progress).await;
    progress.finish_and_clear();

    let summary = summary?;
    info!(
        "scanned {}, matched {}, missed {}, skipped {}",
        summary.scanned, summary.matched, summary.missed, summary.skipped
    );

    Ok(())
}
