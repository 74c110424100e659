use crate::{Error, IoSnafu, Result};
use snafu::ResultExt;
use std::{fs, path::PathBuf};

pub const CLIENT_ID_VAR: &str = "SPOTIPY_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIPY_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "SPOTIPY_REDIRECT_URI";

const CACHE_DIR_NAME: &str = "hifirs-folder-sync";
const TOKEN_FILE_NAME: &str = "spotify_token.json";

/// Identity of the registered Spotify application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Credentials {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
        redirect_uri: Option<String>,
    ) -> Result<Self> {
        Ok(Credentials {
            client_id: required(client_id, CLIENT_ID_VAR)?,
            client_secret: required(client_secret, CLIENT_SECRET_VAR)?,
            redirect_uri: required(redirect_uri, REDIRECT_URI_VAR)?,
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingCredential { name })
}

/// Loads a `.env` file from the working directory or its parents, if any.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("loaded environment from {}", path.display()),
        Err(error) => debug!("no .env file loaded: {error}"),
    }
}

/// Location of the cached OAuth token, creating its directory as needed.
pub fn token_cache_path() -> Result<PathBuf> {
    let mut dir = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
    dir.push(CACHE_DIR_NAME);

    fs::create_dir_all(&dir).context(IoSnafu { path: dir.clone() })?;

    Ok(dir.join(TOKEN_FILE_NAME))
}
