extern crate pretty_env_logger;
#[macro_use]
extern crate log;

use snafu::prelude::*;
use std::path::PathBuf;

pub mod cli;
pub mod config;
pub mod playlist;
pub mod report;
pub mod scan;
pub mod service;
pub mod spotify;
pub mod sync;
pub mod title;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("The folder {} does not exist.", path.display()))]
    FolderNotFound { path: PathBuf },
    #[snafu(display("No value provided for {name}."))]
    MissingCredential { name: &'static str },
    #[snafu(display("Failed to read input: {message}"))]
    Prompt { message: String },
    #[snafu(display("Error creating playlist: {message}\nFailed to create playlist. Exiting..."))]
    CreatePlaylist { message: String },
    #[snafu(display("Client Error: {message}"))]
    Client { message: String },
    #[snafu(display("Invalid Spotify id: {message}"))]
    InvalidId { message: String },
    #[snafu(display("{}: {source}", path.display()))]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rspotify::ClientError> for Error {
    fn from(error: rspotify::ClientError) -> Self {
        Error::Client {
            message: error.to_string(),
        }
    }
}

impl From<rspotify::model::IdError> for Error {
    fn from(error: rspotify::model::IdError) -> Self {
        Error::InvalidId {
            message: error.to_string(),
        }
    }
}

impl From<dialoguer::Error> for Error {
    fn from(error: dialoguer::Error) -> Self {
        Error::Prompt {
            message: error.to_string(),
        }
    }
}
