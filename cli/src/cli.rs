use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vrel")]
#[command(
    author,
    version,
    about = "Release automation for the Vim Windows build pipeline"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Talk to the artifact-hosting API, with bounded retries
    Artifact {
        #[clap(flatten)]
        options: ArtifactOptions,

        #[clap(subcommand)]
        operation: ArtifactOperation,
    },

    /// Pull upstream changes and push an automated version-bump commit
    Deploy {
        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },

    /// Undo the most recent deploy commit and its tag
    Revert {
        /// Enable verbose output with additional information
        #[clap(short, long, default_value_t = false)]
        verbose: bool,
    },
}

#[derive(Args, Clone, Debug)]
pub struct ArtifactOptions {
    /// Hosting username (default: value from the VREL_HOSTING_USERNAME
    /// environment variable)
    #[clap(long)]
    pub username: Option<String>,

    /// Hosting API key (default: value from the VREL_HOSTING_API_KEY
    /// environment variable)
    #[clap(long)]
    pub api_key: Option<String>,

    /// Hosting account owning the repository (default: username)
    #[clap(long)]
    pub subject: Option<String>,

    /// Number of retries before bailing out
    #[clap(long, default_value_t = 3)]
    pub retries: u32,

    /// Base URL of the hosting API
    #[clap(long, default_value = hosting::DEFAULT_BASE_URL)]
    pub base_url: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ArtifactOperation {
    /// Upload a file to the hosting repository
    Upload {
        /// Hosting repository
        repo: String,

        /// Hosting package
        package: String,

        /// Package version
        version: String,

        /// File to upload
        file_input: PathBuf,

        /// Remote file path (default: file input basename)
        #[clap(long)]
        filepath: Option<String>,

        /// Publish the uploaded artifact as part of uploading
        #[clap(long, default_value_t = false)]
        publish: bool,

        /// Overwrite an already published artifact
        #[clap(long = "override", default_value_t = false)]
        override_existing: bool,

        /// Explode an uploaded archive on the remote side
        #[clap(long, default_value_t = false)]
        explode: bool,
    },

    /// Publish uploaded content
    Publish {
        /// Hosting repository
        repo: String,

        /// Hosting package
        package: String,

        /// Package version
        version: String,

        /// Discard uploaded content instead of publishing it
        #[clap(long, default_value_t = false)]
        discard: bool,
    },

    /// Add or remove a file in the repository download list
    DownloadList {
        /// Hosting repository
        repo: String,

        /// Remote file path
        filepath: String,

        /// Add or remove the file
        #[clap(value_enum, default_value_t = DownloadListAction::Add)]
        action: DownloadListAction,
    },

    /// Delete the specified version
    DeleteVersion {
        /// Hosting repository
        repo: String,

        /// Hosting package
        package: String,

        /// Package version
        version: String,
    },

    /// Update the information of the specified version
    UpdateVersion {
        /// Hosting repository
        repo: String,

        /// Hosting package
        package: String,

        /// Package version
        version: String,

        /// Version description
        desc: String,

        /// GitHub release notes file
        #[clap(long)]
        github_release_notes_file: Option<String>,

        /// GitHub use tag release notes
        #[clap(long)]
        github_use_tag_release_notes: Option<String>,

        /// VCS tag
        #[clap(long)]
        vcs_tag: Option<String>,

        /// Release date
        #[clap(long)]
        released: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum DownloadListAction {
    /// List the file in the repository download list
    Add,

    /// Remove the file from the repository download list
    Remove,
}
