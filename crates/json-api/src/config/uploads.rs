//! Upload Config

use std::path::PathBuf;

use clap::Args;

/// Image upload storage settings.
#[derive(Debug, Args)]
pub struct UploadConfig {
    /// Directory uploaded images are written to and served from
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,
}
