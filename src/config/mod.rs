use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "libcat")]
#[command(about = "Console catalog manager for library publications and users")]
pub struct CliConfig {
    #[arg(long, default_value = "Library.csv")]
    pub library_file: String,

    #[arg(long, default_value = "Users.csv")]
    pub users_file: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("library_file", &self.library_file)?;
        validate_path("users_file", &self.users_file)?;
        Ok(())
    }
}
