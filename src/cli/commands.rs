use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `r2g2` - upload files to an assistant, run it and print the result.
#[derive(Parser, Debug)]
#[command(name = "r2g2")]
#[command(version)]
#[command(about = "Client for the r2g2 assistant service.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.r2g2/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a directory to an assistant's store, run the assistant and print its answer
    Run {
        /// Assistant ID
        #[arg(short, long)]
        assistant: String,

        /// Directory whose files are uploaded (default from config: ./testdata)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Query sent as the user message (default from config)
        #[arg(short, long)]
        query: Option<String>,
    },

    /// List the assistants visible to the current credentials
    Assistants,

    /// Transcribe an audio file
    Transcribe {
        /// Audio file to transcribe
        file: PathBuf,
    },

    /// Print the bearer token the client would use
    Token,
}
