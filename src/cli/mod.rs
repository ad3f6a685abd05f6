pub mod blogs;
pub mod init;
pub mod login;
pub mod serve;

use crate::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blogfront")]
#[command(version)]
#[command(about = "A small web client for a blog API", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "blogfront.toml")]
    pub config: PathBuf,

    /// Base URL of the blog API
    #[arg(long, env = "BLOG_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter config file
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Run the web frontend
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List posts
    Blogs {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(short, long)]
        offset: Option<u32>,
    },
    /// Show a single post
    Show { id: String },
    /// Log in and store the issued tokens
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
        /// Token file, defaults to ~/.blogfront/tokens.json
        #[arg(long)]
        token_file: Option<PathBuf>,
    },
}

pub fn load_config(path: &Path, api_url: Option<String>) -> Result<Config> {
    Config::load(path)?.with_api_base_url(api_url)
}
