//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::defaults;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Per-route SEO pre-rendering for single-page sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: prerender.toml, optional)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments of the `build` command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Build output directory holding the bundled site (relative to root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base document, relative to the output directory
    #[arg(short, long)]
    pub base: Option<PathBuf>,

    /// Minify the generated html
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Append tags the base document lacks instead of skipping them
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub insert_missing: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override the site URL used for canonical links.
    ///
    /// Example: preview deployments served from another domain:
    ///   prerender build --site-url "https://preview.example.com"
    #[arg(long = "site-url")]
    pub site_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write one index.html per configured route with that route's meta tags
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Print the route table with canonical URLs and output paths
    Routes,

    /// Relay a contact form submission through the email service
    Contact {
        /// Visitor name
        #[arg(long)]
        name: String,

        /// Visitor email address (receives the auto-reply)
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Print the request payloads instead of sending them
        #[arg(long)]
        dry_run: bool,
    },
}

#[allow(unused)]
impl Cli {
    /// Config file name, relative to the root.
    pub fn config_file(&self) -> &Path {
        self.config
            .as_deref()
            .unwrap_or(Path::new(defaults::CONFIG_FILE))
    }

    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }
    pub const fn is_contact(&self) -> bool {
        matches!(self.command, Commands::Contact { .. })
    }
}
