//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};

use crate::{
    app::App,
    commands::{ConvertOptions, clear, convert},
    menu,
    prompt::Console,
};

#[derive(Parser)]
#[command(name = "fontshelf", version)]
#[command(about = "Convert TTF fonts into a subsetted WOFF2 library")]
pub struct Cli {
    /// Library root holding fonts_ttf, font_lib and fonts_used
    /// [default: the executable's directory]
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
    /// Maximum number of families converted at once
    #[arg(short, long, global = true)]
    pub jobs: Option<usize>,
    /// Run a pyftsubset-compatible program instead of the built-in subsetter
    #[arg(long, global = true, value_name = "PROGRAM")]
    pub external_subsetter: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every TTF in fonts_ttf
    Convert {
        /// Use numeric weight labels (900) instead of text (Black)
        #[arg(long)]
        numeric: bool,
        /// Keep the shared suffix of this family (repeatable)
        #[arg(long, value_name = "FAMILY")]
        keep_suffix: Vec<String>,
        /// Accept the default answer to every question
        #[arg(short, long)]
        yes: bool,
        /// Print planned output names without converting
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete archived originals from fonts_used
    Clear,
    /// Show usage notes
    Guide,
    /// Interactive menu (the default)
    Menu,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let app = App::from_args(self.root, self.external_subsetter, self.jobs)?;
        let mut console = Console::stdio();

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Convert { numeric, keep_suffix, yes, dry_run } => {
                let options =
                    ConvertOptions { numeric, keep_suffix, assume_defaults: yes, dry_run };
                if let Some(report) = convert(&app, &mut console, &options)?
                    && !report.all_succeeded()
                {
                    bail!(
                        "convert failed: {} succeeded, {} failed",
                        report.successes.len(),
                        report.failures.len()
                    );
                }
            }
            Commands::Clear => {
                clear(&app, &mut console)?;
            }
            Commands::Guide => console.say(menu::HELP_TEXT)?,
            Commands::Menu => menu::run(&app, &mut console)?,
        }
        Ok(())
    }
}
