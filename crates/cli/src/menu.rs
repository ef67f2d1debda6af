//! Interactive numbered menu.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::error;

use crate::{
    app::App,
    commands::{ConvertOptions, clear, convert},
    prompt::Console,
};

pub const MENU_TEXT: &str = "\
[1] Convert and rename TTF -> WOFF2 (subset U+000-5FF)
[2] Clear fonts_used folder
[3] Help
[0] Exit";

pub const HELP_TEXT: &str = "\
============================
Usage
============================
- Put .ttf files in fonts_ttf.
- Run option 1 to rename and generate .woff2 into font_lib (one subfolder per family),
  moving converted .ttf files to fonts_used.
- Use option 2 to clear fonts_used when you want to start over.
- Keep your font library here and copy fonts into projects as needed.

============================
Naming
============================
- Detects the Google Fonts naming pattern: Family[_suffix]-WeightItalic.
- Asks once per family whether to drop the suffix after '_' when every file
  shares the same one; families with mixed suffixes keep all of them so
  outputs never collide.
- Asks whether you prefer numeric weights (900) or textual weights (Black);
  Italic is appended when present.

============================
Subsetting
============================
- Keeps U+0000-05FF (ASCII, Latin-1 and common accented Latin), WOFF2 flavor,
  Brotli compression.
- Use --external-subsetter to run pyftsubset (or a compatible tool) instead.

============================
Folders
============================
- fonts_ttf: input TTFs you want to convert.
- font_lib: output WOFF2 files, organized in subfolders by family.
- fonts_used: original TTFs that were already converted.";

/// A parsed menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Convert,
    ClearArchive,
    Help,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Convert),
            "2" => Some(MenuChoice::ClearArchive),
            "3" => Some(MenuChoice::Help),
            "0" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

pub fn show_help<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say(format!("\n{HELP_TEXT}\n"))?;
    console.pause("Press Enter to return to menu...")
}

/// Loop until the user exits or input ends. A failed command is reported and
/// the menu comes back.
pub fn run<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> Result<()> {
    loop {
        console.say("\n=== TTF -> WOFF2 Converter ===")?;
        console.say(MENU_TEXT)?;

        let Some(answer) = console.ask("Choice: ")? else {
            return Ok(());
        };

        let result = match MenuChoice::parse(&answer) {
            Some(MenuChoice::Convert) => convert(app, console, &ConvertOptions::default()).map(drop),
            Some(MenuChoice::ClearArchive) => clear(app, console).map(drop),
            Some(MenuChoice::Help) => show_help(console),
            Some(MenuChoice::Exit) => {
                console.say("Exiting...")?;
                return Ok(());
            }
            None => console.say("Invalid option. Try again."),
        };

        if let Err(err) = result {
            error!("{err:#}");
            console.say(format!("Error: {err:#}"))?;
        }
    }
}
