use std::io::{BufRead, Write};

use anyhow::Result;
use fontshelf_core::clear_archive;

use crate::{app::App, prompt::Console};

pub fn clear<R: BufRead, W: Write>(app: &App, console: &mut Console<R, W>) -> Result<usize> {
    app.layout.ensure()?;
    let removed = clear_archive(&app.layout)?;
    console.say(format!("Removed {removed} file(s) from fonts_used."))?;
    Ok(removed)
}
