//! Usage Renderer - help text
//!
//! Banner, flag synopsis from the argument parser, the template catalog and
//! a few example invocations.

use clap::CommandFactory;
use colored::Colorize;
use std::io::{self, Write};

use crate::options::Flags;
use crate::templates::TemplateCatalog;

const BANNER: &str = r" _ __ ___   ___ _ __ ___   ___
| '_ ' _ \ / _ \ '_ ' _ \ / _ \
| | | | | |  __/ | | | | |  __/
|_| |_| |_|\___|_| |_| |_|\___|
";

const EXAMPLES: &[&str] = &[
    r#"meme -i kirk-khan -t "|khaaaan""#,
    r#"meme -i brace-yourselves -t "Brace yourselves|The memes are coming!""#,
    r#"meme -i http://i.imgur.com/FsWetC0.jpg -t "|China""#,
    r#"meme -i ~/Pictures/face.png -t "Hello""#,
];

/// clap's help, with `--cid` shown in its single-dash spelling
fn flag_synopsis() -> String {
    Flags::command()
        .render_help()
        .to_string()
        .replace("--cid <CLIENT_ID>", "-cid <CLIENT_ID> ")
}

pub fn write_usage<W: Write>(out: &mut W, catalog: &TemplateCatalog) -> io::Result<()> {
    writeln!(out, "{}", BANNER.green())?;
    writeln!(out)?;
    writeln!(out, "{}", flag_synopsis())?;

    writeln!(out, "  Templates")?;
    writeln!(out)?;
    for id in catalog.iter() {
        writeln!(out, "{}", format!("    {}", id).cyan())?;
    }
    writeln!(out)?;

    writeln!(out, "  Examples")?;
    writeln!(out)?;
    for example in EXAMPLES {
        writeln!(out, "{}", format!("    {}", example).cyan())?;
    }
    writeln!(out)?;

    Ok(())
}

pub fn print_usage(catalog: &TemplateCatalog) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_usage(&mut handle, catalog)
}
