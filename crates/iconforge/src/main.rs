mod bindings;
mod check;
mod cli;
mod mask;
mod paths;
mod run;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Glyph(args)) => run::render_glyph(args),
        Some(Command::Glyphs) => run::list_glyphs(),
        Some(Command::Check(args)) => check::run(args),
        Some(Command::Mask(args)) => mask::run(args),
        None => run::run(cli.run),
    }
}
