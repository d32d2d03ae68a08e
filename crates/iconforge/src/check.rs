use anyhow::{Context, Result};
use pngcodec::{scan_file, SampleGrid};
use tracing::warn;

use crate::cli::CheckArgs;

/// Prints the transparency report for `args.file`.
///
/// A file that cannot be read or parsed is reported on stdout and the
/// command still succeeds, so it can run over a folder of mixed images.
pub fn run(args: CheckArgs) -> Result<()> {
    let grid = if args.full {
        SampleGrid::full()
    } else {
        SampleGrid::new(args.row_step, args.columns)
    };

    match scan_file(&args.file, grid) {
        Ok(report) if args.json => {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialise transparency report")?;
            println!("{json}");
        }
        Ok(report) => println!("{}: {report}", args.file.display()),
        Err(err) => {
            warn!(path = %args.file.display(), error = %err, "transparency check failed");
            println!("Error checking {}: {err}", args.file.display());
        }
    }

    Ok(())
}
