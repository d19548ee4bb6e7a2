//! Print a divan benchmark suite for a big-integer type.
//!
//! The whole file is generated in memory and written to stdout only once it
//! is complete, so a failed run never leaves a truncated suite behind:
//!
//! ```text
//! cargo run -p bigint-perf-gen -- --preset full > benches/bigint_perf.rs
//! ```

mod logging;

use std::io::Write;
use std::process::ExitCode;

use bigint_perf_defs::{GenerateArgs, OperationKind, PRESETS, find_preset};
use facet_args as args;
use facet_pretty::FacetPretty;
use miette::{IntoDiagnostic, miette};

fn main() -> ExitCode {
    logging::init();

    let args: GenerateArgs = match args::from_std_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.list_presets {
        for preset in PRESETS {
            println!(
                "{:<8} v{:<3} {}",
                preset.name, preset.version, preset.description
            );
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("❌ {report:?}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &GenerateArgs) -> miette::Result<()> {
    let name = args.preset_name();
    let preset = find_preset(name).ok_or_else(|| {
        let known: Vec<&str> = PRESETS.iter().map(|preset| preset.name).collect();
        miette!(
            help = format!("known presets: {}", known.join(", ")),
            "unknown preset '{name}'"
        )
    })?;

    let mut catalog = preset.catalog()?;
    if let Some(tag) = &args.kind {
        let kind = OperationKind::from_tag("--kind", tag)?;
        catalog.retain_kind(kind);
    }
    if args.dump_catalog {
        eprintln!("{}", catalog.pretty());
    }

    let text = bigint_perf_gen::generate(&catalog)?.into_string();

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    tracing::debug!(preset = preset.name, "wrote suite to stdout");
    Ok(())
}
