use clap::Parser;

use stockpilot_cli::Args;

fn main() -> anyhow::Result<()> {
    stockpilot_observability::init();

    let args = Args::parse();
    let report = stockpilot_cli::run(&args.snapshot)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
