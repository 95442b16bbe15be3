//! gostatus CLI: `go list all | gostatus`.

use anyhow::Result;
use gostatus::engine::{handle_run, parse_or_exit};
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = parse_or_exit();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
