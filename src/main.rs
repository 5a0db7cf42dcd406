use std::env;
use std::error::Error;
use std::io::{self, BufRead, BufWriter, Write};

use infrakit::{InfrakitConfig, assign_raw};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Buckets identities read from stdin, one per line, and prints
/// `identity<TAB>bucket`. The optional single argument is a YAML config path.
fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = match env::args().nth(1) {
        Some(path) => InfrakitConfig::from_file(&path)?,
        None => InfrakitConfig::default(),
    };
    let normalize_cfg = config.normalize_config();
    let mut manager = config.build_manager()?;

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    for line in stdin.lock().lines() {
        let line = line?;
        let identity = line.trim();
        if identity.is_empty() {
            continue;
        }
        let assignment = assign_raw(&mut manager, identity, &normalize_cfg)?;
        writeln!(out, "{identity}\t{}", assignment.bucket)?;
    }
    out.flush()?;

    info!(
        identities = manager.len(),
        buckets = manager.bucket_count(),
        "bucketing_complete"
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);
    if env::var_os("INFRAKIT_LOG_JSON").is_some() {
        builder.json().init();
    } else {
        builder.init();
    }
}
