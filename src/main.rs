// src/main.rs

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

use log::{info, warn};

use simdb::config::EngineConfig;
use simdb::engine::Engine;
use simdb::error::DbResult;

fn main() -> DbResult<()> {
    env_logger::init();
    let config = EngineConfig::from_env();
    info!("simdb (cell width {}, {} memory blocks)", config.cell_width, config.memory_blocks);

    let mut engine = Engine::new(&config);
    let stdout = io::stdout();

    if let Some(path) = env::args().nth(1) {
        let file = BufReader::new(File::open(&path)?);
        let summary = engine.run_batch(file, &mut stdout.lock())?;
        info!("{}: {} statement(s), {} failed", path, summary.executed, summary.failed);
        return Ok(());
    }

    info!("Type .exit to quit.");
    loop {
        print!("simdb> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.eq_ignore_ascii_case(".exit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Err(e) = engine.execute_text(trimmed, &mut stdout.lock()) {
            warn!("{}", e);
            eprintln!("Error: {}", e);
        }
    }

    info!("Goodbye!");
    Ok(())
}
