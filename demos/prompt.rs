//! Interactive prompt with a background idle task.
//!
//! Run with `RUST_LOG=idleline=debug cargo run --example prompt` to see
//! the reader's decisions. Press Ctrl-C to cancel a line, Ctrl-D (or
//! Ctrl-Z on Windows) to quit.

use idleline::{InterruptFlag, LineReader, Termination};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let flag = InterruptFlag::new();
    flag.register_ctrl_c()?;

    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let mut reader = LineReader::builder()
        .idle_hook(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        })
        .interrupt_observer(flag.clone())
        .build();

    loop {
        match reader.read_stdin_line(Some(">>> ")) {
            Ok(line) if line.is_empty() => {
                if let Termination::Error(kind) = line.termination() {
                    eprintln!("input error: {kind}");
                }
                println!();
                break;
            }
            Ok(line) => {
                let text = String::from_utf8_lossy(line.as_bytes());
                println!(
                    "{:?} ({} idle ticks so far)",
                    text.trim_end_matches('\n'),
                    ticks.load(Ordering::Relaxed)
                );
            }
            Err(e) if e.is_cancelled() => {
                flag.clear();
                println!("\nKeyboardInterrupt");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
