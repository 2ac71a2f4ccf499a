//! Process Output Demo: Streams a child process through the log sink.
//!
//! Spawns a command (default: `ls -la --color=always /`), pumps its
//! stdout into the sink from a reader thread, and prints the tail of each
//! committed snapshot as notifications arrive.
//!
//! Usage:
//!
//! ```text
//! RUST_LOG=logsink=trace cargo run --example process_output -- cargo build --color=always
//! ```

use crossbeam_channel::{bounded, RecvTimeoutError};
use logsink::{ChannelNotifier, Engine, EngineConfig, Notification};
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Lines of each snapshot shown on refresh.
const TAIL_LINES: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let (program, rest): (String, Vec<String>) = match args.next() {
        Some(program) => (program, args.collect()),
        None => (
            "ls".to_string(),
            vec!["-la".to_string(), "--color=always".to_string(), "/".to_string()],
        ),
    };

    let (notify_tx, notify_rx) = bounded::<Notification>(4);
    let config = EngineConfig::default().with_max_bytes(64 * 1024);
    let engine = Arc::new(Engine::with_notifier(config, ChannelNotifier::new(notify_tx))?);

    let mut child = Command::new(&program)
        .args(&rest)
        .stdout(Stdio::piped())
        .spawn()?;
    let stdout = child.stdout.take().ok_or("child has no stdout")?;

    let producer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            // Raw bytes: colored tool output is not always valid UTF-8.
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            while matches!(reader.read_until(b'\n', &mut line), Ok(n) if n > 0) {
                engine.append(&String::from_utf8_lossy(&line));
                line.clear();
            }
        })
    };

    let mut refreshes = 0u64;
    loop {
        match notify_rx.recv_timeout(Duration::from_millis(500)) {
            Ok(notification) => {
                refreshes += 1;
                let text = engine.get_text();
                let tail: Vec<&str> = text.lines().rev().take(TAIL_LINES).collect();
                println!("--- refresh {refreshes} ({notification:?}) ---");
                for line in tail.iter().rev() {
                    println!("{line}");
                }
            }
            Err(RecvTimeoutError::Timeout) if producer.is_finished() => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    let _ = producer.join();
    let status = child.wait()?;
    engine.stop();

    let stats = engine.stats();
    println!(
        "{program} exited with {status}: {} fragments ({} via fallback), {} commits, {} refreshes",
        stats.fragments, stats.fallback_appends, stats.commits, refreshes
    );
    Ok(())
}
