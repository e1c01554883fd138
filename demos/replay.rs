//! Remembered events replayed to late subscribers on the tokio scheduler.
//!
//! Run with `RUST_LOG=recall_emitter=debug cargo run --example replay`.

use std::time::Duration;

use recall_emitter::{Emit, EventsEmitter};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter: EventsEmitter<String> = EventsEmitter::new();
    emitter.remember(["ready", "config"]);

    // Nobody listens yet; the arguments are kept anyway.
    emitter.trigger("ready", &["v1.2.0".to_string()])?;
    emitter.trigger("config", &["debug=true".to_string(), "port=8080".to_string()])?;

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    for event in ["ready", "config"] {
        let tx = tx.clone();
        emitter.once(event, move |_, args| {
            let _ = tx.send(format!("{event}: {}", args.join(", ")));
            Ok(())
        });
    }
    drop(tx);
    println!("subscribed; replays are pending");

    while let Ok(Some(line)) = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await {
        println!("replayed {line}");
    }

    emitter.forget(["ready", "config"]);
    println!("memory of ready: {:?}", emitter.memory("ready"));
    Ok(())
}
