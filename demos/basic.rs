//! Limited listeners, bound contexts, removal and bulk clearing.
//!
//! Run with `RUST_LOG=recall_emitter=debug cargo run --example basic`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use recall_emitter::{ClearOptions, Context, Emit, EventsEmitter, ListenOptions, ListenerError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let emitter: EventsEmitter<String> = EventsEmitter::new();

    // Three-shot listener.
    let shots = Arc::new(AtomicU32::new(0));
    let s = shots.clone();
    emitter.on_with(
        "tick",
        move |_, args| {
            let n = s.fetch_add(1, Ordering::Relaxed) + 1;
            println!("tick #{n}: {args:?}");
            Ok(())
        },
        ListenOptions::new().times(3),
    );

    // Listener bound to a context.
    let prefix: Context = Arc::new(String::from("[audit]"));
    let audit = emitter
        .on_with(
            "tick",
            |ctx, args| {
                let prefix = ctx
                    .downcast_ref::<String>()
                    .ok_or_else(|| ListenerError::rejected("audit needs a String context"))?;
                println!("{prefix} {}", args.join(" "));
                Ok(())
            },
            ListenOptions::new().context(prefix),
        )
        .ok_or("audit listener not registered")?;

    for i in 0..5 {
        emitter.trigger("tick", &[format!("t{i}")])?;
    }
    println!("shots fired: {}", shots.load(Ordering::Relaxed));

    // Spent and removed listeners stay bound as ghosts until compacted.
    emitter.off(audit);
    println!("binding before sweep: {:?}", emitter.binding("tick"));
    emitter.clear("tick", ClearOptions::ghosts());
    println!("binding after sweep:  {:?}", emitter.binding("tick"));

    // A failing listener stops the rest of the dispatch.
    emitter.on("save", |_, _| Err(ListenerError::failed("disk full")));
    emitter.on("save", |_, _| {
        println!("never reached");
        Ok(())
    });
    if let Err(e) = emitter.trigger("save", &["report.txt".to_string()]) {
        println!("save failed: {e} ({})", e.as_label());
    }

    emitter.clear_all(ClearOptions::new());
    println!("events left: {:?}", emitter.events());
    Ok(())
}
