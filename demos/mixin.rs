//! Attaching the emitter operation set to host types.

use std::sync::Arc;

use recall_emitter::{DeferredQueue, Emit, EmitterConfig, EventsEmitter, Mixin};

/// Host that embeds its emitter and forwards to it.
struct Download {
    url: String,
    events: EventsEmitter<u64>,
}

impl Emit<u64> for Download {
    fn emitter(&self) -> &EventsEmitter<u64> {
        &self.events
    }
}

#[derive(Debug, Default)]
struct Player {
    name: String,
    score: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Explicit queue: replays run when this program says so.
    let queue = Arc::new(DeferredQueue::new());
    let events = EventsEmitter::builder(EmitterConfig::default())
        .with_scheduler(queue.clone())
        .build();

    let dl = Download {
        url: "https://example.org/image.iso".into(),
        events,
    };
    dl.remember("progress");
    dl.trigger("progress", &[4096])?;
    dl.on("progress", |_, bytes| {
        println!("progress: {} bytes", bytes[0]);
        Ok(())
    });
    println!("{}: {} replay(s) ran", dl.url, queue.run_pending());

    // Generic mixin: host fields stay reachable through Deref.
    let mut player: Mixin<Player, u64> = EventsEmitter::mixins(Player::default());
    player.name = "Pavel".into();
    player.on("scored", |_, points| {
        println!("scored {}", points[0]);
        Ok(())
    });
    player.trigger("scored", &[10])?;
    player.score += 10;
    println!("{:?}", player.into_inner());
    Ok(())
}
