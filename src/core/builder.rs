use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use super::config::EmitterConfig;
use super::emitter::{EventsEmitter, Inner, State};
use crate::scheduler::{Schedule, TokioScheduler};

/// Builder for constructing an [`EventsEmitter`] with a non-default scheduler.
pub struct EmitterBuilder<A> {
    cfg: EmitterConfig,
    scheduler: Option<Arc<dyn Schedule>>,
    _args: PhantomData<fn() -> A>,
}

impl<A> EmitterBuilder<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: EmitterConfig) -> Self {
        Self {
            cfg,
            scheduler: None,
            _args: PhantomData,
        }
    }

    /// Sets the scheduler used for memory replays.
    ///
    /// Defaults to [`TokioScheduler`].
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Schedule>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Builds the emitter.
    pub fn build(self) -> EventsEmitter<A> {
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Arc::new(TokioScheduler::new()) as Arc<dyn Schedule>);

        tracing::debug!(
            scheduler = scheduler.name(),
            id_scope = ?self.cfg.id_scope,
            "emitter built"
        );

        EventsEmitter::from_inner(Arc::new(Inner {
            state: Mutex::new(State::new(self.cfg.id_scope)),
            root: self.cfg.root(),
            scheduler,
        }))
    }
}
