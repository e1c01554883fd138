//! # Emitter configuration.
//!
//! Provides [`EmitterConfig`], the settings fixed when an emitter is built.
//!
//! ## Sentinel values
//! - `root_context = None` → listeners without an explicit context are bound to the
//!   process-wide [`root_context`].

use crate::listeners::{root_context, Context, IdScope};

/// Settings for one emitter.
///
/// ## Field semantics
/// - `id_scope`: which counter issues listener ids (`Process` = never collide across
///   emitters, `Emitter` = private counter starting at 1)
/// - `root_context`: default context for listeners registered without one
#[derive(Clone, Default)]
pub struct EmitterConfig {
    /// Listener id scope.
    pub id_scope: IdScope,

    /// Default listener context.
    ///
    /// - `None` = the process-wide root (downcasts to [`Root`](crate::Root))
    /// - `Some(ctx)` = `ctx`
    pub root_context: Option<Context>,
}

impl EmitterConfig {
    /// Returns the context listeners fall back to.
    #[inline]
    pub fn root(&self) -> Context {
        self.root_context.clone().unwrap_or_else(root_context)
    }

    /// Shorthand for a config with a private id counter.
    pub fn scoped_ids() -> Self {
        Self {
            id_scope: IdScope::Emitter,
            ..Self::default()
        }
    }
}

impl std::fmt::Debug for EmitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmitterConfig")
            .field("id_scope", &self.id_scope)
            .field("root_context", &self.root_context.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Root;
    use std::sync::Arc;

    #[test]
    fn test_default_root_is_process_root() {
        let cfg = EmitterConfig::default();
        assert_eq!(cfg.id_scope, IdScope::Process);
        assert!(Arc::ptr_eq(&cfg.root(), &root_context()));
        assert!(cfg.root().downcast_ref::<Root>().is_some());
    }

    #[test]
    fn test_custom_root() {
        let ctx: Context = Arc::new("app");
        let cfg = EmitterConfig {
            root_context: Some(ctx.clone()),
            ..EmitterConfig::scoped_ids()
        };
        assert_eq!(cfg.id_scope, IdScope::Emitter);
        assert!(Arc::ptr_eq(&cfg.root(), &ctx));
    }
}
