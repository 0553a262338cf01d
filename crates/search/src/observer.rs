use mixbook_catalog::Recipe;

/// Hook for tracing ingredient matching. Queries stay pure; anything that
/// wants step-by-step output installs an observer.
pub trait MatchObserver: Send + Sync {
    fn on_evaluated(&self, _recipe: &Recipe, _missing: &[&str]) {}

    fn on_complete(&self, _selected: usize, _matched: usize) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Forwards match decisions to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl MatchObserver for LogObserver {
    fn on_evaluated(&self, recipe: &Recipe, missing: &[&str]) {
        if missing.is_empty() {
            log::trace!("match {} ({}): all ingredients selected", recipe.name, recipe.id);
        } else {
            log::trace!(
                "skip {} ({}): missing {}",
                recipe.name,
                recipe.id,
                missing.join(", ")
            );
        }
    }

    fn on_complete(&self, selected: usize, matched: usize) {
        log::debug!("ingredient match: {selected} selected, {matched} recipes");
    }
}
