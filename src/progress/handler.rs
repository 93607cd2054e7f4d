//! Progress handler trait and events

/// Events emitted while a recipe is processed
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Extraction started
    Started { recipe: String },

    /// A profile's extraction started
    ProfileStarted { profile: String },

    /// Zone text scanned and slots resolved
    ZonesResolved {
        profile: String,
        zones: usize,
        assigned: usize,
    },

    /// A profile's extraction finished
    ProfileComplete { profile: String, keys: usize },

    /// Extraction completed successfully
    Completed { profiles: usize, total_keys: usize },

    /// Extraction failed
    Failed { error: String },
}

/// Trait for handling progress events during extraction
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {
        // Intentionally empty
    }
}
