//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{error, info};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { recipe } => {
                info!(recipe = %recipe, "Starting extraction");
            }
            ProgressEvent::ProfileStarted { profile } => {
                info!(profile = %profile, "Processing profile");
            }
            ProgressEvent::ZonesResolved {
                profile,
                zones,
                assigned,
            } => {
                info!(profile = %profile, zones, assigned, "Zones resolved");
            }
            ProgressEvent::ProfileComplete { profile, keys } => {
                info!(profile = %profile, keys, "Profile complete");
            }
            ProgressEvent::Completed {
                profiles,
                total_keys,
            } => {
                info!(profiles, total_keys, "Extraction complete");
            }
            ProgressEvent::Failed { error } => {
                error!(error = %error, "Extraction failed");
            }
        }
    }
}
