/// Alert shown when the card model cannot be loaded.
pub const MODEL_LOAD_ALERT: &str =
    "Failed to load essential 3D assets. Please try refreshing the page.";
/// Alert shown when an export fails.
pub const DOWNLOAD_FAILED_ALERT: &str = "Failed to download preview. Please try again.";
/// Alert shown when an export is requested before the scene exists.
pub const SCENE_NOT_LOADED_ALERT: &str =
    "3D scene not properly loaded. Please wait for the model to load completely.";

/// User-visible feedback channel.
pub trait Notifier {
    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);
}

/// Notifier that only logs.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&mut self, message: &str) {
        tracing::error!(message, "alert");
    }
}

/// Notifier that keeps every alert, for tests and scripted runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingNotifier {
    alerts: Vec<String>,
}

impl RecordingNotifier {
    /// Alerts in the order they were raised.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Remove and return the recorded alerts.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        tracing::error!(message, "alert");
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/notify.rs"]
mod tests;
