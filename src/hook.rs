use std::io::Write;
use std::sync::{Arc, Mutex};

/// A secondary sink that receives every formatted line.
///
/// Writes are fire-and-forget: an implementation must swallow its own
/// failures so that logging never fails the caller.
pub trait Hook: Send + Sync {
    fn write(&self, message: &[u8]);
}

impl<W: Write + Send> Hook for Mutex<W> {
    fn write(&self, message: &[u8]) {
        let mut writer = self.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writer.write_all(message) {
            tracing::warn!(error = %e, "hook write failed");
        }
    }
}

impl<H: Hook + ?Sized> Hook for Arc<H> {
    fn write(&self, message: &[u8]) {
        (**self).write(message)
    }
}
