//! Live footer updates. Admin saves publish the new settings row onto a
//! broadcast channel; every open `/footer/events` stream forwards them as
//! server-sent events so rendered pages refresh without polling.

use actix_web::web::Bytes;
use tokio::sync::broadcast;

use crate::models::FooterSettings;

const FEED_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct SettingsFeed {
    tx: broadcast::Sender<FooterSettings>,
}

impl Default for SettingsFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Fan the updated row out to all subscribers. Send errors just mean
    /// nobody is listening right now.
    pub fn publish(&self, settings: FooterSettings) {
        let _ = self.tx.send(settings);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FooterSettings> {
        self.tx.subscribe()
    }
}

/// One SSE frame carrying the settings row as JSON. Returns `None` only if
/// serialization fails, in which case the frame is dropped rather than
/// breaking the stream.
pub fn sse_frame(settings: &FooterSettings) -> Option<Bytes> {
    let json = serde_json::to_string(settings).ok()?;
    Some(Bytes::from(format!("event: footer\ndata: {}\n\n", json)))
}
