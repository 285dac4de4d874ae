use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

/// Fire-and-forget user-facing notice. The core never waits on delivery and
/// never reads anything back from the presentation side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(256);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        // No subscribers is fine; the send result is deliberately ignored.
        let _ = self.tx.send(Notification {
            kind,
            title: title.to_owned(),
            message: message.to_owned(),
        });
    }

    pub fn success(&self, title: &str, message: &str) {
        self.notify(NoticeKind::Success, title, message);
    }

    pub fn error(&self, title: &str, message: &str) {
        self.notify(NoticeKind::Error, title, message);
    }

    pub fn warning(&self, title: &str, message: &str) {
        self.notify(NoticeKind::Warning, title, message);
    }

    pub fn info(&self, title: &str, message: &str) {
        self.notify(NoticeKind::Info, title, message);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_notices_in_order() {
        let notices = Notifier::new();
        let mut rx = notices.subscribe();

        notices.error("Login Failed", "Email is not registered");
        notices.success("Email Sent", "Recovery instructions sent");

        assert_eq!(rx.try_recv().unwrap().kind, NoticeKind::Error);
        assert_eq!(rx.try_recv().unwrap().kind, NoticeKind::Success);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn send_without_subscribers_is_silent() {
        let notices = Notifier::new();
        notices.info("Notification", "nothing listens");
    }
}
