use chrono::{DateTime, Local};

/// Timestamp of a log line, created on first use.
///
/// All writers that receive the same log line, and the notification text,
/// see the same point in time.
#[derive(Debug, Default)]
pub struct DeferredNow(Option<DateTime<Local>>);

impl DeferredNow {
    /// No timestamp is taken yet.
    #[must_use]
    pub fn new() -> Self {
        Self(None)
    }

    /// The timestamp; the first call takes it.
    pub fn now(&mut self) -> &DateTime<Local> {
        self.0.get_or_insert_with(Local::now)
    }

    /// The timestamp, formatted with a [`chrono::format::strftime`] pattern.
    pub fn format(&mut self, fmt: &str) -> String {
        self.now().format(fmt).to_string()
    }
}

#[cfg(test)]
mod test {
    use super::DeferredNow;

    #[test]
    fn timestamp_is_taken_once() {
        let mut now = DeferredNow::new();
        let first = *now.now();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert_eq!(*now.now(), first);
        assert_eq!(
            now.format("%H:%M:%S%.6f"),
            first.format("%H:%M:%S%.6f").to_string()
        );
    }
}
