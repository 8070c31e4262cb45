/// User-facing notifications
///
/// Short transient messages: generation started, succeeded, failed.

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Prints notifications to stdout
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

#[cfg(test)]
pub mod testing {
    use super::Notifier;
    use std::sync::Mutex;

    /// Keeps every message for assertions
    #[derive(Default)]
    pub struct RecordingNotifier {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}
