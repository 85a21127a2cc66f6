// Alias to disable clap's `Vec` magic: a list of angles is a single
// comma-separated argument, not a repeated one.
pub type AngleList = Vec<f64>;

/// Parse a comma-separated list, ignoring whitespace around the items. An
/// empty string is an empty list.
pub fn parse_list<T: std::str::FromStr>(s: &str) -> Result<Vec<T>, <T as std::str::FromStr>::Err> {
    if s.trim().is_empty() { return Ok(vec![]) }
    s.split(',')
        .map(|item| item.trim().parse())
        .collect()
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}


pub mod timing {

    use super::group_digits;
    use std::time::Instant;
    use tracing::info;

    pub struct Progress {
        previous: Instant,
        message: String,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now(), message: String::new() } }

        /// Log message with appended ellipsis, remember it, start timer.
        pub fn start(&mut self, message: &str) {
            info!("{message} ...");
            self.message = message.into();
            self.start_timer();
        }

        // Log the message of the last `start` with the time elapsed since then
        pub fn done(&mut self) {
            let message = std::mem::take(&mut self.message);
            self.done_with_message(&message);
        }

        // Log message followed by time elapsed since last start or done
        pub fn done_with_message(&mut self, message: &str) {
            info!("{message}: {} ms",
                  group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}
