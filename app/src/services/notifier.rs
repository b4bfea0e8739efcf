use engine::ErrorDisplay;

/// Shows validation messages on stderr.
#[derive(Debug, Default)]
pub struct ConsoleErrorDisplay;

impl ErrorDisplay for ConsoleErrorDisplay {
    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}
