use colored::Colorize;
use demo_core::render::format_all;
use demo_core::{Notice, Notifier, ResponseEnvelope, Sink};

/// Prints envelopes under a heading naming the display region.
pub struct TerminalSink {
    region: &'static str,
}

impl TerminalSink {
    pub fn new(region: &'static str) -> Self {
        Self { region }
    }
}

impl Sink for TerminalSink {
    fn present(&self, responses: &[ResponseEnvelope]) {
        println!("{} {}", "▸".cyan().bold(), self.region.bold());
        println!("{}", format_all(responses));
    }
}

/// Prints notices to stderr.
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::NotFound | Notice::ServerError(_) => {
                eprintln!("{} {}", "!".yellow().bold(), notice)
            }
            _ => eprintln!("{} {}", "✖".red().bold(), notice),
        }
    }
}
