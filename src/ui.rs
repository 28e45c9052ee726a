use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::{Duration, Instant};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Running,
    Done,
    Note,
    Warn,
    Failed,
}

impl Tone {
    fn color(self) -> AnsiColor {
        match self {
            Tone::Running => AnsiColor::Cyan,
            Tone::Done => AnsiColor::Green,
            Tone::Note => AnsiColor::Blue,
            Tone::Warn => AnsiColor::Yellow,
            Tone::Failed => AnsiColor::Red,
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Failed)
    }
}

/// Right-align `label`; continuation lines of `message` are indented under the first
fn render(label: &str, message: &str, style: Option<Style>) -> String {
    let (on, off) = match style {
        Some(style) => (style.render().to_string(), style.render_reset().to_string()),
        None => (String::new(), String::new()),
    };

    let mut out = String::new();
    let mut lines = message.split('\n');
    let first = lines.next().unwrap_or_default();
    out.push_str(&format!("{on}{label:>LABEL_WIDTH$}{off} {first}\n"));
    for line in lines {
        out.push_str(&format!("{:LABEL_WIDTH$} {line}\n", ""));
    }
    out
}

fn emit(tone: Tone, label: &str, message: &str) {
    let color = std::env::var_os("NO_COLOR").is_none()
        && if tone.to_stderr() {
            io::stderr().is_terminal()
        } else {
            io::stdout().is_terminal()
        };
    let style = color.then(|| Style::new().bold().fg_color(Some(tone.color().into())));
    let text = render(label, message, style);

    // A closed pipe must not abort setup halfway.
    let _ = if tone.to_stderr() {
        io::stderr().lock().write_all(text.as_bytes())
    } else {
        io::stdout().lock().write_all(text.as_bytes())
    };
}

fn elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        60.. if secs % 60 == 0 => format!("{}m", secs / 60),
        60.. => format!("{}m {}s", secs / 60, secs % 60),
        1.. => format!("{:.2}s", duration.as_secs_f64()),
        0 if duration.as_millis() >= 1 => format!("{}ms", duration.as_millis()),
        0 => format!("{}µs", duration.as_micros()),
    }
}

pub fn info(message: impl Display) {
    emit(Tone::Note, "Info", &message.to_string());
}

pub fn warn(message: impl Display) {
    emit(Tone::Warn, "Warning", &message.to_string());
}

pub fn error(message: impl Display) {
    emit(Tone::Failed, "Error", &message.to_string());
}

pub fn success(label: &str, message: impl Display) {
    emit(Tone::Done, label, &message.to_string());
}

/// One setup step that is in flight.
///
/// `start` prints what is about to happen; the step then closes with `done`,
/// `skip`, or, when dropped early because a later `?` bailed out, a
/// "Stopped" line naming the unfinished step.
pub struct Progress {
    subject: String,
    started: Instant,
    closed: bool,
}

impl Progress {
    pub fn start(verb: &str, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        emit(Tone::Running, verb, &subject);

        Self {
            subject,
            started: Instant::now(),
            closed: false,
        }
    }

    pub fn done(mut self, verb: &str, detail: Option<String>) {
        self.closed = true;
        let detail = detail
            .filter(|detail| !detail.is_empty())
            .map(|detail| format!(" {detail}"))
            .unwrap_or_default();
        let message = format!(
            "{}{detail} in {}",
            self.subject,
            elapsed(self.started.elapsed())
        );
        emit(Tone::Done, verb, &message);
    }

    /// Close the step with an informational note instead of a success line.
    pub fn skip(mut self, note: impl Display) {
        self.closed = true;
        emit(Tone::Note, "Info", &note.to_string());
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.closed {
            let message = format!("{}; setup stopped before this step finished", self.subject);
            emit(Tone::Warn, "Stopped", &message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::from_micros(250), "250µs")]
    #[case(Duration::from_millis(42), "42ms")]
    #[case(Duration::from_millis(1500), "1.50s")]
    #[case(Duration::from_secs(120), "2m")]
    #[case(Duration::from_secs(125), "2m 5s")]
    fn test_elapsed(#[case] duration: Duration, #[case] expected: &str) {
        assert_eq!(elapsed(duration), expected);
    }

    #[test]
    fn test_render_aligns_label_and_continuation() {
        let text = render("Building", "platform tooling\nmake -j8", None);
        assert_eq!(text, "    Building platform tooling\n             make -j8\n");
    }

    #[test]
    fn test_render_with_style_wraps_label_only() {
        let style = Style::new().bold();
        let text = render("Info", "hello", Some(style));

        assert!(text.starts_with(&style.render().to_string()));
        assert!(text.ends_with(&format!("{} hello\n", style.render_reset())));
    }
}
