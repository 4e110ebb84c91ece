use coderbot_chat::{DisplaySurface, CURSOR};
use coderbot_types::Role;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

/// Erases one cell: back, blank, back
const ERASE_CURSOR: &str = "\u{8} \u{8}";

/// Display surface that renders the chat into a terminal.
///
/// Streaming updates carry the whole buffer, so only the part not yet on
/// screen is written, followed by a cursor that the next write erases.
pub struct TerminalDisplay<W: Write + Send = io::Stdout> {
    out: W,
    assistant_label: String,
    echo_user: bool,
    /// Assistant text already written for the reply in progress
    printed: String,
    streaming: bool,
    cursor_shown: bool,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            assistant_label: "Assistant".to_string(),
            echo_user: false,
            printed: String::new(),
            streaming: false,
            cursor_shown: false,
        }
    }

    /// Label printed before each reply, usually the model name
    pub fn set_assistant_label(&mut self, label: impl Into<String>) {
        self.assistant_label = label.into();
    }

    /// Repeat user turns on screen. Off for the REPL, where the user just typed them.
    pub fn with_echo_user(mut self, echo: bool) -> Self {
        self.echo_user = echo;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            debug!("terminal write failed: {}", e);
        }
    }

    fn erase_cursor(&mut self) {
        if self.cursor_shown {
            self.cursor_shown = false;
            self.emit(ERASE_CURSOR);
        }
    }

    fn begin_reply(&mut self) {
        if !self.streaming {
            self.streaming = true;
            self.printed.clear();
            let label = format!("{} ", format!("{}:", self.assistant_label).bright_cyan().bold());
            self.emit(&label);
        }
    }

    /// Close a reply that is still open on screen
    fn end_reply(&mut self) {
        self.erase_cursor();
        if self.streaming {
            self.streaming = false;
            self.printed.clear();
            self.emit("\n");
        }
    }
}

impl<W: Write + Send> DisplaySurface for TerminalDisplay<W> {
    fn push(&mut self, role: Role, text: &str) {
        match role {
            Role::User => {
                if self.echo_user {
                    self.end_reply();
                    let line = format!("{} {}\n", "You:".bright_green().bold(), text);
                    self.emit(&line);
                }
            }
            Role::Assistant => {
                self.erase_cursor();
                if self.streaming {
                    let shown = self.printed.trim_start().to_string();
                    if let Some(rest) = text.strip_prefix(shown.as_str()) {
                        self.emit(rest);
                    } else if !(shown.starts_with(text) && shown[text.len()..].trim().is_empty()) {
                        // Cleanup changed text already on screen; show the final version
                        self.emit("\n");
                        self.emit(text);
                    }
                    self.end_reply();
                } else {
                    self.begin_reply();
                    self.emit(text);
                    self.end_reply();
                }
                self.emit("\n");
            }
            Role::System => {
                self.end_reply();
                let line = format!("{}\n", text.bright_black());
                self.emit(&line);
            }
        }
    }

    fn push_incremental(&mut self, partial: &str) {
        let body = partial.strip_suffix(CURSOR).unwrap_or(partial);
        self.begin_reply();
        self.erase_cursor();
        if let Some(rest) = body.strip_prefix(self.printed.as_str()) {
            let rest = rest.to_string();
            self.emit(&rest);
            self.printed = body.to_string();
        }
        self.emit(CURSOR);
        self.cursor_shown = true;
    }

    fn push_warning(&mut self, text: &str) {
        self.end_reply();
        let line = format!("{} {}\n", "⚠️".yellow(), text.yellow());
        self.emit(&line);
    }

    fn push_error(&mut self, text: &str, hint: &str) {
        self.end_reply();
        let line = format!("{} {}\n", "❌ Error:".red().bold(), text.red());
        self.emit(&line);
        if !hint.is_empty() {
            let line = format!("   {}\n", hint.bright_black());
            self.emit(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut TerminalDisplay<Vec<u8>>)) -> String {
        colored::control::set_override(false);
        let mut display = TerminalDisplay::new(Vec::new());
        f(&mut display);
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_streaming_writes_only_new_text() {
        let out = render(|d| {
            d.push_incremental(&format!("Hel{}", CURSOR));
            d.push_incremental(&format!("Hello{}", CURSOR));
            d.push(Role::Assistant, "Hello");
        });
        let expected = format!(
            "Assistant: Hel{c}{e}lo{c}{e}\n\n",
            c = CURSOR,
            e = ERASE_CURSOR
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_non_streamed_reply_is_printed_whole() {
        let out = render(|d| {
            d.set_assistant_label("codegemma:2b");
            d.push(Role::Assistant, "x = 1");
        });
        assert_eq!(out, "codegemma:2b: x = 1\n\n");
    }

    #[test]
    fn test_trimmed_final_text_is_not_repeated() {
        let out = render(|d| {
            d.push_incremental(&format!("ok\n\n{}", CURSOR));
            d.push(Role::Assistant, "ok");
        });
        assert_eq!(out.matches("ok").count(), 1);
    }

    #[test]
    fn test_token_split_across_updates_is_replaced_by_final_text() {
        let out = render(|d| {
            d.push_incremental(&format!("x = 1<end_of{}", CURSOR));
            d.push_incremental(&format!("x = 1<end_of_turn>{}", CURSOR));
            d.push(Role::Assistant, "x = 1");
        });
        let expected = format!(
            "Assistant: x = 1<end_of{c}{e}_turn>{c}{e}\nx = 1\n\n",
            c = CURSOR,
            e = ERASE_CURSOR
        );
        assert_eq!(out, expected);
        assert!(out.trim_end().ends_with("\nx = 1"));
    }

    #[test]
    fn test_error_closes_open_reply_and_shows_hint() {
        let out = render(|d| {
            d.push_incremental(&format!("part{}", CURSOR));
            d.push_error("model crashed", "Retry");
        });
        assert!(out.ends_with("\n❌ Error: model crashed\n   Retry\n"));
        assert!(out.contains(ERASE_CURSOR));
    }

    #[test]
    fn test_user_turns_only_echoed_when_asked() {
        let quiet = render(|d| d.push(Role::User, "hi"));
        assert_eq!(quiet, "");

        colored::control::set_override(false);
        let mut display = TerminalDisplay::new(Vec::new()).with_echo_user(true);
        display.push(Role::User, "hi");
        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out, "You: hi\n");
    }
}
