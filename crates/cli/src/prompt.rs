//! Interactive prompt layer
//!
//! Arrow-key menus, line input with tab-complete-to-default, and y/n
//! questions, all reading raw keypress events and redrawing in place.
//! The pure state (menu cursor, line buffer, answer parsing) is kept free
//! of terminal I/O so the contracts are unit-testable. Ctrl-C at any
//! prompt yields a `Cancelled` error; the binary maps it to exit code 0.

use bareflow_core::error::{Error, ErrorCode, Result};
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use owo_colors::OwoColorize;
use std::fmt;
use std::io::{self, Write};

/// Restores cooked mode when dropped, including on early error return
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| Error::io(format!("Failed to enable raw terminal mode: {}", e)))?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Block until the next key press
fn read_key() -> Result<KeyEvent> {
    loop {
        let ev = event::read()
            .map_err(|e| Error::io(format!("Failed to read terminal event: {}", e)))?;
        if let Event::Key(key) = ev {
            // Windows delivers both press and release events
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn is_abort(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Cyclic menu cursor over a fixed number of options
#[derive(Debug)]
pub struct Selector {
    len: usize,
    cursor: usize,
}

impl Selector {
    /// Cursor starts on the first option
    pub fn new(len: usize) -> Self {
        Self { len, cursor: 0 }
    }

    /// Currently highlighted index
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the highlight up, wrapping from the first option to the last
    pub fn up(&mut self) {
        self.cursor = (self.cursor + self.len - 1) % self.len;
    }

    /// Move the highlight down, wrapping from the last option to the first
    pub fn down(&mut self) {
        self.cursor = (self.cursor + 1) % self.len;
    }
}

/// Line editor state for free-text input
#[derive(Debug, Default)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Remove the character immediately before the cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            self.chars.remove(self.cursor - 1);
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Replace the whole buffer with the given text
    pub fn complete_with(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    /// True if nothing has been typed
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Current buffer contents
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Resolve a submitted line against the default value
pub fn resolve_input(typed: &str, default: &str) -> String {
    let typed = typed.trim();
    if typed.is_empty() {
        default.to_string()
    } else {
        typed.to_string()
    }
}

/// Parse a yes/no answer; empty defaults to no
pub fn parse_yes_no(answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" => Ok(true),
        "n" | "" => Ok(false),
        _ => Err(Error::invalid_input(
            "Invalid answer. Please answer with \"y\" or \"n\".",
        )),
    }
}

/// Render a single-choice menu and return the committed option
///
/// Up/Down move the highlight cyclically; Enter commits. The menu region
/// is cleared on commit and replaced with a single confirmed line.
pub fn select<T: fmt::Display>(prompt: &str, options: Vec<T>) -> Result<T> {
    if options.is_empty() {
        return Err(Error::new(
            ErrorCode::Internal,
            "select requires at least one option",
        ));
    }

    println!("{}", prompt.yellow());

    let mut out = io::stdout();
    let guard = RawModeGuard::enable()?;
    let mut selector = Selector::new(options.len());
    draw_options(&mut out, &options, selector.cursor(), false)?;

    loop {
        let key = read_key()?;
        if is_abort(&key) {
            clear_region(&mut out, options.len())?;
            drop(guard);
            return Err(Error::cancelled());
        }
        match key.code {
            KeyCode::Up => {
                selector.up();
                draw_options(&mut out, &options, selector.cursor(), true)?;
            }
            KeyCode::Down => {
                selector.down();
                draw_options(&mut out, &options, selector.cursor(), true)?;
            }
            KeyCode::Enter => {
                clear_region(&mut out, options.len())?;
                drop(guard);
                let index = selector.cursor();
                let chosen = options.into_iter().nth(index).ok_or_else(|| {
                    Error::new(ErrorCode::Internal, "selection cursor out of range")
                })?;
                println!("{} {}", "✔".green(), chosen);
                println!();
                return Ok(chosen);
            }
            _ => {}
        }
    }
}

/// Ask for a line of text, tab-completing and defaulting to `default`
///
/// The resolved value may still be empty when `default` is empty; treating
/// that as fatal is the caller's decision.
pub fn input(prompt: &str, default: &str) -> Result<String> {
    let mut out = io::stdout();
    let guard = RawModeGuard::enable()?;
    let mut buffer = LineBuffer::new();
    draw_input(&mut out, prompt, &buffer, default)?;

    loop {
        let key = read_key()?;
        if is_abort(&key) {
            write!(out, "\r\n")?;
            out.flush()?;
            drop(guard);
            return Err(Error::cancelled());
        }
        match key.code {
            KeyCode::Tab => buffer.complete_with(default),
            KeyCode::Backspace => {
                buffer.backspace();
            }
            KeyCode::Enter => break,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.insert(c);
            }
            _ => {}
        }
        draw_input(&mut out, prompt, &buffer, default)?;
    }

    write!(out, "\r\n")?;
    out.flush()?;
    drop(guard);

    Ok(resolve_input(&buffer.text(), default))
}

/// Ask a yes/no question; `y` → true, `n` or empty → false
///
/// Any other answer is a fatal `InvalidInput` error.
pub fn confirm(prompt: &str) -> Result<bool> {
    let rendered = format!("{} {}", prompt.yellow(), "[y/n]:".yellow());
    let answer = read_line(&rendered)?;
    parse_yes_no(&answer)
}

/// Echoed line input in raw mode: characters, backspace, enter
fn read_line(rendered_prompt: &str) -> Result<String> {
    let mut out = io::stdout();
    let guard = RawModeGuard::enable()?;
    let mut buffer = LineBuffer::new();

    write!(out, "{} ", rendered_prompt)?;
    out.flush()?;

    loop {
        let key = read_key()?;
        if is_abort(&key) {
            write!(out, "\r\n")?;
            out.flush()?;
            drop(guard);
            return Err(Error::cancelled());
        }
        match key.code {
            KeyCode::Backspace => {
                if buffer.backspace() {
                    write!(out, "\u{8} \u{8}")?;
                    out.flush()?;
                }
            }
            KeyCode::Enter => break,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.insert(c);
                write!(out, "{}", c)?;
                out.flush()?;
            }
            _ => {}
        }
    }

    write!(out, "\r\n")?;
    out.flush()?;
    drop(guard);

    Ok(buffer.text())
}

fn draw_options<T: fmt::Display>(
    out: &mut impl Write,
    options: &[T],
    cursor: usize,
    redraw: bool,
) -> Result<()> {
    if redraw {
        queue!(
            out,
            MoveUp(options.len() as u16),
            MoveToColumn(0),
            Clear(ClearType::FromCursorDown)
        )?;
    }
    for (i, opt) in options.iter().enumerate() {
        if i == cursor {
            write!(out, "{}\r\n", format!("> {}", opt).cyan())?;
        } else {
            write!(out, "  {}\r\n", opt)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn draw_input(out: &mut impl Write, prompt: &str, buffer: &LineBuffer, default: &str) -> Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(out, "{} {}", format!("{}:", prompt).yellow(), buffer.text())?;
    if buffer.is_empty() && !default.is_empty() {
        write!(out, "{}", default.dimmed())?;
    }
    out.flush()?;
    Ok(())
}

fn clear_region(out: &mut impl Write, lines: usize) -> Result<()> {
    queue!(
        out,
        MoveUp(lines as u16),
        MoveToColumn(0),
        Clear(ClearType::FromCursorDown)
    )?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_selector_wraps_up_from_first() {
        let mut sel = Selector::new(3);
        sel.up();
        assert_eq!(sel.cursor(), 2);
    }

    #[test]
    fn test_selector_wraps_down_from_last() {
        let mut sel = Selector::new(3);
        sel.down();
        sel.down();
        sel.down();
        assert_eq!(sel.cursor(), 0);
    }

    proptest! {
        #[test]
        fn selector_cursor_is_net_moves_mod_len(
            len in 1usize..8,
            moves in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let mut sel = Selector::new(len);
            let mut net: i64 = 0;
            for down in &moves {
                if *down {
                    sel.down();
                    net += 1;
                } else {
                    sel.up();
                    net -= 1;
                }
            }
            prop_assert_eq!(sel.cursor(), net.rem_euclid(len as i64) as usize);
        }
    }

    #[test]
    fn test_line_buffer_insert_and_backspace() {
        let mut buf = LineBuffer::new();
        buf.insert('1');
        buf.insert('.');
        buf.insert('3');
        assert_eq!(buf.text(), "1.3");
        assert!(buf.backspace());
        assert_eq!(buf.text(), "1.");
        assert!(buf.backspace());
        assert!(buf.backspace());
        assert!(!buf.backspace());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_line_buffer_complete_with_replaces_contents() {
        let mut buf = LineBuffer::new();
        buf.insert('x');
        buf.complete_with("1.2.3");
        assert_eq!(buf.text(), "1.2.3");
        buf.insert('4');
        assert_eq!(buf.text(), "1.2.34");
    }

    #[test]
    fn test_resolve_input_empty_falls_back_to_default() {
        assert_eq!(resolve_input("", "1.2.3"), "1.2.3");
        assert_eq!(resolve_input("   ", "1.2.3"), "1.2.3");
        assert_eq!(resolve_input("1.3.0", "1.2.3"), "1.3.0");
        assert_eq!(resolve_input("", ""), "");
    }

    #[test]
    fn test_parse_yes_no_accepts_case_insensitive_yes() {
        assert!(parse_yes_no("y").unwrap());
        assert!(parse_yes_no("Y").unwrap());
    }

    #[test]
    fn test_parse_yes_no_defaults_to_no() {
        assert!(!parse_yes_no("n").unwrap());
        assert!(!parse_yes_no("N").unwrap());
        assert!(!parse_yes_no("").unwrap());
        assert!(!parse_yes_no("  ").unwrap());
    }

    #[test]
    fn test_parse_yes_no_rejects_anything_else() {
        let err = parse_yes_no("maybe").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
