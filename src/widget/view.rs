// src/widget/view.rs
use std::io::Write;
use std::sync::{Arc, Mutex};

use super::LogEntry;

/// UI handles the widget controller drives.
pub trait ChatView {
    fn input_value(&self) -> String;
    fn clear_input(&self);
    /// Enables or disables the input together with the submit affordance.
    fn set_input_enabled(&self, enabled: bool);
    fn append_entry(&self, entry: &LogEntry);
    fn scroll_to_bottom(&self);

    /// Returns false when the view has no year slot.
    fn show_year(&self, _year: i32) -> bool {
        false
    }
}

impl<V: ChatView + ?Sized> ChatView for Arc<V> {
    fn input_value(&self) -> String {
        (**self).input_value()
    }

    fn clear_input(&self) {
        (**self).clear_input()
    }

    fn set_input_enabled(&self, enabled: bool) {
        (**self).set_input_enabled(enabled)
    }

    fn append_entry(&self, entry: &LogEntry) {
        (**self).append_entry(entry)
    }

    fn scroll_to_bottom(&self) {
        (**self).scroll_to_bottom()
    }

    fn show_year(&self, year: i32) -> bool {
        (**self).show_year(year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false, ctrl: false, alt: false, meta: false }
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter)
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn is_plain_enter(&self) -> bool {
        self.key == Key::Enter && !(self.shift || self.ctrl || self.alt || self.meta)
    }
}

#[derive(Debug, Default)]
struct MemoryViewInner {
    input: String,
    enabled: bool,
    entries: Vec<LogEntry>,
    scrolls: usize,
    year: Option<i32>,
}

/// Headless view that records everything rendered into it.
#[derive(Debug)]
pub struct MemoryView {
    inner: Mutex<MemoryViewInner>,
    has_year_slot: bool,
}

impl Default for MemoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryViewInner { enabled: true, ..Default::default() }),
            has_year_slot: true,
        }
    }

    pub fn without_year_slot() -> Self {
        Self { has_year_slot: false, ..Self::new() }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryViewInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn type_text(&self, text: &str) {
        self.lock().input = text.to_string();
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().entries.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.lock().enabled
    }

    pub fn scroll_count(&self) -> usize {
        self.lock().scrolls
    }

    pub fn year(&self) -> Option<i32> {
        self.lock().year
    }
}

impl ChatView for MemoryView {
    fn input_value(&self) -> String {
        self.lock().input.clone()
    }

    fn clear_input(&self) {
        self.lock().input.clear();
    }

    fn set_input_enabled(&self, enabled: bool) {
        self.lock().enabled = enabled;
    }

    fn append_entry(&self, entry: &LogEntry) {
        self.lock().entries.push(entry.clone());
    }

    fn scroll_to_bottom(&self) {
        self.lock().scrolls += 1;
    }

    fn show_year(&self, year: i32) -> bool {
        if !self.has_year_slot {
            return false;
        }
        self.lock().year = Some(year);
        true
    }
}

/// Line-oriented view over stdout. The pending line stands in for the
/// input field.
#[derive(Debug, Default)]
pub struct TerminalView {
    pending: Mutex<String>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pending(&self, line: &str) {
        *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = line.to_string();
    }
}

impl ChatView for TerminalView {
    fn input_value(&self) -> String {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn clear_input(&self) {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn set_input_enabled(&self, enabled: bool) {
        tracing::trace!(enabled, "input toggled");
    }

    fn append_entry(&self, entry: &LogEntry) {
        println!("{}: {}", entry.label, entry.text);
    }

    fn scroll_to_bottom(&self) {
        if let Err(e) = std::io::stdout().flush() {
            tracing::debug!("stdout flush failed: {}", e);
        }
    }

    fn show_year(&self, year: i32) -> bool {
        println!("Mazingira Mind © {year}");
        true
    }
}
