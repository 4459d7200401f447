use crate::table::TableTemplates;
use console::{Key, Term};
use konf_store::StoreEntry;
use std::io;

/// Filter predicate: `(query, item index) -> keep`.
pub type Searcher<'a> = Box<dyn FnMut(&str, usize) -> bool + 'a>;

/// Everything a prompt needs to show the konf table.
pub struct SelectPrompt<'a> {
    pub label: String,
    pub items: &'a [StoreEntry],
    pub templates: TableTemplates,
    pub searcher: Searcher<'a>,
    /// Rows visible at once.
    pub size: usize,
}

/// Runs a [`SelectPrompt`] and returns the index of the chosen item in `prompt.items`.
pub trait PromptDriver {
    fn run(&mut self, prompt: &mut SelectPrompt<'_>) -> io::Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Select(usize),
    Cancel,
}

/// Cursor, scroll window and live filter of the picker, independent of any terminal.
#[derive(Debug, Clone)]
pub struct PickerState {
    query: String,
    visible: Vec<usize>,
    cursor: usize,
    offset: usize,
    size: usize,
}

impl PickerState {
    pub fn new(len: usize, size: usize) -> Self {
        Self {
            query: String::new(),
            visible: (0..len).collect(),
            cursor: 0,
            offset: 0,
            size: size.max(1),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Item indices that pass the current filter.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Item index under the cursor.
    pub fn current(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// `(item index, is active)` for every row in the scroll window.
    pub fn window(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.size)
            .map(move |(pos, &idx)| (idx, pos == self.cursor))
    }

    pub fn handle_key(
        &mut self,
        key: Key,
        len: usize,
        searcher: &mut dyn FnMut(&str, usize) -> bool,
    ) -> KeyOutcome {
        match key {
            Key::Enter => {
                if let Some(idx) = self.current() {
                    return KeyOutcome::Select(idx);
                }
            }
            Key::Escape => return KeyOutcome::Cancel,
            Key::ArrowUp => self.move_to(self.cursor.saturating_sub(1)),
            Key::ArrowDown => self.move_to(self.cursor + 1),
            Key::PageUp => self.move_to(self.cursor.saturating_sub(self.size)),
            Key::PageDown => self.move_to(self.cursor + self.size),
            Key::Home => self.move_to(0),
            Key::End => self.move_to(usize::MAX),
            Key::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter(len, searcher);
                }
            }
            Key::Char(c) if !c.is_control() => {
                self.query.push(c);
                self.refilter(len, searcher);
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn refilter(&mut self, len: usize, searcher: &mut dyn FnMut(&str, usize) -> bool) {
        let query = self.query.as_str();
        self.visible = (0..len).filter(|&idx| searcher(query, idx)).collect();
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_to(&mut self, pos: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = pos.min(self.visible.len() - 1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.size {
            self.offset = self.cursor + 1 - self.size;
        }
    }
}

/// Interactive prompt on stderr, so stdout stays free for the activation signal.
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn interact(
        &self,
        prompt: &mut SelectPrompt<'_>,
        state: &mut PickerState,
    ) -> io::Result<usize> {
        loop {
            let drawn = self.draw(prompt, state)?;
            let key = self.term.read_key();
            self.term.clear_last_lines(drawn)?;

            match state.handle_key(key?, prompt.items.len(), prompt.searcher.as_mut()) {
                KeyOutcome::Continue => {}
                KeyOutcome::Select(idx) => return Ok(idx),
                KeyOutcome::Cancel => {
                    return Err(io::Error::new(
                        io::ErrorKind::Interrupted,
                        "selection cancelled",
                    ))
                }
            }
        }
    }

    fn draw(&self, prompt: &SelectPrompt<'_>, state: &PickerState) -> io::Result<usize> {
        let (_, cols) = self.term.size();
        let cols = usize::from(cols);
        let mut lines = vec![format!("Search: {}", state.query()), prompt.label.clone()];
        if state.visible().is_empty() {
            lines.push(format!("  no konf matches {:?}", state.query()));
        }
        for (idx, active) in state.window() {
            let template = if active {
                &prompt.templates.active
            } else {
                &prompt.templates.inactive
            };
            lines.push(template.render(&prompt.items[idx]));
        }

        for line in &lines {
            // wrapped lines would break clear_last_lines
            self.term.write_line(&console::truncate_str(line, cols, ""))?;
        }
        self.term.flush()?;
        Ok(lines.len())
    }
}

impl PromptDriver for TerminalPrompt {
    fn run(&mut self, prompt: &mut SelectPrompt<'_>) -> io::Result<usize> {
        if !self.term.is_term() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "interactive konf selection needs a terminal; pass a konf id instead",
            ));
        }

        let mut state = PickerState::new(prompt.items.len(), prompt.size);
        self.term.hide_cursor()?;
        let result = self.interact(prompt, &mut state);
        if let Err(err) = self.term.show_cursor() {
            log::debug!("Failed to restore cursor: {err}");
        }
        result
    }
}
