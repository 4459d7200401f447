use crate::fuzzy::KonfMatcher;
use crate::prompt::{PromptDriver, SelectPrompt};
use crate::table::{prepare_table, StyleSet};
use crate::{PickerError, Result};
use konf_store::StoreEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// Maximum characters per column, raised to the header width if smaller.
    pub column_width: usize,
    pub page_size: usize,
    pub active_styles: StyleSet,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            column_width: 25,
            page_size: 15,
            active_styles: StyleSet::highlight(),
        }
    }
}

pub fn create_prompt<'a>(entries: &'a [StoreEntry], options: &PickerOptions) -> SelectPrompt<'a> {
    let templates = prepare_table(options.column_width, options.active_styles.clone());
    let mut matcher = KonfMatcher::new();
    SelectPrompt {
        label: templates.label.clone(),
        items: entries,
        templates,
        searcher: Box::new(move |query: &str, index: usize| {
            entries
                .get(index)
                .is_some_and(|entry| matcher.matches(query, entry))
        }),
        size: options.page_size,
    }
}

/// Let the user pick one of `entries` and return its position.
pub fn select(
    entries: &[StoreEntry],
    options: &PickerOptions,
    driver: &mut dyn PromptDriver,
) -> Result<usize> {
    let mut prompt = create_prompt(entries, options);
    let pos = driver.run(&mut prompt)?;
    if pos >= entries.len() {
        return Err(PickerError::InvalidSelection(pos));
    }
    Ok(pos)
}
