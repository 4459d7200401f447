use anyhow::Result;
use konf_picker::{select, PickerOptions, PromptDriver};
use konf_store::{fetch_konfs, Activator, KonfFs, KonfLayout, ScopeKey};
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

/// Prefix the shell hook looks for on stdout. Changing it requires a matching hook update.
pub const KUBECONFIG_CHANGE_PREFIX: &str = "KUBECONFIGCHANGE:";

/// How `konf set` picks the konf to activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No argument: run the picker.
    Interactive,
    /// `-`: the konf activated last.
    Latest,
    Id(String),
}

impl Selection {
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => Selection::Interactive,
            Some("-") => Selection::Latest,
            Some(id) => Selection::Id(id.to_string()),
        }
    }
}

pub struct SetCommand<F: KonfFs> {
    fs: F,
    layout: KonfLayout,
    scope: ScopeKey,
    options: PickerOptions,
}

impl<F: KonfFs> SetCommand<F> {
    pub fn new(fs: F, layout: KonfLayout, scope: ScopeKey, options: PickerOptions) -> Self {
        Self {
            fs,
            layout,
            scope,
            options,
        }
    }

    /// Activate the selected konf and write the change signal for the shell hook to `out`.
    ///
    /// Nothing is written before the id is known, so a cancelled prompt leaves no trace.
    pub fn run(
        &self,
        selection: Selection,
        driver: &mut dyn PromptDriver,
        out: &mut dyn Write,
    ) -> Result<PathBuf> {
        let activator = Activator::new(&self.fs, self.layout.clone());
        let id = match selection {
            Selection::Interactive => select_context(&self.fs, &self.layout, &self.options, driver)?,
            Selection::Latest => activator.recall_latest()?,
            Selection::Id(id) => id,
        };

        let active = activator.activate(&id, &self.scope)?;
        if let Err(err) = activator.record_latest(&id) {
            log::warn!("{err}. As a result 'konf set -' might not work");
        }

        log::info!("Setting context to {id:?}");
        writeln!(out, "{KUBECONFIG_CHANGE_PREFIX}{}", active.display())?;
        out.flush()?;
        Ok(active)
    }
}

/// Run the picker over the current store and return the id of the chosen konf.
pub fn select_context<F: KonfFs>(
    fs: &F,
    layout: &KonfLayout,
    options: &PickerOptions,
    driver: &mut dyn PromptDriver,
) -> Result<String> {
    let konfs = fetch_konfs(fs, layout)?;
    let pos = select(&konfs, options, driver)?;
    Ok(konfs[pos].id())
}

/// Every konf id in the store, for shell completion.
///
/// Prefix filtering is left to the shell. An empty store yields no suggestions instead of an
/// error so tab-completion stays quiet.
pub fn complete_set<F: KonfFs>(fs: &F, layout: &KonfLayout) -> Result<Vec<String>> {
    let konfs = match fetch_konfs(fs, layout) {
        Ok(konfs) => konfs,
        Err(err) if err.is_empty_store() => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut seen = HashSet::new();
    Ok(konfs
        .iter()
        .map(|konf| konf.id())
        .filter(|id| seen.insert(id.clone()))
        .collect())
}
