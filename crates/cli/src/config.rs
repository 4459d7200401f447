use anyhow::{Context as AnyhowContext, Result};
use konf_picker::{PickerOptions, StyleSet, Styling};
use konf_store::KonfFs;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// Konf dir relative to the home directory when neither `--konf-dir` nor `KONF_DIR` is set.
pub const DEFAULT_KONF_DIR: &str = ".kube/konfs";
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Resolve the konf dir to an absolute path; the active konf path handed to the shell hook
/// must not depend on the working directory.
pub fn resolve_konf_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => dirs::home_dir()
            .context("could not determine home directory; pass --konf-dir or set KONF_DIR")?
            .join(DEFAULT_KONF_DIR),
    };
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("could not read working directory")?;
    Ok(cwd.join(dir))
}

/// Optional `<konf-dir>/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct KonfSettings {
    pub picker: PickerSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PickerSettings {
    pub column_width: usize,
    pub page_size: usize,
    /// Style names for the highlighted row, e.g. `["bold", "cyan"]`.
    pub active_style: Vec<String>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            column_width: 25,
            page_size: 15,
            active_style: vec!["bold".to_string(), "cyan".to_string()],
        }
    }
}

impl KonfSettings {
    pub fn load<F: KonfFs>(fs: &F, konf_dir: &Path) -> Result<Self> {
        let path = konf_dir.join(SETTINGS_FILE_NAME);
        let bytes = match fs.read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()))
            }
        };
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
        toml::from_str(&text).with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn picker_options(&self) -> Result<PickerOptions> {
        let active_styles = self
            .picker
            .active_style
            .iter()
            .map(|name| name.parse::<Styling>())
            .collect::<std::result::Result<StyleSet, _>>()
            .context("Invalid picker.active_style")?;
        Ok(PickerOptions {
            column_width: self.picker.column_width,
            page_size: self.picker.page_size,
            active_styles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use konf_picker::Color;
    use konf_store::MemFs;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = KonfSettings::load(&MemFs::new(), Path::new("/konf")).unwrap();
        assert_eq!(settings, KonfSettings::default());
        assert_eq!(
            settings.picker_options().unwrap(),
            PickerOptions::default()
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let fs = MemFs::new().with_file(
            "/konf/config.toml",
            "[picker]\ncolumn_width = 40\nactive_style = [\"underline\", \"bgGreen\"]\n",
        );
        let options = KonfSettings::load(&fs, Path::new("/konf"))
            .unwrap()
            .picker_options()
            .unwrap();

        assert_eq!(options.column_width, 40);
        assert_eq!(options.page_size, 15);
        assert_eq!(
            options.active_styles,
            StyleSet::plain()
                .with(Styling::Underline)
                .with(Styling::Background(Color::Green))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let fs = MemFs::new().with_file("/konf/config.toml", "[picker]\ncolour = 1\n");
        let err = KonfSettings::load(&fs, Path::new("/konf")).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"), "{err:#}");
    }

    #[test]
    fn unknown_style_is_rejected() {
        let settings = KonfSettings {
            picker: PickerSettings {
                active_style: vec!["sparkly".to_string()],
                ..PickerSettings::default()
            },
        };
        assert!(settings.picker_options().is_err());
    }

    #[test]
    fn relative_konf_dir_becomes_absolute() {
        let dir = resolve_konf_dir(Some(PathBuf::from("konfs"))).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("konfs"));
    }
}
