use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

pub const DEFAULT_SOURCE_DIR: &str = "resources/icons/temp";
pub const DEFAULT_LIGHT_DIR: &str = "resources/icons/light";
pub const DEFAULT_DARK_DIR: &str = "resources/icons/dark";

/// What to do when a single file cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing file.
    #[default]
    Abort,
    /// Record the failure and move on to the next file.
    Continue,
}

/// What to do with regular files whose extension does not qualify.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsupportedPolicy {
    #[default]
    Skip,
    Warn,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub source_dir: PathBuf,
    pub light_dir: PathBuf,
    pub dark_dir: PathBuf,
    pub extensions: Vec<String>,
    pub failure_policy: FailurePolicy,
    pub unsupported_policy: UnsupportedPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_DIR, DEFAULT_LIGHT_DIR, DEFAULT_DARK_DIR)
    }
}

impl GeneratorConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        light_dir: impl Into<PathBuf>,
        dark_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            light_dir: light_dir.into(),
            dark_dir: dark_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            failure_policy: FailurePolicy::default(),
            unsupported_policy: UnsupportedPolicy::default(),
        }
    }

    /// Replace the qualifying extension list. Entries may carry a leading dot
    /// and any case: `".PNG"` and `"png"` are the same extension.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    #[must_use]
    pub fn with_unsupported_policy(mut self, policy: UnsupportedPolicy) -> Self {
        self.unsupported_policy = policy;
        self
    }

    /// Paths are compared lexically, so `icons/temp`, `./icons/temp/` and
    /// `icons/x/../temp` count as the same folder. Symlinks are not resolved.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(Error::config("at least one image extension is required"));
        }
        let source = lexical_normalize(&self.source_dir);
        let light = lexical_normalize(&self.light_dir);
        let dark = lexical_normalize(&self.dark_dir);
        if light == dark {
            return Err(Error::config(format!(
                "light and dark output directories are both {}",
                self.light_dir.display()
            )));
        }
        for (out, normalized) in [(&self.light_dir, &light), (&self.dark_dir, &dark)] {
            if *normalized == source {
                return Err(Error::config(format!(
                    "output directory {} is the source directory",
                    out.display()
                )));
            }
        }
        Ok(())
    }

    /// Case-insensitive extension match against the configured list.
    pub fn qualifies(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// Drop `.` components and fold `name/..` pairs without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir
                if matches!(out.components().next_back(), Some(Component::Normal(_))) =>
            {
                out.pop();
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_layout() {
        let config = GeneratorConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("resources/icons/temp"));
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.unsupported_policy, UnsupportedPolicy::Skip);
        assert_eq!(config.extensions, ["png", "jpg", "jpeg", "bmp"]);
    }

    #[test]
    fn qualifies_ignores_case() {
        let config = GeneratorConfig::new("src", "light", "dark");
        assert!(config.qualifies(Path::new("icon.png")));
        assert!(config.qualifies(Path::new("ICON.PNG")));
        assert!(config.qualifies(Path::new("photo.JpEg")));
        assert!(config.qualifies(Path::new("old.bmp")));
        assert!(!config.qualifies(Path::new("anim.gif")));
        assert!(!config.qualifies(Path::new("readme.txt")));
        assert!(!config.qualifies(Path::new("png")));
    }

    #[test]
    fn extensions_are_normalized() {
        let config =
            GeneratorConfig::new("src", "light", "dark").with_extensions([".PNG", " gif ", ""]);
        assert_eq!(config.extensions, ["png", "gif"]);
        assert!(config.qualifies(Path::new("a.GIF")));
        assert!(!config.qualifies(Path::new("a.jpg")));
    }

    #[test]
    fn validate_rejects_bad_layouts() {
        assert!(GeneratorConfig::new("src", "light", "dark").validate().is_ok());
        assert!(GeneratorConfig::new("src", "out", "out").validate().is_err());
        assert!(GeneratorConfig::new("src", "src", "dark").validate().is_err());
        assert!(GeneratorConfig::new("src", "light", "src").validate().is_err());
    }

    #[test]
    fn validate_sees_through_spelling_differences() {
        let overlapping = [
            ("icons/temp", "./icons/temp", "dark"),
            ("icons/temp", "icons/temp/", "dark"),
            ("icons/temp", "light", "icons/x/../temp"),
            ("src", "./out", "out/"),
            (".", "", "dark"),
        ];
        for (source, light, dark) in overlapping {
            assert!(
                GeneratorConfig::new(source, light, dark).validate().is_err(),
                "{source} / {light} / {dark} should be rejected"
            );
        }

        let ok = GeneratorConfig::new("icons/temp", "./icons/light", "../icons/temp");
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn lexical_normalize_keeps_leading_parents() {
        assert_eq!(lexical_normalize(Path::new("../a/./b/..")), PathBuf::from("../a"));
        assert_eq!(lexical_normalize(Path::new("./")), PathBuf::from("."));
        assert_eq!(lexical_normalize(Path::new("/x/../y")), PathBuf::from("/y"));
    }

    #[test]
    fn empty_extension_list_is_rejected() {
        let empty =
            GeneratorConfig::new("src", "light", "dark").with_extensions(Vec::<String>::new());
        assert!(matches!(empty.validate(), Err(Error::ConfigInvalid { .. })));
    }
}
