use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};

use crate::config::{FailurePolicy, GeneratorConfig, UnsupportedPolicy};
use crate::dark;
use crate::error::{Error, Result};
use crate::output;

/// Per-file notifications emitted while a run is in progress.
pub enum Progress<'a> {
    Processed { file_name: &'a str },
    Failed { file_name: &'a str, error: &'a Error },
}

#[derive(Debug)]
pub struct FileFailure {
    pub file_name: String,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: Vec<String>,
    /// Regular files left alone because their extension doesn't qualify.
    /// Only filled in under [`UnsupportedPolicy::Warn`].
    pub skipped: Vec<String>,
    pub failed: Vec<FileFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct IconVariantGenerator {
    config: GeneratorConfig,
}

impl IconVariantGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create both output directories, then turn every qualifying file directly
    /// inside the source directory into a light copy and a dark variant.
    ///
    /// The source listing is taken once up front; files that show up later are
    /// not seen. Under [`FailurePolicy::Abort`] the first failing file ends the
    /// run with its error. Under [`FailurePolicy::Continue`] per-file errors are
    /// collected in the returned report instead.
    pub fn run(&self, mut on_progress: impl FnMut(Progress<'_>)) -> Result<RunReport> {
        for dir in [&self.config.light_dir, &self.config.dark_dir] {
            fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        let entries = self.list_source()?;
        tracing::debug!(
            "Found {} entries in {}",
            entries.len(),
            self.config.source_dir.display()
        );

        let mut report = RunReport::default();
        for path in entries {
            let Some(name) = path.file_name() else {
                continue;
            };
            let file_name = name.to_string_lossy().into_owned();

            if !path.is_file() {
                tracing::debug!("Skipping non-file entry {file_name}");
                continue;
            }
            if !self.config.qualifies(&path) {
                if self.config.unsupported_policy == UnsupportedPolicy::Warn {
                    tracing::warn!("Skipping {file_name}: extension is not a supported image type");
                    report.skipped.push(file_name);
                }
                continue;
            }

            match self.process_file(&path) {
                Ok(()) => {
                    on_progress(Progress::Processed {
                        file_name: &file_name,
                    });
                    report.processed.push(file_name);
                }
                Err(error)
                    if error.is_per_file()
                        && self.config.failure_policy == FailurePolicy::Continue =>
                {
                    tracing::error!("{error}");
                    on_progress(Progress::Failed {
                        file_name: &file_name,
                        error: &error,
                    });
                    report.failed.push(FileFailure { file_name, error });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    /// Sorted paths of everything directly inside the source directory.
    fn list_source(&self) -> Result<Vec<PathBuf>> {
        let read_err = |source: io::Error| Error::ReadDir {
            path: self.config.source_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.config.source_dir)
            .map_err(read_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()
            .map_err(read_err)?;
        entries.sort();
        Ok(entries)
    }

    fn process_file(&self, path: &Path) -> Result<()> {
        let name = path.file_name().unwrap_or(path.as_os_str());
        let light_dest = self.config.light_dir.join(name);
        let dark_dest = self.config.dark_dir.join(name);

        // Everything that can fail on bad input happens before the first write,
        // so a broken icon leaves no output behind.
        let format = output::encoder_for(&dark_dest)?;
        let img = decode(path)?;
        tracing::debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        let inverted = dark::invert_icon(&img);
        let bytes = output::encode(&inverted, format, &dark_dest)?;

        output::copy_atomically(path, &light_dest)?;
        output::write_atomically(&dark_dest, &bytes)?;
        Ok(())
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
    reader.decode().map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn setup() -> (TempDir, GeneratorConfig) {
        let root = TempDir::new().unwrap();
        let source = root.path().join("temp");
        fs::create_dir(&source).unwrap();
        let config = GeneratorConfig::new(
            source,
            root.path().join("light"),
            root.path().join("dark"),
        );
        (root, config)
    }

    fn write_png(path: &Path) {
        RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 128]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GeneratorConfig::new("icons", "out", "out");
        assert!(matches!(
            IconVariantGenerator::new(config),
            Err(Error::ConfigInvalid { .. })
        ));
    }

    #[test]
    fn progress_reports_processed_files_in_name_order() {
        let (_root, config) = setup();
        write_png(&config.source_dir.join("b.png"));
        write_png(&config.source_dir.join("a.png"));

        let generator = IconVariantGenerator::new(config).unwrap();
        let mut seen = Vec::new();
        let report = generator
            .run(|event| {
                if let Progress::Processed { file_name } = event {
                    seen.push(file_name.to_string());
                }
            })
            .unwrap();

        assert_eq!(seen, ["a.png", "b.png"]);
        assert_eq!(report.processed, seen);
        assert!(report.is_success());
    }

    #[test]
    fn warn_policy_lists_skipped_files() {
        let (_root, config) = setup();
        fs::write(config.source_dir.join("notes.txt"), "hi").unwrap();
        fs::create_dir(config.source_dir.join("nested.png")).unwrap();

        let generator = IconVariantGenerator::new(
            config.with_unsupported_policy(UnsupportedPolicy::Warn),
        )
        .unwrap();
        let report = generator.run(|_| {}).unwrap();

        assert_eq!(report.skipped, ["notes.txt"]);
        assert!(report.processed.is_empty());
    }

    #[test]
    fn skip_policy_is_silent() {
        let (_root, config) = setup();
        fs::write(config.source_dir.join("notes.txt"), "hi").unwrap();

        let report = IconVariantGenerator::new(config)
            .unwrap()
            .run(|_| {})
            .unwrap();

        assert!(report.skipped.is_empty());
    }

    #[test]
    fn unwritable_extension_fails_before_decoding() {
        let (_root, config) = setup();
        fs::write(config.source_dir.join("icon.xyz"), "not an image").unwrap();

        let generator =
            IconVariantGenerator::new(config.with_extensions(["xyz"])).unwrap();
        let err = generator.run(|_| {}).unwrap_err();

        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_source_dir_is_a_run_error() {
        let (root, mut config) = setup();
        config.source_dir = root.path().join("missing");
        let generator = IconVariantGenerator::new(
            config.with_failure_policy(FailurePolicy::Continue),
        )
        .unwrap();

        let err = generator.run(|_| {}).unwrap_err();
        assert!(matches!(err, Error::ReadDir { .. }));
        // Output directories were still created first.
        assert!(root.path().join("light").is_dir());
        assert!(root.path().join("dark").is_dir());
    }
}
