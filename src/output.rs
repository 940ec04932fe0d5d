use std::fs::{self, File, Permissions};
use std::io::{self, Cursor, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Pick the encoder implied by `path`'s extension, failing if the image
/// codec can't write that format.
pub fn encoder_for(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path)
        .ok()
        .filter(ImageFormat::writing_enabled)
        .ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })
}

/// Encode `img` fully in memory so nothing touches disk if encoding fails.
pub fn encode(img: &DynamicImage, format: ImageFormat, path: &Path) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).map_err(|source| Error::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(buf.into_inner())
}

/// Write `bytes` to `dest`, replacing any existing file only once the full
/// content is on disk. A replaced file keeps its mode; a new file gets the
/// usual umask-filtered default.
pub fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let existing = fs::metadata(dest)
        .ok()
        .filter(fs::Metadata::is_file)
        .map(|meta| meta.permissions());
    persist_with(dest, existing, |file| file.write_all(bytes))
}

/// Byte-for-byte copy of `src` to `dest`, with the same replace-on-success
/// behavior as [`write_atomically`]. The copy carries the source's mode.
pub fn copy_atomically(src: &Path, dest: &Path) -> Result<()> {
    let read_err = |source: io::Error| Error::Read {
        path: src.to_path_buf(),
        source,
    };
    let mut input = File::open(src).map_err(read_err)?;
    let perms = input.metadata().map_err(read_err)?.permissions();
    persist_with(dest, Some(perms), |file| {
        io::copy(&mut input, file).map(drop)
    })
}

fn persist_with(
    dest: &Path,
    perms: Option<Permissions>,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> Result<()> {
    let write_err = |source: io::Error| Error::Write {
        path: dest.to_path_buf(),
        source,
    };

    // Temp file lives next to the destination so the final rename never
    // crosses filesystems.
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut builder = tempfile::Builder::new();
    builder.prefix(".icon-variants-");
    // Temp files default to 0600; ask for 0666 so the umask decides, as it
    // would for a plainly created file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(write_err)?;

    fill(tmp.as_file_mut()).map_err(write_err)?;
    if let Some(perms) = perms {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    persist(tmp, dest).map_err(write_err)
}

fn persist(tmp: NamedTempFile, dest: &Path) -> io::Result<()> {
    tmp.persist(dest).map(drop).map_err(|e| e.error)
}
