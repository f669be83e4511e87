//! Output naming and serialization

use crate::error::NormalizeError;
use clap::ValueEnum;
use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One value per line, newline separated
    #[default]
    Text,
    /// Packed little-endian f32 values
    Binary,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Binary => "bin",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Binary => write!(f, "binary"),
        }
    }
}

/// Output path next to `input`: file name cut at its first `.`, plus the format extension
///
/// `photo.png` becomes `photo.txt`, `maps/a.b.png` becomes `maps/a.txt`.
#[must_use]
pub fn derive_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = name.split_once('.').map_or(&*name, |(stem, _)| stem);

    input.with_file_name(format!("{stem}.{ext}", ext = format.extension()))
}

/// Write values as text, one per line, without a trailing newline
///
/// Values use their shortest round-trip form (`0.0`, `0.25`, `1.0`).
///
/// # Errors
///
/// Propagates writer errors
pub fn write_text<W: Write>(writer: &mut W, values: &[f64]) -> io::Result<()> {
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            writer.write_all(b"\n")?;
        }
        write!(writer, "{value:?}")?;
    }
    Ok(())
}

/// Write values as packed little-endian f32
///
/// # Errors
///
/// Propagates writer errors
pub fn write_binary<W: Write>(writer: &mut W, values: &[f64]) -> io::Result<()> {
    for &value in values {
        writer.write_all(&(value as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Write `values` to `path` in one step
///
/// Data goes to a temporary file in the destination directory first and is
/// renamed over `path` only once fully flushed, so a failure never leaves a
/// truncated output behind. The file ends up with the mode a plain create
/// would give it, or keeps the mode of the file it replaces.
///
/// # Errors
///
/// Returns `Write` if the file cannot be created, written or renamed
pub fn write_output(path: &Path, values: &[f64], format: OutputFormat) -> Result<(), NormalizeError> {
    let write_err = |source| NormalizeError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".heightbuf-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the umask at creation, like `File::create`
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut temp = builder.tempfile_in(dir).map_err(write_err)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions).map_err(write_err)?;
    }

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let written = match format {
            OutputFormat::Text => write_text(&mut writer, values),
            OutputFormat::Binary => write_binary(&mut writer, values),
        };
        written.and_then(|()| writer.flush()).map_err(write_err)?;
    }

    temp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::debug!(path = %path.display(), %format, count = values.len(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("photo.png"), OutputFormat::Text),
            PathBuf::from("photo.txt")
        );
        assert_eq!(
            derive_output_path(Path::new("maps/height.map.png"), OutputFormat::Text),
            PathBuf::from("maps/height.txt")
        );
        assert_eq!(
            derive_output_path(Path::new("./dist/map/terrain.png"), OutputFormat::Binary),
            PathBuf::from("./dist/map/terrain.bin")
        );
        assert_eq!(
            derive_output_path(Path::new("noext"), OutputFormat::Text),
            PathBuf::from("noext.txt")
        );
    }

    #[test]
    fn test_text_format() {
        let mut out = Vec::new();
        write_text(&mut out, &[0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.0\n0.25\n0.5\n1.0");
    }

    #[test]
    fn test_text_format_single_and_empty() {
        let mut out = Vec::new();
        write_text(&mut out, &[1.0]).unwrap();
        assert_eq!(out, b"1.0");

        let mut out = Vec::new();
        write_text(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_text_format_small_values() {
        // Exponent form below 1e-4, without Python's zero-padded exponent
        let mut out = Vec::new();
        write_text(&mut out, &[1.0 / 65535.0, 0.0001, 0.5 / 65535.0]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1.5259021896696422e-5\n0.0001\n7.629510948348211e-6"
        );
    }

    #[test]
    fn test_binary_format() {
        let mut out = Vec::new();
        write_binary(&mut out, &[0.0, 0.5, 1.0]).unwrap();

        assert_eq!(out.len(), 12);
        assert_eq!(&out[4..8], &0.5_f32.to_le_bytes());
        assert_eq!(&out[8..12], &1.0_f32.to_le_bytes());
    }

    #[test]
    fn test_write_output_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.txt");
        std::fs::write(&path, "stale").unwrap();

        write_output(&path, &[0.0, 1.0], OutputFormat::Text).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0.0\n1.0");
        // Only the output itself, no leftover temp file
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_output_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("photo.txt");

        let result = write_output(&path, &[0.0, 1.0], OutputFormat::Text);
        assert_matches!(result, Err(NormalizeError::Write { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_mode_matches_plain_create() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.txt");
        std::fs::File::create(&reference).unwrap();
        let expected = std::fs::metadata(&reference).unwrap().permissions().mode() & 0o777;

        let path = dir.path().join("photo.txt");
        write_output(&path, &[0.0, 1.0], OutputFormat::Text).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.txt");
        std::fs::write(&path, "stale").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_output(&path, &[0.0, 1.0], OutputFormat::Text).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }
}
