//! Zip packaging of the exported notes.

use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::constants::files;
use crate::error::{Error, Result};

/// Archive file name for a release, e.g. `spells-0.1.0.zip`.
pub fn archive_name(version: &str) -> String {
    format!("{}{version}.zip", files::ARCHIVE_PREFIX)
}

/// `/`-joined path of `path` relative to `root`, as stored in the archive.
fn entry_name(root: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::Archive(format!("{} is outside {}", path.display(), root.display()))
    })?;

    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// Add every regular file under `dir` to a new zip written to `writer`.
///
/// Files are added in sorted path order with Deflate compression.
pub fn zip_dir_contents<W: Write + Seek>(dir: &Path, writer: W) -> Result<W> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();

    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        zip.start_file(entry_name(dir, path)?, options)?;
        let mut file = fs_err::File::open(path).map_err(|e| Error::io(e, path.clone()))?;
        std::io::copy(&mut file, &mut zip).map_err(|e| Error::io(e, path.clone()))?;
    }

    tracing::debug!("Zipped {} files from {}", files.len(), dir.display());
    Ok(zip.finish()?)
}

/// Package `dir` as `<archive_dir>/spells-<version>.zip`.
pub fn create_archive(dir: &Path, archive_dir: &Path, version: &str) -> Result<PathBuf> {
    fs_err::create_dir_all(archive_dir).map_err(|e| Error::io(e, archive_dir.to_path_buf()))?;

    let path = archive_dir.join(archive_name(version));
    let file = fs_err::File::create(&path).map_err(|e| Error::io(e, path.clone()))?;
    let mut writer = zip_dir_contents(dir, std::io::BufWriter::new(file))?;
    writer.flush().map_err(|e| Error::io(e, path.clone()))?;

    tracing::info!("Created archive {}", path.display());
    Ok(path)
}
