//! Export artifacts: one composed `.html` file, or a zip of the raw sources.

use crate::bundle::SourceBundle;
use crate::compose::compose_bundle;
use crate::constants::DEFAULT_EXPORT_STEM;
use crate::error::ExportError;
use crate::text::file_stem;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Archive entry names, in archive order.
pub const ARCHIVE_MARKUP_FILE: &str = "index.html";
pub const ARCHIVE_STYLE_FILE: &str = "styles.css";
pub const ARCHIVE_SCRIPT_FILE: &str = "script.js";

/// A downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

fn stem_or_default(name: Option<&str>) -> String {
    name.and_then(file_stem)
        .unwrap_or_else(|| DEFAULT_EXPORT_STEM.to_string())
}

/// The composed document as a standalone `.html` file.
pub fn export_single_file(bundle: &SourceBundle, name: Option<&str>) -> ExportArtifact {
    ExportArtifact {
        filename: format!("{}.html", stem_or_default(name)),
        content_type: "text/html; charset=utf-8",
        bytes: compose_bundle(bundle).into_bytes(),
    }
}

/// A zip with exactly `index.html`, `styles.css` and `script.js`, each holding
/// its source verbatim (no composition).
///
/// # Errors
/// Returns [`ExportError`] if the archive writer fails.
pub fn export_archive(bundle: &SourceBundle, name: Option<&str>) -> Result<ExportArtifact, ExportError> {
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (entry, contents) in [
        (ARCHIVE_MARKUP_FILE, &bundle.markup),
        (ARCHIVE_STYLE_FILE, &bundle.style),
        (ARCHIVE_SCRIPT_FILE, &bundle.script),
    ] {
        writer.start_file(entry, options)?;
        writer.write_all(contents.as_bytes())?;
    }
    let bytes = writer.finish()?.into_inner();
    Ok(ExportArtifact {
        filename: format!("{}.zip", stem_or_default(name)),
        content_type: "application/zip",
        bytes,
    })
}
