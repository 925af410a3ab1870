//! Typst export engine.
//!
//! Writes the rendered statement and its image files into a temporary
//! compilation directory, invokes the Typst compiler, and delivers the PDF
//! into the configured download directory.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::{tempdir, TempDir};

use super::render::RenderedStatement;
use super::ExportError;

const SOURCE_FILE: &str = "statement.typ";

/// Result of a successful export.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub path: PathBuf,
    pub pdf: Vec<u8>,
}

pub struct TypstExportEngine {
    download_dir: PathBuf,
}

impl TypstExportEngine {
    pub fn new(download_dir: PathBuf) -> Self {
        Self { download_dir }
    }

    /// Output filename pattern for one student's statement.
    pub fn output_filename(student_id: i64) -> String {
        format!("student-result-{student_id}.pdf")
    }

    /// Compile the rendered statement and write
    /// `student-result-<studentId>.pdf` to the download directory.
    ///
    /// Fails with `ExportError::NothingRendered` when handed an empty
    /// document, so export cannot run ahead of the render step.
    pub fn export(
        &self,
        rendered: &RenderedStatement,
        student_id: i64,
    ) -> Result<GeneratedDocument, ExportError> {
        if rendered.is_empty() {
            return Err(ExportError::NothingRendered);
        }

        let temp_dir = tempdir().map_err(ExportError::TempDir)?;
        let source_path = temp_dir.path().join(SOURCE_FILE);
        fs::write(&source_path, &rendered.source).map_err(ExportError::WriteSource)?;

        for (filename, bytes) in &rendered.images {
            fs::write(temp_dir.path().join(filename), bytes).map_err(ExportError::WriteImage)?;
        }

        let filename = Self::output_filename(student_id);
        let pdf = compile_typst_to_pdf(&temp_dir, SOURCE_FILE, &filename)?;

        fs::create_dir_all(&self.download_dir).map_err(ExportError::Download)?;
        let path = self.download_dir.join(&filename);
        fs::write(&path, &pdf).map_err(ExportError::Download)?;
        log::info!("exported {} ({} bytes)", path.display(), pdf.len());

        Ok(GeneratedDocument {
            filename,
            path,
            pdf,
        })
    }
}

/// Compile a Typst source file to PDF.
fn compile_typst_to_pdf(
    temp_dir: &TempDir,
    source_filename: &str,
    output_filename: &str,
) -> Result<Vec<u8>, ExportError> {
    let source_path = temp_dir.path().join(source_filename);
    let output_path = temp_dir.path().join(output_filename);

    let status = Command::new("typst")
        .arg("compile")
        .arg(&source_path)
        .arg(&output_path)
        .current_dir(temp_dir.path())
        .status()
        .map_err(ExportError::TypstIo)?;

    if !status.success() {
        let code = status.code().unwrap_or(-1);
        return Err(ExportError::TypstExit(code));
    }

    fs::read(&output_path).map_err(ExportError::ReadPdf)
}
