//! Result document assembler.
//!
//! The pipeline for one student's statement of result: fetch the result
//! record, resolve the two embedded image references into self-contained
//! encodings, render the single-page layout, compile it to PDF, deliver the
//! file. Export takes the render's output value as input, so the steps
//! cannot run out of order.

pub mod common;
pub mod engine;
pub mod images;
pub mod render;

pub use engine::{GeneratedDocument, TypstExportEngine};
pub use images::EncodedImage;
pub use render::{RenderedStatement, StatementRenderer};

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::api::models::ResultData;
use crate::api::{ApiError, StudentApi};

/// Errors that can occur while exporting a statement.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to load statement template: {0}")]
    TemplateIo(#[source] std::io::Error),
    #[error("nothing has been rendered yet")]
    NothingRendered,
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write Typst source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("failed to write embedded image: {0}")]
    WriteImage(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {0}")]
    TypstExit(i32),
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("failed to deliver PDF to download directory: {0}")]
    Download(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("failed to fetch result data: {0}")]
    Fetch(#[from] ApiError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A result record with both image references resolved. Exists only for the
/// duration of one export and is discarded afterwards.
#[derive(Debug, Clone)]
pub struct ResolvedResultRecord {
    pub logo: Option<EncodedImage>,
    pub profile_picture: Option<EncodedImage>,
    pub data: ResultData,
}

pub struct Assembler {
    api: Arc<dyn StudentApi>,
    renderer: StatementRenderer,
    engine: TypstExportEngine,
}

impl Assembler {
    pub fn new(api: Arc<dyn StudentApi>, download_dir: PathBuf) -> Result<Self, ExportError> {
        Ok(Self {
            api,
            renderer: StatementRenderer::new()?,
            engine: TypstExportEngine::new(download_dir),
        })
    }

    /// Fetch the result record and resolve both images concurrently.
    ///
    /// A fetch failure aborts the assembly before anything is rendered. An
    /// image failure does not: each image independently degrades to absent.
    pub async fn assemble(&self, student_id: i64) -> Result<ResolvedResultRecord, AssemblyError> {
        let record = self.api.fetch_result(student_id).await?;

        let (logo, profile_picture) = futures::join!(
            images::resolve(self.api.as_ref(), record.logo.as_deref().unwrap_or("")),
            images::resolve(self.api.as_ref(), record.profile_picture.as_deref().unwrap_or("")),
        );

        Ok(ResolvedResultRecord {
            logo,
            profile_picture,
            data: record.data,
        })
    }

    pub fn render(&self, record: &ResolvedResultRecord) -> RenderedStatement {
        self.renderer.render(record)
    }

    pub fn export(
        &self,
        rendered: &RenderedStatement,
        student_id: i64,
    ) -> Result<GeneratedDocument, ExportError> {
        self.engine.export(rendered, student_id)
    }

    /// The whole pipeline for one student.
    pub async fn export_statement(
        &self,
        student_id: i64,
    ) -> Result<GeneratedDocument, AssemblyError> {
        let resolved = self.assemble(student_id).await?;
        let rendered = self.render(&resolved);
        Ok(self.export(&rendered, student_id)?)
    }
}
