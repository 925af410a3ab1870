mod common;

use std::sync::Arc;

use common::{sample_result_record, MockStudentApi};
use fremont_results::assembler::{
    Assembler, AssemblyError, EncodedImage, ExportError, RenderedStatement, TypstExportEngine,
};

fn assembler(mock: Arc<MockStudentApi>) -> Assembler {
    Assembler::new(mock, std::env::temp_dir().join("fremont-results-tests")).unwrap()
}

#[tokio::test]
async fn test_assemble_resolves_both_images() {
    let mock = Arc::new(MockStudentApi {
        result: Some(sample_result_record()),
        ..MockStudentApi::new()
    });
    let assembler = assembler(mock.clone());

    let resolved = assembler.assemble(1).await.unwrap();

    let logo = resolved.logo.unwrap();
    assert_eq!(logo.mime, "image/png");
    assert_eq!(
        resolved.profile_picture.as_ref().unwrap().mime,
        "image/jpeg"
    );
    let calls = mock.calls();
    assert_eq!(calls[0], "viewResult/1");
    assert_eq!(calls.len(), 3);
}

#[tokio::test]
async fn test_assemble_fails_on_fetch_error_without_touching_images() {
    let mock = Arc::new(MockStudentApi {
        result: Some(sample_result_record()),
        fail_result: true,
        ..MockStudentApi::new()
    });
    let assembler = assembler(mock.clone());

    let err = assembler.assemble(1).await.unwrap_err();

    assert!(matches!(err, AssemblyError::Fetch(_)));
    // The pipeline stopped at the fetch; no image requests were made
    assert_eq!(mock.calls(), vec!["viewResult/1"]);
}

#[tokio::test]
async fn test_failed_image_degrades_to_missing() {
    let mock = Arc::new(MockStudentApi {
        result: Some(sample_result_record()),
        fail_images: vec!["logo".to_string()],
        ..MockStudentApi::new()
    });
    let assembler = assembler(mock);

    let resolved = assembler.assemble(1).await.unwrap();

    assert!(resolved.logo.is_none());
    assert!(resolved.profile_picture.is_some());
}

#[tokio::test]
async fn test_absent_image_urls_skip_resolution() {
    let mut record = sample_result_record();
    record.logo = None;
    record.profile_picture = None;
    let mock = Arc::new(MockStudentApi {
        result: Some(record),
        ..MockStudentApi::new()
    });
    let assembler = assembler(mock.clone());

    let resolved = assembler.assemble(1).await.unwrap();

    assert!(resolved.logo.is_none());
    assert!(resolved.profile_picture.is_none());
    // No image requests were issued for missing references
    assert_eq!(mock.calls(), vec!["viewResult/1"]);
}

#[tokio::test]
async fn test_end_to_end_one_course_statement() {
    let mock = Arc::new(MockStudentApi {
        result: Some(sample_result_record()),
        ..MockStudentApi::new()
    });
    let assembler = assembler(mock);

    let resolved = assembler.assemble(1).await.unwrap();
    let rendered = assembler.render(&resolved);

    // Exactly one course row, in source order, with the given values
    assert_eq!(
        rendered
            .source
            .matches("(code:")
            .count(),
        1
    );
    assert!(rendered
        .source
        .contains(r#"(code: "EDU101", title: "Intro", unit: "3", grade: "A", point: "12")"#));
    // Identity block and cumulative fields verbatim
    assert!(rendered.source.contains(r#"name: "Doe Jane""#));
    assert!(rendered.source.contains(r#"reg_no: "FCE/2020/001""#));
    assert!(rendered.source.contains(r#"unts: "18""#));
    assert!(rendered.source.contains(r#"gpatd: "3.05""#));
    assert!(rendered.source.contains(r#"remarks: "Pass""#));
    // Both images attached for compilation
    assert_eq!(rendered.images.len(), 2);
}

#[test]
fn test_export_filename_pattern() {
    assert_eq!(
        TypstExportEngine::output_filename(7),
        "student-result-7.pdf"
    );
}

#[test]
fn test_export_before_render_fails() {
    let engine = TypstExportEngine::new(std::env::temp_dir());
    let unrendered = RenderedStatement {
        source: String::new(),
        images: Vec::new(),
    };
    assert!(matches!(
        engine.export(&unrendered, 1),
        Err(ExportError::NothingRendered)
    ));
}

#[test]
fn test_encoded_image_data_uri() {
    let image = EncodedImage::from_bytes(b"imagebytes", "image/png");
    assert!(image.data_uri().starts_with("data:image/png;base64,"));
    assert_eq!(image.decode().unwrap(), b"imagebytes");
}
