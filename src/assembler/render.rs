//! Statement layout: populates the Typst template with a resolved record.

use std::fs;

use super::common::{escape_typst_string, format_number, get_static_dir};
use super::images::EncodedImage;
use super::{ExportError, ResolvedResultRecord};
use crate::api::models::CourseResult;

const TEMPLATE_FILE: &str = "statement_of_result.typ";

/// A fully laid-out statement: complete Typst source plus the decoded image
/// files it references. Export consumes this value directly, so nothing can
/// be exported before it has been rendered.
#[derive(Debug, Clone)]
pub struct RenderedStatement {
    pub source: String,
    pub images: Vec<(String, Vec<u8>)>,
}

impl RenderedStatement {
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Renders resolved result records against the statement template.
pub struct StatementRenderer {
    template: String,
}

impl StatementRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let template_path = get_static_dir().join(TEMPLATE_FILE);
        let template = fs::read_to_string(&template_path).map_err(ExportError::TemplateIo)?;
        Ok(Self { template })
    }

    /// Lay out the single-page statement. Course rows keep the order of the
    /// source record; no sorting is applied. An image that fails to decode
    /// is dropped from the layout rather than failing the render.
    pub fn render(&self, record: &ResolvedResultRecord) -> RenderedStatement {
        let mut images = Vec::new();
        let logo_path = attach_image("logo", record.logo.as_ref(), &mut images);
        let profile_path = attach_image("profile", record.profile_picture.as_ref(), &mut images);

        let data = &record.data;
        let source = format!(
            r#"#let statement_of_result(
  student: (
    name: "{name}",
    level: "{level}",
    reg_no: "{reg_no}",
    session: "{session}",
  ),
  courses: (
{courses}  ),
  summary: (
    unts: "{unts}",
    untd: "{untd}",
    gpts: "{gpts}",
    gptd: "{gptd}",
    gpats: "{gpats}",
    gpatd: "{gpatd}",
    remarks: "{remarks}",
  ),
  images: (
    logo: "{logo}",
    profile: "{profile}",
  ),
) = {{
{body}
#statement_of_result()
"#,
            name = escape_typst_string(&format!("{} {}", data.surname, data.firstname)),
            level = escape_typst_string(&data.level),
            reg_no = escape_typst_string(&data.reg_no),
            session = escape_typst_string(&data.session),
            courses = course_tuples(&data.result),
            unts = format_number(data.cummulative.unts),
            untd = format_number(data.cummulative.untd),
            gpts = format_number(data.cummulative.gpts),
            gptd = format_number(data.cummulative.gptd),
            gpats = format_number(data.cummulative.gpats),
            gpatd = format_number(data.cummulative.gpatd),
            remarks = escape_typst_string(&data.cummulative.remarks),
            logo = logo_path,
            profile = profile_path,
            body = self.extract_function_body(),
        );

        RenderedStatement { source, images }
    }

    /// Extract the function body from the template (everything between the
    /// signature's opening brace and the trailing invocation).
    fn extract_function_body(&self) -> String {
        if let Some(start) = self.template.find(") = {") {
            let body_start = start + 5; // Skip ") = {"
            if let Some(end) = self.template.rfind("#statement_of_result()") {
                return self.template[body_start..end].to_string();
            }
        }
        // Fallback: return the template as-is
        self.template.clone()
    }
}

fn attach_image(
    name: &str,
    image: Option<&EncodedImage>,
    files: &mut Vec<(String, Vec<u8>)>,
) -> String {
    let Some(image) = image else {
        return String::new();
    };
    match image.decode() {
        Ok(bytes) => {
            let filename = format!("{name}.{}", image.file_extension());
            files.push((filename.clone(), bytes));
            filename
        }
        Err(err) => {
            log::warn!("dropping undecodable {name} image: {err}");
            String::new()
        }
    }
}

fn course_tuples(courses: &[CourseResult]) -> String {
    let mut out = String::new();
    for course in courses {
        out.push_str(&format!(
            "    (code: \"{}\", title: \"{}\", unit: \"{}\", grade: \"{}\", point: \"{}\"),\n",
            escape_typst_string(&course.coursecode),
            escape_typst_string(&course.title),
            course.credit_unit,
            escape_typst_string(&course.grade),
            format_number(course.total_point),
        ));
    }
    out
}
