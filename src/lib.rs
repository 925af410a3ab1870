//! Student roster listing and statement-of-result export.
//!
//! Two collaborating components: the roster controller (fetch, filter and
//! reset the student list, pick one student for export) and the result
//! document assembler (fetch the result record, resolve its images, render
//! the statement and compile it to a letter-size PDF).

use std::sync::Arc;

use anyhow::Context;

pub mod api;
pub mod assembler;
pub mod config;
pub mod roster;

pub use config::Config;

use api::models::{FilterSelection, Student};
use api::{ApiClient, StudentApi};
use assembler::Assembler;
use roster::RosterController;

pub async fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;
    let api: Arc<dyn StudentApi> = Arc::new(ApiClient::new(&config)?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("export") => {
            let student_id: i64 = args
                .get(1)
                .context("usage: fremont-results export <student-id>")?
                .parse()
                .context("student id must be numeric")?;
            let controller = RosterController::new(api.clone());
            export_statement(api, &controller, &config, student_id).await
        }
        Some("roster") => show_roster(api, &args[1..]).await,
        None => show_roster(api, &args).await,
        Some(other) => {
            anyhow::bail!("unknown command `{other}` (expected `roster` or `export`)")
        }
    }
}

async fn show_roster(api: Arc<dyn StudentApi>, filter_args: &[String]) -> anyhow::Result<()> {
    let controller = RosterController::new(api);
    controller.load_filter_vocabulary().await;

    let selection = parse_filters(filter_args)?;
    if selection.is_unset() {
        controller.load_roster().await?;
    } else {
        controller.apply_filters(selection).await?;
    }

    print_roster(&controller.students());
    Ok(())
}

async fn export_statement(
    api: Arc<dyn StudentApi>,
    controller: &RosterController,
    config: &Config,
    student_id: i64,
) -> anyhow::Result<()> {
    controller.select_for_export(student_id)?;

    let assembler = Assembler::new(api, config.download_dir.clone())?;
    let document = assembler.export_statement(student_id).await?;

    // Completion signal: only a successful export clears the pending slot;
    // a failed export leaves it set until the driver is dismissed
    controller.complete_export();
    println!("Saved {}", document.path.display());
    Ok(())
}

fn parse_filters(args: &[String]) -> anyhow::Result<FilterSelection> {
    let mut selection = FilterSelection::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("missing value for {flag}"))?
            .clone();
        match flag.as_str() {
            "--age" => selection.age = Some(value),
            "--state" => selection.state = Some(value),
            "--level" => selection.level = Some(value),
            "--gender" => selection.gender = Some(value),
            other => anyhow::bail!("unknown filter flag `{other}`"),
        }
    }
    Ok(selection)
}

fn print_roster(students: &[Student]) {
    println!(
        "{:<4} {:<15} {:<15} {:<4} {:<7} {:<6} {:<15}",
        "S/N", "Surname", "Firstname", "Age", "Gender", "Level", "State"
    );
    for (index, student) in students.iter().enumerate() {
        println!(
            "{:<4} {:<15} {:<15} {:<4} {:<7} {:<6} {:<15}",
            index + 1,
            student.surname,
            student.firstname,
            student.age,
            student.gender,
            student.level,
            student.state
        );
    }
}
