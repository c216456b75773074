use serde::Deserialize;

use foreman_core::diag::{DiagConfig, Diagnostics};
use foreman_core::domain::{BaseState, JobId, JobRecord, StatusFlag, StatusValue};
use foreman_core::state::StatusMutator;

/// Top-level configuration loaded from `foreman.toml`.
#[derive(Debug, Default, Deserialize)]
struct ForemanConfig {
    #[serde(default)]
    diagnostics: DiagConfig,
}

/// Load `foreman.toml` from the working directory; defaults if absent.
fn load_config() -> ForemanConfig {
    match std::fs::read_to_string("foreman.toml") {
        Ok(contents) => toml::from_str(&contents).expect("foreman.toml parses"),
        Err(_) => ForemanConfig::default(),
    }
}

fn main() {
    let config = load_config();

    // Audit records go out at TRACE level under the `trace_jobs` target.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let diag = Diagnostics::from_config(&config.diagnostics);
    println!("trace_jobs = {}", diag.trace_jobs());

    let mutator = StatusMutator::new(diag);
    let mut job = JobRecord::new(JobId::generate(), "demo-batch");
    println!("submitted {}: {}", job.job_id, job.status());

    // (A) Nodes allocated; wait for them to boot, then start execution.
    mutator.set_flag(&mut job, StatusFlag::Configuring);
    let launched = job.status().with_base(BaseState::Running);
    mutator.set(&mut job, launched);
    mutator.unset_flag(&mut job, StatusFlag::Configuring);
    println!("launched: {}", job.status());

    // (B) User asks for a requeue after completion; a signal passes by.
    mutator.set_flag(&mut job, StatusFlag::Requeue);
    mutator.set_flag(&mut job, StatusFlag::Signaling);
    mutator.unset_flag(&mut job, StatusFlag::Signaling);
    println!("running: {}", job.status());

    // (C) Execution done: epilog runs, then the final state replaces the
    // whole value (the scheduler has consumed the requeue flag by then).
    mutator.set_flag(&mut job, StatusFlag::Completing);
    mutator.set(&mut job, StatusValue::new(BaseState::Completed));
    println!("final: {}", job.status());

    let view = serde_json::to_string_pretty(&job.view()).expect("view serializes");
    println!("{view}");
}
