//! Scripted walkthroughs of both workflows.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use stellar_client::StellarClient;
use stellar_contracts::{
    event::{FileSource, Reaction},
    outcome::WorkflowPhase,
    request::{UploadCandidate, CSV_MEDIA_TYPE},
};
use stellar_core::{traits::NotificationSink, IngestController, QueryController};

use crate::console::Report;

const SAMPLE_QUERY: &str = "Crew member reports headache and nausea after EVA. Possible causes?";

const SAMPLE_VITALS: &str = "\
crew_id,timestamp,heart_rate,spo2,core_temp_c
CM-1,2031-04-02T08:00:00Z,62,98,36.8
CM-2,2031-04-02T08:00:00Z,71,97,37.1
CM-3,2031-04-02T08:00:00Z,88,94,37.9
";

pub async fn submit_query(ctrl: &QueryController, text: &str, report: &mut Report) {
    let label = format!("query {:?}", text);
    report.step(&label);
    let result = ctrl.submit(text).await;
    report.submission(&label, &result);
}

/// Stage `candidate` through the picker, upload it, then wait for the view
/// to clear itself.
pub async fn upload_file(ctrl: &IngestController, candidate: UploadCandidate, report: &mut Report) {
    let label = format!("pick {}", candidate.name);
    report.step(&label);
    let reaction = ctrl.select(FileSource::Picker, Some(candidate));
    report.reaction(&label, &reaction);
    if !matches!(reaction, Reaction::Staged { .. }) {
        return;
    }
    submit_upload(ctrl, report).await;
}

async fn submit_upload(ctrl: &IngestController, report: &mut Report) {
    let label = "upload";
    report.step(label);
    let result = ctrl.submit().await;
    report.submission(label, &result);
    if result.map(|o| o.looks_successful()).unwrap_or(false) {
        wait_for_reset(ctrl, report).await;
    }
}

async fn wait_for_reset(ctrl: &IngestController, report: &mut Report) {
    let mut phases = ctrl.subscribe();
    let reset = matches!(
        timeout(
            Duration::from_secs(10),
            phases.wait_for(|p| *p == WorkflowPhase::Idle)
        )
        .await,
        Ok(Ok(_))
    );
    if reset && ctrl.staged().is_none() {
        report.note("upload view reset to idle");
    } else {
        report.note("upload view did not reset");
    }
}

pub async fn run_all(client: &StellarClient, notifier: Arc<dyn NotificationSink>, report: &mut Report) {
    // ── Query workflow ────────────────────────────────────────────────────────
    let queries = client.query_controller(notifier.clone());
    submit_query(&queries, "   ", report).await;
    submit_query(&queries, SAMPLE_QUERY, report).await;

    // ── Ingestion workflow ────────────────────────────────────────────────────
    let uploads = client.ingest_controller(notifier);

    let label = "drop notes.txt";
    report.step(label);
    let notes = UploadCandidate::new("notes.txt", Some("text/plain".to_string()), "EVA log");
    let reaction = uploads.select(FileSource::Drop, Some(notes));
    report.reaction(label, &reaction);

    let label = "upload with nothing staged";
    report.step(label);
    let result = uploads.submit().await;
    report.submission(label, &result);

    let vitals = UploadCandidate::new(
        "crew_vitals.csv",
        Some(CSV_MEDIA_TYPE.to_string()),
        SAMPLE_VITALS,
    );
    report.note(&format!("crew_vitals.csv is {}", vitals.size_kib()));
    upload_file(&uploads, vitals, report).await;
}
