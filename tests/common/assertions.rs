//! Custom assertions for job state

use ydl_job::{DownloadJob, ProgressSnapshot, Stage, Status};

/// Check the invariants every job must uphold after any update
pub fn assert_job_consistent(job: &DownloadJob) {
    assert_eq!(
        job.progress().entries().len(),
        ProgressSnapshot::KEYS.len(),
        "snapshot must always carry all nine fields"
    );

    let files = job.files();
    let shortest = job.filenames().len().min(job.extensions().len());
    assert!(
        files.len() <= shortest,
        "files() ({}) may not exceed the shorter of filenames and extensions ({shortest})",
        files.len()
    );
    for file in &files {
        assert!(
            file.starts_with(job.path()),
            "{} is not under {}",
            file.display(),
            job.path().display()
        );
    }

    if let Ok(status) = job.progress().status.parse::<Status>() {
        assert_eq!(
            job.stage(),
            status.stage(),
            "known status {status} must agree with the stage"
        );
    }
}

/// Assert the job reached `stage` and shows `status`
pub fn assert_stage(job: &DownloadJob, stage: Stage, status: &str) {
    assert_eq!(job.stage(), stage, "unexpected stage for {}", job.url());
    assert_eq!(job.progress().status, status, "unexpected status text");
}
