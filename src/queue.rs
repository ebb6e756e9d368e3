//! Ordered registry of download jobs
//!
//! [`JobQueue`] keeps jobs in the order the user added them and hands out the
//! next queued one to the process supervisor. It does no locking; its owner
//! must serialize access.

use crate::error::{Error, Result};
use crate::job::DownloadJob;
use crate::types::{JobId, Stage};

/// Jobs in display order, keyed by [`JobId`]
#[derive(Clone, Debug, Default)]
pub struct JobQueue {
    jobs: Vec<DownloadJob>,
}

impl JobQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job
    ///
    /// # Errors
    ///
    /// [`Error::Duplicate`] when a job with the same URL and options is
    /// already registered.
    pub fn push(&mut self, job: DownloadJob) -> Result<JobId> {
        let id = job.id();
        if self.contains(id) {
            return Err(Error::Duplicate(id));
        }

        tracing::debug!(job_id = %id, url = job.url(), "job queued");
        self.jobs.push(job);
        Ok(id)
    }

    /// Whether a job with this id is registered
    pub fn contains(&self, id: JobId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of a job in display order
    pub fn index_of(&self, id: JobId) -> Option<usize> {
        self.jobs.iter().position(|job| job.id() == id)
    }

    /// Look up a job
    pub fn get(&self, id: JobId) -> Option<&DownloadJob> {
        self.jobs.iter().find(|job| job.id() == id)
    }

    /// Look up a job for updating
    pub fn get_mut(&mut self, id: JobId) -> Option<&mut DownloadJob> {
        self.jobs.iter_mut().find(|job| job.id() == id)
    }

    /// Remove a job that is not running
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] for an unknown id
    /// - [`Error::JobActive`] while the job is active
    pub fn remove(&mut self, id: JobId) -> Result<DownloadJob> {
        let index = self.index_of(id).ok_or(Error::NotFound(id))?;
        if self.jobs[index].stage() == Stage::Active {
            return Err(Error::JobActive(id));
        }

        tracing::debug!(job_id = %id, "job removed");
        Ok(self.jobs.remove(index))
    }

    /// First job still waiting to start
    pub fn fetch_next(&mut self) -> Option<&mut DownloadJob> {
        self.jobs.iter_mut().find(|job| job.stage() == Stage::Queued)
    }

    /// Move a job one position towards the front
    ///
    /// Returns `false` when the job is unknown or already first.
    pub fn move_up(&mut self, id: JobId) -> bool {
        match self.index_of(id) {
            Some(index) if index > 0 => {
                self.jobs.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    /// Move a job one position towards the back
    ///
    /// Returns `false` when the job is unknown or already last.
    pub fn move_down(&mut self, id: JobId) -> bool {
        match self.index_of(id) {
            Some(index) if index + 1 < self.jobs.len() => {
                self.jobs.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Force a job into `stage`
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] for an unknown id.
    pub fn change_stage(&mut self, id: JobId, stage: Stage) -> Result<()> {
        let job = self.get_mut(id).ok_or(Error::NotFound(id))?;
        job.set_stage(stage);
        Ok(())
    }

    /// Jobs in display order
    pub fn iter(&self) -> impl Iterator<Item = &DownloadJob> {
        self.jobs.iter()
    }

    /// Number of registered jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is registered
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Drop every job that is not active, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.stage() == Stage::Active);
        before - self.jobs.len()
    }
}
