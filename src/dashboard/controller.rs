use std::sync::Arc;

use log::{error, info};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::auth::User;
use crate::drive::DriveClient;
use crate::error::{AppError, AppResult};
use crate::leads::{self, Lead};
use crate::outcome::{AudioFile, FormErrors, OutcomeDraft, OutcomeForm};
use crate::sheets::{OutcomeWrite, SheetsClient};

/// What the UI needs to render the calling screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub current_lead: Option<Lead>,
    pub total_leads: usize,
    pub remaining_leads: usize,
}

/// Current outcome-form validity, for inline error rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub errors: FormErrors,
    pub audio_required: bool,
}

#[derive(Default)]
struct DashboardState {
    leads: Vec<Lead>,
    /// Row index of the lead currently on screen.
    current_row: Option<usize>,
    form: OutcomeForm,
    /// Only mutual-exclusion device for submissions: set while one is in
    /// flight, scoped to this app instance. Independent sessions racing
    /// the same backend row are not protected.
    busy: bool,
}

impl DashboardState {
    fn select_next(&mut self) {
        self.current_row = leads::next_available(&self.leads).map(|lead| lead.row_index);
    }

    fn current_lead(&self) -> Option<Lead> {
        let row = self.current_row?;
        self.leads.iter().find(|l| l.row_index == row).cloned()
    }

    fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            current_lead: self.current_lead(),
            total_leads: self.leads.len(),
            remaining_leads: leads::remaining(&self.leads),
        }
    }

    fn form_snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            errors: self.form.errors(),
            audio_required: self.form.audio_required(),
        }
    }
}

/// Owns the in-memory lead list, the current-lead pointer, and the
/// outcome form, and runs the cycle: load, select, fill the form,
/// submit, upload when needed, write back, reselect. All mutation
/// happens behind one async mutex; remote calls run with the lock
/// released.
#[derive(Clone)]
pub struct DashboardController {
    state: Arc<Mutex<DashboardState>>,
    sheets: SheetsClient,
    drive: DriveClient,
}

impl DashboardController {
    pub fn new(sheets: SheetsClient, drive: DriveClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::default())),
            sheets,
            drive,
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Fetch the sheet and point at the first unprocessed lead. On
    /// failure the previous list is kept so the user can retry.
    pub async fn load_leads(&self) -> AppResult<DashboardSnapshot> {
        let fetched = self.sheets.fetch_leads().await?;

        let mut state = self.state.lock().await;
        state.leads = fetched;
        state.select_next();
        Ok(state.snapshot())
    }

    pub async fn set_status(&self, status: String) -> FormSnapshot {
        let mut state = self.state.lock().await;
        state.form.set_status(status);
        state.form_snapshot()
    }

    pub async fn set_comment(&self, comment: String) -> FormSnapshot {
        let mut state = self.state.lock().await;
        state.form.set_comment(comment);
        state.form_snapshot()
    }

    pub async fn set_audio(&self, audio: Option<AudioFile>) -> FormSnapshot {
        let mut state = self.state.lock().await;
        state.form.set_audio(audio);
        state.form_snapshot()
    }

    pub async fn form_snapshot(&self) -> FormSnapshot {
        self.state.lock().await.form_snapshot()
    }

    /// Run one full submission from the current form state: validate,
    /// upload the recording when one is attached, write the row, patch
    /// the in-memory copy, reset the form, advance.
    pub async fn submit_outcome(&self, user: &User) -> AppResult<DashboardSnapshot> {
        let (lead, draft) = self.begin_submission().await?;

        let result = self.perform_submission(user, &draft, &lead).await;

        // Clear the busy flag on every exit path; on failure the lead
        // list and form are left untouched so the user can retry.
        let mut state = self.state.lock().await;
        state.busy = false;

        match result {
            Ok(write) => {
                apply_outcome(&mut state.leads, &write);
                state.form.reset();
                state.select_next();
                info!(
                    "Saved outcome '{}' for row {}; {} leads remaining",
                    write.status,
                    write.row_index,
                    leads::remaining(&state.leads)
                );
                Ok(state.snapshot())
            }
            Err(err) => {
                error!("Submission for row {} failed: {err}", lead.row_index);
                Err(err)
            }
        }
    }

    /// Validate the form, claim the busy flag and the current lead, or
    /// refuse when a submission is already in flight.
    async fn begin_submission(&self) -> AppResult<(Lead, OutcomeDraft)> {
        let mut state = self.state.lock().await;
        if state.busy {
            return Err(AppError::validation("A submission is already in progress"));
        }
        let lead = state
            .current_lead()
            .ok_or_else(|| AppError::validation("No lead selected"))?;
        let draft = state.form.finalize()?;
        state.busy = true;
        Ok((lead, draft))
    }

    async fn perform_submission(
        &self,
        user: &User,
        draft: &OutcomeDraft,
        lead: &Lead,
    ) -> AppResult<OutcomeWrite> {
        // Upload strictly precedes the row write.
        let recording_url = match &draft.audio {
            Some(audio) => Some(self.drive.upload(audio, &lead.phone).await?),
            None => None,
        };

        let write = OutcomeWrite::new(
            lead.row_index,
            draft.status.as_str(),
            &draft.comment,
            &user.username,
            recording_url.as_deref(),
            &draft.recording_length,
        );
        self.sheets.write_outcome(&write).await?;

        Ok(write)
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, leads: Vec<Lead>) {
        let mut state = self.state.lock().await;
        state.leads = leads;
        state.select_next();
    }
}

/// Optimistically patch the in-memory copy of a row after a successful
/// write.
fn apply_outcome(leads: &mut [Lead], write: &OutcomeWrite) {
    if let Some(lead) = leads.iter_mut().find(|l| l.row_index == write.row_index) {
        lead.status = write.status.clone();
        lead.comment = write.comment.clone();
        lead.caller_username = write.caller_username.clone();
        lead.calling_date_time = write.calling_date_time.clone();
        lead.call_recording_url = write.recording_url.clone();
    }
}
