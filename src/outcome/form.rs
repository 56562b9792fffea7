use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::utils::time::format_seconds_to_hms;

use super::status::{is_audio_required, CallStatus};

pub const MIN_COMMENT_LEN: usize = 3;

/// An audio file picked in the UI. The duration is read by the webview
/// from media metadata (the file is never decoded here); `None` means
/// the metadata read failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AudioFile {
    pub path: String,
    pub mime_type: String,
    pub duration_secs: Option<f64>,
}

/// Per-field validation messages, `None` where the field is fine or its
/// error is still suppressed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    pub status: Option<String>,
    pub comment: Option<String>,
    pub audio_file: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.comment.is_none() && self.audio_file.is_none()
    }

    fn first_message(&self) -> Option<&str> {
        self.status
            .as_deref()
            .or(self.comment.as_deref())
            .or(self.audio_file.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Touched {
    status: bool,
    comment: bool,
    audio_file: bool,
}

/// A validated outcome ready to be uploaded and written back.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeDraft {
    pub status: CallStatus,
    pub comment: String,
    pub audio: Option<AudioFile>,
    /// `HH:MM:SS`; the literal `00:00:00` when there is no recording.
    pub recording_length: String,
}

/// Outcome form state machine.
///
/// Fields re-validate on every change, but a field's error only shows
/// once that field has been touched or a submit was attempted, so a
/// pristine form doesn't open covered in red.
#[derive(Debug, Default)]
pub struct OutcomeForm {
    status: String,
    comment: String,
    audio: Option<AudioFile>,
    touched: Touched,
}

impl OutcomeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
        self.touched.status = true;
    }

    pub fn set_comment(&mut self, comment: String) {
        self.comment = comment;
        self.touched.comment = true;
    }

    pub fn set_audio(&mut self, audio: Option<AudioFile>) {
        self.audio = audio;
        self.touched.audio_file = true;
    }

    /// Audio is required until a status that waives it is chosen.
    pub fn audio_required(&self) -> bool {
        if self.status.trim().is_empty() {
            true
        } else {
            is_audio_required(&self.status)
        }
    }

    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if CallStatus::parse(&self.status).is_none() {
            errors.status = Some("Please select a call status".into());
        }

        let comment = self.comment.trim();
        if comment.is_empty() {
            errors.comment = Some("Please enter a comment".into());
        } else if comment.len() < MIN_COMMENT_LEN {
            errors.comment = Some(format!(
                "Comment must be at least {MIN_COMMENT_LEN} characters"
            ));
        }

        if self.audio_required() && self.audio.is_none() {
            errors.audio_file = Some("Audio recording is required for this status".into());
        }

        errors
    }

    /// Errors visible right now, with untouched fields suppressed.
    pub fn errors(&self) -> FormErrors {
        let mut errors = self.validate();
        if !self.touched.status {
            errors.status = None;
        }
        if !self.touched.comment {
            errors.comment = None;
        }
        if !self.touched.audio_file {
            errors.audio_file = None;
        }
        errors
    }

    /// Attempt submission: touch every field, validate everything, and
    /// derive the recording length. On success the caller gets the draft
    /// and should `reset()` once the submit callback resolves.
    pub fn finalize(&mut self) -> AppResult<OutcomeDraft> {
        self.touched = Touched {
            status: true,
            comment: true,
            audio_file: true,
        };

        let errors = self.validate();
        if let Some(message) = errors.first_message() {
            return Err(AppError::validation(message));
        }

        let status = CallStatus::parse(&self.status)
            .ok_or_else(|| AppError::validation("Please select a call status"))?;

        let recording_length = match &self.audio {
            Some(audio) => match audio.duration_secs {
                Some(secs) => format_seconds_to_hms(secs),
                // A present file whose metadata could not be read blocks
                // the submission rather than silently defaulting.
                None => return Err(AppError::validation("Failed to read audio duration")),
            },
            None => "00:00:00".to_string(),
        };

        Ok(OutcomeDraft {
            status,
            comment: self.comment.trim().to_string(),
            audio: self.audio.clone(),
            recording_length,
        })
    }

    /// Back to pristine: empty fields, nothing touched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(duration: Option<f64>) -> AudioFile {
        AudioFile {
            path: "/tmp/rec.mp3".into(),
            mime_type: "audio/mpeg".into(),
            duration_secs: duration,
        }
    }

    #[test]
    fn pristine_form_shows_no_errors() {
        let form = OutcomeForm::new();
        assert!(form.errors().is_empty());
    }

    #[test]
    fn touching_one_field_reveals_only_its_error() {
        let mut form = OutcomeForm::new();
        form.set_comment("x".into());

        let errors = form.errors();
        assert!(errors.status.is_none());
        assert!(errors.audio_file.is_none());
        assert_eq!(
            errors.comment.as_deref(),
            Some("Comment must be at least 3 characters")
        );
    }

    #[test]
    fn comment_boundary_is_three_characters_after_trim() {
        let mut form = OutcomeForm::new();
        form.set_status("No Answer".into());

        form.set_comment("  ab  ".into());
        assert!(form.finalize().is_err());

        form.set_comment("abc".into());
        let draft = form.finalize().unwrap();
        assert_eq!(draft.comment, "abc");
    }

    #[test]
    fn audio_required_status_rejects_missing_file() {
        let mut form = OutcomeForm::new();
        form.set_status("Interested".into());
        form.set_comment("wants a website".into());

        let err = form.finalize().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Audio recording is required for this status"
        );

        form.set_audio(Some(audio(Some(42.0))));
        let draft = form.finalize().unwrap();
        assert_eq!(draft.status, CallStatus::Interested);
        assert_eq!(draft.recording_length, "00:00:42");
    }

    #[test]
    fn audio_optional_status_submits_without_file() {
        let mut form = OutcomeForm::new();
        form.set_status("Wrong Number".into());
        form.set_comment("line belongs to someone else".into());
        assert!(!form.audio_required());

        let draft = form.finalize().unwrap();
        assert!(draft.audio.is_none());
        assert_eq!(draft.recording_length, "00:00:00");
    }

    #[test]
    fn unreadable_duration_blocks_submission() {
        let mut form = OutcomeForm::new();
        form.set_status("Interested".into());
        form.set_comment("call went fine".into());
        form.set_audio(Some(audio(None)));

        let err = form.finalize().unwrap_err();
        assert_eq!(err.to_string(), "Failed to read audio duration");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut form = OutcomeForm::new();
        form.set_status("Maybe Later".into());
        form.set_comment("not in the picker".into());

        let err = form.finalize().unwrap_err();
        assert_eq!(err.to_string(), "Please select a call status");
    }

    #[test]
    fn reset_returns_to_pristine() {
        let mut form = OutcomeForm::new();
        form.set_status("No Answer".into());
        form.set_comment("rang out".into());
        form.finalize().unwrap();

        form.reset();
        assert!(form.errors().is_empty());
        assert!(form.audio_required());
    }
}
