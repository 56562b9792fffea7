pub mod form;
pub mod status;

pub use form::{AudioFile, FormErrors, OutcomeDraft, OutcomeForm, MIN_COMMENT_LEN};
pub use status::{is_audio_required, CallStatus, ALL_STATUSES};
