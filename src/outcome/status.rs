use serde::{Deserialize, Serialize};

/// The closed set of call outcomes an agent can assign to a lead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CallStatus {
    Abusive,
    AlreadyHaveAWebsite,
    AnsweringMachine,
    AppointmentSet,
    BlankCall,
    BusyTone,
    CallBack,
    CallbackRequested,
    ConcernedPersonNotAvailable,
    CustomerBusy,
    CustomerHungUp,
    DisconnectedNumber,
    DoNotCall,
    FollowUp,
    HardReject,
    InFuture,
    Incomplete,
    Interested,
    MyCallBack,
    NoAnswer,
    NotEligible,
    NotInterested,
    Receptionist,
    RepeatedNumber,
    RobotAutomated,
    SaleMade,
    VoicemailLeft,
    VulnerableCustomer,
    WrongNumber,
}

pub const ALL_STATUSES: [CallStatus; 29] = [
    CallStatus::Abusive,
    CallStatus::AlreadyHaveAWebsite,
    CallStatus::AnsweringMachine,
    CallStatus::AppointmentSet,
    CallStatus::BlankCall,
    CallStatus::BusyTone,
    CallStatus::CallBack,
    CallStatus::CallbackRequested,
    CallStatus::ConcernedPersonNotAvailable,
    CallStatus::CustomerBusy,
    CallStatus::CustomerHungUp,
    CallStatus::DisconnectedNumber,
    CallStatus::DoNotCall,
    CallStatus::FollowUp,
    CallStatus::HardReject,
    CallStatus::InFuture,
    CallStatus::Incomplete,
    CallStatus::Interested,
    CallStatus::MyCallBack,
    CallStatus::NoAnswer,
    CallStatus::NotEligible,
    CallStatus::NotInterested,
    CallStatus::Receptionist,
    CallStatus::RepeatedNumber,
    CallStatus::RobotAutomated,
    CallStatus::SaleMade,
    CallStatus::VoicemailLeft,
    CallStatus::VulnerableCustomer,
    CallStatus::WrongNumber,
];

impl CallStatus {
    /// The label as it appears in the sheet and the status picker.
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Abusive => "Abusive",
            CallStatus::AlreadyHaveAWebsite => "Already have a Website",
            CallStatus::AnsweringMachine => "Answering Machine (Sent to Message)",
            CallStatus::AppointmentSet => "Appointment Set",
            CallStatus::BlankCall => "Blank Call (No Response)",
            CallStatus::BusyTone => "Busy Tone",
            CallStatus::CallBack => "Call Back",
            CallStatus::CallbackRequested => "Callback Requested",
            CallStatus::ConcernedPersonNotAvailable => "Concerned Person Not Available",
            CallStatus::CustomerBusy => "Customer Busy",
            CallStatus::CustomerHungUp => "Customer Hung Up",
            CallStatus::DisconnectedNumber => "Disconnected Number",
            CallStatus::DoNotCall => "Do Not Call",
            CallStatus::FollowUp => "Follow Up",
            CallStatus::HardReject => "Hard Reject",
            CallStatus::InFuture => "In Future",
            CallStatus::Incomplete => "Incomplete",
            CallStatus::Interested => "Interested",
            CallStatus::MyCallBack => "My Call Back",
            CallStatus::NoAnswer => "No Answer",
            CallStatus::NotEligible => "Not Eligible",
            CallStatus::NotInterested => "Not Interested",
            CallStatus::Receptionist => "Receptionist",
            CallStatus::RepeatedNumber => "Repeated Number",
            CallStatus::RobotAutomated => "Robot / Automated",
            CallStatus::SaleMade => "Sale Made",
            CallStatus::VoicemailLeft => "Voicemail Left",
            CallStatus::VulnerableCustomer => "Vulnerable Customer",
            CallStatus::WrongNumber => "Wrong Number",
        }
    }

    /// Case-insensitive lookup by label. `None` for anything outside the
    /// closed set.
    pub fn parse(value: &str) -> Option<CallStatus> {
        let value = value.trim();
        ALL_STATUSES
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    /// Whether an audio recording must accompany this outcome. Statuses
    /// where no conversation happened do not need one; everything else
    /// does.
    pub fn requires_audio(&self) -> bool {
        !matches!(
            self,
            CallStatus::BlankCall
                | CallStatus::BusyTone
                | CallStatus::DisconnectedNumber
                | CallStatus::NoAnswer
                | CallStatus::WrongNumber
                | CallStatus::RepeatedNumber
                | CallStatus::RobotAutomated
                | CallStatus::AnsweringMachine
        )
    }
}

/// Audio rule over a raw status label. Unknown or empty labels require
/// audio, the conservative default.
pub fn is_audio_required(status: &str) -> bool {
    CallStatus::parse(status).map_or(true, |s| s.requires_audio())
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_AUDIO_NEEDED: [&str; 8] = [
        "Blank Call (No Response)",
        "Busy Tone",
        "Disconnected Number",
        "No Answer",
        "Wrong Number",
        "Repeated Number",
        "Robot / Automated",
        "Answering Machine (Sent to Message)",
    ];

    #[test]
    fn statuses_outside_the_exclusion_set_require_audio() {
        for status in ALL_STATUSES {
            let expected = !NO_AUDIO_NEEDED.contains(&status.as_str());
            assert_eq!(
                status.requires_audio(),
                expected,
                "audio rule wrong for {:?}",
                status
            );
        }
    }

    #[test]
    fn audio_rule_is_case_insensitive() {
        assert!(!is_audio_required("no answer"));
        assert!(!is_audio_required("WRONG NUMBER"));
        assert!(is_audio_required("interested"));
        assert!(is_audio_required("SALE MADE"));
    }

    #[test]
    fn unknown_status_defaults_to_audio_required() {
        assert!(is_audio_required(""));
        assert!(is_audio_required("Some Future Status"));
    }

    #[test]
    fn parse_round_trips_every_label() {
        for status in ALL_STATUSES {
            assert_eq!(CallStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CallStatus::parse(" interested "), Some(CallStatus::Interested));
        assert_eq!(CallStatus::parse("bogus"), None);
    }
}
