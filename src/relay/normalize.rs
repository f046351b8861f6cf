use crate::inference::{Candidate, InferenceResult};

pub const LOADING_REPLY: &str = "I'm currently loading. Please try again in a moment!";
pub const UNRECOGNIZED_REPLY: &str =
    "I received your message but couldn't generate a proper response. Please try again!";
pub const REPHRASE_REPLY: &str =
    "I understand your message, but I'm having trouble formulating a response. Could you try rephrasing?";

// Measured in UTF-16 code units.
const MIN_REPLY_UNITS: usize = 2;

/// Reduces an inference result to the text sent back for `message`.
pub fn normalize(result: InferenceResult, message: &str) -> String {
    let text = select_text(result);
    clean_reply(text, message)
}

fn select_text(result: InferenceResult) -> String {
    match result {
        InferenceResult::Candidates(Candidate::Generated(text)) => text,
        InferenceResult::Candidates(Candidate::Summary(text)) => text,
        InferenceResult::Candidates(Candidate::Other(value)) => value.to_string(),
        InferenceResult::Single(text) => text,
        InferenceResult::Unrecognized => UNRECOGNIZED_REPLY.to_string(),
    }
}

/// Strips an echoed prompt and substitutes the rephrase sentence for
/// replies too short to be useful.
pub fn clean_reply(text: String, message: &str) -> String {
    let text = match text.strip_prefix(message) {
        Some(rest) => rest.trim().to_string(),
        None => text,
    };

    if text.encode_utf16().count() < MIN_REPLY_UNITS {
        return REPHRASE_REPLY.to_string();
    }

    text
}
