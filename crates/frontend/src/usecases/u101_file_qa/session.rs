//! Client-side conversation state for the file Q&A screen.
//!
//! Holds everything the orchestration needs outside the DOM: the selected
//! file, its backend representation, the model toggle and the append-only
//! transcript. Fetching and rendering live elsewhere, so this module stays
//! browser-free and the sequencing rules can be tested on the host.

use contracts::api::{AskRequest, AskResponse, FileRepresentation};
use uuid::Uuid;

/// Role of one transcript entry, mirrored into a CSS class by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::System => "system",
        }
    }
}

/// Content of one transcript entry: plain text or a structured answer.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBody {
    Text(String),
    Answer(AskResponse),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: ChatRole,
    pub body: EntryBody,
}

impl TranscriptEntry {
    fn text(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            body: EntryBody::Text(content.into()),
        }
    }

    fn answer(response: AskResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            body: EntryBody::Answer(response),
        }
    }
}

/// Which backend inference pathway answers the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    OpenAi,
    HuggingFace,
}

impl ModelChoice {
    /// Wire form of the choice (`use_openai` flag on `/ask`).
    pub fn use_openai(self) -> bool {
        matches!(self, ModelChoice::OpenAi)
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelChoice::OpenAi => "OpenAI",
            ModelChoice::HuggingFace => "Hugging Face",
        }
    }
}

/// Metadata of the currently selected file.
///
/// The opaque `web_sys::File` handle never enters the session; only the
/// fields the orchestration reads are kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
}

/// Ticket identifying one upload attempt.
///
/// Completion handlers present it back; a ticket minted before a newer
/// selection no longer matches and its result is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// State machine behind the upload/question flow.
///
/// The transcript is append-only: entries are never mutated, reordered or
/// removed. A question is accepted only while a representation from the
/// current upload exists and no other question is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    file: Option<SelectedFile>,
    representation: Option<FileRepresentation>,
    generation: u64,
    model: ModelChoice,
    transcript: Vec<TranscriptEntry>,
    ask_in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            file: None,
            representation: None,
            generation: 0,
            model: ModelChoice::OpenAi,
            transcript: Vec::new(),
            ask_in_flight: false,
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    /// True once the current selection has been parsed by the backend.
    pub fn is_ready(&self) -> bool {
        self.representation.is_some()
    }

    pub fn ask_in_flight(&self) -> bool {
        self.ask_in_flight
    }

    /// Registers a new selection and invalidates any previous upload.
    ///
    /// The representation is cleared before the returned ticket can be
    /// used, so a question attempt between selection and upload completion
    /// is rejected rather than answered from stale data.
    pub fn select_file(&mut self, name: impl Into<String>, size: u64) -> UploadTicket {
        self.file = Some(SelectedFile {
            name: name.into(),
            size,
        });
        self.representation = None;
        self.generation += 1;
        UploadTicket(self.generation)
    }

    /// Stores the parsed representation if `ticket` is still current.
    ///
    /// Returns false when the selection changed while the upload was in
    /// flight; the late result is dropped without touching any state.
    pub fn upload_succeeded(&mut self, ticket: UploadTicket, data: FileRepresentation) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.representation = Some(data);
        let name = self
            .file
            .as_ref()
            .map(|f| f.name.clone())
            .unwrap_or_default();
        self.push(TranscriptEntry::text(
            ChatRole::Assistant,
            format!(
                "File \"{}\" uploaded successfully. You can now ask questions about it.",
                name
            ),
        ));
        true
    }

    /// Surfaces an upload failure if `ticket` is still current.
    pub fn upload_failed(&mut self, ticket: UploadTicket, message: &str) -> bool {
        if ticket.0 != self.generation {
            return false;
        }
        self.push(TranscriptEntry::text(
            ChatRole::Assistant,
            format!("Upload failed: {}", message),
        ));
        true
    }

    /// Switches the inference pathway and notes the switch in the transcript.
    pub fn set_model(&mut self, model: ModelChoice) {
        self.model = model;
        self.push(TranscriptEntry::text(
            ChatRole::System,
            format!("Switched to {} model", model.label()),
        ));
    }

    /// Validates and accepts a question.
    ///
    /// Returns the request to send, or `None` when the question was
    /// rejected. Rejections (blank question, missing upload) append their
    /// explanation to the transcript; a submission while another question
    /// is in flight is ignored outright.
    pub fn submit_question(&mut self, input: &str) -> Option<AskRequest> {
        if self.ask_in_flight {
            return None;
        }

        let question = input.trim();
        if question.is_empty() {
            self.push(TranscriptEntry::text(
                ChatRole::Assistant,
                "Please enter a question",
            ));
            return None;
        }

        let (file, representation) = match (&self.file, &self.representation) {
            (Some(file), Some(representation)) => (file, representation),
            _ => {
                self.push(TranscriptEntry::text(
                    ChatRole::Assistant,
                    "Please upload a file first",
                ));
                return None;
            }
        };

        let request = AskRequest {
            question: question.to_string(),
            filename: file.name.clone(),
            data_type: representation.data_type.clone(),
            content: representation.clone(),
            use_openai: self.model.use_openai(),
        };

        self.push(TranscriptEntry::text(ChatRole::User, question));
        self.ask_in_flight = true;
        Some(request)
    }

    pub fn ask_succeeded(&mut self, response: AskResponse) {
        self.push(TranscriptEntry::answer(response));
        self.ask_in_flight = false;
    }

    pub fn ask_failed(&mut self, message: &str) {
        self.push(TranscriptEntry::text(
            ChatRole::Assistant,
            format!("Error: {}", message),
        ));
        self.ask_in_flight = false;
    }

    fn push(&mut self, entry: TranscriptEntry) {
        self.transcript.push(entry);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Meta line rendered under an answer.
///
/// The confidence variant appears only when the backend reports a value
/// strictly below 1.0. Hugging Face scores land in 0–1 while the OpenAI
/// pathway pins 1.0, so OpenAI answers always get the plain variant; the
/// raw value is shown with a percent sign, unscaled.
pub fn answer_meta_line(response: &AskResponse) -> String {
    match response.confidence {
        Some(confidence) if confidence < 1.0 => {
            format!("Confidence: {}% ({})", confidence, response.model)
        }
        _ => format!("Generated by {}", response.model),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_representation() -> FileRepresentation {
        serde_json::from_value(json!({
            "type": "structured",
            "data": [{"city": "Oslo", "total": 42}],
            "columns": ["city", "total"]
        }))
        .unwrap()
    }

    fn answer(confidence: Option<f64>) -> AskResponse {
        AskResponse {
            answer: "42".into(),
            model: "roberta-base-squad2".into(),
            confidence,
        }
    }

    fn last_text(session: &Session) -> &str {
        match &session.transcript().last().unwrap().body {
            EntryBody::Text(text) => text,
            EntryBody::Answer(_) => panic!("expected a text entry"),
        }
    }

    #[test]
    fn blank_question_is_rejected_without_a_request() {
        let mut session = Session::new();
        assert!(session.submit_question("   ").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(last_text(&session), "Please enter a question");
        assert_eq!(session.transcript()[0].role, ChatRole::Assistant);
    }

    #[test]
    fn question_before_upload_is_rejected() {
        let mut session = Session::new();
        assert!(session.submit_question("What is the total?").is_none());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(last_text(&session), "Please upload a file first");
    }

    #[test]
    fn question_between_selection_and_upload_completion_is_rejected() {
        let mut session = Session::new();
        let _ticket = session.select_file("a.csv", 2048);
        assert!(!session.is_ready());
        assert!(session.submit_question("What is the total?").is_none());
        assert_eq!(last_text(&session), "Please upload a file first");
    }

    #[test]
    fn successful_upload_enables_questions() {
        let mut session = Session::new();
        let ticket = session.select_file("a.csv", 2048);
        assert!(session.upload_succeeded(ticket, csv_representation()));
        assert!(session.is_ready());
        assert_eq!(
            last_text(&session),
            "File \"a.csv\" uploaded successfully. You can now ask questions about it."
        );

        let request = session.submit_question("What is the total?").unwrap();
        assert_eq!(request.question, "What is the total?");
        assert_eq!(request.filename, "a.csv");
        assert_eq!(request.data_type, "structured");
        assert_eq!(request.content, csv_representation());
        assert!(request.use_openai);
        assert_eq!(last_text(&session), "What is the total?");
        assert_eq!(session.transcript().last().unwrap().role, ChatRole::User);
    }

    #[test]
    fn question_is_trimmed_before_sending() {
        let mut session = Session::new();
        let ticket = session.select_file("a.csv", 2048);
        session.upload_succeeded(ticket, csv_representation());
        let request = session.submit_question("  What is the total?  ").unwrap();
        assert_eq!(request.question, "What is the total?");
        assert_eq!(last_text(&session), "What is the total?");
    }

    #[test]
    fn stale_upload_result_is_discarded() {
        let mut session = Session::new();
        let first = session.select_file("old.csv", 100);
        let second = session.select_file("new.csv", 200);

        let before = session.transcript().len();
        assert!(!session.upload_succeeded(first, csv_representation()));
        assert!(!session.is_ready());
        assert_eq!(session.transcript().len(), before);

        assert!(session.upload_succeeded(second, csv_representation()));
        assert!(session.is_ready());
    }

    #[test]
    fn stale_upload_failure_is_discarded() {
        let mut session = Session::new();
        let first = session.select_file("old.csv", 100);
        let second = session.select_file("new.csv", 200);

        assert!(!session.upload_failed(first, "bad format"));
        assert!(session.transcript().is_empty());

        assert!(session.upload_failed(second, "bad format"));
        assert_eq!(last_text(&session), "Upload failed: bad format");
        assert!(!session.is_ready());
    }

    #[test]
    fn new_selection_clears_the_previous_representation() {
        let mut session = Session::new();
        let ticket = session.select_file("a.csv", 2048);
        session.upload_succeeded(ticket, csv_representation());
        assert!(session.is_ready());

        session.select_file("b.csv", 4096);
        assert!(!session.is_ready());
        assert!(session.submit_question("Still there?").is_none());
        assert_eq!(last_text(&session), "Please upload a file first");
    }

    #[test]
    fn only_one_question_may_be_in_flight() {
        let mut session = Session::new();
        let ticket = session.select_file("a.csv", 2048);
        session.upload_succeeded(ticket, csv_representation());

        assert!(session.submit_question("first").is_some());
        let len = session.transcript().len();
        assert!(session.submit_question("second").is_none());
        assert_eq!(session.transcript().len(), len);

        session.ask_succeeded(answer(Some(1.0)));
        assert!(!session.ask_in_flight());
        assert!(session.submit_question("second").is_some());
    }

    #[test]
    fn ask_failure_surfaces_and_releases_the_guard() {
        let mut session = Session::new();
        let ticket = session.select_file("a.csv", 2048);
        session.upload_succeeded(ticket, csv_representation());
        session.submit_question("What is the total?");

        session.ask_failed("HTTP 500");
        assert_eq!(last_text(&session), "Error: HTTP 500");
        assert!(!session.ask_in_flight());
    }

    #[test]
    fn model_toggle_appends_a_system_entry() {
        let mut session = Session::new();
        assert_eq!(session.model(), ModelChoice::OpenAi);

        session.set_model(ModelChoice::HuggingFace);
        assert_eq!(session.model(), ModelChoice::HuggingFace);
        assert_eq!(last_text(&session), "Switched to Hugging Face model");
        assert_eq!(session.transcript()[0].role, ChatRole::System);

        session.set_model(ModelChoice::OpenAi);
        assert_eq!(last_text(&session), "Switched to OpenAI model");
    }

    #[test]
    fn transcript_grows_by_one_and_keeps_order() {
        let mut session = Session::new();
        session.set_model(ModelChoice::HuggingFace);
        let ticket = session.select_file("a.csv", 2048);
        session.upload_succeeded(ticket, csv_representation());
        session.submit_question("What is the total?");
        session.ask_succeeded(answer(Some(0.87)));

        let roles: Vec<ChatRole> = session.transcript().iter().map(|e| e.role).collect();
        assert_eq!(
            roles,
            vec![
                ChatRole::System,
                ChatRole::Assistant,
                ChatRole::User,
                ChatRole::Assistant
            ]
        );
    }

    #[test]
    fn meta_line_uses_the_literal_unity_threshold() {
        // Hugging Face reports 0-1 scores, OpenAI pins 1.0; the raw value
        // is compared against 1.0 and printed unscaled.
        assert_eq!(
            answer_meta_line(&answer(Some(0.87))),
            "Confidence: 0.87% (roberta-base-squad2)"
        );
        assert_eq!(
            answer_meta_line(&answer(Some(1.0))),
            "Generated by roberta-base-squad2"
        );
        assert_eq!(
            answer_meta_line(&answer(None)),
            "Generated by roberta-base-squad2"
        );
        // A percentage-scale value never drops below the threshold
        assert_eq!(
            answer_meta_line(&answer(Some(87.0))),
            "Generated by roberta-base-squad2"
        );
        // Present-and-zero still counts as below unity
        assert_eq!(
            answer_meta_line(&answer(Some(0.0))),
            "Confidence: 0% (roberta-base-squad2)"
        );
    }
}
