/// A user message about to be sent to the assistant.
#[derive(Debug, Clone, Default)]
pub struct SendMessageInput {
    pub text: String,
    pub image_path: Option<String>,
}
