//! Digi Docent, the floating teacher chat.
//!
//! The transcript lives for the process lifetime only. The assistant itself
//! is an external collaborator behind `AssistantClient`: prior transcript
//! plus new user text in, reply text out. Any failure is absorbed into a
//! fixed apology turn; nothing here is ever fatal.

use color_eyre::{eyre::OptionExt, Result};
use serde::{Deserialize, Serialize};

pub const GREETING: &str =
    "Hoi! Ik ben Digi Docent. Snap je iets niet of wil je meer weten? Vraag het mij!";

/// Substituted for the assistant's turn whenever the request fails.
pub const APOLOGY: &str = "Sorry, ik ben even de draad kwijt. Probeer het nog eens?";

/// Fixed persona, sent once per request as the system instruction. Tone,
/// topic restriction and answer-length limits live here; the rest of the app
/// treats it as an opaque string.
pub const SYSTEM_INSTRUCTION: &str = "\
Je bent Digi Docent, een vriendelijke en motiverende geschiedenisdocent voor VMBO-T leerlingen (15 jaar).
Je schrijfstijl is direct, duidelijk en op taalniveau B1/2F.
Je antwoordt altijd kort en bondig. Maximaal 3 zinnen per antwoord, tenzij er expliciet om een uitleg gevraagd wordt, dan maximaal 100 woorden.
Je weet dat leerlingen visueel zijn ingesteld, dus gebruik beeldende taal.
Je onderwerp is de geschiedenis (specifiek de thema's in de lesstof zoals Nederland-Indië en de Eerste Wereldoorlog).
Als een leerling een vraag stelt die buiten dit onderwerp valt, stuur je ze vriendelijk terug naar het onderwerp.
Wees hulpvaardig, maar geef niet zomaar het antwoord op quizvragen; probeer ze de goede richting op te sturen.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[serde(rename = "model")]
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait AssistantClient: Send + Sync {
    fn reply(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// One chat window's state. `pending` is the in-flight flag: exactly one
/// request at a time, the input is disabled until the reply (or the apology)
/// lands.
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Assistant,
                text: GREETING.to_string(),
            }],
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the user's turn and mark the session pending. Returns the prior
    /// transcript (without the new turn) to send along, or `None` when the
    /// text is blank or a request is already in flight.
    pub fn begin(&mut self, text: &str) -> Option<Vec<ChatMessage>> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        let prior = self.messages.clone();
        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
        });
        self.pending = true;
        Some(prior)
    }

    /// Record the assistant's turn. A failed request becomes the fixed
    /// apology; either way the session stops being pending.
    pub fn finish(&mut self, reply: Result<String>) {
        let text = match reply {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("assistant request failed: {e}");
                APOLOGY.to_string()
            }
        };
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            text,
        });
        self.pending = false;
    }
}

// Gemini generateContent wire format, request and response trimmed down to
// the fields this app uses.

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    system_instruction: ContentBody,
    contents: Vec<ContentBody>,
}

#[derive(Serialize, Deserialize)]
struct ContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ContentBody,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
        }
    }
}

impl AssistantClient for GeminiClient {
    async fn reply(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        let mut contents: Vec<ContentBody> = history
            .iter()
            .map(|m| ContentBody {
                role: Some(m.role),
                parts: vec![Part {
                    text: m.text.clone(),
                }],
            })
            .collect();
        contents.push(ContentBody {
            role: Some(Role::User),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        let request = GenerateRequest {
            system_instruction: ContentBody {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents,
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let response: GenerateResponse = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_eyre("assistant returned no candidates")?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}
