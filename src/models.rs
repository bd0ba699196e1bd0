use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Description used in place of image analysis when the user skips the photo
pub const NO_IMAGE_DESCRIPTION: &str = "No image provided";

/// Answers collected by the hair questionnaire.
///
/// The named fields mirror the questionnaire; anything else the front end
/// sends (e.g. separate `colored` and `heat` frequencies) is kept verbatim in
/// `extra`. The pipeline only renders this record into prompts, it never
/// branches on individual answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greasy_roots: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_ends: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dryness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colored_or_heat: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl QuizProfile {
    /// Render the answers as `key: value` lines, named fields first
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                lines.push(format!("{key}: {value}"));
            }
        };
        push("length", self.length.clone());
        push("greasy_roots", self.greasy_roots.map(yes_no));
        push("split_ends", self.split_ends.map(yes_no));
        push("dryness", self.dryness.clone());
        push("shine", self.shine.clone());
        push("damage", self.damage.clone());
        push("colored_or_heat", self.colored_or_heat.map(yes_no));

        for (key, value) in &self.extra {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            lines.push(format!("{key}: {rendered}"));
        }

        if lines.is_empty() {
            "no answers provided".to_string()
        } else {
            lines.join("\n")
        }
    }
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

impl fmt::Display for QuizProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Structured product recommendation parsed from a generation reply.
///
/// Every field is independently optional: a label missing from the reply
/// leaves that field `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommended_line: Option<String>,
    pub reason: Option<String>,
    pub product_routine: Option<String>,
    pub alternative: Option<String>,
}

impl Recommendation {
    /// True when the reply yielded no field at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recommended_line.is_none()
            && self.reason.is_none()
            && self.product_routine.is_none()
            && self.alternative.is_none()
    }

    /// True when all four fields were extracted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.recommended_line.is_some()
            && self.reason.is_some()
            && self.product_routine.is_some()
            && self.alternative.is_some()
    }

    /// Format as the four labelled lines, `n/a` for absent fields
    #[must_use]
    pub fn format(&self) -> String {
        let show = |field: &Option<String>| field.clone().unwrap_or_else(|| "n/a".to_string());
        format!(
            "Recommended line: {}\nReason: {}\nProduct routine: {}\nAlternative: {}",
            show(&self.recommended_line),
            show(&self.reason),
            show(&self.product_routine),
            show(&self.alternative)
        )
    }
}

/// Everything known about one user, keyed externally by user id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub quiz: QuizProfile,
    pub image_analysis: String,
    pub recommendation: Recommendation,
}

impl UserProfile {
    #[must_use]
    pub fn new(quiz: QuizProfile, image_analysis: String, recommendation: Recommendation) -> Self {
        Self {
            quiz,
            image_analysis,
            recommendation,
        }
    }

    /// Personalisation block handed to the conversational responder
    #[must_use]
    pub fn to_context(&self) -> String {
        format!(
            "User Hair Profile:\n{}\n\nImage analysis: {}\n\nPrevious recommendation:\n{}",
            self.quiz.render(),
            self.image_analysis,
            self.recommendation.format()
        )
    }
}

/// Raw image handed to the image-description capability
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// File name, if the image came from an upload or a path
    pub filename: Option<String>,
}

impl ImageInput {
    #[must_use]
    pub fn new(bytes: Vec<u8>, filename: Option<String>) -> Self {
        Self { bytes, filename }
    }

    /// MIME type guessed from the file extension, JPEG when unknown
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        }
    }
}
