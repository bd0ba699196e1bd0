//! Prompt templates for recommendation and chat

use std::collections::HashMap;

/// Fixed retrieval instruction appended to the recommendation query
pub const RECOMMENDATION_QUERY_INSTRUCTION: &str =
    "Find which product line best fits this combination.";

/// The five product lines, their benefit category and indications
pub const PRODUCT_CATALOG: &str = "\
- Aqua Revive (Moisture): low to medium dryness, dull or thirsty hair that needs lightweight hydration.
- Supreme Length (Protection): long hair, greasy roots with dry lengths, prevention of split ends and breakage.
- Ultimate Repair (Strength): severe damage from frequent coloring, bleaching or heat styling.
- Total Repair (Regeneration): moderate damage, split ends, high dryness and stressed lengths.
- Oil Nutritive (Nourishment): severe dryness, frizz, rough or very dull hair that needs rich care.";

/// Template with `{{variable}}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template in one pass over it. Values are inserted
    /// verbatim, so placeholders inside a value are never expanded.
    /// Placeholders without a value are left as is.
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, &str>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            result.push_str(&rest[..start]);
            match values.get(&after[..end]) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[start..start + end + 4]),
            }
            rest = &after[end + 2..];
        }

        result.push_str(rest);
        result
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract variable names from template, in first-seen order
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = &after[..end];
        if !name.is_empty() && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
        rest = &after[end + 2..];
    }

    variables
}

/// Prompt set used by the advisor
pub struct HairPrompts;

impl HairPrompts {
    /// Retrieval query for the recommendation knowledge base
    #[must_use]
    pub fn recommendation_query() -> PromptTemplate {
        PromptTemplate::new(
            "Hair characteristics:\n{{quiz}}\nImage analysis: {{image_analysis}}\n{{instruction}}",
        )
    }

    /// Structured recommendation prompt with the four-line output contract
    #[must_use]
    pub fn recommendation() -> PromptTemplate {
        PromptTemplate::new(
            r"You are GlissBot, a professional haircare expert.

You know these product lines:
{{catalog}}

Use the following knowledge and user information to make a recommendation.

Knowledge base:
{{knowledge}}

Hair quiz answers:
{{quiz}}

Image analysis:
{{image_analysis}}

Provide your response in this exact format, one field per line:

Recommended line: <name of the product line>
Reason: <short explanation why this line suits the user>
Product routine: <Shampoo + Conditioner + Mask if applicable>
Alternative: <alternative line and reason>

Do not add anything else. Do not use markdown, bullets or bold text.",
        )
    }

    /// Free-form follow-up answer grounded in the user's profile
    #[must_use]
    pub fn chat() -> PromptTemplate {
        PromptTemplate::new(
            r"You are GlissBot, a friendly AI haircare expert.
Use the following info to respond helpfully and naturally.

User info:
{{profile}}

Knowledge base:
{{knowledge}}

User question:
{{message}}

Give a helpful, concise, personalized answer.",
        )
    }
}

/// Build the retrieval query for a quiz rendering and image description
#[must_use]
pub fn build_recommendation_query(quiz: &str, image_analysis: &str) -> String {
    HairPrompts::recommendation_query().render(&HashMap::from([
        ("quiz", quiz),
        ("image_analysis", image_analysis),
        ("instruction", RECOMMENDATION_QUERY_INSTRUCTION),
    ]))
}

#[must_use]
pub fn build_recommendation_prompt(knowledge: &str, quiz: &str, image_analysis: &str) -> String {
    HairPrompts::recommendation().render(&HashMap::from([
        ("catalog", PRODUCT_CATALOG),
        ("knowledge", knowledge),
        ("quiz", quiz),
        ("image_analysis", image_analysis),
    ]))
}

#[must_use]
pub fn build_chat_prompt(profile: &str, knowledge: &str, message: &str) -> String {
    HairPrompts::chat().render(&HashMap::from([
        ("profile", profile),
        ("knowledge", knowledge),
        ("message", message),
    ]))
}
