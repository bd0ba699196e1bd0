//! Context assembly from retrieved passages

use crate::embeddings::text_preprocessing::truncate_str;

/// Joins retrieved passages into the knowledge block of a prompt
pub struct ContextAssembler {
    max_context_length: usize,
}

impl ContextAssembler {
    #[must_use]
    pub const fn new(max_context_length: usize) -> Self {
        Self { max_context_length }
    }

    /// Join passages with blank lines, stopping before the length budget.
    ///
    /// The first passage is always included, cut down if it alone exceeds
    /// the budget, so a non-empty retrieval never yields an empty block.
    #[must_use]
    pub fn assemble(&self, passages: &[String]) -> String {
        let mut context = String::new();

        for (idx, passage) in passages.iter().enumerate() {
            let separator = if idx == 0 { "" } else { "\n\n" };
            let entry_len = separator.len() + passage.len();

            if context.len() + entry_len > self.max_context_length {
                if idx == 0 {
                    context = truncate_str(passage, self.max_context_length);
                }
                break;
            }

            context.push_str(separator);
            context.push_str(passage);
        }

        context
    }
}

impl Default for ContextAssembler {
    fn default() -> Self {
        Self::new(crate::config::default_max_context_length())
    }
}
