//! Prompt Builder — turns the teacher's inputs into the two-message prompt.
//!
//! Pure and deterministic: the same request and quotation pool always give the
//! same prompt. List contents are not trimmed or validated; an empty list renders
//! as an empty bullet block.

use crate::llm_client::ChatMessage;
use crate::models::quote::Quote;
use crate::review::generator::GenerateReviewRequest;
use crate::review::prompts::{
    IMPRESSIVE_POINTS_PLACEHOLDER, REVIEW_PROMPT_TEMPLATE, REVIEW_SYSTEM,
};

/// How many quotations from the head of the pool are offered to the model.
pub const PROMPT_QUOTE_SAMPLE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPrompt {
    pub system: String,
    pub user: String,
}

impl ReviewPrompt {
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.user.clone()),
        ]
    }
}

pub fn build_review_prompt(request: &GenerateReviewRequest, quotes: &[Quote]) -> ReviewPrompt {
    let impressive_points = match request.impressive_points.as_deref() {
        Some(points) if !points.is_empty() => points,
        _ => IMPRESSIVE_POINTS_PLACEHOLDER,
    };

    let quote_lines = quotes
        .iter()
        .take(PROMPT_QUOTE_SAMPLE)
        .map(|q| format!("- \"{}\" - {}", q.text, q.author))
        .collect::<Vec<_>>()
        .join("\n");

    let positive_traits = bullets(&request.positive_traits);
    let weaknesses = bullets(&request.weaknesses);
    let suggestions = bullets(&request.suggestions);

    let user = fill_template(
        REVIEW_PROMPT_TEMPLATE,
        &[
            ("student_name", request.student_name.as_str()),
            ("positive_traits", positive_traits.as_str()),
            ("weaknesses", weaknesses.as_str()),
            ("impressive_points", impressive_points),
            ("suggestions", suggestions.as_str()),
            ("quotes", quote_lines.as_str()),
        ],
    );

    ReviewPrompt {
        system: REVIEW_SYSTEM.to_string(),
        user,
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{key}` placeholders in a single left-to-right pass, so braces
/// inside substituted values are never expanded again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
