//! Deterministic folding of a round's answers into one text block
//!
//! The gateway's prompt contract expects the user turn for a round to be a
//! sequence of `Q:`/`A:` pairs in round order. The rendering here must stay
//! byte-stable across calls for the same inputs; the block is replayed
//! verbatim in every later request.

use super::question::{Answer, QuestionKind, RoundResponses, SmartQuestion};

/// Render one answer according to the question's declared kind.
///
/// Unanswered yes/no renders `Not answered`, unanswered scale defaults to
/// `3/5`, an unanswered choice renders `Not selected`, and everything else
/// renders `Not provided`.
pub fn format_answer(question: &SmartQuestion, answer: Option<&Answer>) -> String {
    match question.kind {
        QuestionKind::YesNo => match answer {
            Some(Answer::YesNo(true)) => "Yes".to_string(),
            Some(Answer::YesNo(false)) => "No".to_string(),
            _ => "Not answered".to_string(),
        },
        QuestionKind::Scale => match answer {
            Some(Answer::Scale(value)) => format!("{}/5", value),
            _ => "3/5".to_string(),
        },
        QuestionKind::MultipleChoice => match answer_text(answer) {
            Some(text) => text,
            None => "Not selected".to_string(),
        },
        QuestionKind::Date | QuestionKind::Amount | QuestionKind::Text => {
            match answer_text(answer) {
                Some(text) => text,
                None => "Not provided".to_string(),
            }
        }
    }
}

/// Fold the round into the `Q:`/`A:` block sent as one user message.
///
/// Pairs appear in the same order as `questions`; pairs are separated by a
/// blank line.
pub fn format_round(questions: &[SmartQuestion], responses: &RoundResponses) -> String {
    questions
        .iter()
        .map(|q| {
            format!(
                "Q: {}\nA: {}",
                q.question,
                format_answer(q, responses.get(&q.id))
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Serialize a round's questions into the assistant turn recorded in history.
pub fn format_question_block(message: &str, questions: &[SmartQuestion]) -> String {
    let mut block = message.trim().to_string();
    for q in questions {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str(&format!("- {}", q.question));
    }
    block
}

fn answer_text(answer: Option<&Answer>) -> Option<String> {
    let text = match answer? {
        Answer::Choice(s) | Answer::Date(s) | Answer::Amount(s) | Answer::Text(s) => s,
        Answer::YesNo(v) => return Some(if *v { "Yes" } else { "No" }.to_string()),
        Answer::Scale(v) => return Some(format!("{}/5", v)),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text.clone())
    }
}
