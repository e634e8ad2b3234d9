//! Grounding context assembly and prompt construction.
//!
//! Retrieved chunk texts are concatenated in ranked order into a single
//! context block, then wrapped in a fixed prompt structure: system
//! instruction, context, question, answer cue. The instruction constrains
//! the completion model to the supplied context, so a query against an
//! empty store produces an "insufficient information" answer without any
//! special-casing here.

use crate::document::ScoredResult;

/// Concatenate retrieved chunk texts in ranked order, separated by a blank
/// line.
///
/// When `max_chars` is set, results are included whole, highest-ranked
/// first, until the next one would push the context past the cap.
pub fn assemble_context(results: &[ScoredResult], max_chars: Option<usize>) -> String {
    let mut context = String::new();
    let mut total = 0usize;

    for result in results {
        let piece_len = result.content.chars().count();
        let extra = if context.is_empty() { piece_len } else { piece_len + 2 };
        if max_chars.is_some_and(|max| total + extra > max) {
            break;
        }
        if !context.is_empty() {
            context.push_str("\n\n");
        }
        context.push_str(&result.content);
        total += extra;
    }

    context
}

/// Build the grounding prompt handed to the completion provider.
///
/// The structure is fixed: system instruction, context block, question
/// block, answer cue.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "[SYSTEM]\n\
         You are a helpful assistant, expert at analyzing information and giving concise, \
         accurate answers.\n\
         Use ONLY the information in the context to answer the question.\n\
         If the context does not contain the relevant information, say \"I do not have \
         sufficient information to answer this question.\"\n\
         Base your answer solely on the given context and not on prior knowledge.\n\
         Be specific and give direct answers where possible.\n\
         [CONTEXT]\n\
         {context}\n\
         \n\
         [QUESTION]\n\
         {question}\n\
         \n\
         [ANSWER]\n"
    )
}
