use crate::retrieve::DocumentMatch;

mod templates;

pub use templates::NO_CONTEXT_NOTE;

/// Default budget for the assembled reference material, in bytes of prompt
/// text. Tunable; the packing policy is the contract, not the number.
pub const MAX_CONTEXT_CHARS: usize = 4000;
/// Default bound on a single document excerpt.
pub const EXCERPT_CHARS: usize = 500;

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    pub max_context_chars: usize,
    pub excerpt_chars: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            max_context_chars: MAX_CONTEXT_CHARS,
            excerpt_chars: EXCERPT_CHARS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub prompt: String,
    /// Matches actually packed into the prompt, in rank order. Citation links
    /// are derived from this set, never from model output.
    pub included: Vec<DocumentMatch>,
}

impl PromptBuilder {
    /// Pack matches into the prompt in rank order, whole blocks only.
    ///
    /// Packing stops at the first block that would overflow the budget; a
    /// partially included excerpt is never emitted. With nothing packed the
    /// prompt is still valid and carries an explicit no-context note.
    pub fn assemble(&self, question: &str, matches: &[DocumentMatch]) -> AssembledPrompt {
        let mut blocks: Vec<String> = Vec::new();
        let mut included: Vec<DocumentMatch> = Vec::new();
        let mut used = 0usize;

        for m in matches {
            let block = templates::context_block(
                &m.document.title,
                &excerpt(&m.document.content, self.excerpt_chars),
                &m.document.url,
            );
            if used + block.len() > self.max_context_chars {
                break;
            }
            used += block.len();
            blocks.push(block);
            included.push(m.clone());
        }

        let reference_material = if blocks.is_empty() {
            NO_CONTEXT_NOTE.to_string()
        } else {
            blocks.join("\n\n")
        };

        AssembledPrompt {
            prompt: templates::assistant_prompt(question, &reference_material),
            included,
        }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max_chars {
        return t.to_string();
    }
    // Cut on a char boundary, never mid-code-point.
    let mut s: String = t.chars().take(max_chars).collect();
    s.push_str("...");
    s
}
