/// Shown in place of reference blocks when nothing fit the context budget.
pub const NO_CONTEXT_NOTE: &str =
    "No matching course or forum material was found for this question.";

pub fn assistant_prompt(question: &str, reference_material: &str) -> String {
    // Keep the contract explicit:
    // - Answer ONLY from the material provided.
    // - Plain text out; links are attached to the response separately.
    format!(
        r#"You are a virtual teaching assistant for an online data science course.

Rules (non-negotiable):
1) Answer using ONLY the reference material below. Do not invent facts.
2) If the material does not cover the question, say so plainly and suggest posting on the course forum.
3) Return plain text only. Do not emit links; sources are attached to the response separately.

Student question:
{question}

Reference material:
{reference_material}
"#
    )
}

pub fn context_block(title: &str, excerpt: &str, url: &str) -> String {
    format!("### {title}\n{excerpt}\nSource: {url}")
}
