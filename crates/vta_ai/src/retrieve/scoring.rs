use vta_core::domain::Document;

/// Score added when a query term appears in a document title.
pub const TITLE_WEIGHT: u32 = 3;
/// Score added when a query term appears in document content.
pub const CONTENT_WEIGHT: u32 = 1;

/// Terms carrying no retrieval signal on their own. Tunable, like the weights
/// above; changing it shifts rankings but not the contract.
pub const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "be", "can", "do", "does", "for", "how", "i", "in", "is", "it", "my",
    "of", "on", "or", "should", "the", "to", "use", "we", "what", "when", "which", "with", "you",
];

/// Split a question into lowercase search terms: whitespace-separated words
/// with edge punctuation trimmed, stopwords removed, first occurrence kept.
/// Inner punctuation survives so model names like `gpt-3.5-turbo` stay whole.
pub fn tokenize(question: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    for word in question.split_whitespace() {
        let term = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if term.is_empty() || STOPWORDS.contains(&term.as_str()) {
            continue;
        }
        if !terms.contains(&term) {
            terms.push(term);
        }
    }
    terms
}

/// Count weighted term hits against one document. Pure, no I/O.
pub fn score_document(terms: &[String], document: &Document) -> u32 {
    if terms.is_empty() {
        return 0;
    }
    let title = document.title.to_lowercase();
    let content = document.content.to_lowercase();

    let mut score = 0u32;
    for term in terms {
        if title.contains(term.as_str()) {
            score += TITLE_WEIGHT;
        }
        if content.contains(term.as_str()) {
            score += CONTENT_WEIGHT;
        }
    }
    score
}
