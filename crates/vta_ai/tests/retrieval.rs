use pretty_assertions::assert_eq;

use vta_ai::retrieve::rank_documents;
use vta_core::domain::{Collection, Document};

fn doc(
    collection: Collection,
    id: i64,
    title: &str,
    content: &str,
    created_at: Option<&str>,
) -> Document {
    Document {
        collection,
        id,
        title: title.to_string(),
        content: content.to_string(),
        url: format!("https://example.com/t/{id}"),
        section: None,
        created_at: created_at.map(|s| s.to_string()),
        created_at_raw: None,
        fingerprint: "test".to_string(),
    }
}

#[test]
fn model_question_ranks_the_clarification_post_first() {
    let documents = vec![
        doc(
            Collection::ForumPosts,
            155939,
            "GA5 Question 8 Clarification",
            "You must use gpt-3.5-turbo-0125, even if the AI proxy only supports gpt-4o-mini.",
            Some("2025-04-10T06:35:00Z"),
        ),
        doc(
            Collection::ForumPosts,
            163224,
            "Docker or Podman for the container assignment?",
            "The course recommends Podman over Docker.",
            Some("2025-01-20T04:45:00Z"),
        ),
        doc(
            Collection::CourseContent,
            1,
            "Deployment Tools",
            "Vercel is the recommended target for web deployment.",
            Some("2025-02-10T00:00:00Z"),
        ),
    ];

    let ranked = rank_documents(
        "Should I use gpt-4o-mini or gpt-3.5-turbo?",
        &documents,
        8,
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].document.id, 155939);
    assert!(ranked[0].score > 0);
}

#[test]
fn title_hits_outrank_content_hits() {
    let documents = vec![
        doc(
            Collection::ForumPosts,
            1,
            "Grading policy",
            "A passing grade also requires completing GA1. Podman is unrelated here.",
            None,
        ),
        doc(
            Collection::ForumPosts,
            2,
            "Docker or Podman for the container assignment?",
            "The graded checks are written for Podman.",
            None,
        ),
    ];

    let ranked = rank_documents("podman", &documents, 8);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].document.id, 2);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn zero_score_documents_are_excluded() {
    let documents = vec![doc(
        Collection::ForumPosts,
        1,
        "Vercel build failing",
        "Check the build logs first.",
        None,
    )];

    assert!(rank_documents("podman quota", &documents, 8).is_empty());
}

#[test]
fn empty_and_stopword_only_questions_rank_nothing() {
    let documents = vec![doc(
        Collection::ForumPosts,
        1,
        "What is it for?",
        "A post that echoes stopwords.",
        None,
    )];

    assert!(rank_documents("", &documents, 8).is_empty());
    assert!(rank_documents("what is it for", &documents, 8).is_empty());
}

#[test]
fn score_ties_break_by_recency_then_id() {
    let documents = vec![
        doc(Collection::ForumPosts, 30, "Podman setup", "notes", None),
        doc(
            Collection::ForumPosts,
            20,
            "Podman setup",
            "notes",
            Some("2025-01-01T00:00:00Z"),
        ),
        doc(
            Collection::ForumPosts,
            10,
            "Podman setup",
            "notes",
            Some("2025-03-01T00:00:00Z"),
        ),
        doc(
            Collection::ForumPosts,
            5,
            "Podman setup",
            "notes",
            Some("2025-01-01T00:00:00Z"),
        ),
    ];

    let ids: Vec<i64> = rank_documents("podman", &documents, 8)
        .into_iter()
        .map(|m| m.document.id)
        .collect();
    // Newest first, equal timestamps by id asc, undated last.
    assert_eq!(ids, vec![10, 5, 20, 30]);
}

#[test]
fn ranking_is_deterministic_for_identical_inputs() {
    let documents = vec![
        doc(Collection::ForumPosts, 1, "Podman setup", "podman notes", None),
        doc(Collection::CourseContent, 1, "Podman pages", "podman docs", None),
        doc(Collection::ForumPosts, 2, "Container tips", "podman again", None),
    ];

    let first = rank_documents("podman container", &documents, 8);
    let second = rank_documents("podman container", &documents, 8);
    assert_eq!(first, second);
}

#[test]
fn top_k_bounds_the_result() {
    let documents: Vec<Document> = (1..=6)
        .map(|id| {
            doc(
                Collection::ForumPosts,
                id,
                &format!("Podman note {id}"),
                "podman",
                None,
            )
        })
        .collect();

    assert_eq!(rank_documents("podman", &documents, 2).len(), 2);
}
