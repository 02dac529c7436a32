use rusqlite::Connection;
use serde_json::json;

use crate::error::AppError;
use crate::ingest::course_pages::import_course_pages;
use crate::ingest::discourse_json::import_discourse_export;
use crate::ingest::ImportSummary;

fn demo_forum_export() -> String {
    // Deterministic sample drawn from real course Q&A so retrieval and
    // prompting behave meaningfully without a live scrape.
    let posts = json!([
        {
            "post_id": 155939,
            "topic_title": "GA5 Question 8 Clarification",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/ga5-question-8-clarification/155939",
            "created_at": "2025-04-10T06:35:00Z",
            "raw_content": "Use the model named in the question. You must use gpt-3.5-turbo-0125, even if the AI proxy only supports gpt-4o-mini. Call the OpenAI API directly for this question."
        },
        {
            "post_id": 165959,
            "topic_title": "GA4 Data Sourcing Discussion Thread (TDS Jan 2025)",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/ga4-data-sourcing-discussion-thread-tds-jan-2025/165959",
            "created_at": "2025-02-08T09:15:00Z",
            "raw_content": "If a student scores 10/10 on GA4 plus the bonus, the dashboard shows 110. The bonus mark is added on top of the regular score."
        },
        {
            "post_id": 166100,
            "topic_title": "Project 1 deadline extended",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/project-1-deadline-extended/166100",
            "created_at": "2025-02-02T12:00:00Z",
            "raw_content": "The Project 1 deadline has been extended to 16 Feb 2025. Check the pinned announcement for confirmation before planning your submission."
        },
        {
            "post_id": 163224,
            "topic_title": "Docker or Podman for the container assignment?",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/docker-or-podman-for-the-container-assignment/163224",
            "created_at": "2025-01-20T04:45:00Z",
            "raw_content": "The course recommends Podman over Docker. Docker knowledge transfers, but the examples and graded checks are written for Podman."
        },
        {
            "post_id": 161120,
            "topic_title": "insufficient_quota error when calling the API",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/insufficient-quota-error-when-calling-the-api/161120",
            "created_at": "2025-01-18T16:20:00Z",
            "raw_content": "The insufficient_quota error means your API usage limits are exhausted. Check the key settings and the usage dashboard before retrying."
        },
        {
            "post_id": 160011,
            "topic_title": "GitHub repository requirements for Project 1",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/github-repository-requirements-for-project-1/160011",
            "created_at": "2025-01-28T10:05:00Z",
            "raw_content": "Your repository must be public and carry an MIT license file at the root, or the automated evaluation will not pick it up."
        },
        {
            "post_id": 164300,
            "topic_title": "Vercel build failing on deployment",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/vercel-build-failing-on-deployment/164300",
            "created_at": "2025-02-05T18:40:00Z",
            "raw_content": "Check the build logs first. Most failures come from dependencies missing in package.json or a mismatched Node version."
        },
        {
            "post_id": 158000,
            "topic_title": "Where are the recorded sessions?",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/where-are-the-recorded-sessions/158000",
            "created_at": "2025-01-12T08:00:00Z",
            "raw_content": "Recorded sessions are on the course YouTube playlist. Links are collected in the course materials thread."
        },
        {
            "post_id": 159500,
            "topic_title": "How is the final grade computed?",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/how-is-the-final-grade-computed/159500",
            "created_at": "2025-01-15T11:30:00Z",
            "raw_content": "Final grades take the best 4 of 7 graded assignment scores, and you need at least 40% overall to pass."
        },
        {
            "post_id": 162700,
            "topic_title": "GCP asks for a parent organization",
            "topic_url": "https://discourse.onlinedegree.iitm.ac.in/t/gcp-asks-for-a-parent-organization/162700",
            "created_at": "2025-01-25T14:10:00Z",
            "raw_content": "Create a new project without selecting a parent organization. Personal accounts do not need one."
        }
    ]);
    posts.to_string()
}

fn demo_course_export() -> String {
    let pages = json!([
        {
            "title": "Tools in Data Science: Course Overview",
            "url": "https://tds.s-anand.net/#/2025-01/",
            "section": "2025-01",
            "content": "Tools in Data Science covers practical tooling for data work. Grading takes the best 4 of 7 graded assignments, GA1 is a prerequisite, and passing needs 40% overall.",
            "scraped_at": "2025-02-10T00:00:00Z"
        },
        {
            "title": "Development Tools",
            "url": "https://tds.s-anand.net/#/development-tools",
            "section": "Tools",
            "content": "The course uses Podman for container work. Docker compatibility notes are included where behavior differs.",
            "scraped_at": "2025-02-10T00:00:00Z"
        },
        {
            "title": "Deployment Tools",
            "url": "https://tds.s-anand.net/#/deployment-tools",
            "section": "Tools",
            "content": "Vercel is the recommended target for web deployment. Keep dependencies declared in package.json so the build can resolve them.",
            "scraped_at": "2025-02-10T00:00:00Z"
        },
        {
            "title": "Large Language Models",
            "url": "https://tds.s-anand.net/#/large-language-models",
            "section": "Tools",
            "content": "Graded assignments name the exact model to call, for example gpt-3.5-turbo-0125. Use the model the question names even when a proxy offers alternatives.",
            "scraped_at": "2025-02-10T00:00:00Z"
        },
        {
            "title": "Project 1",
            "url": "https://tds.s-anand.net/#/project-1",
            "section": "Projects",
            "content": "Project 1 is evaluated automatically from a public GitHub repository with an MIT license. The submission deadline is announced on the forum.",
            "scraped_at": "2025-02-10T00:00:00Z"
        }
    ]);
    pages.to_string()
}

/// Seed a deterministic sample knowledge base. Safe to run repeatedly; a
/// second run reports every document unchanged.
pub fn seed_demo_dataset(conn: &Connection) -> Result<ImportSummary, AppError> {
    let forum = import_discourse_export(conn, &demo_forum_export(), "tds-kb")?;
    let course = import_course_pages(conn, &demo_course_export())?;

    let mut summary = forum;
    summary.inserted += course.inserted;
    summary.updated += course.updated;
    summary.unchanged += course.unchanged;
    summary.skipped += course.skipped;
    summary.warnings.extend(course.warnings);

    tracing::info!(inserted = summary.inserted, "seeded demo knowledge base");
    Ok(summary)
}
