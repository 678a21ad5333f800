//! WordPress posts API suite against the in-memory transport.

use finprobe::testdata::wordpress as terms;
use finprobe::wordpress::{MockWordPress, PostData, PostListQuery, PostStatus, WordPressApi};
use finprobe::SuiteError;
use serde::Deserialize;
use std::sync::Arc;

const BASE_URL: &str = "https://dev.example.test";

fn api() -> WordPressApi {
    WordPressApi::new(Arc::new(MockWordPress::new()), BASE_URL)
}

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct PostView {
    id: u64,
    status: String,
    title: Rendered,
    content: Rendered,
    excerpt: Rendered,
}

fn new_post() -> PostData {
    PostData::new()
        .with_title(terms::INITIAL_TITLE)
        .with_content(terms::INITIAL_CONTENT)
        .with_excerpt(terms::INITIAL_EXCERPT)
}

#[tokio::test]
async fn test_create_post_returns_created_with_fields() {
    let api = api();
    let response = api.create_post(&new_post()).await.unwrap();
    assert_eq!(response.status, 201);
    let post: PostView = response.json().unwrap();
    assert_eq!(post.title.rendered, terms::INITIAL_TITLE);
    assert_eq!(post.content.rendered, terms::INITIAL_CONTENT);
    assert_eq!(post.excerpt.rendered, terms::INITIAL_EXCERPT);
    assert_eq!(post.status, "draft");
}

#[tokio::test]
async fn test_get_returns_the_created_post() {
    let api = api();
    let created: PostView = api.create_post(&new_post()).await.unwrap().json().unwrap();
    let fetched: PostView = api.get_post(created.id).await.unwrap().json().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title.rendered, terms::INITIAL_TITLE);
}

#[tokio::test]
async fn test_get_nonexistent_post_is_endpoint_not_found() {
    let api = api();
    let err = api.get_post(terms::NONEXISTENT_POST_ID).await.unwrap_err();
    match err {
        SuiteError::EndpointNotFound { url } => {
            assert!(url.ends_with(&terms::NONEXISTENT_POST_ID.to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_update_changes_title_only() {
    let api = api();
    let created: PostView = api.create_post(&new_post()).await.unwrap().json().unwrap();

    let response = api
        .update_post(created.id, &PostData::new().with_title(terms::UPDATED_TITLE))
        .await
        .unwrap();
    assert_eq!(response.status, 200);
    let updated: PostView = response.json().unwrap();
    assert_eq!(updated.title.rendered, terms::UPDATED_TITLE);
    // Untouched fields keep their values.
    assert_eq!(updated.content.rendered, terms::INITIAL_CONTENT);
}

#[tokio::test]
async fn test_status_transitions_draft_publish_trash() {
    let api = api();
    let created: PostView = api.create_post(&new_post()).await.unwrap().json().unwrap();

    let published: PostView = api
        .change_post_status(created.id, PostStatus::Publish)
        .await
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(published.status, "publish");

    let trashed: PostView = api.delete_post(created.id, false).await.unwrap().json().unwrap();
    assert_eq!(trashed.status, "trash");

    let again = api.delete_post(created.id, false).await.unwrap();
    assert_eq!(again.status, 410);
}

#[tokio::test]
async fn test_force_delete_removes_post() {
    let transport = Arc::new(MockWordPress::new());
    let api = WordPressApi::new(Arc::clone(&transport) as _, BASE_URL);
    let created: PostView = api.create_post(&new_post()).await.unwrap().json().unwrap();

    let response = api.delete_post(created.id, true).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(transport.post_count(), 0);
    assert!(matches!(
        api.get_post(created.id).await.unwrap_err(),
        SuiteError::EndpointNotFound { .. }
    ));
}

#[tokio::test]
async fn test_permanent_delete_from_any_status() {
    let api = api();
    // Published post: trash first, then force delete.
    let published: PostView = api
        .create_post(&new_post().with_status(PostStatus::Publish))
        .await
        .unwrap()
        .json()
        .unwrap();
    let response = api.permanently_delete_post(published.id).await.unwrap();
    assert_eq!(response.status, 200);

    // Already-trashed post: skips the redundant soft delete.
    let trashed: PostView = api.create_post(&new_post()).await.unwrap().json().unwrap();
    api.delete_post(trashed.id, false).await.unwrap();
    let response = api.permanently_delete_post(trashed.id).await.unwrap();
    assert_eq!(response.status, 200);

    // Absent post: still terminates without error.
    let response = api.permanently_delete_post(terms::NONEXISTENT_POST_ID).await.unwrap();
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_list_filters_by_status_and_search() {
    let api = api();
    for title in ["Перший запис", "Другий запис", "Чернетка"] {
        let status = if title == "Чернетка" {
            PostStatus::Draft
        } else {
            PostStatus::Publish
        };
        api.create_post(
            &PostData::new()
                .with_title(title)
                .with_content("текст")
                .with_status(status),
        )
        .await
        .unwrap();
    }

    let response = api
        .get_all_posts(
            &PostListQuery::new()
                .with_status(PostStatus::Publish)
                .with_per_page(terms::POSTS_PER_PAGE),
        )
        .await
        .unwrap();
    assert_eq!(response.header("X-WP-Total"), Some("2"));

    let response = api
        .get_all_posts(
            &PostListQuery::new()
                .with_status(PostStatus::Publish)
                .with_search("Перший"),
        )
        .await
        .unwrap();
    let results: Vec<PostView> = response.json().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title.rendered, "Перший запис");
}
