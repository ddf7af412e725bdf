use chrono::Utc;
use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, MockExecResult, QueryFilter, QueryTrait};

use webboard_core::domain::{Category, Comment, PostFilter};
use webboard_core::error::RepoError;
use webboard_core::ports::{BaseRepository, PostRepository};

use crate::database::entity::{category, comment, post, user};
use crate::database::postgres_repo::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    post_condition,
};

fn category_model(id: i32, name: &str) -> category::Model {
    let now = Utc::now();
    category::Model {
        id,
        name: name.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

fn user_model(id: i32, username: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        username: username.to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

fn post_model(id: i32, author_id: i32, category_id: i32) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".to_owned(),
        author_id,
        category_id,
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

fn comment_model(id: i32, post_id: i32, author_id: i32) -> comment::Model {
    let now = Utc::now();
    comment::Model {
        id,
        content: "Nice".to_owned(),
        author_id,
        post_id,
        created_at: now.into(),
        updated_at: now.into(),
        deleted_at: None,
    }
}

fn render(filter: &PostFilter) -> String {
    post::Entity::find()
        .filter(post_condition(filter))
        .build(DatabaseBackend::Postgres)
        .to_string()
}

#[tokio::test]
async fn test_find_category_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category_model(3, "news")]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(&db);
    let result: Option<Category> = repo.find_by_id(3).await.unwrap();

    let category = result.unwrap();
    assert_eq!(category.id, 3);
    assert_eq!(category.name, "news");
}

#[tokio::test]
async fn test_insert_returns_generated_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category_model(7, "news")]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(&db);
    let category: Category = repo.insert(Category::new("news".into())).await.unwrap();

    assert_eq!(category.id, 7);
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(&db);
    let err = BaseRepository::<Comment, i32>::delete(&repo, 9)
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_find_details_assembles_relations() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(1, 2, 3)]])
        .append_query_results([vec![user_model(2, "alice")]])
        .append_query_results([vec![category_model(3, "news")]])
        .append_query_results([vec![comment_model(4, 1, 2), comment_model(5, 1, 2)]])
        .into_connection();

    let repo = PostgresPostRepository::new(&db);
    let details = repo
        .find_details(&PostFilter::all().with_id(1))
        .await
        .unwrap();

    assert_eq!(details.len(), 1);
    let detail = &details[0];
    assert_eq!(detail.post.id, 1);
    assert_eq!(detail.author.username, "alice");
    assert_eq!(detail.category.name, "news");
    assert_eq!(detail.comments.len(), 2);
}

#[tokio::test]
async fn test_find_details_without_posts_stops_early() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(&db);
    let details = repo.find_details(&PostFilter::all()).await.unwrap();

    assert!(details.is_empty());
}

#[test]
fn test_unfiltered_condition_has_no_where() {
    let sql = render(&PostFilter::all());
    assert!(!sql.contains("WHERE"));
}

#[test]
fn test_condition_ands_constraints_and_ors_text() {
    let sql = render(&PostFilter::all().by_author(1).in_category(2).matching("cat"));

    assert!(sql.contains(r#""author_id" = 1"#));
    assert!(sql.contains(r#""category_id" = 2"#));
    assert!(sql.contains("LIKE"));
    assert!(sql.contains("%cat%"));
    assert!(sql.contains(" OR "));
}

#[test]
fn test_empty_text_adds_no_like() {
    let sql = render(&PostFilter::all().by_author(1).matching(""));
    assert!(!sql.contains("LIKE"));
}
