//! Blog API handlers
//!
//! Contains HTTP request handlers for blog CRUD operations and statistics.

use crate::blogs::{Blog, BlogChanges, BlogId, NewBlog};
use crate::error::AppError;
use crate::list_helper::{self, AuthorBlogs, AuthorLikes};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

/// Create blog request
///
/// Every field is optional at the wire level so that a missing title or URL
/// surfaces as a validation error instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBlogRequest {
    /// Title of the post (required)
    pub title: Option<String>,
    /// Author of the post
    pub author: Option<String>,
    /// Link to the post (required)
    pub url: Option<String>,
    /// Initial like count, defaults to 0
    pub likes: Option<i64>,
}

impl CreateBlogRequest {
    /// Validate the request and turn it into a record to store
    pub fn validate(self) -> Result<NewBlog, String> {
        let (title, url) = match (non_blank(self.title), non_blank(self.url)) {
            (Some(title), Some(url)) => (title, url),
            _ => return Err("Title and URL are required".to_string()),
        };

        Ok(NewBlog {
            title,
            author: self.author,
            url,
            likes: self.likes.map(validate_likes).transpose()?.unwrap_or(0),
        })
    }
}

/// Update blog request
///
/// Only the supplied fields are changed.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBlogRequest {
    /// New title (optional)
    pub title: Option<String>,
    /// New author (optional)
    pub author: Option<String>,
    /// New URL (optional)
    pub url: Option<String>,
    /// New like count (optional)
    pub likes: Option<i64>,
}

impl UpdateBlogRequest {
    /// Validate the supplied fields
    pub fn validate(self) -> Result<BlogChanges, String> {
        if matches!(&self.title, Some(title) if title.trim().is_empty()) {
            return Err("Title cannot be empty".to_string());
        }
        if matches!(&self.url, Some(url) if url.trim().is_empty()) {
            return Err("URL cannot be empty".to_string());
        }

        Ok(BlogChanges {
            title: self.title,
            author: self.author,
            url: self.url,
            likes: self.likes.map(validate_likes).transpose()?,
        })
    }
}

/// Summary statistics over all stored blogs
#[derive(Debug, Serialize, Deserialize)]
pub struct BlogStatsResponse {
    /// Number of stored blogs
    pub count: usize,
    /// Sum of likes across all blogs
    pub total_likes: u64,
    /// Blog with the most likes
    pub favorite_blog: Option<Blog>,
    /// Author with the most blogs
    pub most_blogs: Option<AuthorBlogs>,
    /// Author with the most likes in total
    pub most_likes: Option<AuthorLikes>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_likes(likes: i64) -> Result<u64, String> {
    u64::try_from(likes).map_err(|_| format!("Likes cannot be negative: {}", likes))
}

fn blog_not_found() -> AppError {
    AppError::NotFound("Blog post not found".to_string())
}

/// GET /api/blogs - List all blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, AppError> {
    let blogs = state.db.get_blogs().await?;
    Ok(Json(blogs))
}

/// POST /api/blogs - Create a new blog
pub async fn create_blog(
    State(state): State<AppState>,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    let Json(request) = payload?;
    let new_blog = request.validate().map_err(AppError::Validation)?;
    let blog = state.db.create_blog(&new_blog).await?;

    Ok((StatusCode::CREATED, Json(blog)))
}

/// DELETE /api/blogs/:id - Delete a blog
pub async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<BlogId>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_blog(&id).await? {
        return Err(blog_not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/blogs/:id - Update a blog
pub async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<BlogId>,
    payload: Result<Json<UpdateBlogRequest>, JsonRejection>,
) -> Result<Json<Blog>, AppError> {
    let Json(request) = payload?;
    let changes = request.validate().map_err(AppError::Validation)?;
    let blog = state
        .db
        .update_blog(&id, &changes)
        .await?
        .ok_or_else(blog_not_found)?;

    Ok(Json(blog))
}

/// PUT/DELETE /api/blogs/stats - never names a blog, so reports it as missing
pub async fn reserved_blog_id() -> AppError {
    blog_not_found()
}

/// GET /api/blogs/stats - Aggregate statistics over all blogs
pub async fn blog_stats(
    State(state): State<AppState>,
) -> Result<Json<BlogStatsResponse>, AppError> {
    let blogs = state.db.get_blogs().await?;

    Ok(Json(BlogStatsResponse {
        count: blogs.len(),
        total_likes: list_helper::total_likes(&blogs),
        favorite_blog: list_helper::favorite_blog(&blogs).cloned(),
        most_blogs: list_helper::most_blogs(&blogs),
        most_likes: list_helper::most_likes(&blogs),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blogs::db::test_db;
    use tempfile::TempDir;

    async fn create_test_state() -> (AppState, TempDir) {
        let (db, temp_dir) = test_db().await;
        (AppState::new(db), temp_dir)
    }

    fn create_request(
        title: &str,
        author: &str,
        url: &str,
        likes: Option<i64>,
    ) -> CreateBlogRequest {
        CreateBlogRequest {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            url: Some(url.to_string()),
            likes,
        }
    }

    #[tokio::test]
    async fn test_list_blogs_empty() {
        let (state, _temp_dir) = create_test_state().await;
        let result = list_blogs(State(state)).await;
        assert!(result.is_ok());
        assert!(result.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_create_blog() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request(
            "React patterns",
            "Michael Chan",
            "https://reactpatterns.com/",
            Some(7),
        );

        let result = create_blog(State(state.clone()), Ok(Json(request))).await;
        assert!(result.is_ok(), "Failed to create blog: {:?}", result);
        let (status, blog) = result.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(blog.title, "React patterns");
        assert_eq!(blog.likes, 7);
        assert!(!blog.id.is_empty());

        // Verify blog is in list
        let blogs = list_blogs(State(state)).await.unwrap().0;
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0].id, blog.id);
    }

    #[tokio::test]
    async fn test_create_blog_defaults_likes_to_zero() {
        let (state, _temp_dir) = create_test_state().await;
        let request = CreateBlogRequest {
            title: Some("T".to_string()),
            url: Some("U".to_string()),
            ..Default::default()
        };

        let (_, blog) = create_blog(State(state), Ok(Json(request))).await.unwrap();
        assert_eq!(blog.likes, 0);
        assert_eq!(blog.author, None);
    }

    #[tokio::test]
    async fn test_create_blog_missing_title() {
        let (state, _temp_dir) = create_test_state().await;
        let request = CreateBlogRequest {
            url: Some("https://example.com/".to_string()),
            ..Default::default()
        };

        let result = create_blog(State(state.clone()), Ok(Json(request))).await;
        match result.unwrap_err() {
            AppError::Validation(message) => assert_eq!(message, "Title and URL are required"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
        assert_eq!(state.db.count_blogs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_blog_blank_url() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "   ", None);
        let result = create_blog(State(state.clone()), Ok(Json(request))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.db.count_blogs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_blog_negative_likes() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "https://example.com/", Some(-1));
        let result = create_blog(State(state.clone()), Ok(Json(request))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(state.db.count_blogs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_blog() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "https://example.com/", None);
        let (_, blog) = create_blog(State(state.clone()), Ok(Json(request))).await.unwrap();

        let status = delete_blog(State(state.clone()), Path(blog.id.clone())).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(state.db.count_blogs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_blog_not_found() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "https://example.com/", None);
        create_blog(State(state.clone()), Ok(Json(request))).await.unwrap();

        let result = delete_blog(State(state.clone()), Path("nonexistent".to_string())).await;
        match result.unwrap_err() {
            AppError::NotFound(_) => {}
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
        assert_eq!(state.db.count_blogs().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_blog() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "https://example.com/", Some(1));
        let (_, blog) = create_blog(State(state.clone()), Ok(Json(request))).await.unwrap();

        let update = UpdateBlogRequest {
            likes: Some(42),
            ..Default::default()
        };
        let updated = update_blog(State(state.clone()), Path(blog.id.clone()), Ok(Json(update)))
            .await
            .unwrap()
            .0;

        assert_eq!(updated.id, blog.id);
        assert_eq!(updated.likes, 42);
        assert_eq!(updated.title, "Title");

        // Verify in database
        let stored = state.db.get_blog(&blog.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_blog_not_found() {
        let (state, _temp_dir) = create_test_state().await;
        let update = UpdateBlogRequest {
            title: Some("New Title".to_string()),
            ..Default::default()
        };
        let result =
            update_blog(State(state), Path("nonexistent".to_string()), Ok(Json(update))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_blog_empty_title() {
        let (state, _temp_dir) = create_test_state().await;
        let request = create_request("Title", "Author", "https://example.com/", None);
        let (_, blog) = create_blog(State(state.clone()), Ok(Json(request))).await.unwrap();

        let update = UpdateBlogRequest {
            title: Some("  ".to_string()),
            ..Default::default()
        };
        let result =
            update_blog(State(state.clone()), Path(blog.id.clone()), Ok(Json(update))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let stored = state.db.get_blog(&blog.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Title");
    }

    #[tokio::test]
    async fn test_blog_stats() {
        let (state, _temp_dir) = create_test_state().await;
        for (author, likes) in [
            ("Michael Chan", 7),
            ("Edsger W. Dijkstra", 5),
            ("Edsger W. Dijkstra", 10),
        ] {
            let request = create_request("Title", author, "https://example.com/", Some(likes));
            create_blog(State(state.clone()), Ok(Json(request))).await.unwrap();
        }

        let stats = blog_stats(State(state)).await.unwrap().0;
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_likes, 22);
        assert_eq!(stats.favorite_blog.unwrap().likes, 10);
        assert_eq!(
            stats.most_blogs,
            Some(AuthorBlogs {
                author: Some("Edsger W. Dijkstra".to_string()),
                blogs: 2,
            })
        );
        assert_eq!(
            stats.most_likes,
            Some(AuthorLikes {
                author: Some("Edsger W. Dijkstra".to_string()),
                likes: 15,
            })
        );
    }

    #[tokio::test]
    async fn test_reserved_blog_id_is_not_found() {
        let err = reserved_blog_id().await;
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blog_stats_empty() {
        let (state, _temp_dir) = create_test_state().await;
        let stats = blog_stats(State(state)).await.unwrap().0;
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_likes, 0);
        assert!(stats.favorite_blog.is_none());
        assert!(stats.most_blogs.is_none());
        assert!(stats.most_likes.is_none());
    }
}
