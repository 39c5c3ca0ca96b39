mod handler;
mod model;

pub use handler::{add_post, count_pages, get_post, get_posts};
pub use model::{CreatePostRequest, PageCount, PageQuery, Post, PostMetadata, page_count, page_offset};
