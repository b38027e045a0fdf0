//! Uploads a featured image and publishes a post on a WordPress site.
//!
//! Reads `WORDPRESS_SITE_URL`, `WORDPRESS_USERNAME` and `WORDPRESS_PASSWORD`
//! from the environment or a `.env` file.

use wordpress_pub_rs::{
    Config, DEFAULT_PAGE, DEFAULT_PER_PAGE, MediaMetadata, NewPost, PostStatus, Result,
    WordPressClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = WordPressClient::with_config(Config::from_dotenv()?)?;

    let image_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://picsum.photos/id/10/800/600.jpg".to_string());

    let metadata = MediaMetadata::new(
        "demo-cover",
        "Demo cover",
        "A landscape photo",
        "Cover image uploaded by the publish demo",
    );
    let media_id = match client.upload_media(image_url.as_str(), &metadata).await? {
        Some(media) => media["id"].as_u64(),
        None => {
            eprintln!("⚠️  Media upload failed, publishing without a featured image");
            None
        }
    };

    let mut post = NewPost::new(
        "Hello from Rust",
        "<p>This post was published by wordpress-pub-rs.</p>",
        "hello-from-rust",
    )
    .with_status(PostStatus::Draft)
    .with_categories(["Demo"])
    .with_tags(["rust", "wordpress"]);
    if let Some(id) = media_id {
        post = post.with_featured_media(id);
    }

    match client.create_post(&post).await {
        Some(created) => println!("✅ Created draft post with ID: {}", created["id"]),
        None => eprintln!("❌ Post creation failed, see log output"),
    }

    println!("\n=== Latest posts ===");
    if let Some(posts) = client.list_posts(DEFAULT_PER_PAGE, DEFAULT_PAGE).await {
        for post in posts.as_array().into_iter().flatten() {
            println!("  - [{}] {}", post["id"], post["title"]["rendered"]);
        }
    }

    Ok(())
}
