//! Book catalog seeder
//!
//! Clears the books table and inserts a small sample catalog. Intended
//! for development and demos:
//!
//! ```bash
//! cargo run -p taskhub-api --bin seed
//! ```

use taskhub_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};
use taskhub_shared::models::book::{Book, CreateBook};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn sample_books() -> Vec<CreateBook> {
    vec![
        CreateBook {
            title: "The Redux Handbook".to_string(),
            author: "Jane Developer".to_string(),
            description: "A comprehensive guide to understanding and using Redux in modern web applications. Learn how to manage state effectively in large-scale applications.".to_string(),
            price: 29.99,
            category: "Programming".to_string(),
            in_stock: true,
            cover_image: "https://picsum.photos/seed/redux/300/450".to_string(),
        },
        CreateBook {
            title: "React Patterns".to_string(),
            author: "John Smith".to_string(),
            description: "Master the most common and effective React design patterns. Improve your component architecture and application structure.".to_string(),
            price: 24.99,
            category: "Programming".to_string(),
            in_stock: true,
            cover_image: "https://picsum.photos/seed/react/300/450".to_string(),
        },
        CreateBook {
            title: "MongoDB for Beginners".to_string(),
            author: "Sarah Johnson".to_string(),
            description: "Start your journey with MongoDB. This book covers everything from installation to advanced queries and database design.".to_string(),
            price: 19.99,
            category: "Database".to_string(),
            in_stock: true,
            cover_image: "https://picsum.photos/seed/mongodb/300/450".to_string(),
        },
        CreateBook {
            title: "Full-Stack Development".to_string(),
            author: "Michael Wilson".to_string(),
            description: "Learn to build complete web applications from front-end to back-end using modern JavaScript frameworks and tools.".to_string(),
            price: 34.99,
            category: "Programming".to_string(),
            in_stock: false,
            cover_image: "https://picsum.photos/seed/fullstack/300/450".to_string(),
        },
        CreateBook {
            title: "Express.js Deep Dive".to_string(),
            author: "David Brown".to_string(),
            description: "An in-depth exploration of Express.js for building robust Node.js web applications and APIs.".to_string(),
            price: 22.99,
            category: "Programming".to_string(),
            in_stock: true,
            cover_image: "https://picsum.photos/seed/express/300/450".to_string(),
        },
        CreateBook {
            title: "State Management Strategies".to_string(),
            author: "Emily Clark".to_string(),
            description: "Compare different state management libraries including Redux, MobX, Context API, and Recoil. Learn when to use each one.".to_string(),
            price: 27.99,
            category: "Programming".to_string(),
            in_stock: true,
            cover_image: "https://picsum.photos/seed/state/300/450".to_string(),
        },
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Only the database is needed here; the full server config is not.
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let pool = create_pool(DatabaseConfig {
        url: database_url,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // Clear existing data
    sqlx::query("DELETE FROM books").execute(&pool).await?;
    tracing::info!("Existing books removed");

    let books = sample_books();
    let count = books.len();
    for draft in books {
        Book::create(&pool, draft)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed book: {}", e))?;
    }

    tracing::info!("{} books seeded successfully", count);

    Ok(())
}
