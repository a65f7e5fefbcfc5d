use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brume::app::pagination::PageWindow;
use brume::config::ClientConfig;
use brume::infra::bus::Topic;
use brume::Client;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env()?;
    let client = Client::new(&config)?;

    // Badge listener: re-derives the unread count on every signal, the way
    // a mounted badge view would.
    let _badge = {
        let notifications = client.notifications.clone();
        client.bus.subscribe(Topic::NotificationsChanged, move || {
            tracing::info!(unread = notifications.unread_count(), "badge updated");
        })
    };

    if let Err(err) = client.mirror.refresh().await {
        tracing::warn!(error = %err, "initial feed refresh failed");
    }

    let posts = client.mirror.posts();
    let window = PageWindow::new(config.page_size);
    println!("Recent posts ({})", posts.len());
    for post in window.slice(&posts) {
        let body = post.text.as_deref().unwrap_or("(no text)");
        println!("- {} — {}", post.user.name, body);
        println!(
            "  👍 {} likes   💬 {} comments",
            post.like_count(),
            post.comment_count()
        );
    }
    println!("Unread notifications: {}", client.notifications.unread_count());

    Ok(())
}
