use anyhow::Result;
use blog_core::BlogConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let config = BlogConfig::from_env();
    let ax = blog_axum::build(config).await?;

    let addr = ax.addr();
    ax.listen(addr).await?;

    Ok(())
}
