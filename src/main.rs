#[tokio::main]
async fn main() -> anyhow::Result<()> {
    product_catalog::tracing::init();
    product_catalog::app::run().await
}
