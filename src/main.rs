#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fremont_results::run().await
}
