#[tokio::main]
async fn main() -> anyhow::Result<()> {
    insights::start_server().await
}
