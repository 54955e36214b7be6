#[tokio::main]
async fn main() -> anyhow::Result<()> {
    flipcards_terminal::run().await
}
