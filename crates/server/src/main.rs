use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    microblog_server::run().await
}
