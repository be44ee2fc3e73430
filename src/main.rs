#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = examprep_engine::run().await {
        eprintln!("examprep-engine fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
