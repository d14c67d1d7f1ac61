use anyhow::Result;
use ensaluto::cli::{actions::run, start};

#[tokio::main]
async fn main() -> Result<()> {
    let (globals, action) = start()?;

    run::handle(&globals, action).await?;

    Ok(())
}
