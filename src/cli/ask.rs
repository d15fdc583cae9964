use anyhow::Result;

use crate::chat::Session;
use crate::core::AppConfig;
use crate::planner::TravelPlanner;

pub async fn run(config: AppConfig, message: &str) -> Result<()> {
    let mut session = Session::new(TravelPlanner::new(&config)?);
    let reply = session.submit(message).await?;
    println!("{}", reply.content);
    Ok(())
}
