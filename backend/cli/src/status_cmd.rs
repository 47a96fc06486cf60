//! CLI Status Command
//!
//! Asks a running server for its health report.

use anyhow::Result;

pub async fn run(port: u16) -> Result<()> {
    let client = reqwest::Client::new();
    match client
        .get(format!("http://localhost:{port}/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("Pagecast is not running on port {port}");
        }
    }
    Ok(())
}
