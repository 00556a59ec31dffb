use anyhow::Result;

use crate::api_client::{AlertResponse, ApiClient};
use crate::cli::OutputFormat;

// ── Health ──────────────────────────────────────────────────────────────

pub async fn cmd_health(client: &ApiClient, output: OutputFormat) -> Result<()> {
    let health = client.healthz().await?;
    let ready = client.readyz().await?;

    if output == OutputFormat::Json {
        let combined = serde_json::json!({
            "health": health,
            "ready": ready,
        });
        println!("{}", serde_json::to_string_pretty(&combined)?);
        return Ok(());
    }

    println!("Health:     {}", health.status);
    println!("Ready:      {}", ready.status);
    println!("Dispatcher: {}", yes_no(ready.dispatcher_running));
    println!("Store:      {}", yes_no(ready.store_reachable));
    Ok(())
}

// ── Metrics ─────────────────────────────────────────────────────────────

pub async fn cmd_metrics(client: &ApiClient) -> Result<()> {
    let text = client.metrics().await?;
    print!("{text}");
    Ok(())
}

// ── Messages ────────────────────────────────────────────────────────────

pub async fn cmd_send(
    client: &ApiClient,
    to: &str,
    message: &str,
    output: OutputFormat,
) -> Result<()> {
    let resp = client.send_message(to, message).await?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    println!("Message sent: {} (to {to})", resp.message_id);
    Ok(())
}

// ── Alerts ──────────────────────────────────────────────────────────────

pub async fn cmd_alerts_create(
    client: &ApiClient,
    message: &str,
    recipients: &[String],
    output: OutputFormat,
) -> Result<()> {
    let alert = client.create_alert(message, recipients).await?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&alert)?);
        return Ok(());
    }

    println!(
        "Alert created: {} ({} recipient(s), dispatch in progress)",
        alert.id,
        alert.recipients.len()
    );
    println!("Check results with: alertdispatch-agent alerts get {}", alert.id);
    Ok(())
}

pub async fn cmd_alerts_get(client: &ApiClient, id: &str, output: OutputFormat) -> Result<()> {
    let alert = client.get_alert(id).await?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&alert)?);
        return Ok(());
    }

    print_alert(&alert);
    Ok(())
}

fn print_alert(alert: &AlertResponse) {
    println!("Alert {}", alert.id);
    println!("  Message:    {}", alert.message);
    println!("  Recipients: {}", alert.recipients.join(", "));
    println!("  Sent:       {}", yes_no(alert.sent));
    if let Some(ts) = alert.sent_timestamp {
        println!("  Sent at:    {ts} (ms since epoch)");
    }

    if alert.delivery_results.is_empty() {
        return;
    }

    println!();
    println!("{:<18} {:<8} {:<34}", "RECIPIENT", "RESULT", "DETAIL");
    for result in &alert.delivery_results {
        let detail = result
            .message_id
            .as_deref()
            .or(result.error.as_deref())
            .unwrap_or("-");
        let outcome = if result.success { "ok" } else { "failed" };
        println!("{:<18} {:<8} {:<34}", result.phone_number, outcome, detail);
    }
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_no_formats() {
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }
}
