//! Suggestion-related CLI commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, ClearResponse, StatusResponse, Suggestion};
use crate::output::{
    color_severity, format_currency, format_timestamp, print_success, print_warning, OutputFormat,
};

/// Row for the suggestions table
#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Resource")]
    resource_id: String,
    #[tabled(rename = "Type")]
    resource_type: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Est. Savings")]
    estimated_savings: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "When")]
    timestamp: String,
}

/// List suggestions with optional filters
pub async fn list_suggestions(
    client: &ApiClient,
    severity: Option<String>,
    resource: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let result: Vec<Suggestion> = client.get("suggestions").await?;

    let filtered: Vec<_> = result
        .into_iter()
        .filter(|s| {
            severity
                .as_ref()
                .map(|sev| s.severity.eq_ignore_ascii_case(sev))
                .unwrap_or(true)
        })
        .filter(|s| {
            resource
                .as_ref()
                .map(|id| s.resource_id.contains(id.as_str()))
                .unwrap_or(true)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&filtered)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if filtered.is_empty() {
                print_warning("No suggestions found");
                return Ok(());
            }

            let rows: Vec<SuggestionRow> = filtered
                .iter()
                .map(|s| SuggestionRow {
                    resource_id: s.resource_id.clone(),
                    resource_type: s.resource_type.clone(),
                    severity: color_severity(&s.severity),
                    estimated_savings: format_currency(s.estimated_savings),
                    action: s.action.clone(),
                    timestamp: format_timestamp(&s.timestamp),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            let total_savings: f64 = filtered.iter().map(|s| s.estimated_savings).sum();
            println!(
                "\nTotal: {} suggestions, estimated savings {}",
                filtered.len(),
                format_currency(total_savings)
            );
        }
    }

    Ok(())
}

/// Clear all stored suggestions
pub async fn clear_suggestions(client: &ApiClient) -> Result<()> {
    let response: ClearResponse = client.post("suggestions/clear").await?;
    print_success(&response.message);
    Ok(())
}

/// Show which sink backend is active
pub async fn show_status(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let status: StatusResponse = client.get("status").await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Table => println!("Active suggestion sink: {}", status.sink),
    }

    Ok(())
}
