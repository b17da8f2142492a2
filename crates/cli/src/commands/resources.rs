//! Resource-related CLI commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, Resource};
use crate::output::{print_warning, OutputFormat};

/// Row for the resources table
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Owner")]
    owner: String,
}

/// List all simulated resources
pub async fn list_resources(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let resources: Vec<Resource> = client.get("resources").await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resources)?);
        }
        OutputFormat::Table => {
            if resources.is_empty() {
                print_warning("No resources found");
                return Ok(());
            }

            let rows: Vec<ResourceRow> = resources
                .iter()
                .map(|r| ResourceRow {
                    id: r.id.clone(),
                    kind: r.kind.clone(),
                    owner: r.owner(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} resources", resources.len());
        }
    }

    Ok(())
}

/// Show one resource with all its attributes
pub async fn show_resource(client: &ApiClient, id: &str, format: OutputFormat) -> Result<()> {
    let resource: Resource = client.get(&format!("resources/{}", id)).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resource)?);
        }
        OutputFormat::Table => {
            println!("{} ({})", resource.id, resource.kind);
            for (key, value) in &resource.attributes {
                println!("  {:<24} {}", key, value);
            }
        }
    }

    Ok(())
}

/// Show the recorded snapshot history for a resource
pub async fn show_history(client: &ApiClient, id: &str, format: OutputFormat) -> Result<()> {
    let history: Vec<serde_json::Value> =
        client.get(&format!("resources/{}/history", id)).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        OutputFormat::Table => {
            if history.is_empty() {
                print_warning("No history recorded");
                return Ok(());
            }
            for (index, entry) in history.iter().enumerate() {
                println!("{:>4}  {}", index, entry);
            }
            println!("\nTotal: {} snapshots", history.len());
        }
    }

    Ok(())
}
