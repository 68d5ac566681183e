//! BizTime CLI
//!
//! Command-line interface for the BizTime API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use biztime_client::BizTimeClient;
use biztime_types::InvoiceId;

#[derive(Parser)]
#[command(name = "biztime")]
#[command(author, version, about = "BizTime API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the BizTime API
    #[arg(long, env = "BIZTIME_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Company operations
    Company {
        #[command(subcommand)]
        action: CompanyCommands,
    },
    /// Invoice operations
    Invoice {
        #[command(subcommand)]
        action: InvoiceCommands,
    },
    /// Industry operations
    Industry {
        #[command(subcommand)]
        action: IndustryCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// List all companies
    List,
    /// Show a company with its invoices and industries
    Get { code: String },
    /// Create a company
    Create {
        /// Company name
        name: String,
        /// Company code; derived from the name when omitted
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace a company's name and description
    Update {
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
    },
    /// Delete a company and its invoices
    Delete { code: String },
}

#[derive(Subcommand)]
enum InvoiceCommands {
    /// List all invoices
    List,
    /// Show an invoice with its company
    Get { id: i64 },
    /// Create an unpaid invoice
    Create {
        #[arg(long)]
        company: String,
        #[arg(long)]
        amt: f64,
    },
    /// Update amount and paid flag
    Update {
        id: i64,
        #[arg(long)]
        amt: f64,
        /// Mark the invoice paid; omit to mark it unpaid
        #[arg(long)]
        paid: bool,
    },
    /// Delete an invoice
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum IndustryCommands {
    /// List industries with their companies
    List,
    /// Create an industry
    Create {
        code: String,
        #[arg(long)]
        industry: String,
    },
    /// Place a company in an industry
    Associate {
        /// Industry code
        industry: String,
        /// Company code
        #[arg(long)]
        company: String,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = BizTimeClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Company { action } => match action {
            CompanyCommands::List => print_json(&client.list_companies().await?)?,
            CompanyCommands::Get { code } => print_json(&client.get_company(&code).await?)?,
            CompanyCommands::Create {
                name,
                code,
                description,
            } => {
                let company = client
                    .create_company(code.as_deref(), &name, description.as_deref())
                    .await?;
                print_json(&company)?;
            }
            CompanyCommands::Update {
                code,
                name,
                description,
            } => print_json(&client.update_company(&code, &name, &description).await?)?,
            CompanyCommands::Delete { code } => print_json(&client.delete_company(&code).await?)?,
        },

        Commands::Invoice { action } => match action {
            InvoiceCommands::List => print_json(&client.list_invoices().await?)?,
            InvoiceCommands::Get { id } => {
                print_json(&client.get_invoice(InvoiceId::from_i64(id)).await?)?
            }
            InvoiceCommands::Create { company, amt } => {
                print_json(&client.create_invoice(&company, amt).await?)?
            }
            InvoiceCommands::Update { id, amt, paid } => print_json(
                &client
                    .update_invoice(InvoiceId::from_i64(id), amt, paid)
                    .await?,
            )?,
            InvoiceCommands::Delete { id } => {
                print_json(&client.delete_invoice(InvoiceId::from_i64(id)).await?)?
            }
        },

        Commands::Industry { action } => match action {
            IndustryCommands::List => print_json(&client.list_industries().await?)?,
            IndustryCommands::Create { code, industry } => {
                print_json(&client.create_industry(&code, &industry).await?)?
            }
            IndustryCommands::Associate { industry, company } => {
                print_json(&client.associate_company(&industry, &company).await?)?
            }
        },
    }

    Ok(())
}
