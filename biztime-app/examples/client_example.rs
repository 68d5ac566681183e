//! Client example walking through companies, invoices and industries
//! against a locally started server.
//!
//! Run with: cargo run -p biztime-app --example client_example --no-default-features --features sqlite

use biztime_client::{BizTimeClient, ClientError};
use biztime_hex::{BizTimeService, inbound::HttpServer};
use biztime_repo::build_repo;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("biztime.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;
    let router = HttpServer::new(BizTimeService::new(repo)).router();

    let server_addr = format!("127.0.0.1:{port}");
    let server_listener = TcpListener::bind(&server_addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(server_listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = BizTimeClient::new(format!("http://127.0.0.1:{port}"));

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Companies
    let apple = client
        .create_company(None, "Apple Computer", Some("Maker of OSX."))
        .await?;
    println!("✅ Created company: {} (code={})", apple.name, apple.code);

    let ibm = client
        .create_company(Some("ibm"), "IBM", Some("Big blue."))
        .await?;
    println!("✅ Created company: {} (code={})", ibm.name, ibm.code);

    match client.create_company(Some("ibm"), "IBM again", None).await {
        Err(ClientError::Api { status, message }) => println!("✅ Duplicate rejected: {status} {message}"),
        other => anyhow::bail!("expected a conflict, got {other:?}"),
    }

    // Invoices
    let invoice = client.create_invoice(&apple.code, 100.0).await?;
    println!("✅ Invoice {} created, paid={}", invoice.id, invoice.paid);

    let paid = client.update_invoice(invoice.id, 100.0, true).await?;
    println!("✅ Invoice {} paid on {:?}", paid.id, paid.paid_date);

    let unpaid = client.update_invoice(invoice.id, 100.0, false).await?;
    println!("✅ Invoice {} unpaid, paid_date={:?}", unpaid.id, unpaid.paid_date);

    // Industries
    client.create_industry("tech", "Technology").await?;
    client.associate_company("tech", &apple.code).await?;
    client.associate_company("tech", &ibm.code).await?;

    let detail = client.get_company(&apple.code).await?;
    println!(
        "✅ {} has invoices {:?} and industries {:?}",
        detail.code,
        detail.invoices,
        detail.industries.iter().map(|i| &i.industry).collect::<Vec<_>>()
    );

    println!("\n📋 Industries:");
    for industry in client.list_industries().await? {
        println!("   - {} ({}): {:?}", industry.industry, industry.code, industry.companies);
    }

    client.delete_company(&ibm.code).await?;
    println!("\n📋 Companies after deleting ibm:");
    for company in client.list_companies().await? {
        println!("   - {} ({})", company.name, company.code);
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
