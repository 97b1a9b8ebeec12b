use anyhow::Result;
use kyc_aml_client::{KycClient, ListCompaniesParams, MemberKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lists the companies of a workspace with their members and risk.
///
/// Usage: DATALEONLABS_API_KEY=... cargo run --example list_companies -- wk_123
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kyc_aml_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let workspace_id = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: list_companies <workspace_id>"))?;

    let client = KycClient::from_env()?;
    let params = ListCompaniesParams::new()
        .with_workspace_id(workspace_id)
        .with_limit(20);

    let companies = client.companies().list(&params).await?;
    println!("=== {} companies ===\n", companies.len());

    for company in &companies {
        company.validate()?;

        let name = company
            .company()?
            .and_then(|info| info.name().ok().flatten())
            .unwrap_or_else(|| "<unnamed>".to_string());
        let risk = company
            .risk()?
            .map(|risk| -> anyhow::Result<String> {
                Ok(format!(
                    "{} ({:.2})",
                    risk.code()?.unwrap_or_else(|| "n/a".to_string()),
                    risk.score()?.unwrap_or_default()
                ))
            })
            .transpose()?
            .unwrap_or_else(|| "n/a".to_string());

        println!(
            "{} [{}] risk={}",
            name,
            company.source_id()?.unwrap_or_default(),
            risk
        );

        for member in company.members()?.unwrap_or_default() {
            let label = match member.kind()? {
                MemberKind::Person => "person ".to_string(),
                MemberKind::Company => "company".to_string(),
                MemberKind::Unknown(raw) => format!("unknown member type {:?}", raw),
            };
            println!("  {} {}", label, member.display_name()?.unwrap_or_default());
        }

        let extra = company.unknown_fields();
        if !extra.is_empty() {
            println!("  (fields not modelled by this client: {})", extra.join(", "));
        }
    }

    Ok(())
}
