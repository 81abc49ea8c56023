use crate::config::Config;
use crate::db::Store;
use crate::domain::UserId;
use crate::services::PageRequest;

pub async fn cmd_recent(config: &Config, user: Option<i64>, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let page = PageRequest {
        limit: Some(limit.clamp(1, config.pagination.max_limit)),
        offset: None,
    }
    .resolve(&config.pagination)?;

    let records = match user {
        Some(id) => store.list_decisions_for_user(UserId::new(id), page).await?,
        None => store.list_decisions(page).await?,
    };

    if records.is_empty() {
        println!("No decisions recorded.");
        return Ok(());
    }

    let names = config.classifiers.slots().map(|slot| slot.name.as_str());
    let mark = |approved: bool| if approved { "approve" } else { "reject" };

    println!("Recent Decisions (last {}):", records.len());
    println!("{:-<70}", "");

    for record in records {
        let user = record
            .user_id
            .map_or_else(|| "anonymous".to_string(), |u| format!("user {u}"));
        println!("• #{} {} at {}", record.id, user, record.created_at);
        println!(
            "  income {} | credit {} | loan {} | years {}",
            record.income, record.credit_score, record.loan_amount, record.years_employed
        );
        println!(
            "  {}: {} | {}: {} | {}: {}",
            names[0],
            mark(record.verdict_a),
            names[1],
            mark(record.verdict_b),
            names[2],
            mark(record.verdict_c)
        );
    }

    Ok(())
}
