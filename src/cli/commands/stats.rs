use crate::config::Config;
use crate::db::Store;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let stats = store.decision_stats().await?;

    let names = config.classifiers.slots().map(|slot| slot.name.as_str());
    let summary = stats.summary();
    let success = stats.model_success(names);
    let comparison = stats.model_comparison();

    println!("Decisions: {}", summary.total);
    println!(
        "  approved by at least one model: {} | rejected by all: {}",
        summary.approved_total, summary.rejected_total
    );
    println!();

    println!("{:<20} {:>10} {:>10}", "Model", "Approved", "Rejected");
    println!("{:-<42}", "");
    for entry in [&success.model_a, &success.model_b, &success.model_c] {
        println!("{:<20} {:>10} {:>10}", entry.name, entry.approved, entry.rejected);
    }
    println!();

    println!("Unanimous approve: {}", comparison.all_approved);
    println!("Unanimous reject:  {}", comparison.all_rejected);
    println!(
        "Agreement  {}/{}: {} | {}/{}: {} | {}/{}: {}",
        names[0],
        names[1],
        comparison.agreement_a_b,
        names[0],
        names[2],
        comparison.agreement_a_c,
        names[1],
        names[2],
        comparison.agreement_b_c
    );

    Ok(())
}
