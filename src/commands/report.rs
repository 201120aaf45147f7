//! Report command handlers: the dashboard summary and the monthly series.

use crate::commands::Out;
use crate::model::{Amount, Transaction, TransactionKind};
use crate::prefs::StatusCount;
use crate::report::{balance, monthly_buckets, total, MonthlyBucket};
use crate::{Collection, Config, Prefs, Result};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Recomputes the monthly series from `transactions` and rewrites the
/// cached copy. Called after every transaction mutation, mirroring how the
/// dashboard chart stays current.
pub(crate) async fn refresh_monthly_cache(
    config: &Config,
    transactions: &[Transaction],
) -> Result<()> {
    let buckets = monthly_buckets(transactions);
    Prefs::new(config.store().clone())
        .set_monthly_cache(&buckets)
        .await
}

/// The dashboard figures.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount,
    pub active_projects: u64,
    pub project_status: Vec<StatusCount>,
    pub monthly: Vec<MonthlyBucket>,
}

/// Renders the dashboard: completed-only totals, the balance, the
/// project-status panel and the monthly series. The monthly cache and the
/// project-status snapshot are written back so the stored copies stay
/// current.
pub async fn report_summary(config: &Config) -> Result<Out<DashboardSummary>> {
    let transactions = Collection::<Transaction>::load(config.store().clone()).await;
    let prefs = Prefs::new(config.store().clone());

    let total_income = total(transactions.records(), TransactionKind::Income);
    let total_expenses = total(transactions.records(), TransactionKind::Expense);
    let balance = balance(transactions.records());

    let monthly = match prefs.monthly_cache().await {
        Some(cached) => cached,
        None => monthly_buckets(transactions.records()),
    };
    prefs.set_monthly_cache(&monthly).await?;

    let project_status = prefs.project_status().await;
    prefs.set_project_status(&project_status).await?;
    let active_projects = project_status
        .iter()
        .find(|s| s.name == "Em Andamento")
        .map(|s| s.value)
        .unwrap_or(0);

    let summary = DashboardSummary {
        total_income: Amount::new(total_income),
        total_expenses: Amount::new(total_expenses),
        balance: Amount::new(balance),
        active_projects,
        project_status,
        monthly,
    };

    let mut lines = Vec::new();
    match config.company_name() {
        Some(company) => lines.push(format!("Dashboard | {company}")),
        None => lines.push("Dashboard".to_string()),
    }
    lines.push(format!("Receitas Totais: {}", summary.total_income));
    lines.push(format!("Despesas Totais: {}", summary.total_expenses));
    lines.push(format!("Saldo Atual: {}", summary.balance));
    lines.push(format!("Projetos Ativos: {}", summary.active_projects));
    lines.push("Status dos Projetos:".to_string());
    for status in &summary.project_status {
        lines.push(format!("  {}: {}", status.name, status.value));
    }
    if !summary.monthly.is_empty() {
        lines.push("Fluxo Financeiro:".to_string());
        for bucket in &summary.monthly {
            lines.push(format!(
                "  {}: receitas {} | despesas {} | lucro {}",
                bucket.month, bucket.income, bucket.expense, bucket.profit
            ));
        }
    }

    Ok(Out::new(lines.join("\n"), summary))
}

/// Renders the monthly income/expense/profit series, recomputed live from
/// the ledger, and optionally exports it as CSV.
pub async fn report_monthly(
    config: &Config,
    export: Option<&Path>,
) -> Result<Out<Vec<MonthlyBucket>>> {
    let transactions = Collection::<Transaction>::load(config.store().clone()).await;
    let buckets = monthly_buckets(transactions.records());

    let mut lines = vec![format!("Análise Mensal ({} month(s))", buckets.len())];
    for bucket in &buckets {
        lines.push(format!(
            "  {}: receitas {} | despesas {} | lucro {}",
            bucket.month, bucket.income, bucket.expense, bucket.profit
        ));
    }
    if let Some(path) = export {
        export_csv(path, &buckets)?;
        lines.push(format!("Exported to {}", path.display()));
    }

    Ok(Out::new(lines.join("\n"), buckets))
}

/// Writes the monthly series to `path` as CSV.
fn export_csv(path: &Path, buckets: &[MonthlyBucket]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV file at {}", path.display()))?;
    writer
        .write_record(["month", "income", "expense", "profit"])
        .context("Unable to write CSV header")?;
    for bucket in buckets {
        writer
            .write_record([
                bucket.month.clone(),
                bucket.income.to_string(),
                bucket.expense.to_string(),
                bucket.profit.to_string(),
            ])
            .with_context(|| format!("Unable to write CSV row for {}", bucket.month))?;
    }
    writer.flush().context("Unable to flush the CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add_transaction;
    use crate::model::TransactionKind;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_summary_totals_exclude_pending() {
        let env = TestEnv::new().await;
        env.seed_ledger().await;

        let out = report_summary(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.total_income.to_string(), "R$ 100,00");
        assert_eq!(summary.total_expenses.to_string(), "R$ 40,00");
        assert_eq!(summary.balance.to_string(), "R$ 60,00");
        assert!(out.message().contains("Saldo Atual: R$ 60,00"));
    }

    #[tokio::test]
    async fn test_summary_project_status_defaults() {
        let env = TestEnv::new().await;
        let out = report_summary(env.config()).await.unwrap();
        let summary = out.structure().unwrap();
        assert_eq!(summary.active_projects, 0);
        assert_eq!(summary.project_status.len(), 4);

        // The snapshot was written back.
        let stored = Prefs::new(env.config().store().clone())
            .project_status()
            .await;
        assert_eq!(stored, summary.project_status);
    }

    #[tokio::test]
    async fn test_monthly_report_matches_ledger() {
        let env = TestEnv::new().await;
        env.seed_ledger().await;

        let out = report_monthly(env.config(), None).await.unwrap();
        let buckets = out.structure().unwrap();
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, "2024-01");
        assert_eq!(buckets[0].profit, rust_decimal::Decimal::from(60));
    }

    #[tokio::test]
    async fn test_monthly_report_csv_export() {
        let env = TestEnv::new().await;
        env.seed_ledger().await;
        let path = env.config().root().join("monthly.csv");

        let out = report_monthly(env.config(), Some(&path)).await.unwrap();
        assert!(out.message().contains("Exported to"));

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "month,income,expense,profit");
        assert_eq!(lines.next().unwrap(), "2024-01,100,40,60");
    }

    #[tokio::test]
    async fn test_summary_prefers_cached_series() {
        let env = TestEnv::new().await;
        add_transaction(
            env.config(),
            TestEnv::transaction_args(TransactionKind::Income, "100", "2024-01-05"),
        )
        .await
        .unwrap();

        let out = report_summary(env.config()).await.unwrap();
        assert_eq!(out.structure().unwrap().monthly.len(), 1);
    }
}
