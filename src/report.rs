//! Pure aggregation over the transaction ledger: totals, balance and the
//! monthly income/expense/profit series.
//!
//! Nothing here keeps state or mutates anything. Aggregates are recomputed
//! from scratch on demand, and malformed input is excluded rather than
//! reported: these functions never fail.

use crate::model::{Transaction, TransactionKind, TransactionStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One month of aggregated cash flow.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// The period key, `YYYY-MM`.
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub profit: Decimal,
}

/// Sum of amounts over completed transactions of `kind`.
pub fn total(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    total_with_status(transactions, kind, TransactionStatus::Completed)
}

/// Sum of amounts over transactions matching `kind` and `status`.
pub fn total_with_status(
    transactions: &[Transaction],
    kind: TransactionKind,
    status: TransactionStatus,
) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind && t.status == status)
        .map(|t| t.amount.value())
        .sum()
}

/// Completed income minus completed expenses.
pub fn balance(transactions: &[Transaction]) -> Decimal {
    total(transactions, TransactionKind::Income) - total(transactions, TransactionKind::Expense)
}

/// Groups completed transactions into monthly buckets, in ascending period
/// order. Only completed transactions with a parseable date create a bucket
/// or contribute to its sums; everything else is excluded.
pub fn monthly_buckets(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();
    for transaction in transactions {
        if transaction.status != TransactionStatus::Completed {
            continue;
        }
        let Some(month) = period_key(&transaction.date) else {
            continue;
        };
        let bucket = buckets
            .entry(month.clone())
            .or_insert_with(|| MonthlyBucket {
                month,
                ..Default::default()
            });
        match transaction.kind {
            TransactionKind::Income => bucket.income += transaction.amount.value(),
            TransactionKind::Expense => bucket.expense += transaction.amount.value(),
        }
        bucket.profit = bucket.income - bucket.expense;
    }
    buckets.into_values().collect()
}

/// The `YYYY-MM` period key of a `YYYY-MM-DD` date string, or `None` when
/// the date does not parse.
fn period_key(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(parsed.format("%Y-%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, NewTransaction};
    use std::str::FromStr;

    fn transaction(
        kind: TransactionKind,
        amount: &str,
        status: TransactionStatus,
        date: &str,
    ) -> Transaction {
        Transaction::new(NewTransaction {
            kind,
            description: "t".to_string(),
            amount: Amount::from_str(amount).unwrap(),
            date: date.to_string(),
            category: "Outros".to_string(),
            status,
            ..Default::default()
        })
    }

    fn ledger() -> Vec<Transaction> {
        vec![
            transaction(
                TransactionKind::Income,
                "100",
                TransactionStatus::Completed,
                "2024-01-05",
            ),
            transaction(
                TransactionKind::Expense,
                "40",
                TransactionStatus::Completed,
                "2024-01-20",
            ),
            transaction(
                TransactionKind::Income,
                "999",
                TransactionStatus::Pending,
                "2024-02-01",
            ),
        ]
    }

    #[test]
    fn test_total_excludes_pending() {
        let total = total(&ledger(), TransactionKind::Income);
        assert_eq!(total, Decimal::from(100));
    }

    #[test]
    fn test_total_with_status() {
        let pending = total_with_status(
            &ledger(),
            TransactionKind::Income,
            TransactionStatus::Pending,
        );
        assert_eq!(pending, Decimal::from(999));
    }

    #[test]
    fn test_balance() {
        assert_eq!(balance(&ledger()), Decimal::from(60));
    }

    #[test]
    fn test_monthly_buckets_exact_example() {
        let buckets = monthly_buckets(&ledger());
        // The pending February income fabricates no bucket.
        assert_eq!(buckets.len(), 1);
        let january = &buckets[0];
        assert_eq!(january.month, "2024-01");
        assert_eq!(january.income, Decimal::from(100));
        assert_eq!(january.expense, Decimal::from(40));
        assert_eq!(january.profit, Decimal::from(60));
    }

    #[test]
    fn test_monthly_buckets_ascending_order() {
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                "10",
                TransactionStatus::Completed,
                "2024-03-01",
            ),
            transaction(
                TransactionKind::Income,
                "20",
                TransactionStatus::Completed,
                "2023-11-15",
            ),
            transaction(
                TransactionKind::Expense,
                "5",
                TransactionStatus::Completed,
                "2024-03-09",
            ),
        ];
        let buckets = monthly_buckets(&transactions);
        let months: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(months, vec!["2023-11", "2024-03"]);
        assert_eq!(buckets[1].profit, Decimal::from(5));
    }

    #[test]
    fn test_monthly_buckets_excludes_unparsable_dates() {
        let transactions = vec![
            transaction(
                TransactionKind::Income,
                "10",
                TransactionStatus::Completed,
                "not-a-date",
            ),
            transaction(
                TransactionKind::Income,
                "20",
                TransactionStatus::Completed,
                "2024-05-10",
            ),
        ];
        let buckets = monthly_buckets(&transactions);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].income, Decimal::from(20));
    }

    #[test]
    fn test_monthly_buckets_empty_ledger() {
        assert!(monthly_buckets(&[]).is_empty());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let ledger = ledger();
        assert_eq!(monthly_buckets(&ledger), monthly_buckets(&ledger));
        assert_eq!(
            total(&ledger, TransactionKind::Expense),
            total(&ledger, TransactionKind::Expense)
        );
    }
}
