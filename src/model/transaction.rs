//! The `Transaction` type for the cash-flow ledger.

use crate::collection::Record;
use crate::model::Amount;
use crate::store::TRANSACTIONS_KEY;
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or takes it out.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

/// Settlement status of a transaction. Only `completed` transactions count
/// toward financial totals.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
}

serde_plain::derive_display_from_serialize!(TransactionStatus);
serde_plain::derive_fromstr_from_deserialize!(TransactionStatus);

/// Suggested categories for income transactions.
pub const INCOME_CATEGORIES: [&str; 5] =
    ["Serviços", "Consultoria", "Projetos", "Manutenção", "Outros"];

/// Suggested categories for expense transactions.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Marketing",
    "Infraestrutura",
    "Pessoal",
    "Software",
    "Hardware",
    "Escritório",
    "Outros",
];

/// Accepted payment methods.
pub const PAYMENT_METHODS: [&str; 5] = ["Dinheiro", "Cartão", "Transferência", "Pix", "Boleto"];

/// The category suggestion list for `kind`. Categories are free text; these
/// lists only feed pickers and completion.
pub fn category_suggestions(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// A single cash-flow entry.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub(crate) id: u64,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionKind,
    pub(crate) description: String,
    pub(crate) amount: Amount,
    /// Calendar date, `YYYY-MM-DD`.
    pub(crate) date: String,
    pub(crate) category: String,
    pub(crate) recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) payment_method: Option<String>,
    pub(crate) status: TransactionStatus,
}

impl Transaction {
    pub fn new(fields: NewTransaction) -> Self {
        Self {
            id: 0,
            kind: fields.kind,
            description: fields.description,
            amount: fields.amount,
            date: fields.date,
            category: fields.category,
            recurring: fields.recurring,
            payment_method: fields.payment_method,
            status: fields.status,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }
}

/// Fields of the new-transaction form.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Amount,
    pub date: String,
    pub category: String,
    pub recurring: bool,
    pub payment_method: Option<String>,
    pub status: TransactionStatus,
}

/// A field-merge patch for a transaction. `None` fields are left unchanged.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TransactionUpdates {
    pub kind: Option<TransactionKind>,
    pub description: Option<String>,
    pub amount: Option<Amount>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub recurring: Option<bool>,
    pub payment_method: Option<String>,
    pub status: Option<TransactionStatus>,
}

impl Record for Transaction {
    const STORE_KEY: &'static str = TRANSACTIONS_KEY;
    type Updates = TransactionUpdates;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, updates: TransactionUpdates) {
        if let Some(kind) = updates.kind {
            self.kind = kind;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        if let Some(amount) = updates.amount {
            self.amount = amount;
        }
        if let Some(date) = updates.date {
            self.date = date;
        }
        if let Some(category) = updates.category {
            self.category = category;
        }
        if let Some(recurring) = updates.recurring {
            self.recurring = recurring;
        }
        if let Some(payment_method) = updates.payment_method {
            self.payment_method = Some(payment_method);
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
    }

    /// The ledger starts out empty.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_kind_and_status_strings() {
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
        assert_eq!(
            TransactionStatus::from_str("cancelled").unwrap(),
            TransactionStatus::Cancelled
        );
    }

    #[test]
    fn test_category_suggestions() {
        assert!(category_suggestions(TransactionKind::Income).contains(&"Consultoria"));
        assert!(category_suggestions(TransactionKind::Expense).contains(&"Escritório"));
    }

    #[test]
    fn test_serde_kind_renamed_to_type() {
        let transaction = Transaction::new(NewTransaction {
            kind: TransactionKind::Expense,
            description: "Anúncios".to_string(),
            amount: Amount::from_str("R$ 120,00").unwrap(),
            date: "2024-05-02".to_string(),
            category: "Marketing".to_string(),
            ..Default::default()
        });
        let json = serde_json::to_string(&transaction).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        // An absent payment method is omitted entirely.
        assert!(!json.contains("paymentMethod"));
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut transaction = Transaction::new(NewTransaction {
            description: "Projeto site".to_string(),
            date: "2024-05-02".to_string(),
            ..Default::default()
        });
        Record::apply(
            &mut transaction,
            TransactionUpdates {
                status: Some(TransactionStatus::Pending),
                ..Default::default()
            },
        );
        assert_eq!(transaction.description, "Projeto site");
        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert_eq!(transaction.date, "2024-05-02");
    }
}
