//! The `Client` type and the fixed sequence of sales-pipeline stages.

use crate::model::{today, Amount};
use serde::{Deserialize, Serialize};

/// A stage of the sales pipeline, in board order. Stage identifiers are
/// stable strings; the Portuguese display names are presentation only.
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
pub enum Stage {
    #[default]
    Lead,
    Contact,
    Proposal,
    Negotiation,
    Closed,
}

serde_plain::derive_display_from_serialize!(Stage);
serde_plain::derive_fromstr_from_deserialize!(Stage);

impl Stage {
    /// All stages in board order.
    pub const ALL: [Stage; 5] = [
        Stage::Lead,
        Stage::Contact,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Closed,
    ];

    /// The stage every new client is created in.
    pub fn first() -> Stage {
        Stage::Lead
    }

    /// The name shown on the board column for this stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Lead => "Leads",
            Stage::Contact => "Em Contato",
            Stage::Proposal => "Proposta",
            Stage::Negotiation => "Negociação",
            Stage::Closed => "Fechado",
        }
    }
}

/// A client (or lead) tracked on the sales pipeline.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) company: String,
    pub(crate) stage: Stage,
    /// Free-text label shown on the client card, e.g. "Novo".
    pub(crate) status: String,
    /// Estimated deal value.
    pub(crate) value: Amount,
    /// Date of the last contact, `YYYY-MM-DD`.
    pub(crate) last_contact: String,
}

impl Client {
    /// Builds a client from the creation-form fields. New clients always
    /// start in the first stage with a fresh last-contact date.
    pub fn new(fields: NewClient) -> Self {
        Self {
            id: 0,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            company: fields.company,
            stage: Stage::first(),
            status: "Novo".to_string(),
            value: fields.value,
            last_contact: today(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn value(&self) -> Amount {
        self.value
    }

    /// Merges the present fields of `updates` onto this client. The id and
    /// the stage are never touched here: stage changes go through the
    /// pipeline's move operation.
    pub(crate) fn apply(&mut self, updates: ClientUpdates) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(email) = updates.email {
            self.email = email;
        }
        if let Some(phone) = updates.phone {
            self.phone = phone;
        }
        if let Some(company) = updates.company {
            self.company = company;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
        if let Some(value) = updates.value {
            self.value = value;
        }
        if let Some(last_contact) = updates.last_contact {
            self.last_contact = last_contact;
        }
    }
}

/// Fields of the new-client form.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub value: Amount,
}

/// A field-merge patch for a client. `None` fields are left unchanged.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ClientUpdates {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub value: Option<Amount>,
    pub last_contact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_stage_strings() {
        assert_eq!(Stage::Negotiation.to_string(), "negotiation");
        assert_eq!(Stage::from_str("lead").unwrap(), Stage::Lead);
        assert_eq!(Stage::Contact.display_name(), "Em Contato");
    }

    #[test]
    fn test_new_client_starts_in_first_stage() {
        let client = Client::new(NewClient {
            name: "Maria Souza".to_string(),
            email: "maria@email.com".to_string(),
            phone: "(21) 98888-7777".to_string(),
            company: "Souza Design".to_string(),
            value: Amount::from_str("R$ 3.000,00").unwrap(),
        });
        assert_eq!(client.stage, Stage::Lead);
        assert_eq!(client.status, "Novo");
        assert!(!client.last_contact.is_empty());
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut client = Client::new(NewClient {
            name: "Maria Souza".to_string(),
            email: "maria@email.com".to_string(),
            ..Default::default()
        });
        client.apply(ClientUpdates {
            company: Some("Souza Digital".to_string()),
            ..Default::default()
        });
        assert_eq!(client.name, "Maria Souza");
        assert_eq!(client.email, "maria@email.com");
        assert_eq!(client.company, "Souza Digital");
    }

    #[test]
    fn test_serde_field_names() {
        let client = Client::new(NewClient::default());
        let json = serde_json::to_string(&client).unwrap();
        assert!(json.contains("\"lastContact\""));
        assert!(json.contains("\"stage\":\"lead\""));
    }
}
