//! The `Campaign` type for marketing-traffic tracking.

use crate::collection::Record;
use crate::model::{today, Amount};
use crate::store::CAMPAIGNS_KEY;
use serde::{Deserialize, Serialize};

/// A paid-traffic campaign and its performance metrics.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) platform: String,
    pub(crate) budget: Amount,
    pub(crate) spent: Amount,
    pub(crate) roi: f64,
    pub(crate) clicks: u64,
    pub(crate) conversions: u64,
    /// Calendar dates, `YYYY-MM-DD`.
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    pub(crate) status: String,
}

impl Campaign {
    /// Builds a campaign from the creation-form fields. Metrics start at
    /// zero and the status starts as "Ativo".
    pub fn new(fields: NewCampaign) -> Self {
        Self {
            id: 0,
            name: fields.name,
            platform: fields.platform,
            budget: fields.budget,
            spent: Amount::default(),
            roi: 0.0,
            clicks: 0,
            conversions: 0,
            start_date: fields.start_date,
            end_date: fields.end_date,
            status: "Ativo".to_string(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Fields of the new-campaign form.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    pub platform: String,
    pub budget: Amount,
    pub start_date: String,
    pub end_date: String,
}

/// A field-merge patch for a campaign. `None` fields are left unchanged.
/// Metrics are included so results can be recorded as a campaign runs.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CampaignUpdates {
    pub name: Option<String>,
    pub platform: Option<String>,
    pub budget: Option<Amount>,
    pub spent: Option<Amount>,
    pub roi: Option<f64>,
    pub clicks: Option<u64>,
    pub conversions: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl Record for Campaign {
    const STORE_KEY: &'static str = CAMPAIGNS_KEY;
    type Updates = CampaignUpdates;

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn apply(&mut self, updates: CampaignUpdates) {
        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(platform) = updates.platform {
            self.platform = platform;
        }
        if let Some(budget) = updates.budget {
            self.budget = budget;
        }
        if let Some(spent) = updates.spent {
            self.spent = spent;
        }
        if let Some(roi) = updates.roi {
            self.roi = roi;
        }
        if let Some(clicks) = updates.clicks {
            self.clicks = clicks;
        }
        if let Some(conversions) = updates.conversions {
            self.conversions = conversions;
        }
        if let Some(start_date) = updates.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = updates.end_date {
            self.end_date = end_date;
        }
        if let Some(status) = updates.status {
            self.status = status;
        }
    }

    /// A single blank placeholder running today.
    fn seed() -> Vec<Self> {
        vec![Campaign {
            id: 1,
            name: String::new(),
            platform: String::new(),
            budget: Amount::default(),
            spent: Amount::default(),
            roi: 0.0,
            clicks: 0,
            conversions: 0,
            start_date: today(),
            end_date: today(),
            status: "Ativo".to_string(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_new_campaign_zeroes_metrics() {
        let campaign = Campaign::new(NewCampaign {
            name: "Lançamento Q3".to_string(),
            platform: "Google Ads".to_string(),
            budget: Amount::from_str("R$ 2.500,00").unwrap(),
            start_date: "2024-07-01".to_string(),
            end_date: "2024-09-30".to_string(),
        });
        assert!(campaign.spent.is_zero());
        assert_eq!(campaign.roi, 0.0);
        assert_eq!(campaign.clicks, 0);
        assert_eq!(campaign.conversions, 0);
        assert_eq!(campaign.status, "Ativo");
    }

    #[test]
    fn test_serde_field_names() {
        let campaign = Campaign::new(NewCampaign::default());
        let json = serde_json::to_string(&campaign).unwrap();
        assert!(json.contains("\"startDate\""));
        assert!(json.contains("\"endDate\""));
        let back: Campaign = serde_json::from_str(&json).unwrap();
        assert_eq!(back, campaign);
    }

    #[test]
    fn test_apply_records_metrics() {
        let mut campaign = Campaign::new(NewCampaign::default());
        Record::apply(
            &mut campaign,
            CampaignUpdates {
                spent: Some(Amount::from_str("R$ 310,00").unwrap()),
                clicks: Some(1280),
                conversions: Some(31),
                ..Default::default()
            },
        );
        assert_eq!(campaign.clicks, 1280);
        assert_eq!(campaign.conversions, 31);
        assert_eq!(campaign.spent.to_string(), "R$ 310,00");
    }
}
