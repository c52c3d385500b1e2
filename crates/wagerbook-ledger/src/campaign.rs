//! Bonus campaign catalog
//!
//! Campaigns are the operator-side definitions that bonus grants come from.
//! The catalog stores them as authored; it does not validate amounts, dates,
//! or multipliers. Its only job towards the ledger is turning a campaign into
//! a [`BonusGrant`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use wagerbook_types::{
    Amount, BonusAccount, BonusGrant, BonusKind, CampaignId, GrantAmount, IdSequence, Result,
    WagerbookError, ALL_SCOPE,
};

use crate::wallet::WalletLedger;

/// A campaign definition as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub kind: BonusKind,
    pub amount: GrantAmount,
    pub wager_multiplier: Decimal,
    pub expiry_hours: u32,
    pub scope: BTreeSet<String>,
    pub max_grant: Option<Amount>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub enabled: bool,
}

impl Campaign {
    /// Enabled and within its date window, both ends inclusive
    pub fn is_running(&self, date: NaiveDate) -> bool {
        self.enabled && self.start_date <= date && date <= self.end_date
    }

    /// The grant configuration this campaign hands to a ledger
    pub fn to_grant(&self) -> BonusGrant {
        let mut grant = match self.amount {
            GrantAmount::Fixed(amount) => BonusGrant::fixed(self.kind.clone(), amount),
            GrantAmount::Percent(percent) => BonusGrant::percent(self.kind.clone(), percent),
        }
        .with_label(self.name.clone())
        .with_wager_multiplier(self.wager_multiplier)
        .with_expiry_hours(self.expiry_hours)
        .with_scope(self.scope.iter().cloned());
        grant.max_grant = self.max_grant;
        grant
    }
}

/// Campaign fields supplied by an operator; the catalog assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub kind: BonusKind,
    pub amount: GrantAmount,
    pub wager_multiplier: Decimal,
    pub expiry_hours: u32,
    pub scope: BTreeSet<String>,
    pub max_grant: Option<Amount>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CampaignDraft {
    fn into_campaign(self, id: CampaignId, enabled: bool) -> Campaign {
        Campaign {
            id,
            name: self.name,
            kind: self.kind,
            amount: self.amount,
            wager_multiplier: self.wager_multiplier,
            expiry_hours: self.expiry_hours,
            scope: self.scope,
            max_grant: self.max_grant,
            start_date: self.start_date,
            end_date: self.end_date,
            enabled,
        }
    }
}

/// Ordered collection of campaign definitions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignCatalog {
    campaigns: Vec<Campaign>,
    ids: IdSequence,
}

impl CampaignCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the four stock campaigns
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (draft, enabled) in stock_campaigns() {
            let id = catalog.add(draft);
            if !enabled {
                catalog.toggle(id).ok();
            }
        }
        catalog
    }

    /// Store a new campaign, enabled, and return its id
    pub fn add(&mut self, draft: CampaignDraft) -> CampaignId {
        let id: CampaignId = self.ids.next_id();
        self.campaigns.push(draft.into_campaign(id, true));
        info!(campaign = %id, "Campaign added");
        id
    }

    /// Replace a campaign's fields, keeping its id and enabled flag
    pub fn update(&mut self, id: CampaignId, draft: CampaignDraft) -> Result<&Campaign> {
        let campaign = self.get_mut(id)?;
        *campaign = draft.into_campaign(id, campaign.enabled);
        Ok(&*campaign)
    }

    /// Flip the enabled flag and return the new value
    pub fn toggle(&mut self, id: CampaignId) -> Result<bool> {
        let campaign = self.get_mut(id)?;
        campaign.enabled = !campaign.enabled;
        Ok(campaign.enabled)
    }

    pub fn remove(&mut self, id: CampaignId) -> Option<Campaign> {
        let idx = self.campaigns.iter().position(|c| c.id == id)?;
        Some(self.campaigns.remove(idx))
    }

    pub fn get(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn list(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Campaigns running on the given date
    pub fn running(&self, date: NaiveDate) -> impl Iterator<Item = &Campaign> {
        self.campaigns.iter().filter(move |c| c.is_running(date))
    }

    pub fn is_running(&self, id: CampaignId, date: NaiveDate) -> bool {
        self.get(id).is_some_and(|c| c.is_running(date))
    }

    /// Grant a campaign's bonus into a ledger.
    ///
    /// The enabled flag and date window are not consulted; operators may
    /// hand out any stored campaign.
    pub fn grant_to(&self, id: CampaignId, ledger: &mut WalletLedger) -> Result<BonusAccount> {
        let campaign = self.get(id).ok_or_else(|| not_found(id))?;
        Ok(ledger.grant_bonus(&campaign.to_grant()))
    }

    fn get_mut(&mut self, id: CampaignId) -> Result<&mut Campaign> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: CampaignId) -> WagerbookError {
    WagerbookError::CampaignNotFound {
        campaign_id: id.to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn scope(categories: &[&str]) -> BTreeSet<String> {
    categories.iter().map(|c| c.to_string()).collect()
}

fn stock_campaigns() -> Vec<(CampaignDraft, bool)> {
    vec![
        (
            CampaignDraft {
                name: "Sign-up bonus".to_string(),
                kind: BonusKind::Register,
                amount: GrantAmount::Fixed(Amount::major(200)),
                wager_multiplier: Decimal::from(15),
                expiry_hours: 72,
                scope: scope(&[ALL_SCOPE]),
                max_grant: Some(Amount::major(200)),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
            },
            true,
        ),
        (
            CampaignDraft {
                name: "Deposit boost 50%".to_string(),
                kind: BonusKind::Deposit,
                amount: GrantAmount::Percent(Decimal::from(50)),
                wager_multiplier: Decimal::from(20),
                expiry_hours: 120,
                scope: scope(&["FISHING", "SLOT"]),
                max_grant: Some(Amount::major(1000)),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 6, 30),
            },
            true,
        ),
        (
            CampaignDraft {
                name: "Daily check-in reward".to_string(),
                kind: BonusKind::DailyCheck,
                amount: GrantAmount::Fixed(Amount::major(50)),
                wager_multiplier: Decimal::from(10),
                expiry_hours: 24,
                scope: scope(&[ALL_SCOPE]),
                max_grant: Some(Amount::major(50)),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
            },
            true,
        ),
        (
            CampaignDraft {
                name: "VIP rebate".to_string(),
                kind: BonusKind::VipRebate,
                amount: GrantAmount::Percent(Decimal::from(10)),
                wager_multiplier: Decimal::from(5),
                expiry_hours: 168,
                scope: scope(&[ALL_SCOPE]),
                max_grant: Some(Amount::major(5000)),
                start_date: date(2025, 3, 1),
                end_date: date(2025, 12, 31),
            },
            false,
        ),
    ]
}
