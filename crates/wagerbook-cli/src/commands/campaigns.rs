//! Campaign catalog listing and one-off grants

use std::sync::Arc;

use chrono::Utc;
use colored::*;
use wagerbook_ledger::{Campaign, CampaignCatalog, InMemorySink, SystemClock};
use wagerbook_types::{CampaignId, GrantAmount, WagerbookError};

use super::build_ledger;
use crate::config::WagerbookConfig;
use crate::display;

fn describe_amount(campaign: &Campaign) -> String {
    match campaign.amount {
        GrantAmount::Fixed(amount) => amount.to_string(),
        GrantAmount::Percent(percent) => match campaign.max_grant {
            Some(cap) => format!("{}% (max {})", percent.normalize(), cap),
            None => format!("{}%", percent.normalize()),
        },
    }
}

fn print_campaign(campaign: &Campaign, running: bool) {
    let state = if running {
        "RUNNING".bright_green()
    } else if campaign.enabled {
        "SCHEDULED".yellow()
    } else {
        "DISABLED".bright_black()
    };
    println!(
        "  {} {} [{}]",
        campaign.id.to_string().bright_white().bold(),
        campaign.name,
        state
    );
    display::kv("kind", &campaign.kind.to_string());
    display::kv("amount", &describe_amount(campaign));
    display::kv(
        "wagering",
        &format!("x{}, {}h", campaign.wager_multiplier.normalize(), campaign.expiry_hours),
    );
    let scope: Vec<&str> = campaign.scope.iter().map(String::as_str).collect();
    display::kv("scope", &scope.join(", "));
    display::kv(
        "window",
        &format!("{} to {}", campaign.start_date, campaign.end_date),
    );
}

pub fn run(config: &WagerbookConfig, grant: Option<String>) -> anyhow::Result<()> {
    let catalog = CampaignCatalog::with_defaults();
    let today = Utc::now().date_naive();

    display::section("Campaigns");
    for campaign in catalog.list() {
        print_campaign(campaign, campaign.is_running(today));
    }

    let Some(raw) = grant else {
        return Ok(());
    };
    let id = CampaignId::parse(&raw).ok_or_else(|| WagerbookError::CampaignNotFound {
        campaign_id: raw.clone(),
    })?;

    let sink = Arc::new(InMemorySink::new());
    let mut ledger = build_ledger(config, Arc::new(SystemClock), sink.clone());
    let bonus = catalog.grant_to(id, &mut ledger)?;

    display::section(&format!("Granted {}", id));
    for n in sink.drain() {
        display::notification(&n);
    }
    display::bonus(&ledger, &bonus);
    display::balances(&ledger);
    Ok(())
}
