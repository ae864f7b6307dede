//! Localized display strings

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Look up the display string for `key`.
    ///
    /// Unknown keys are returned unchanged so a missing translation shows up
    /// as its key rather than an empty header.
    pub fn t<'a>(self, key: &'a str) -> &'a str {
        let translated = match self {
            Locale::En => english(key),
            Locale::Fr => french(key).or_else(|| english(key)),
        };
        translated.unwrap_or(key)
    }
}

fn english(key: &str) -> Option<&'static str> {
    Some(match key {
        "name" => "Name",
        "table.marketCap" => "Market Cap",
        "table.price" => "Price",
        "tokensets.oneDay" => "24h",
        "tokensets.week" => "7d",
        "tokensets.month" => "30d",
        "tokensets.sixMonth" => "200d",
        "tokensets.year" => "1y",
        "tokensets.portfolios" => "Portfolios",
        "tokensets.rebalancingSets" => "Rebalancing Sets",
        "tokensets.loading" => "Loading",
        "tokensets.empty" => "No token sets to show. Press 'r' to refresh.",
        "tokensets.updated" => "Updated",
        "tokensets.sortedBy" => "Sorted by",
        _ => return None,
    })
}

fn french(key: &str) -> Option<&'static str> {
    Some(match key {
        "name" => "Nom",
        "table.marketCap" => "Capitalisation",
        "table.price" => "Prix",
        "tokensets.oneDay" => "24h",
        "tokensets.week" => "7j",
        "tokensets.month" => "30j",
        "tokensets.sixMonth" => "200j",
        "tokensets.year" => "1a",
        "tokensets.portfolios" => "Portefeuilles",
        "tokensets.rebalancingSets" => "Sets de rééquilibrage",
        "tokensets.loading" => "Chargement",
        "tokensets.empty" => "Aucun token set. Appuyez sur 'r' pour rafraîchir.",
        "tokensets.updated" => "Mis à jour",
        "tokensets.sortedBy" => "Trié par",
        _ => return None,
    })
}
