use super::{champion_games, ms_to_min_sec, title_case};
use crate::engine::model::{AnalyzedMatch, ItemEvent, ItemEventKind};
use crate::error::{AnalysisError, AnalysisResult};
use crate::items::{ItemCatalog, ItemInfo};
use serde::Serialize;

const MAX_CORE_ITEMS: usize = 5;
// Slot 6 is the trinket and is left out of build frequency.
const BUILD_SLOTS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildItem {
    pub item_id: i32,
    pub name: String,
    pub image_url: Option<String>,
    pub cost: Option<i64>,
    /// Share of the champion's games that finished with this item.
    pub popularity: f64,
}

impl BuildItem {
    fn new(item: &ItemInfo, popularity: f64) -> Self {
        BuildItem {
            item_id: item.id,
            name: item.name.clone(),
            image_url: item.image_url.clone(),
            cost: item.cost,
            popularity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonBuild {
    pub champion: String,
    pub games_analyzed: usize,
    pub boots: Option<BuildItem>,
    pub core_items: Vec<BuildItem>,
}

/// Most frequent final items for `champion`: the first boots seen plus up to
/// five core items, ordered by frequency (ties by first appearance).
pub fn common_build(
    matches: &[AnalyzedMatch],
    catalog: &ItemCatalog,
    champion: &str,
) -> AnalysisResult<CommonBuild> {
    let games = champion_games(matches, Some(champion));
    if games.is_empty() {
        return Err(AnalysisError::NotFound(format!("Games for champion {}", champion)));
    }

    let mut counts: Vec<(i32, usize)> = Vec::new();
    for item_id in games
        .iter()
        .flat_map(|m| m.stats.items[..BUILD_SLOTS].iter().copied())
        .filter(|id| *id != 0)
    {
        match counts.iter_mut().find(|(id, _)| *id == item_id) {
            Some((_, count)) => *count += 1,
            None => counts.push((item_id, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut build = CommonBuild {
        champion: title_case(champion),
        games_analyzed: games.len(),
        boots: None,
        core_items: Vec::new(),
    };
    for (item_id, count) in counts {
        let Some(item) = catalog.get(item_id) else {
            continue;
        };
        let popularity = count as f64 / games.len() as f64;
        if item.is_boots() {
            if build.boots.is_none() {
                build.boots = Some(BuildItem::new(item, popularity));
            }
        } else if item.is_core_candidate() && build.core_items.len() < MAX_CORE_ITEMS {
            build.core_items.push(BuildItem::new(item, popularity));
        }
    }
    Ok(build)
}

/// Splits `items` into runs of adjacent elements sharing a key. Equal keys
/// separated by a different key form separate runs.
pub fn group_consecutive<T, K, F>(items: Vec<T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        if let Some((last, group)) = groups.last_mut() {
            if *last == k {
                group.push(item);
                continue;
            }
        }
        groups.push((k, vec![item]));
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchasedItem {
    pub item_id: i32,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingTrip {
    pub timestamp: i64,
    pub timestamp_str: String,
    pub items: Vec<PurchasedItem>,
}

fn purchased_ids(events: &[ItemEvent]) -> impl Iterator<Item = (i64, i32)> + '_ {
    events
        .iter()
        .filter(|e| e.kind == ItemEventKind::ItemPurchased)
        .filter_map(|e| Some((e.timestamp, e.item_id?)))
}

/// Chronological purchases grouped into shopping trips.
pub fn build_path(record: &AnalyzedMatch, catalog: &ItemCatalog) -> AnalysisResult<Vec<ShoppingTrip>> {
    let events = &record.timeline.item_events;
    if events.is_empty() {
        return Err(AnalysisError::NoData("No item purchase events found.".to_string()));
    }

    let purchases: Vec<(i64, PurchasedItem)> = purchased_ids(events)
        .filter_map(|(timestamp, item_id)| {
            let item = catalog.get(item_id)?;
            Some((
                timestamp,
                PurchasedItem {
                    item_id,
                    name: item.name.clone(),
                    image_url: item.image_url.clone(),
                },
            ))
        })
        .collect();
    if purchases.is_empty() {
        return Err(AnalysisError::NoData("No valid item purchases found.".to_string()));
    }

    Ok(group_consecutive(purchases, |(timestamp, _)| *timestamp)
        .into_iter()
        .map(|(timestamp, trip)| ShoppingTrip {
            timestamp,
            timestamp_str: ms_to_min_sec(timestamp),
            items: trip.into_iter().map(|(_, item)| item).collect(),
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldSpendReport {
    pub total_gold_spent_on_purchases: i64,
    pub final_build_cost: i64,
    pub final_build_items: Vec<String>,
}

/// Gold spent on every purchase versus the value of the final loadout.
pub fn gold_spend(record: &AnalyzedMatch, catalog: &ItemCatalog) -> GoldSpendReport {
    let total_gold_spent_on_purchases = purchased_ids(&record.timeline.item_events)
        .map(|(_, item_id)| catalog.cost(item_id))
        .sum();
    let final_items = record.stats.items.iter().copied().filter(|id| *id != 0);

    GoldSpendReport {
        total_gold_spent_on_purchases,
        final_build_cost: final_items.clone().map(|id| catalog.cost(id)).sum(),
        final_build_items: final_items
            .filter_map(|id| catalog.name(id).map(str::to_string))
            .collect(),
    }
}
