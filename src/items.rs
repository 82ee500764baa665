use crate::api::models::DataDragonItems;
use crate::error::AppError;
use crate::store::{load_records, save_records};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DDRAGON_CDN: &str = "https://ddragon.leagueoflegends.com/cdn";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub plaintext: String,
}

impl ItemInfo {
    pub fn is_boots(&self) -> bool {
        self.name.contains("Boots")
    }

    /// Consumables and wards never count towards a core build.
    pub fn is_core_candidate(&self) -> bool {
        !self.is_boots() && !self.name.contains("Potion") && !self.name.contains("Ward")
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<i32, ItemInfo>,
}

impl ItemCatalog {
    pub fn new(items: Vec<ItemInfo>) -> Self {
        ItemCatalog {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn load(path: &Path) -> Self {
        Self::new(load_records(path))
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let mut items: Vec<&ItemInfo> = self.items.values().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        save_records(path, &items)
    }

    /// Items without a total cost (trinkets, tutorial items) are skipped.
    pub fn from_data_dragon(raw: &DataDragonItems) -> Self {
        let items = raw
            .data
            .iter()
            .filter_map(|(id, item)| {
                let id = id.parse::<i32>().ok()?;
                let cost = item.gold.as_ref()?.total?;
                Some(ItemInfo {
                    id,
                    name: item.name.clone(),
                    cost: Some(cost),
                    image_url: item.image.as_ref().map(|image| {
                        format!("{}/{}/img/item/{}", DDRAGON_CDN, raw.version, image.full)
                    }),
                    plaintext: item.plaintext.clone(),
                })
            })
            .collect();
        Self::new(items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, item_id: i32) -> Option<&ItemInfo> {
        self.items.get(&item_id)
    }

    pub fn cost(&self, item_id: i32) -> i64 {
        self.get(item_id).and_then(|item| item.cost).unwrap_or(0)
    }

    pub fn name(&self, item_id: i32) -> Option<&str> {
        self.get(item_id).map(|item| item.name.as_str())
    }
}
