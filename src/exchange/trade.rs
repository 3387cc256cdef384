//! Market table helpers.

use crate::backend::Backend;
use crate::error::StoreError;
use crate::model::Record;
use crate::store::Collection;

use super::models::{TradeAsset, TradeAssetPatch};

impl<'a, B: Backend> Collection<'a, B, TradeAsset> {
    pub fn find_by_slug(&self, slug: &str) -> Option<Record<TradeAsset>> {
        self.find_first(&TradeAssetPatch::default().slug(slug))
    }

    pub fn favorites(&self) -> Vec<Record<TradeAsset>> {
        self.find(&TradeAssetPatch::default().is_favorite(true))
    }

    /// Flip an asset's favorite flag. Returns the updated asset, or `None` if
    /// there is no asset with `id`.
    pub fn toggle_favorite(&self, id: &str) -> Result<Option<Record<TradeAsset>>, StoreError> {
        match self.get(id) {
            Some(asset) => self.update(id, &TradeAssetPatch::default().is_favorite(!asset.is_favorite)),
            None => Ok(None),
        }
    }

    /// Assets ordered by 24h change, biggest gain first.
    pub fn top_movers(&self) -> Vec<Record<TradeAsset>> {
        let mut assets = self.get_all();
        assets.sort_by(|a, b| b.change_24h.total_cmp(&a.change_24h));
        assets
    }
}
