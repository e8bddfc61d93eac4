//! Click-driven feature identification across stacked layers.
//!
//! One lookup per visible layer runs concurrently; the winner is the
//! first non-empty result in layer stacking order (top layer wins),
//! never response arrival order, so all lookups are collected before
//! selecting.

use futures::future;
use tracing::warn;

use gs_common::{BoundingBox, GsResult, LayerInfo, ServiceKind};
use gs_protocol::request;

use crate::client::GsClient;
use crate::features::{Feature, FeatureCollection};

/// Search tolerance around the click, in pixels.
const CLICK_TOLERANCE_PX: f64 = 5.0;

/// A layer as stacked on the map. A `[MapLayer]` slice is ordered
/// bottom to top, matching the mapping library's layer list.
#[derive(Debug, Clone)]
pub struct MapLayer {
    pub info: LayerInfo,
    pub visible: bool,
}

impl MapLayer {
    pub fn new(info: LayerInfo) -> Self {
        Self {
            info,
            visible: false,
        }
    }
}

/// A single click on the rendered map view.
#[derive(Debug, Clone)]
pub struct ClickQuery {
    /// Click coordinate in the configured projection.
    pub x: f64,
    pub y: f64,
    /// Current view extent.
    pub extent: BoundingBox,
    /// View size in pixels.
    pub width: u32,
    pub height: u32,
}

impl ClickQuery {
    /// Pixel column/row of the click within the view, or `None` when
    /// the coordinate lies outside the canvas.
    ///
    /// Bounds are half-open: a click exactly on the right or bottom
    /// edge of the extent has no pixel under it.
    fn pixel(&self) -> Option<(u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let inside = self.x >= self.extent.min_x
            && self.x < self.extent.max_x
            && self.y > self.extent.min_y
            && self.y <= self.extent.max_y;
        if !inside {
            return None;
        }
        let col = (self.x - self.extent.min_x) / self.extent.width() * f64::from(self.width);
        let row = (self.extent.max_y - self.y) / self.extent.height() * f64::from(self.height);
        Some((col as u32, row as u32))
    }

    /// Map units covered by one pixel at the current view size.
    fn resolution(&self) -> f64 {
        self.extent.width() / f64::from(self.width)
    }

    /// Small extent around the click used for vector-layer lookups.
    fn search_extent(&self) -> BoundingBox {
        BoundingBox::around_point(self.x, self.y, self.resolution() * CLICK_TOLERANCE_PX)
    }
}

/// Visible layers in stacking order, top layer first.
fn visible_top_down(layers: &[MapLayer]) -> Vec<&MapLayer> {
    layers.iter().rev().filter(|l| l.visible).collect()
}

/// Pick the winning lookup result. `results` is ordered top layer
/// first, so the topmost non-empty result wins even when a lower
/// layer also found a feature.
fn first_non_empty(results: Vec<Option<Feature>>) -> Option<Feature> {
    results.into_iter().flatten().next()
}

impl GsClient {
    /// Identify the feature under a click, looking at every visible
    /// layer concurrently. Per-layer failures are logged and treated
    /// as no result for that layer.
    pub async fn identify(&self, layers: &[MapLayer], click: &ClickQuery) -> Option<Feature> {
        let top_down = visible_top_down(layers);
        let lookups = top_down.iter().map(|layer| self.identify_layer(layer, click));

        // All lookups finish before one is chosen; the winner is the
        // topmost non-empty result, not the fastest.
        first_non_empty(future::join_all(lookups).await)
    }

    async fn identify_layer(&self, layer: &MapLayer, click: &ClickQuery) -> Option<Feature> {
        let result = match layer.info.service {
            ServiceKind::Wfs => self.features_at_point(&layer.info, click).await,
            ServiceKind::Wms => self.feature_info_at_click(&layer.info, click).await,
        };

        match result {
            Ok(collection) => collection.into_first(),
            Err(e) => {
                warn!(layer = %layer.info.name, error = %e, "identify lookup failed, skipping layer");
                None
            }
        }
    }

    /// Vector layers: GetFeature over a small extent around the click.
    async fn features_at_point(
        &self,
        layer: &LayerInfo,
        click: &ClickQuery,
    ) -> GsResult<FeatureCollection> {
        self.fetch_features(layer, &click.search_extent(), &[], "")
            .await
    }

    /// Raster layers: WMS GetFeatureInfo at the clicked pixel.
    async fn feature_info_at_click(
        &self,
        layer: &LayerInfo,
        click: &ClickQuery,
    ) -> GsResult<FeatureCollection> {
        let (x, y) = match click.pixel() {
            Some(pixel) => pixel,
            None => return Ok(FeatureCollection::default()),
        };

        let params = request::getfeatureinfo_params(
            &self.config().workspace,
            layer,
            &click.extent,
            &self.config().srs,
            click.width,
            click.height,
            x,
            y,
        );

        let body = self
            .get_text(&self.wms_endpoint(), &params)
            .await
            .map_err(|e| gs_common::GsError::FeatureFetch(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}
