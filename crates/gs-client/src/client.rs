//! The GeoServer HTTP client and metadata resolver.

use std::time::Duration;

use tracing::{debug, info};

use gs_common::{BoundingBox, GsError, GsResult, LayerInfo, ServiceKind};
use gs_protocol::cql::{self, Filter};
use gs_protocol::request;
use gs_protocol::viewparams::parse_view_params;

use crate::capabilities::{
    parse_feature_type_schema, parse_wfs_capabilities, parse_wms_capabilities,
};
use crate::features::FeatureCollection;

/// Connection settings for one GeoServer workspace.
#[derive(Debug, Clone)]
pub struct GsConfig {
    /// Server base URI, e.g. `http://localhost:8080/geoserver`.
    pub base_uri: String,
    /// Workspace name; all requests go through the workspace-scoped
    /// `wms`/`wfs` endpoints.
    pub workspace: String,
    /// Projection used for extents and feature queries.
    pub srs: String,
    /// HTTP request timeout.
    pub request_timeout: Duration,
}

impl GsConfig {
    pub fn new(base_uri: impl Into<String>, workspace: impl Into<String>) -> Self {
        let mut base_uri = base_uri.into();
        while base_uri.ends_with('/') {
            base_uri.pop();
        }
        Self {
            base_uri,
            workspace: workspace.into(),
            srs: "EPSG:3857".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Async client for a single GeoServer workspace.
pub struct GsClient {
    http: reqwest::Client,
    config: GsConfig,
}

impl GsClient {
    pub fn new(config: GsConfig) -> GsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GsError::Internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GsConfig {
        &self.config
    }

    pub(crate) fn wms_endpoint(&self) -> String {
        format!("{}/{}/wms", self.config.base_uri, self.config.workspace)
    }

    pub(crate) fn wfs_endpoint(&self) -> String {
        format!("{}/{}/wfs", self.config.base_uri, self.config.workspace)
    }

    pub(crate) async fn get_text(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String, reqwest::Error> {
        debug!(url, "GET");
        self.http
            .get(url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    /// Resolve all vector layers: WFS GetCapabilities, then one
    /// DescribeFeatureType round trip per advertised feature type.
    pub async fn fetch_wfs_layers(&self) -> GsResult<Vec<LayerInfo>> {
        let endpoint = self.wfs_endpoint();
        let xml = self
            .get_text(&endpoint, &request::wfs_capabilities_params())
            .await
            .map_err(|e| GsError::CapabilitiesFetch(e.to_string()))?;

        let entries = parse_wfs_capabilities(&xml)?;
        let mut layers = Vec::with_capacity(entries.len());

        for entry in entries {
            let schema = self
                .get_text(&endpoint, &request::describe_feature_type_params(&entry.name))
                .await
                .map_err(|e| GsError::DescribeFeatureType {
                    type_name: entry.name.clone(),
                    message: e.to_string(),
                })?;
            let attributes = parse_feature_type_schema(&schema)?;

            layers.push(LayerInfo {
                view_params: parse_view_params(&entry.keywords),
                name: entry.name,
                title: entry.title,
                service: ServiceKind::Wfs,
                keywords: entry.keywords,
                attributes,
            });
        }

        info!(count = layers.len(), "resolved WFS layers");
        Ok(layers)
    }

    /// Resolve all raster layers from WMS GetCapabilities. Raster
    /// layers carry no attribute schema.
    pub async fn fetch_wms_layers(&self) -> GsResult<Vec<LayerInfo>> {
        let xml = self
            .get_text(&self.wms_endpoint(), &request::wms_capabilities_params())
            .await
            .map_err(|e| GsError::CapabilitiesFetch(e.to_string()))?;

        let layers: Vec<LayerInfo> = parse_wms_capabilities(&xml)?
            .into_iter()
            .map(|entry| LayerInfo {
                view_params: parse_view_params(&entry.keywords),
                name: entry.name,
                title: entry.title,
                service: ServiceKind::Wms,
                keywords: entry.keywords,
                attributes: vec![],
            })
            .collect();

        info!(count = layers.len(), "resolved WMS layers");
        Ok(layers)
    }

    /// Fetch the features of a vector layer visible in `extent`,
    /// narrowed by the active filters when the layer supports them.
    pub async fn fetch_features(
        &self,
        layer: &LayerInfo,
        extent: &BoundingBox,
        filters: &[Filter],
        view_params: &str,
    ) -> GsResult<FeatureCollection> {
        let expression = cql::spatial_query(layer, filters, extent)
            .map_err(|e| GsError::InvalidFilter(e.to_string()))?;

        let params = request::getfeature_params(
            layer,
            extent,
            &self.config.srs,
            expression.as_deref(),
            view_params,
        );

        let body = self
            .get_text(&self.wfs_endpoint(), &params)
            .await
            .map_err(|e| GsError::FeatureFetch(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}
