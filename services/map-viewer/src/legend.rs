//! Legend assembly: which layers are offered, grouped by service.

use gs_client::MapLayer;
use gs_common::{LayerInfo, ServiceKind};

/// How a WMS layer is rendered by the mapping library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Tiled,
    SingleImage,
}

impl RenderMode {
    pub fn for_layer(layer: &LayerInfo) -> Self {
        if layer.prefers_single_image() {
            RenderMode::SingleImage
        } else {
            RenderMode::Tiled
        }
    }
}

/// One legend row, pointing back into the map's layer stack.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    /// Index into the layer stack this entry controls.
    pub layer_index: usize,
    pub title: String,
    pub service: ServiceKind,
    pub render_mode: RenderMode,
    pub has_filter_panel: bool,
    pub has_params_panel: bool,
}

/// The legend: WFS section first, then WMS, matching the order layers
/// were added to the map. WMS layers tagged `hide_wms` are left out.
#[derive(Debug, Clone, Default)]
pub struct Legend {
    pub wfs: Vec<LegendEntry>,
    pub wms: Vec<LegendEntry>,
}

impl Legend {
    pub fn build(layers: &[MapLayer]) -> Self {
        let mut legend = Legend::default();

        for (index, layer) in layers.iter().enumerate() {
            let info = &layer.info;
            match info.service {
                ServiceKind::Wfs => legend.wfs.push(LegendEntry {
                    layer_index: index,
                    title: info.title.clone(),
                    service: info.service,
                    render_mode: RenderMode::Tiled,
                    has_filter_panel: info.filterable_attributes().next().is_some(),
                    has_params_panel: !info.view_params.is_empty(),
                }),
                ServiceKind::Wms => {
                    if info.hidden_from_legend() {
                        continue;
                    }
                    legend.wms.push(LegendEntry {
                        layer_index: index,
                        title: info.title.clone(),
                        service: info.service,
                        render_mode: RenderMode::for_layer(info),
                        has_filter_panel: false,
                        has_params_panel: !info.view_params.is_empty(),
                    });
                }
            }
        }

        legend
    }

    pub fn entries(&self) -> impl Iterator<Item = &LegendEntry> {
        self.wfs.iter().chain(self.wms.iter())
    }

    /// Render the legend the way the sidebar shows it.
    pub fn to_display_string(&self, layers: &[MapLayer]) -> String {
        let mut out = String::new();

        for (heading, entries) in [("WFS layers", &self.wfs), ("WMS layers", &self.wms)] {
            out.push_str(heading);
            out.push('\n');
            for entry in entries {
                let marker = if layers[entry.layer_index].visible {
                    "[x]"
                } else {
                    "[ ]"
                };
                out.push_str(&format!("  {} {}", marker, entry.title));
                if entry.render_mode == RenderMode::SingleImage {
                    out.push_str(" (image)");
                }
                if entry.has_params_panel {
                    out.push_str(" [params]");
                }
                if entry.has_filter_panel {
                    out.push_str(" [filters]");
                }
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{raster_layer, roads_layer};

    fn stack() -> Vec<MapLayer> {
        vec![
            MapLayer::new(roads_layer()),
            MapLayer::new(raster_layer("population_density", vec![])),
            MapLayer::new(raster_layer(
                "elevation_base",
                vec!["hide_wms".into(), "layer:image".into()],
            )),
        ]
    }

    #[test]
    fn test_hidden_wms_layer_not_in_legend() {
        let legend = Legend::build(&stack());
        assert_eq!(legend.wfs.len(), 1);
        assert_eq!(legend.wms.len(), 1);
        assert_eq!(legend.wms[0].title, "population_density");
    }

    #[test]
    fn test_entries_point_into_stack() {
        let layers = stack();
        let legend = Legend::build(&layers);
        for entry in legend.entries() {
            assert_eq!(layers[entry.layer_index].info.title, entry.title);
        }
    }

    #[test]
    fn test_render_mode_from_keyword() {
        let image = raster_layer("img", vec!["layer:image".into()]);
        assert_eq!(RenderMode::for_layer(&image), RenderMode::SingleImage);
        let tiled = raster_layer("tiled", vec![]);
        assert_eq!(RenderMode::for_layer(&tiled), RenderMode::Tiled);
    }

    #[test]
    fn test_filter_panel_only_for_vector_layers() {
        let legend = Legend::build(&stack());
        assert!(legend.wfs[0].has_filter_panel);
        assert!(!legend.wms[0].has_filter_panel);
    }
}
