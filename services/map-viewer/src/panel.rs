//! Filter and view-parameter panel state.
//!
//! Terminal counterpart of the browser panels: each panel owns its
//! own rows/values, produces the data the query builders consume, and
//! notifies registered listeners when the user asks for a refresh.

use gs_common::{Attribute, LayerInfo, Operator};
use gs_protocol::{encode_params, Filter};

/// Callback invoked when a panel wants its layer re-queried.
pub type RefreshListener = Box<dyn Fn() + Send + Sync>;

/// One editable filter row: attribute, operator, value.
#[derive(Debug, Clone)]
pub struct FilterRow {
    pub attribute: Attribute,
    pub operator: Operator,
    pub value: String,
}

impl FilterRow {
    /// A fresh row defaults to the attribute's first legal operator
    /// and an empty value.
    pub fn new(attribute: Attribute) -> Option<Self> {
        let operator = *attribute.data_type.possible_operators().first()?;
        Some(Self {
            attribute,
            operator,
            value: String::new(),
        })
    }

    /// Switch the operator; rejected when the operator is not legal
    /// for the row's attribute type.
    pub fn set_operator(&mut self, operator: Operator) -> bool {
        if self
            .attribute
            .data_type
            .possible_operators()
            .contains(&operator)
        {
            self.operator = operator;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.value.clear();
    }
}

/// Filter rows for one vector layer.
pub struct FilterPanel {
    layer: LayerInfo,
    rows: Vec<FilterRow>,
    refresh_listeners: Vec<RefreshListener>,
}

impl FilterPanel {
    /// Panels start with a single empty row on the first attribute
    /// that generates a filter row.
    pub fn new(layer: LayerInfo) -> Self {
        let mut panel = Self {
            layer,
            rows: Vec::new(),
            refresh_listeners: Vec::new(),
        };
        panel.add_row();
        panel
    }

    pub fn layer(&self) -> &LayerInfo {
        &self.layer
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    /// Append an empty row for the layer's first filterable attribute.
    pub fn add_row(&mut self) -> Option<usize> {
        let attribute = self.layer.filterable_attributes().next()?.clone();
        self.rows.push(FilterRow::new(attribute)?);
        Some(self.rows.len() - 1)
    }

    /// Set a complete row in one call, validating attribute and
    /// operator against the layer metadata.
    pub fn set_row(
        &mut self,
        index: usize,
        attribute_name: &str,
        operator: Operator,
        value: impl Into<String>,
    ) -> Result<(), String> {
        let attribute = self
            .layer
            .filterable_attributes()
            .find(|a| a.name == attribute_name)
            .cloned()
            .ok_or_else(|| format!("no filterable attribute '{}'", attribute_name))?;

        let mut row = FilterRow::new(attribute)
            .ok_or_else(|| format!("attribute '{}' accepts no operators", attribute_name))?;
        if !row.set_operator(operator) {
            return Err(format!(
                "operator {} not valid for attribute '{}'",
                operator, attribute_name
            ));
        }
        row.value = value.into();

        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| format!("no filter row {}", index))?;
        *slot = row;
        Ok(())
    }

    /// Removing the last remaining row just clears it, so the panel
    /// always shows at least one row.
    pub fn remove_row(&mut self, index: usize) {
        if self.rows.len() == 1 {
            self.rows[0].reset();
            return;
        }
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    /// Rows with a value set, as filter triples. Empty-valued rows are
    /// treated as "not set" and never reach the expression builder.
    pub fn active_filters(&self) -> Vec<Filter> {
        self.rows
            .iter()
            .filter(|row| !row.value.is_empty())
            .map(|row| Filter::new(row.attribute.clone(), row.operator, row.value.clone()))
            .collect()
    }

    pub fn on_refresh(&mut self, listener: RefreshListener) {
        self.refresh_listeners.push(listener);
    }

    /// Equivalent of pressing Enter in a filter input: tell the layer
    /// to re-query with the current rows.
    pub fn request_refresh(&self) {
        for listener in &self.refresh_listeners {
            listener();
        }
    }
}

/// View-parameter values for one layer, in declaration order.
pub struct ParamsPanel {
    values: Vec<(String, String)>,
}

impl ParamsPanel {
    /// One empty value slot per declared view parameter.
    pub fn new(layer: &LayerInfo) -> Self {
        Self {
            values: layer
                .view_params
                .iter()
                .map(|p| (p.name.clone(), String::new()))
                .collect(),
        }
    }

    /// Set a parameter value; false when the layer declares no such
    /// parameter.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => {
                slot.1 = value.into();
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> &[(String, String)] {
        &self.values
    }

    /// The encoded `VIEWPARAMS` value; empty when nothing is set.
    pub fn param_string(&self) -> String {
        encode_params(self.values.iter().map(|(n, v)| (n.as_str(), v.as_str())))
    }
}

/// Build a params panel only for layers that declare parameters,
/// mirroring how the legend decides whether to show one.
pub fn params_panel_for(layer: &LayerInfo) -> Option<ParamsPanel> {
    if layer.view_params.is_empty() {
        None
    } else {
        Some(ParamsPanel::new(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use test_utils::roads_layer;

    #[test]
    fn test_panel_starts_with_one_row() {
        let panel = FilterPanel::new(roads_layer());
        assert_eq!(panel.rows().len(), 1);
        assert_eq!(panel.rows()[0].attribute.name, "name");
        assert_eq!(panel.rows()[0].operator, Operator::Equal);
    }

    #[test]
    fn test_empty_rows_are_not_active() {
        let panel = FilterPanel::new(roads_layer());
        assert!(panel.active_filters().is_empty());
    }

    #[test]
    fn test_set_row_and_active_filters() {
        let mut panel = FilterPanel::new(roads_layer());
        panel
            .set_row(0, "name", Operator::Like, "Main")
            .unwrap();
        let filters = panel.active_filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].value, "Main");
    }

    #[test]
    fn test_set_operator_validates_against_type() {
        let mut row =
            FilterRow::new(Attribute::new("lanes", gs_common::DataType::Integer)).unwrap();
        assert!(row.set_operator(Operator::LessThan));
        assert!(!row.set_operator(Operator::Like));
        // A rejected switch leaves the row on its previous operator.
        assert_eq!(row.operator, Operator::LessThan);
    }

    #[test]
    fn test_set_row_rejects_illegal_operator() {
        let mut panel = FilterPanel::new(roads_layer());
        assert!(panel.set_row(0, "lanes", Operator::Like, "2").is_err());
        assert!(panel.set_row(0, "way", Operator::Equal, "x").is_err());
    }

    #[test]
    fn test_remove_last_row_resets_instead() {
        let mut panel = FilterPanel::new(roads_layer());
        panel.set_row(0, "name", Operator::Equal, "Main St").unwrap();
        panel.remove_row(0);
        assert_eq!(panel.rows().len(), 1);
        assert!(panel.rows()[0].value.is_empty());
    }

    #[test]
    fn test_refresh_notifies_listeners() {
        let mut panel = FilterPanel::new(roads_layer());
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        panel.on_refresh(Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }));
        panel.request_refresh();
        panel.request_refresh();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_params_panel_declaration_order() {
        let mut layer = roads_layer();
        layer.view_params = vec![
            gs_common::ViewParam {
                name: "year".into(),
                data_type: gs_common::ParamDataType::Integer,
            },
            gs_common::ViewParam {
                name: "region".into(),
                data_type: gs_common::ParamDataType::String,
            },
        ];
        let mut panel = ParamsPanel::new(&layer);
        assert!(panel.set_value("region", "west"));
        assert!(panel.set_value("year", "2023"));
        assert!(!panel.set_value("missing", "x"));

        // Values stay in declaration order regardless of set order.
        assert_eq!(panel.values()[0], ("year".to_string(), "2023".to_string()));
        assert_eq!(panel.values()[1], ("region".to_string(), "west".to_string()));
        assert_eq!(panel.param_string(), "year:2023;region:west");
    }

    #[test]
    fn test_params_panel_only_when_declared() {
        assert!(params_panel_for(&roads_layer()).is_none());
    }
}
