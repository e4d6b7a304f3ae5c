//! Per-category visibility flags

use serde::{Deserialize, Serialize};

/// Glyph family that can be shown or hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewCategory {
    Nodes,
    NodesLabel,
    NodalLoads,
    Bars,
    BarPointLoads,
    BarDistributedLoads,
    BarLocalAxes,
    BarReleases,
    BarLabel,
    Supports,
}

impl ViewCategory {
    pub const ALL: [ViewCategory; 10] = [
        ViewCategory::Nodes,
        ViewCategory::NodesLabel,
        ViewCategory::NodalLoads,
        ViewCategory::Bars,
        ViewCategory::BarPointLoads,
        ViewCategory::BarDistributedLoads,
        ViewCategory::BarLocalAxes,
        ViewCategory::BarReleases,
        ViewCategory::BarLabel,
        ViewCategory::Supports,
    ];
}

/// One visibility flag per glyph family; everything is visible by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewFlags {
    pub nodes: bool,
    pub nodes_label: bool,
    pub nodal_loads: bool,
    pub bars: bool,
    pub bar_point_loads: bool,
    pub bar_distributed_loads: bool,
    pub bar_local_axes: bool,
    pub bar_releases: bool,
    pub bar_label: bool,
    pub supports: bool,
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            nodes: true,
            nodes_label: true,
            nodal_loads: true,
            bars: true,
            bar_point_loads: true,
            bar_distributed_loads: true,
            bar_local_axes: true,
            bar_releases: true,
            bar_label: true,
            supports: true,
        }
    }
}

impl ViewFlags {
    fn slot(&mut self, category: ViewCategory) -> &mut bool {
        match category {
            ViewCategory::Nodes => &mut self.nodes,
            ViewCategory::NodesLabel => &mut self.nodes_label,
            ViewCategory::NodalLoads => &mut self.nodal_loads,
            ViewCategory::Bars => &mut self.bars,
            ViewCategory::BarPointLoads => &mut self.bar_point_loads,
            ViewCategory::BarDistributedLoads => &mut self.bar_distributed_loads,
            ViewCategory::BarLocalAxes => &mut self.bar_local_axes,
            ViewCategory::BarReleases => &mut self.bar_releases,
            ViewCategory::BarLabel => &mut self.bar_label,
            ViewCategory::Supports => &mut self.supports,
        }
    }

    pub fn is_visible(&self, category: ViewCategory) -> bool {
        let mut copy = *self;
        *copy.slot(category)
    }

    pub fn set(&mut self, category: ViewCategory, visible: bool) {
        *self.slot(category) = visible;
    }

    /// Flip one flag and return its new value
    pub fn toggle(&mut self, category: ViewCategory) -> bool {
        let slot = self.slot(category);
        *slot = !*slot;
        *slot
    }

    /// Everything hidden
    pub fn none() -> Self {
        let mut flags = Self::default();
        for c in ViewCategory::ALL {
            flags.set(c, false);
        }
        flags
    }
}
