//! Shapes a [`CalculationResult`] into stacked-bar series.

use crate::calculator::CalculationResult;
use crate::rates::Rgb;

/// One stack layer of the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostCategory {
    Compute,
    Storage,
    Network,
}

impl CostCategory {
    /// Bottom-to-top stacking order.
    pub const ALL: [CostCategory; 3] = [Self::Compute, Self::Storage, Self::Network];

    pub fn label(self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Network => "Network",
        }
    }

    /// How strongly the provider colour shows through for this layer.
    pub fn intensity(self) -> f64 {
        match self {
            Self::Compute => 1.0,
            Self::Storage => 0.7,
            Self::Network => 0.4,
        }
    }
}

/// Parallel series aligned by provider, in rate-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub providers: Vec<String>,
    pub compute: Vec<f64>,
    pub storage: Vec<f64>,
    pub network: Vec<f64>,
    pub colors: Vec<Rgb>,
}

impl ChartData {
    pub fn from_result(result: &CalculationResult) -> Self {
        let mut data = Self {
            providers: Vec::with_capacity(result.breakdowns.len()),
            compute: Vec::with_capacity(result.breakdowns.len()),
            storage: Vec::with_capacity(result.breakdowns.len()),
            network: Vec::with_capacity(result.breakdowns.len()),
            colors: Vec::with_capacity(result.breakdowns.len()),
        };
        for b in result.iter() {
            data.providers.push(b.provider_name.clone());
            data.compute.push(b.compute_cost);
            data.storage.push(b.storage_cost);
            data.network.push(b.network_cost);
            data.colors.push(b.display_color);
        }
        data
    }

    pub fn series(&self, category: CostCategory) -> &[f64] {
        match category {
            CostCategory::Compute => &self.compute,
            CostCategory::Storage => &self.storage,
            CostCategory::Network => &self.network,
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Stacked height of the bar at `index`.
    pub fn stack_total(&self, index: usize) -> f64 {
        CostCategory::ALL
            .iter()
            .filter_map(|&c| self.series(c).get(index))
            .sum()
    }

    /// Tallest stack, used to scale the y axis.
    pub fn max_total(&self) -> f64 {
        (0..self.len())
            .map(|i| self.stack_total(i))
            .fold(0.0, f64::max)
    }

    /// Colour for one segment: the provider colour faded toward `background`.
    pub fn segment_color(&self, index: usize, category: CostCategory, background: Rgb) -> Rgb {
        self.colors
            .get(index)
            .copied()
            .unwrap_or(background)
            .shade(category.intensity(), background)
    }
}
