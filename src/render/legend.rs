//! Legend derived from emitted markers.

use crate::metadata::Color;
use crate::render::model::Marker;
use serde::Serialize;
use std::collections::HashSet;

/// One legend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: Color,
    /// Position of the owning marker in the marker list
    pub marker: usize,
}

/// Legend of a render model, titled with the coloring column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Derives the legend from the final marker list.
    ///
    /// One entry per distinct category, owned by the first marker carrying
    /// it. Markers without a category contribute nothing.
    ///
    /// # Example
    /// ```
    /// use cladeview::layout::Point;
    /// use cladeview::metadata::Color;
    /// use cladeview::render::{Legend, Marker};
    ///
    /// let marker = |category: &str| Marker {
    ///     vertex: 0,
    ///     position: Point::new(0.0, 0.0),
    ///     label: String::new(),
    ///     tooltip: String::new(),
    ///     category: Some(category.to_string()),
    ///     color: Color::named("blue"),
    ///     show_legend: false,
    /// };
    /// let legend = Legend::from_markers("clade", &[marker("x"), marker("y"), marker("x")]);
    /// let owners: Vec<_> = legend.entries.iter().map(|e| e.marker).collect();
    /// assert_eq!(owners, [0, 1]);
    /// ```
    pub fn from_markers(title: &str, markers: &[Marker]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let entries = markers
            .iter()
            .enumerate()
            .filter_map(|(i, marker)| {
                let category = marker.category.as_deref()?;
                seen.insert(category).then(|| LegendEntry {
                    category: category.to_string(),
                    color: marker.color.clone(),
                    marker: i,
                })
            })
            .collect();

        Legend {
            title: title.to_string(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
