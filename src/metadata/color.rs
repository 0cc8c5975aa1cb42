//! Category colors.

use crate::metadata::binding::Bindings;
use crate::metadata::error::ConfigurationError;
use crate::model::PhyloTree;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A color as understood by the downstream renderer, e.g. `"blue"` or
/// `"#1f77b4"`. The value is passed through unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const fn named(name: &'static str) -> Self {
        Color(Cow::Borrowed(name))
    }

    pub fn new<S: Into<String>>(color: S) -> Self {
        Color(Cow::Owned(color.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Colors handed out to categories, in order.
pub const DEFAULT_COLORS: [Color; 10] = [
    Color::named("blue"),
    Color::named("green"),
    Color::named("red"),
    Color::named("orange"),
    Color::named("purple"),
    Color::named("magenta"),
    Color::named("cyan"),
    Color::named("olive"),
    Color::named("brown"),
    Color::named("teal"),
];

/// Color for leaves whose category has no assigned color.
pub const FALLBACK_COLOR: Color = Color::named("grey");

// =#========================================================================#=
// PALETTE
// =#========================================================================#=
/// A non-empty, cyclic list of category colors plus a fallback color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPalette")]
pub struct Palette {
    colors: Vec<Color>,
    fallback: Color,
}

#[derive(Deserialize)]
struct RawPalette {
    colors: Vec<Color>,
    #[serde(default = "fallback_color")]
    fallback: Color,
}

fn fallback_color() -> Color {
    FALLBACK_COLOR
}

impl TryFrom<RawPalette> for Palette {
    type Error = ConfigurationError;

    fn try_from(raw: RawPalette) -> Result<Self, Self::Error> {
        Palette::new(raw.colors, raw.fallback)
    }
}

impl Palette {
    /// # Errors
    /// [ConfigurationError::EmptyPalette] if `colors` is empty.
    pub fn new(colors: Vec<Color>, fallback: Color) -> Result<Self, ConfigurationError> {
        if colors.is_empty() {
            return Err(ConfigurationError::EmptyPalette);
        }
        Ok(Palette { colors, fallback })
    }

    /// Returns the color for the `i`-th category, wrapping around.
    pub fn color_at(&self, i: usize) -> &Color {
        &self.colors[i % self.colors.len()]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn fallback(&self) -> &Color {
        &self.fallback
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_COLORS.to_vec(),
            fallback: FALLBACK_COLOR,
        }
    }
}

// =#========================================================================#=
// COLOR MAP
// =#========================================================================#=
/// Category to color mapping for one column.
///
/// Categories are numbered in the order they are first met when walking the
/// leaves left to right, and take palette colors in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    column: String,
    column_index: usize,
    categories: Vec<(String, Color)>,
    lookup: HashMap<String, usize>,
    fallback: Color,
}

impl ColorMap {
    /// Returns the column name the map was built for.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn column_index(&self) -> usize {
        self.column_index
    }

    /// Returns the color of `category`, if it occurs on a bound leaf.
    pub fn get(&self, category: &str) -> Option<&Color> {
        self.lookup.get(category).map(|&i| &self.categories[i].1)
    }

    /// Returns the color of `category`, or the fallback color.
    pub fn color_for(&self, category: &str) -> &Color {
        self.get(category).unwrap_or(&self.fallback)
    }

    /// Returns `(category, color)` pairs in first-seen order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = (&str, &Color)> {
        self.categories.iter().map(|(c, color)| (c.as_str(), color))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Assigns a color to every category of `column` that occurs on a bound
/// leaf of `tree`.
///
/// Walks the leaves in order; the `k`-th new category gets
/// `palette.color_at(k)`, so more categories than colors reuse colors
/// cyclically. Missing values get no color.
///
/// # Errors
/// [ConfigurationError::MissingColumn] if `column` does not exist.
///
/// # Example
/// ```
/// use cladeview::metadata::{assign_colors, bind, MetadataTable, Palette};
/// use cladeview::parse_newick_str;
///
/// let tree = parse_newick_str("((A,B),C)").unwrap();
/// let table = MetadataTable::from_rows(
///     ["IGIB_id", "clade"],
///     [["A", "x"], ["B", "y"], ["C", "x"]],
/// ).unwrap();
/// let bindings = bind(&tree, &table, "IGIB_id").unwrap();
///
/// let colors = assign_colors(&tree, &bindings, "clade", &Palette::default()).unwrap();
/// assert_eq!(colors.get("x").unwrap().as_str(), "blue");
/// assert_eq!(colors.get("y").unwrap().as_str(), "green");
/// ```
pub fn assign_colors(
    tree: &PhyloTree,
    bindings: &Bindings<'_>,
    column: &str,
    palette: &Palette,
) -> Result<ColorMap, ConfigurationError> {
    let column_index = bindings.column(column)?;

    let mut categories: Vec<(String, Color)> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();
    for leaf in tree.leaves() {
        let Some(value) = bindings.value(leaf.index(), column_index) else {
            continue;
        };
        if !lookup.contains_key(value) {
            let next = categories.len();
            categories.push((value.to_string(), palette.color_at(next).clone()));
            lookup.insert(value.to_string(), next);
        }
    }

    Ok(ColorMap {
        column: column.to_string(),
        column_index,
        categories,
        lookup,
        fallback: palette.fallback().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{bind, MetadataTable};
    use crate::parse_newick_str;

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(
            Palette::new(vec![], FALLBACK_COLOR).unwrap_err(),
            ConfigurationError::EmptyPalette
        );
        let json = r#"{"colors": []}"#;
        assert!(serde_json::from_str::<Palette>(json).is_err());
    }

    #[test]
    fn palette_from_json_defaults_fallback() {
        let palette: Palette = serde_json::from_str(r##"{"colors": ["#000", "#fff"]}"##).unwrap();
        assert_eq!(palette.color_at(3).as_str(), "#fff");
        assert_eq!(palette.fallback(), &FALLBACK_COLOR);
    }

    #[test]
    fn colors_cycle_past_palette_length() {
        let tree = parse_newick_str("(A,B,C)").unwrap();
        let table =
            MetadataTable::from_rows(["id", "c"], [["A", "1"], ["B", "2"], ["C", "3"]]).unwrap();
        let bindings = bind(&tree, &table, "id").unwrap();
        let palette =
            Palette::new(vec![Color::named("red"), Color::named("blue")], FALLBACK_COLOR).unwrap();

        let colors = assign_colors(&tree, &bindings, "c", &palette).unwrap();
        let assigned: Vec<_> = colors.entries().map(|(c, color)| (c, color.as_str())).collect();
        assert_eq!(assigned, [("1", "red"), ("2", "blue"), ("3", "red")]);
        assert_eq!(colors.color_for("unknown"), &FALLBACK_COLOR);
    }

    #[test]
    fn first_seen_follows_leaf_order_not_table_order() {
        let tree = parse_newick_str("(C,(B,A))").unwrap();
        let table =
            MetadataTable::from_rows(["id", "c"], [["A", "a"], ["B", ""], ["C", "c"]]).unwrap();
        let bindings = bind(&tree, &table, "id").unwrap();

        let colors = assign_colors(&tree, &bindings, "c", &Palette::default()).unwrap();
        let order: Vec<_> = colors.entries().map(|(c, _)| c).collect();
        assert_eq!(order, ["c", "a"]);
    }
}
