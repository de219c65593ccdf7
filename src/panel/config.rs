use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::ShapeKind;

/// Parameters of one box generation pass.
///
/// All lengths are in the caller's working unit. Missing fields take their
/// default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxConfig {
    /// Material thickness.
    pub thickness: f64,
    /// Outer height of the finished box.
    pub box_height: f64,
    /// Distance from the outline to the tab slot centreline.
    pub tab_inset: f64,
    /// Distance from the outline to the top opening.
    pub top_hole_inset: f64,
    /// Width of material removed by the cutter.
    pub kerf: f64,
    pub tab_width: f64,
    /// Arc length along the inset path where the first tab starts.
    pub tab_start_offset: f64,
    /// Corner radius of the side panel tabs.
    pub tab_corner_radius: f64,
    pub num_tabs: usize,
    pub generate_lid: bool,
    /// Extra clearance between the top opening and the lid fitting.
    pub lid_extra_inset: f64,
    /// Flattening and simplification tolerance for every offset.
    pub precision: f64,
    pub hinge: HingeConfig,
    pub magnets: MagnetConfig,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            box_height: 50.0,
            tab_inset: 5.0,
            top_hole_inset: 10.0,
            kerf: 0.1,
            tab_width: 6.0,
            tab_start_offset: 0.0,
            tab_corner_radius: 0.5,
            num_tabs: 8,
            generate_lid: true,
            lid_extra_inset: 1.0,
            precision: crate::tessellation::DEFAULT_CHORD_TOLERANCE,
            hinge: HingeConfig::default(),
            magnets: MagnetConfig::default(),
        }
    }
}

/// Living hinge settings for the side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeConfig {
    pub enabled: bool,
    /// Slit length as a percentage of the side panel height.
    pub length_percent: f64,
    /// Uncut margin at the top and bottom of each slit column.
    pub gap: f64,
    /// Distance between slit columns and between slits in a column.
    pub spacing: f64,
    /// Segments with a chord at least this long count as straight and get no
    /// hinge.
    pub min_straight_length: f64,
}

impl Default for HingeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            length_percent: 25.0,
            gap: 1.5,
            spacing: 5.0,
            min_straight_length: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnetKind {
    #[default]
    None,
    Rectangle,
    Circle,
}

/// Magnet pockets placed along the inset path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetConfig {
    pub kind: MagnetKind,
    pub rectangle_width: f64,
    pub rectangle_height: f64,
    pub circle_diameter: f64,
    pub count: usize,
    pub placement_offset: f64,
    /// Cut the pockets in the inner layers ([`MagnetPlate::TopTabs`] and
    /// [`MagnetPlate::LidMiddle`]) so no magnet shows from outside. When
    /// false the outer top and lid bottom plates are cut instead.
    pub hidden: bool,
}

/// Plates that line up with the magnet positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagnetPlate {
    /// Layer under the top plate that holds the side panel tabs.
    TopTabs,
    Top,
    LidMiddle,
    LidBottom,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            kind: MagnetKind::None,
            rectangle_width: 6.0,
            rectangle_height: 2.0,
            circle_diameter: 6.0,
            count: 4,
            placement_offset: 0.0,
            hidden: true,
        }
    }
}

impl MagnetConfig {
    /// Whether `plate` gets the pockets as real cuts rather than reference
    /// marks.
    #[must_use]
    pub fn cuts_pockets(&self, plate: MagnetPlate) -> bool {
        match plate {
            MagnetPlate::TopTabs | MagnetPlate::LidMiddle => self.hidden,
            MagnetPlate::Top | MagnetPlate::LidBottom => !self.hidden,
        }
    }

    /// Pocket outline for the configured kind, or `None` without magnets.
    #[must_use]
    pub fn shape(&self) -> Option<ShapeKind> {
        match self.kind {
            MagnetKind::None => None,
            MagnetKind::Rectangle => Some(ShapeKind::Rectangle {
                width: self.rectangle_width,
                height: self.rectangle_height,
            }),
            MagnetKind::Circle => Some(ShapeKind::Circle {
                diameter: self.circle_diameter,
            }),
        }
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        value,
        reason,
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be positive"))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be zero or positive"))
    }
}

impl BoxConfig {
    /// Height of the side panel between the bottom and top plates.
    #[must_use]
    pub fn side_height(&self) -> f64 {
        self.box_height - 4.0 * self.thickness
    }

    /// Checks every parameter before generation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidParameter` naming the first parameter that
    /// is non-finite or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("thickness", self.thickness)?;
        positive("box_height", self.box_height)?;
        if self.side_height() <= 0.0 {
            return Err(invalid(
                "box_height",
                self.box_height,
                "must exceed four material thicknesses",
            ));
        }
        non_negative("tab_inset", self.tab_inset)?;
        non_negative("top_hole_inset", self.top_hole_inset)?;
        non_negative("kerf", self.kerf)?;
        positive("tab_width", self.tab_width)?;
        if self.kerf >= self.tab_width || self.kerf >= self.thickness {
            return Err(invalid(
                "kerf",
                self.kerf,
                "must be smaller than tab width and thickness",
            ));
        }
        if !self.tab_start_offset.is_finite() {
            return Err(invalid("tab_start_offset", self.tab_start_offset, "must be finite"));
        }
        non_negative("tab_corner_radius", self.tab_corner_radius)?;
        if self.num_tabs == 0 {
            return Err(invalid("num_tabs", 0.0, "at least one tab is required"));
        }
        non_negative("lid_extra_inset", self.lid_extra_inset)?;
        positive("precision", self.precision)?;
        self.hinge.validate()?;
        self.magnets.validate()
    }
}

impl HingeConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.length_percent > 0.0 && self.length_percent <= 100.0) {
            return Err(invalid(
                "hinge.length_percent",
                self.length_percent,
                "must be in (0, 100]",
            ));
        }
        non_negative("hinge.gap", self.gap)?;
        positive("hinge.spacing", self.spacing)?;
        non_negative("hinge.min_straight_length", self.min_straight_length)
    }
}

impl MagnetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.placement_offset.is_finite() {
            return Err(invalid(
                "magnets.placement_offset",
                self.placement_offset,
                "must be finite",
            ));
        }
        match self.kind {
            MagnetKind::None => Ok(()),
            MagnetKind::Rectangle => {
                positive("magnets.rectangle_width", self.rectangle_width)?;
                positive("magnets.rectangle_height", self.rectangle_height)
            }
            MagnetKind::Circle => positive("magnets.circle_diameter", self.circle_diameter),
        }
    }
}
