use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::color::Color;
use crate::pipeline::assign::Role;

/// A finished base16 scheme: one color per role plus name and author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub name: String,
    pub author: String,
    colors: [Color; Role::COUNT],
}

impl Scheme {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        colors: [Color; Role::COUNT],
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            colors,
        }
    }

    pub fn color(&self, role: Role) -> Color {
        self.colors[role.index()]
    }

    pub fn colors(&self) -> &[Color; Role::COUNT] {
        &self.colors
    }

    /// Flat mapping of `scheme`, `author` and `base00`..`base0F` to lowercase hex.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("scheme".to_string(), self.name.clone());
        map.insert("author".to_string(), self.author.clone());
        for role in Role::all() {
            map.insert(role.name(), self.color(role).to_hex());
        }
        map
    }

    /// Serialize to a base16 scheme YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("failed to serialize scheme")
    }

    /// URL- and filename-friendly form of the scheme name.
    pub fn slug(&self) -> String {
        let name = self.name.strip_suffix(".yaml").unwrap_or(&self.name);
        name.to_lowercase().replace(' ', "-")
    }

    /// Variables for template rendering: scheme metadata plus hex, decimal
    /// and fractional channel breakdowns of every role.
    pub fn template_variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("scheme-name".to_string(), self.name.clone());
        vars.insert("scheme-author".to_string(), self.author.clone());
        vars.insert("scheme-slug".to_string(), self.slug());

        for role in Role::all() {
            let color = self.color(role);
            let hex = color.to_hex();
            vars.insert(format!("{role}-hex"), hex.clone());

            for (i, (channel, value)) in ["r", "g", "b"].iter().zip(color.channels()).enumerate() {
                vars.insert(format!("{role}-hex-{channel}"), hex[i * 2..i * 2 + 2].to_string());
                vars.insert(format!("{role}-rgb-{channel}"), value.to_string());
                vars.insert(format!("{role}-dec-{channel}"), format!("{:?}", value as f64 / 255.0));
            }
        }
        vars
    }
}

impl Serialize for Scheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Role::COUNT + 2))?;
        map.serialize_entry("scheme", &self.name)?;
        map.serialize_entry("author", &self.author)?;
        for role in Role::all() {
            map.serialize_entry(&role.name(), &self.color(role).to_hex())?;
        }
        map.end()
    }
}
