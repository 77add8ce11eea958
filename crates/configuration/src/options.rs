use serde::{Deserialize, Serialize};

/// Switches controlling what an indicator table contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Keep raw values in the output cells.
    pub with_data: bool,
    /// Append a total cell to every line.
    pub with_total: bool,
    /// Keep the lines flagged as reference in the output.
    pub with_reference: bool,
    /// Compute the percentage of the reference line for every value.
    pub with_percentage: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            with_data: true,
            with_total: false,
            with_reference: true,
            with_percentage: false,
        }
    }
}

impl TableOptions {
    /// Returns a copy where every switch set in `overrides` replaces ours.
    pub fn merged(self, overrides: &OptionOverrides) -> Self {
        Self {
            with_data: overrides.with_data.unwrap_or(self.with_data),
            with_total: overrides.with_total.unwrap_or(self.with_total),
            with_reference: overrides.with_reference.unwrap_or(self.with_reference),
            with_percentage: overrides.with_percentage.unwrap_or(self.with_percentage),
        }
    }

    /// Applies `layers` in order on top of the defaults; later layers win.
    pub fn layered<'a, I>(layers: I) -> Self
    where
        I: IntoIterator<Item = &'a OptionOverrides>,
    {
        layers
            .into_iter()
            .fold(Self::default(), |options, layer| options.merged(layer))
    }
}

/// A partial set of `TableOptions`: unset switches leave the lower layer alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionOverrides {
    pub with_data: Option<bool>,
    pub with_total: Option<bool>,
    pub with_reference: Option<bool>,
    pub with_percentage: Option<bool>,
}

impl OptionOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, value: bool) -> Self {
        self.with_data = Some(value);
        self
    }

    pub fn with_total(mut self, value: bool) -> Self {
        self.with_total = Some(value);
        self
    }

    pub fn with_reference(mut self, value: bool) -> Self {
        self.with_reference = Some(value);
        self
    }

    pub fn with_percentage(mut self, value: bool) -> Self {
        self.with_percentage = Some(value);
        self
    }

    /// Combines two override sets; switches set in `later` win.
    pub fn then(&self, later: &OptionOverrides) -> OptionOverrides {
        OptionOverrides {
            with_data: later.with_data.or(self.with_data),
            with_total: later.with_total.or(self.with_total),
            with_reference: later.with_reference.or(self.with_reference),
            with_percentage: later.with_percentage.or(self.with_percentage),
        }
    }
}
