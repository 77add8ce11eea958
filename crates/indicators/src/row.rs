use crate::error::IndicatorError;
use configuration::OptionOverrides;
use core_types::{Entity, Period};
use rust_decimal::Decimal;

/// Computes the value of one line for one period.
pub type ComputeFn<S> = fn(&S, &Entity, &Period) -> Result<Decimal, IndicatorError>;

/// Descriptor of a computable line of an indicator table.
pub struct IndicatorRow<S> {
    pub name: &'static str,
    pub label: Option<&'static str>,
    /// Lines sort by `(index, name)`; unindexed lines use 0.
    pub index: i32,
    pub is_reference: bool,
    /// Explicit denominator line for percentages.
    pub reference: Option<&'static str>,
    compute: ComputeFn<S>,
}

// Manual impl: a fn pointer is `Clone` whatever `S` is.
impl<S> Clone for IndicatorRow<S> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            label: self.label,
            index: self.index,
            is_reference: self.is_reference,
            reference: self.reference,
            compute: self.compute,
        }
    }
}

impl<S> std::fmt::Debug for IndicatorRow<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorRow")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("index", &self.index)
            .field("is_reference", &self.is_reference)
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl<S> IndicatorRow<S> {
    pub fn new(name: &'static str, compute: ComputeFn<S>) -> Self {
        Self {
            name,
            label: None,
            index: 0,
            is_reference: false,
            reference: None,
            compute,
        }
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn index(mut self, index: i32) -> Self {
        self.index = index;
        self
    }

    /// Flags the line as the table's reference.
    pub fn reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    /// Computes percentages of this line against `reference`.
    pub fn relative_to(mut self, reference: &'static str) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Label of the line, falling back to its name.
    pub fn display_label(&self) -> &'static str {
        self.label.unwrap_or(self.name)
    }

    pub fn sort_key(&self) -> (i32, &'static str) {
        (self.index, self.name)
    }

    pub fn compute(&self, set: &S, entity: &Entity, period: &Period) -> Result<Decimal, IndicatorError> {
        (self.compute)(set, entity, period)
    }
}

/// A concrete kind of indicator table.
///
/// Implementors declare their lines statically; the engine never discovers
/// lines at run time.
pub trait IndicatorSet: Sized {
    /// The lines of the table, in declaration order.
    fn rows() -> Vec<IndicatorRow<Self>>;

    /// Table switches specific to this set, layered over the global defaults.
    fn default_options() -> OptionOverrides {
        OptionOverrides::default()
    }

    /// Whether `period` carries usable data for `entity`. Invalid periods
    /// produce empty cells on every line.
    fn period_is_valid(&self, _entity: &Entity, _period: &Period) -> bool {
        true
    }
}
