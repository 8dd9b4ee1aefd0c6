//! Compliance-control records and the parameter sets used to query and patch them.

use serde::{Deserialize, Serialize};

/// A compliance-control metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Control {
    /// Secondary numeric tag.
    pub jid: i64,
    /// Unique integer that specifies this control.
    pub id: i64,
    /// Family of controls.
    pub family: String,
    /// Group of controls.
    pub group: String,
    /// Name of the control.
    pub name: String,
    /// Description of the control.
    pub description: String,
    /// Discussion of the control.
    pub discussion: String,
    /// Questions of the control.
    pub questions: String,
    /// Price in Euro, set through the update endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Amount of instances in stock, set through the update endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

/// Optional field-equality criteria for selecting controls.
///
/// Every present criterion must match its field exactly; absent ones match anything.
/// `question` constrains the record's `questions` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "openapi",
    derive(utoipa::ToSchema, utoipa::IntoParams),
    into_params(parameter_in = Query)
)]
pub struct ControlQuery {
    pub family: Option<String>,
    pub group: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub discussion: Option<String>,
    pub question: Option<String>,
}

impl ControlQuery {
    /// Returns `true` if the control satisfies every provided criterion.
    #[must_use]
    pub fn matches(&self, control: &Control) -> bool {
        fn accept(criterion: Option<&str>, value: &str) -> bool {
            criterion.is_none_or(|expected| expected == value)
        }

        accept(self.family.as_deref(), &control.family)
            && accept(self.group.as_deref(), &control.group)
            && accept(self.name.as_deref(), &control.name)
            && accept(self.description.as_deref(), &control.description)
            && accept(self.discussion.as_deref(), &control.discussion)
            && accept(self.question.as_deref(), &control.questions)
    }

    /// Returns `true` when no criterion is set.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.family.is_none()
            && self.group.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.discussion.is_none()
            && self.question.is_none()
    }
}

/// Result of a filter request: the criteria echoed back and the matching controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Selection {
    pub query: ControlQuery,
    pub selection: Vec<Control>,
}

/// Partial update for a stored control. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "openapi",
    derive(utoipa::ToSchema, utoipa::IntoParams),
    into_params(parameter_in = Query)
)]
pub struct ControlPatch {
    /// New name of the control.
    pub name: Option<String>,
    /// New price of the control in Euro.
    pub price: Option<f64>,
    /// New amount of instances of this control in stock.
    pub count: Option<u64>,
}

impl ControlPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.count.is_none()
    }

    /// Overwrites the fields of `control` that this patch carries.
    pub fn apply_to(self, control: &mut Control) {
        if let Some(name) = self.name {
            control.name = name;
        }
        if let Some(price) = self.price {
            control.price = Some(price);
        }
        if let Some(count) = self.count {
            control.count = Some(count);
        }
    }
}
