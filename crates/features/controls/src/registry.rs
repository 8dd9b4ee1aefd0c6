use crate::error::ControlError;
use hugo_domain::control::{Control, ControlPatch, ControlQuery, Selection};
use hugo_domain::slice::FeatureSlice;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// In-memory registry of controls keyed by their `id`.
///
/// Cloning yields another handle to the same collection. Every operation holds the lock
/// for its whole duration, so check-then-act sequences (duplicate detection on create,
/// lookup before update or delete) are atomic.
#[derive(Debug, Clone, Default)]
pub struct ControlRegistry {
    controls: Arc<Mutex<BTreeMap<i64, Control>>>,
}

impl ControlRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored control, ordered by id.
    #[must_use]
    pub fn list_all(&self) -> BTreeMap<i64, Control> {
        self.controls.lock().clone()
    }

    /// Returns the control registered under `id`.
    ///
    /// # Errors
    /// [`ControlError::NotFound`] if no such control exists.
    pub fn get(&self, id: i64) -> Result<Control, ControlError> {
        self.controls.lock().get(&id).cloned().ok_or_else(|| ControlError::not_found(id))
    }

    /// Selects the controls matching every criterion in `query`, echoing the criteria back.
    #[must_use]
    pub fn filter(&self, query: ControlQuery) -> Selection {
        if query.is_unconstrained() {
            debug!("Filter without criteria selects every control");
        }

        let selection = self
            .controls
            .lock()
            .values()
            .filter(|control| query.matches(control))
            .cloned()
            .collect();

        Selection { query, selection }
    }

    /// Registers a new control.
    ///
    /// # Errors
    /// [`ControlError::Conflict`] if the id is already taken; the stored record is left as is.
    pub fn create(&self, control: Control) -> Result<Control, ControlError> {
        let mut controls = self.controls.lock();
        if controls.contains_key(&control.id) {
            warn!(id = control.id, "Rejected duplicate control");
            return Err(ControlError::conflict(control.id));
        }

        debug!(id = control.id, "Control added");
        controls.insert(control.id, control.clone());
        Ok(control)
    }

    /// Overwrites the fields carried by `patch` on the control registered under `id`.
    ///
    /// An empty patch is rejected before the id is looked up.
    ///
    /// # Errors
    /// [`ControlError::InvalidArgument`] if `patch` is empty or carries a `NaN` or infinite
    /// price, [`ControlError::NotFound`] if no such control exists.
    pub fn update(&self, id: i64, patch: ControlPatch) -> Result<Control, ControlError> {
        if patch.is_empty() {
            warn!(id, "Rejected update without parameters");
            return Err(ControlError::invalid_argument("No parameters provided for update."));
        }
        if patch.price.is_some_and(|price| !price.is_finite()) {
            warn!(id, "Rejected non-finite price");
            return Err(ControlError::invalid_argument("price must be a finite number."));
        }

        let mut controls = self.controls.lock();
        let control = controls.get_mut(&id).ok_or_else(|| ControlError::not_found(id))?;
        patch.apply_to(control);

        debug!(id, "Control updated");
        Ok(control.clone())
    }

    /// Removes and returns the control registered under `id`.
    ///
    /// # Errors
    /// [`ControlError::NotFound`] if no such control exists.
    pub fn delete(&self, id: i64) -> Result<Control, ControlError> {
        let removed = self.controls.lock().remove(&id).ok_or_else(|| ControlError::not_found(id))?;

        debug!(id, "Control deleted");
        Ok(removed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.lock().is_empty()
    }
}

impl FeatureSlice for ControlRegistry {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "controls"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control(id: i64, family: &str, name: &str) -> Control {
        Control {
            jid: id,
            id,
            family: family.to_owned(),
            group: format!("{family}-{id}"),
            name: name.to_owned(),
            description: "d".to_owned(),
            discussion: "disc".to_owned(),
            questions: "q".to_owned(),
            price: None,
            count: None,
        }
    }

    #[test]
    fn starts_empty() {
        let registry = ControlRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list_all().is_empty());
    }

    #[test]
    fn create_then_get_round_trips() {
        let registry = ControlRegistry::new();
        let created = registry.create(control(1, "AC", "Policy")).unwrap();

        assert_eq!(created, control(1, "AC", "Policy"));
        assert_eq!(registry.get(1).unwrap(), created);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_id_is_a_conflict() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();

        let err = registry.create(control(1, "AU", "Other")).unwrap_err();
        assert!(matches!(err, ControlError::Conflict { id: 1, .. }));
        assert_eq!(registry.get(1).unwrap().name, "Policy");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let registry = ControlRegistry::new();
        let patch = ControlPatch { name: Some("x".to_owned()), ..ControlPatch::default() };

        assert!(matches!(registry.get(9), Err(ControlError::NotFound { id: 9, .. })));
        assert!(matches!(registry.delete(9), Err(ControlError::NotFound { id: 9, .. })));
        assert!(matches!(registry.update(9, patch), Err(ControlError::NotFound { id: 9, .. })));
    }

    #[test]
    fn empty_patch_is_invalid_regardless_of_id() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();

        for id in [1, 404] {
            let err = registry.update(id, ControlPatch::default()).unwrap_err();
            assert!(matches!(err, ControlError::InvalidArgument { .. }), "id {id}: {err}");
        }
        assert_eq!(registry.get(1).unwrap(), control(1, "AC", "Policy"));
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();

        let patch = ControlPatch { name: Some("NewPolicy".to_owned()), ..ControlPatch::default() };
        let updated = registry.update(1, patch).unwrap();

        let mut expected = control(1, "AC", "Policy");
        expected.name = "NewPolicy".to_owned();
        assert_eq!(updated, expected);
        assert_eq!(registry.get(1).unwrap(), expected);
    }

    #[test]
    fn non_finite_price_is_invalid() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let patch = ControlPatch { price: Some(price), ..ControlPatch::default() };
            let err = registry.update(1, patch).unwrap_err();
            assert!(matches!(err, ControlError::InvalidArgument { .. }), "{price}: {err}");
        }
        assert_eq!(registry.get(1).unwrap().price, None);
    }

    #[test]
    fn delete_removes_the_record() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();

        assert_eq!(registry.delete(1).unwrap(), control(1, "AC", "Policy"));
        assert!(matches!(registry.get(1), Err(ControlError::NotFound { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn filter_without_criteria_returns_everything() {
        let registry = ControlRegistry::new();
        registry.create(control(2, "AU", "Audit")).unwrap();
        registry.create(control(1, "AC", "Policy")).unwrap();

        let result = registry.filter(ControlQuery::default());
        assert_eq!(result.query, ControlQuery::default());
        assert_eq!(result.selection.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn filter_selects_exact_matches() {
        let registry = ControlRegistry::new();
        registry.create(control(1, "AC", "Policy")).unwrap();
        registry.create(control(2, "AC", "Enforcement")).unwrap();
        registry.create(control(3, "ACX", "Policy")).unwrap();

        let query = ControlQuery { family: Some("AC".to_owned()), ..ControlQuery::default() };
        let result = registry.filter(query.clone());
        assert_eq!(result.query, query);
        assert_eq!(result.selection.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2]);

        let query = ControlQuery {
            family: Some("AC".to_owned()),
            name: Some("Policy".to_owned()),
            ..ControlQuery::default()
        };
        assert_eq!(registry.filter(query).selection, [control(1, "AC", "Policy")]);
    }

    #[test]
    fn clones_share_the_collection() {
        let registry = ControlRegistry::new();
        let handle = registry.clone();
        handle.create(control(5, "SC", "Boundary")).unwrap();

        assert_eq!(registry.get(5).unwrap().name, "Boundary");
    }

    #[test]
    fn concurrent_creates_admit_one_winner_per_id() {
        let registry = ControlRegistry::new();

        let outcomes: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let registry = registry.clone();
                    scope.spawn(move || registry.create(control(1, "AC", &format!("n{n}"))).is_ok())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        assert_eq!(registry.len(), 1);
    }
}
