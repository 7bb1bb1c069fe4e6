use crate::core::instances::Instance;
use std::sync::Arc;

/// One-dimensional cluster over a single numeric attribute.
///
/// Holds shared member instances plus the centroid (`value`) of the
/// attribute being discretized. Membership changes during distribution,
/// reassignment and merging; the centroid only changes when `update_value`
/// is called, so it can intentionally lag behind the membership.
pub struct Center {
    value: f64,
    members: Vec<Arc<dyn Instance>>,
}

impl Center {
    pub fn new() -> Center {
        Center {
            value: 0.0,
            members: Vec::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn members(&self) -> &[Arc<dyn Instance>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn push_member(&mut self, instance: Arc<dyn Instance>) {
        self.members.push(instance);
    }

    pub fn take_members(&mut self) -> Vec<Arc<dyn Instance>> {
        std::mem::take(&mut self.members)
    }

    pub fn take_members_from(&mut self, other: &mut Center) {
        self.members.append(&mut other.members);
    }

    pub fn distance_to(&self, value: f64) -> f64 {
        (self.value - value).abs()
    }

    pub fn squared_distance_to(&self, value: f64) -> f64 {
        (self.value - value).powi(2)
    }

    pub fn sum_of_squared_distances(&self, attribute_index: usize) -> f64 {
        self.members
            .iter()
            .filter_map(|member| member.value_at_index(attribute_index))
            .map(|value| self.squared_distance_to(value))
            .sum()
    }

    /// Centroid = mean of the members on the discretized attribute, 0.0 for
    /// an empty center.
    pub fn update_value(&mut self, attribute_index: usize) {
        let sum: f64 = self
            .members
            .iter()
            .filter_map(|member| member.value_at_index(attribute_index))
            .sum();
        self.value = sum / (self.members.len().max(1) as f64);
    }
}

impl Default for Center {
    fn default() -> Self {
        Center::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::datasets::numeric_dataset;

    const EPS: f64 = 1e-12;

    #[test]
    fn empty_center_has_zero_value() {
        let mut center = Center::new();
        assert!(center.is_empty());
        center.update_value(0);
        assert_eq!(center.value(), 0.0);
        assert_eq!(center.sum_of_squared_distances(0), 0.0);
    }

    #[test]
    fn update_value_is_member_mean() {
        let dataset = numeric_dataset(&[(1.0, 0), (2.0, 0), (6.0, 0)]);
        let mut center = Center::new();
        for instance in dataset.instances() {
            center.push_member(Arc::clone(instance));
        }
        center.update_value(0);
        assert!((center.value() - 3.0).abs() < EPS);
        assert!((center.sum_of_squared_distances(0) - (4.0 + 1.0 + 9.0)).abs() < EPS);
    }

    #[test]
    fn distances_are_one_dimensional() {
        let dataset = numeric_dataset(&[(5.0, 0)]);
        let mut center = Center::new();
        center.push_member(Arc::clone(&dataset.instances()[0]));
        center.update_value(0);
        assert!((center.distance_to(3.0) - 2.0).abs() < EPS);
        assert!((center.squared_distance_to(3.0) - 4.0).abs() < EPS);
    }

    #[test]
    fn take_members_from_moves_everything() {
        let dataset = numeric_dataset(&[(1.0, 0), (2.0, 0)]);
        let mut a = Center::new();
        let mut b = Center::new();
        a.push_member(Arc::clone(&dataset.instances()[0]));
        b.push_member(Arc::clone(&dataset.instances()[1]));
        a.take_members_from(&mut b);
        assert_eq!(a.len(), 2);
        assert!(b.is_empty());
    }
}
