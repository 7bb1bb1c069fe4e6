use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::dataset::Dataset;
use crate::core::instances::{DenseInstance, Instance};
use crate::discretize::center::Center;
use crate::error::ModelError;
use std::cmp::Ordering;
use std::sync::Arc;

/// One-dimensional K-Means discretizer.
///
/// Replaces a numeric attribute with a nominal one whose labels are the
/// string forms of the final cluster centroids. The run is deterministic
/// given the configuration and the input record order:
///
/// 1. records are stably sorted ascending on the attribute and dealt into
///    `number_of_centers` clusters in equally sized chunks;
/// 2. members migrate between cluster pairs until the total within-cluster
///    scatter stops changing by more than `convergence_delta`;
/// 3. clusters whose centroids lie closer than `merge_similarity_delta` are
///    merged, empty clusters dropped, and the survivors sorted ascending by
///    centroid to fix the new attribute's enumeration order.
///
/// The reassignment rule is pairwise (examined vs. candidate cluster), not
/// nearest-of-all, so the scatter is not guaranteed to decrease
/// monotonically between sweeps.
pub struct KMeansDiscretizer {
    number_of_centers: Option<usize>,
    convergence_delta: f64,
    merge_similarity_delta: f64,
}

impl KMeansDiscretizer {
    pub fn new() -> KMeansDiscretizer {
        KMeansDiscretizer {
            number_of_centers: None,
            convergence_delta: 0.01,
            merge_similarity_delta: 0.1,
        }
    }

    /// Overrides the default of `floor(sqrt(N))` centers.
    pub fn with_number_of_centers(mut self, number_of_centers: usize) -> KMeansDiscretizer {
        self.number_of_centers = Some(number_of_centers);
        self
    }

    pub fn with_convergence_delta(mut self, convergence_delta: f64) -> KMeansDiscretizer {
        self.convergence_delta = convergence_delta;
        self
    }

    pub fn with_merge_similarity_delta(mut self, merge_similarity_delta: f64) -> KMeansDiscretizer {
        self.merge_similarity_delta = merge_similarity_delta;
        self
    }

    /// Discretizes the numeric attribute at `attribute_index`.
    ///
    /// The returned dataset shares every instance value except the
    /// discretized position, which becomes the label index of the cluster
    /// containing the record. Output records appear in cluster order
    /// (ascending centroid), members in membership order.
    pub fn discretize(
        &self,
        attribute_index: usize,
        dataset: &Dataset,
    ) -> Result<Dataset, ModelError> {
        let header = dataset.header();
        let Some(attribute) = header.attribute_at_index(attribute_index) else {
            return Err(ModelError::InvalidAttribute {
                name: format!("#{attribute_index}"),
                expected: "numeric",
            });
        };
        if !attribute.as_any().is::<NumericAttribute>() {
            return Err(ModelError::InvalidAttribute {
                name: attribute.name(),
                expected: "numeric",
            });
        }
        let attribute_name = attribute.name();

        let number_of_instances = dataset.number_of_instances();
        let number_of_centers = self
            .number_of_centers
            .unwrap_or_else(|| (number_of_instances as f64).sqrt() as usize);
        if number_of_centers == 0 || number_of_centers > number_of_instances {
            return Err(ModelError::DegenerateConfiguration {
                requested: number_of_centers,
                instances: number_of_instances,
            });
        }

        let mut sorted: Vec<Arc<dyn Instance>> = dataset.instances().to_vec();
        sorted.sort_by(|a, b| {
            let left = a.value_at_index(attribute_index).unwrap_or(f64::NAN);
            let right = b.value_at_index(attribute_index).unwrap_or(f64::NAN);
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        });

        let mut centers = distribute_to_centers(&sorted, number_of_centers);
        update_all_values(&mut centers, attribute_index);
        self.run_reassignment(&mut centers, attribute_index);
        self.merge_similar_centers(&mut centers);
        centers.retain(|center| !center.is_empty());
        update_all_values(&mut centers, attribute_index);
        centers.sort_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal));

        Ok(relabel(attribute_index, attribute_name, dataset, &centers))
    }

    /// Applies [`discretize`](Self::discretize) successively, one numeric
    /// non-class attribute at a time, until the dataset is fully nominal.
    pub fn discretize_all_numeric(&self, dataset: &Dataset) -> Result<Dataset, ModelError> {
        let mut current = dataset.clone();
        while let Some(index) = next_numeric_attribute(&current) {
            current = self.discretize(index, &current)?;
        }
        Ok(current)
    }

    fn run_reassignment(&self, centers: &mut [Center], attribute_index: usize) {
        let mut previous = total_scatter(centers, attribute_index);
        loop {
            for examined in 0..centers.len() {
                for candidate in 0..centers.len() {
                    if candidate == examined {
                        continue;
                    }
                    let (from, to) = pair_mut(centers, examined, candidate);
                    for instance in from.take_members() {
                        let Some(value) = instance.value_at_index(attribute_index) else {
                            from.push_member(instance);
                            continue;
                        };
                        if to.distance_to(value) < from.distance_to(value) {
                            to.push_member(instance);
                        } else {
                            from.push_member(instance);
                        }
                    }
                }
            }
            // centroids refresh only after a full sweep over all pairs
            update_all_values(centers, attribute_index);
            let current = total_scatter(centers, attribute_index);
            if (previous - current).abs() < self.convergence_delta {
                break;
            }
            previous = current;
        }
    }

    /// Merges centers whose centroids lie closer than
    /// `merge_similarity_delta`. Comparisons use the centroids as they were
    /// when the pass began: absorbing members does not refresh them.
    fn merge_similar_centers(&self, centers: &mut Vec<Center>) {
        let mut examined = 0;
        while examined < centers.len() {
            let examined_value = centers[examined].value();
            let mut candidate = 0;
            while candidate < centers.len() {
                if candidate != examined
                    && (examined_value - centers[candidate].value()).abs()
                        < self.merge_similarity_delta
                {
                    let mut absorbed = centers.remove(candidate);
                    if candidate < examined {
                        examined -= 1;
                    }
                    centers[examined].take_members_from(&mut absorbed);
                } else {
                    candidate += 1;
                }
            }
            examined += 1;
        }
    }
}

impl Default for KMeansDiscretizer {
    fn default() -> Self {
        KMeansDiscretizer::new()
    }
}

/// Deals the sorted records into centers in chunks of `N / k`, advancing to
/// the next center at every chunk boundary while one exists. The last center
/// absorbs any remainder.
fn distribute_to_centers(sorted: &[Arc<dyn Instance>], number_of_centers: usize) -> Vec<Center> {
    let mut centers: Vec<Center> = (0..number_of_centers).map(|_| Center::new()).collect();
    let chunk = sorted.len() / number_of_centers;
    let mut current = 0;
    let mut next = 0;
    for (index, instance) in sorted.iter().enumerate() {
        if index % chunk == 0 && next < centers.len() {
            current = next;
            next += 1;
        }
        centers[current].push_member(Arc::clone(instance));
    }
    centers
}

fn update_all_values(centers: &mut [Center], attribute_index: usize) {
    for center in centers.iter_mut() {
        center.update_value(attribute_index);
    }
}

fn total_scatter(centers: &[Center], attribute_index: usize) -> f64 {
    centers
        .iter()
        .map(|center| center.sum_of_squared_distances(attribute_index))
        .sum()
}

fn pair_mut(centers: &mut [Center], a: usize, b: usize) -> (&mut Center, &mut Center) {
    if a < b {
        let (head, tail) = centers.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = centers.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

fn next_numeric_attribute(dataset: &Dataset) -> Option<usize> {
    dataset
        .header()
        .attributes
        .iter()
        .enumerate()
        .find(|(index, attribute)| {
            *index != dataset.class_index() && attribute.as_any().is::<NumericAttribute>()
        })
        .map(|(index, _)| index)
}

/// Builds the discretized dataset: a nominal attribute labeled with the
/// centroid strings replaces the numeric one, and every record's value at
/// that position becomes the label index of its cluster.
fn relabel(
    attribute_index: usize,
    attribute_name: String,
    dataset: &Dataset,
    centers: &[Center],
) -> Dataset {
    let labels: Vec<String> = centers.iter().map(|center| center.value().to_string()).collect();
    let discretized =
        Arc::new(NominalAttribute::with_values(attribute_name, labels)) as AttributeRef;
    let header = Arc::new(
        dataset
            .header()
            .with_attribute_replaced(attribute_index, discretized),
    );

    let mut instances: Vec<Arc<dyn Instance>> = Vec::with_capacity(dataset.number_of_instances());
    for (label_index, center) in centers.iter().enumerate() {
        for member in center.members() {
            let mut values = member.to_vec();
            values[attribute_index] = label_index as f64;
            instances.push(Arc::new(DenseInstance::new(Arc::clone(&header), values)));
        }
    }
    Dataset::new(header, instances)
}
