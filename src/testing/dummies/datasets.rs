use crate::core::dataset::Dataset;
use crate::core::instances::{DenseInstance, Instance};
use crate::testing::dummies::headers::{
    header_numeric_binary, header_numeric_class, header_weather,
};
use std::sync::Arc;

/// Dataset over [`header_numeric_binary`]: one `(x, class index)` pair per
/// record, in the given order.
pub fn numeric_dataset(points: &[(f64, usize)]) -> Dataset {
    let header = header_numeric_binary();
    let instances: Vec<Arc<dyn Instance>> = points
        .iter()
        .map(|&(x, class)| {
            Arc::new(DenseInstance::new(
                Arc::clone(&header),
                vec![x, class as f64],
            )) as Arc<dyn Instance>
        })
        .collect();
    Dataset::new(header, instances)
}

/// Dataset whose class attribute is numeric, for invalid-schema tests.
pub fn numeric_class_dataset() -> Dataset {
    let header = header_numeric_class();
    let instances: Vec<Arc<dyn Instance>> = vec![
        Arc::new(DenseInstance::new(Arc::clone(&header), vec![1.0, 0.0])),
        Arc::new(DenseInstance::new(Arc::clone(&header), vec![2.0, 1.0])),
    ];
    Dataset::new(header, instances)
}

/// Ten weather records with a 7/3 yes/no split:
///
/// ```text
/// outlook   windy  play        outlook   windy  play
/// sunny     false  yes         overcast  true   yes
/// sunny     true   yes         sunny     false  yes
/// overcast  false  yes         rainy     true   no
/// rainy     false  yes         sunny     true   no
/// rainy     false  yes         rainy     true   no
/// ```
pub fn weather_dataset() -> Dataset {
    let header = header_weather();
    let rows: [[f64; 3]; 10] = [
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 0.0, 0.0],
        [2.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [2.0, 1.0, 1.0],
    ];
    let instances: Vec<Arc<dyn Instance>> = rows
        .iter()
        .map(|values| {
            Arc::new(DenseInstance::new(Arc::clone(&header), values.to_vec()))
                as Arc<dyn Instance>
        })
        .collect();
    Dataset::new(header, instances)
}

/// Single weather record by label, for classification probes.
pub fn weather_instance(outlook: &str, windy: &str, play: &str) -> DenseInstance {
    let header = header_weather();
    let index_of = |attribute_index: usize, label: &str| -> f64 {
        header
            .nominal_attribute_at(attribute_index)
            .and_then(|attribute| attribute.index_of_value(label))
            .map(|index| index as f64)
            .unwrap_or(f64::NAN)
    };
    let values = vec![
        index_of(0, outlook),
        index_of(1, windy),
        index_of(2, play),
    ];
    DenseInstance::new(header, values)
}
