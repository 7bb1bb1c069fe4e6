use crate::core::instances::Instance;
use crate::evaluation::{Estimator, Measurement, PerformanceEvaluator};

/// Batch classification evaluator.
///
/// Tracks:
/// - overall accuracy (`weight_correct`);
/// - marginals of predicted (`row_kappa`) and true (`col_kappa`) classes for
///   Cohen's κ;
/// - the share of examples the classifier could not commit a class to
///   (`unclassified`).
///
/// Unclassified examples keep their weight in every denominator, so they
/// lower accuracy instead of disappearing from the report.
pub struct BasicClassificationEvaluator<E: Estimator + Default> {
    weight_correct: E,
    row_kappa: Vec<E>,
    col_kappa: Vec<E>,
    num_classes: usize,
    unclassified: f64,
    total: f64,
}

impl<E: Estimator + Default> BasicClassificationEvaluator<E> {
    pub fn new(num_classes: usize) -> Self {
        let make_vec = || (0..num_classes).map(|_| E::default()).collect::<Vec<_>>();
        Self {
            weight_correct: E::default(),
            row_kappa: make_vec(),
            col_kappa: make_vec(),
            num_classes,
            unclassified: 0.0,
            total: 0.0,
        }
    }

    #[inline]
    fn ensure_initialized(&mut self, k_hint: usize) {
        if k_hint > self.num_classes {
            let add = k_hint - self.num_classes;
            self.row_kappa.extend((0..add).map(|_| E::default()));
            self.col_kappa.extend((0..add).map(|_| E::default()));
            self.num_classes = k_hint;
        }
    }
}

impl<E: Estimator + Default> PerformanceEvaluator for BasicClassificationEvaluator<E> {
    fn reset(&mut self) {
        *self = Self::new(self.num_classes);
    }

    fn add_result(&mut self, example: &dyn Instance, predicted: Option<usize>) {
        let Some(yf) = example.class_value() else {
            return;
        };
        if !yf.is_finite() || yf < 0.0 {
            return;
        }
        let y = yf as usize;

        let mut k_hint = y + 1;
        if let Some(yhat) = predicted {
            k_hint = k_hint.max(yhat + 1);
        }
        self.ensure_initialized(k_hint);

        self.total += 1.0;

        match predicted {
            Some(yhat) => {
                self.weight_correct.add(if yhat == y { 1.0 } else { 0.0 });
                for (c, est) in self.row_kappa.iter_mut().enumerate() {
                    est.add(if c == yhat { 1.0 } else { 0.0 });
                }
            }
            None => {
                self.unclassified += 1.0;
                self.weight_correct.add(0.0);
                for est in self.row_kappa.iter_mut() {
                    est.add(0.0);
                }
            }
        }
        for (c, est) in self.col_kappa.iter_mut().enumerate() {
            est.add(if c == y { 1.0 } else { 0.0 });
        }
    }

    fn performance(&self) -> Vec<Measurement> {
        let mut m = vec![Measurement::new(
            "accuracy",
            self.weight_correct.estimation(),
        )];

        if self.total <= 0.0 {
            m.push(Measurement::new("kappa", 0.0));
            m.push(Measurement::new("unclassified", 0.0));
            return m;
        }

        let p_o = self.weight_correct.estimation();
        let mut p_e = 0.0;
        for c in 0..self.num_classes {
            let pt = self.row_kappa[c].estimation();
            let pp = self.col_kappa[c].estimation();
            if pt.is_finite() && pp.is_finite() {
                p_e += pt * pp;
            }
        }
        let denom = 1.0 - p_e;
        let kappa = if denom.abs() > f64::EPSILON {
            (p_o - p_e) / denom
        } else {
            f64::NAN
        };

        m.push(Measurement::new("kappa", kappa));
        m.push(Measurement::new("unclassified", self.unclassified / self.total));
        m
    }
}
