// Pretrained binary classifiers.
//
// Models are plain immutable data, so inference is reentrant and a single
// instance can be shared across threads.

use serde::Deserialize;

use super::artifact::ArtifactError;

/// A binary prospect classifier over a scaled feature vector.
pub trait ProspectClassifier: Send + Sync {
    /// Probability of the positive (prospect) class.
    fn positive_probability(&self, x: &[f64]) -> f64;

    /// Prospect flag and probability. The flag is set only when the prospect
    /// class is strictly the more likely one.
    fn classify(&self, x: &[f64]) -> (bool, f64) {
        let p = self.positive_probability(x);
        (p > 0.5, p)
    }
}

// ---------------------------------------------------------------------------
// Decision-tree forest
// ---------------------------------------------------------------------------

const LEAF: i64 = -1;

/// One binary decision tree in parallel-array layout. Node 0 is the root;
/// a node is a leaf when both children are -1. Samples go left when
/// `x[feature] <= threshold`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[negative, positive]`.
    pub value: Vec<[f64; 2]>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF && self.children_right[node] == LEAF
    }

    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        let n = self.node_count();
        if n == 0 {
            return Err(ArtifactError::Validation("tree has no nodes".into()));
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != n)
        {
            return Err(ArtifactError::Validation(
                "tree arrays have inconsistent lengths".into(),
            ));
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF && right == LEAF {
                let [neg, pos] = self.value[node];
                let usable = neg.is_finite() && pos.is_finite() && neg >= 0.0 && pos >= 0.0;
                if !usable || neg + pos <= 0.0 {
                    return Err(ArtifactError::Validation(format!(
                        "leaf {node} has invalid class weights [{neg}, {pos}]"
                    )));
                }
                continue;
            }
            // Children must come after their parent, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child >= n as i64 {
                    return Err(ArtifactError::Validation(format!(
                        "node {node} has out-of-order child {child}"
                    )));
                }
            }
            let f = self.feature[node];
            if f < 0 || f as usize >= n_features {
                return Err(ArtifactError::Validation(format!(
                    "node {node} splits on feature {f}, but only {n_features} exist"
                )));
            }
        }
        Ok(())
    }

    /// Normalized positive-class weight at the leaf `x` falls into.
    pub fn positive_fraction(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let f = self.feature[node] as usize;
            let v = x.get(f).copied().unwrap_or(0.0);
            node = if v <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let [neg, pos] = self.value[node];
        pos / (neg + pos)
    }
}

/// Averaged forest of decision trees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        if self.trees.is_empty() {
            return Err(ArtifactError::Validation("forest has no trees".into()));
        }
        self.trees.iter().try_for_each(|t| t.validate(n_features))
    }
}

impl ProspectClassifier for ForestModel {
    fn positive_probability(&self, x: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.positive_fraction(x)).sum();
        total / self.trees.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Logistic regression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        if self.coefficients.len() != n_features {
            return Err(ArtifactError::Validation(format!(
                "logistic model has {} coefficients for {} features",
                self.coefficients.len(),
                n_features
            )));
        }
        Ok(())
    }
}

impl ProspectClassifier for LogisticModel {
    fn positive_probability(&self, x: &[f64]) -> f64 {
        let z: f64 = self
            .coefficients
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

// ---------------------------------------------------------------------------
// Serialized classifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    Forest(ForestModel),
    Logistic(LogisticModel),
}

impl Classifier {
    pub fn validate(&self, n_features: usize) -> Result<(), ArtifactError> {
        match self {
            Classifier::Forest(m) => m.validate(n_features),
            Classifier::Logistic(m) => m.validate(n_features),
        }
    }
}

impl ProspectClassifier for Classifier {
    fn positive_probability(&self, x: &[f64]) -> f64 {
        match self {
            Classifier::Forest(m) => m.positive_probability(x),
            Classifier::Logistic(m) => m.positive_probability(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Split on feature 0 at 0.0: left leaf mostly negative, right mostly positive.
    fn stump(neg_left: f64, pos_right: f64) -> DecisionTree {
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![0, -2, -2],
            threshold: vec![0.0, -2.0, -2.0],
            value: vec![[5.0, 5.0], [neg_left, 1.0], [1.0, pos_right]],
        }
    }

    #[test]
    fn tree_routes_left_on_equal_threshold() {
        let tree = stump(3.0, 3.0);
        assert!((tree.positive_fraction(&[0.0]) - 0.25).abs() < 1e-12);
        assert!((tree.positive_fraction(&[0.1]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn forest_averages_trees() {
        let forest = ForestModel {
            trees: vec![stump(3.0, 3.0), stump(1.0, 1.0)],
        };
        // Right leaves: 0.75 and 0.5.
        assert!((forest.positive_probability(&[1.0]) - 0.625).abs() < 1e-12);
        assert!(forest.classify(&[1.0]).0);
        // Left leaves: 0.25 and 0.5.
        assert!(!forest.classify(&[-1.0]).0);
    }

    #[test]
    fn exact_half_is_not_a_prospect() {
        let forest = ForestModel {
            trees: vec![stump(1.0, 1.0)],
        };
        assert_eq!(forest.positive_probability(&[1.0]), 0.5);
        assert_eq!(forest.classify(&[1.0]), (false, 0.5));
    }

    #[test]
    fn logistic_probability() {
        let model = LogisticModel {
            coefficients: vec![2.0, -1.0],
            intercept: 0.0,
        };
        assert!((model.positive_probability(&[1.0, 2.0]) - 0.5).abs() < 1e-12);
        assert!(model.classify(&[2.0, 1.0]).0);
        assert!(model.validate(3).is_err());
    }

    #[test]
    fn validation_rejects_bad_trees() {
        let mut tree = stump(1.0, 1.0);
        tree.children_left[0] = 0;
        assert!(tree.validate(1).is_err());

        let mut tree = stump(1.0, 1.0);
        tree.feature[0] = 4;
        assert!(tree.validate(1).is_err());

        let mut tree = stump(1.0, 1.0);
        tree.value[1] = [0.0, 0.0];
        assert!(tree.validate(1).is_err());

        let mut tree = stump(1.0, 1.0);
        tree.threshold.pop();
        assert!(tree.validate(1).is_err());

        assert!(stump(1.0, 1.0).validate(1).is_ok());
        assert!(ForestModel { trees: vec![] }.validate(1).is_err());
    }

    #[test]
    fn validation_rejects_non_finite_leaf_weights() {
        for weights in [[f64::NAN, 1.0], [1.0, f64::NAN], [f64::INFINITY, 1.0], [-1.0, 2.0]] {
            let mut tree = stump(1.0, 1.0);
            tree.value[2] = weights;
            let err = tree.validate(1).unwrap_err();
            assert!(err.to_string().contains("leaf 2"), "{err}");
        }
    }

    #[test]
    fn deserializes_tagged_classifier() {
        let json = r#"{
            "kind": "logistic",
            "coefficients": [0.5],
            "intercept": -0.25
        }"#;
        let c: Classifier = serde_json::from_str(json).unwrap();
        assert!(matches!(c, Classifier::Logistic(_)));
        assert!(c.validate(1).is_ok());
    }
}
