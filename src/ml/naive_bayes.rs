//! Multinomial naive Bayes over weighted term vectors.
//!
//! For every class `c` the model keeps the log prior `ln(n_c / n)` and, for
//! every feature `j`, the smoothed log probability
//!
//! ```text
//! ln((count[c][j] + alpha) / (sum_j count[c][j] + alpha * n_features))
//! ```
//!
//! where `count[c][j]` sums the feature weights of the training vectors
//! labelled `c`. A vector `x` scores `prior[c] + sum_j x[j] * log_prob[c][j]`
//! and the highest score wins. Classes are kept in sorted order and ties go
//! to the earliest class, so an all-zero vector deterministically yields the
//! most frequent class.

use std::collections::BTreeSet;

use ahash::AHashMap;
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::ChatterboxError;
use crate::ml::vector::SparseVector;

/// Naive Bayes settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Additive (Laplace/Lidstone) smoothing parameter.
    pub alpha: f64,
    /// Learn class priors from the data instead of using a uniform prior.
    pub fit_prior: bool,
}

impl Default for NaiveBayesConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_prior: true,
        }
    }
}

impl NaiveBayesConfig {
    /// Check the settings for consistency.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(self.alpha.is_finite() && self.alpha > 0.0) {
            return Err(ChatterboxError::config(format!(
                "alpha must be a positive number, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

/// A fitted multinomial naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    /// Class labels in sorted order.
    classes: Vec<String>,
    /// Training examples per class.
    class_count: Vec<usize>,
    /// Log prior per class.
    class_log_prior: Vec<f64>,
    /// Log probability per class and feature.
    feature_log_prob: Vec<Vec<f64>>,
    /// Dimension of the input vectors.
    n_features: usize,
}

impl MultinomialNaiveBayes {
    /// Fit the classifier on labelled vectors of dimension `n_features`.
    pub fn fit<L: AsRef<str>>(
        samples: &[SparseVector],
        labels: &[L],
        n_features: usize,
        config: &NaiveBayesConfig,
    ) -> Result<Self> {
        config.validate()?;
        if samples.is_empty() {
            return Err(ChatterboxError::training_data("no training samples").into());
        }
        if samples.len() != labels.len() {
            return Err(ChatterboxError::training_data(format!(
                "{} samples but {} labels",
                samples.len(),
                labels.len()
            ))
            .into());
        }
        if n_features == 0 {
            return Err(ChatterboxError::training_data("feature space is empty").into());
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|label| label.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        let class_index: AHashMap<&str, usize> = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class.as_str(), idx))
            .collect();

        let mut class_count = vec![0usize; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];
        for (sample, label) in samples.iter().zip(labels) {
            let c = class_index[label.as_ref()];
            class_count[c] += 1;
            for (j, weight) in sample.iter() {
                let Some(slot) = feature_count[c].get_mut(j) else {
                    return Err(ChatterboxError::invalid_model(format!(
                        "feature index {j} out of range for {n_features} features"
                    ))
                    .into());
                };
                *slot += weight;
            }
        }

        let alpha = config.alpha;
        let feature_log_prob: Vec<Vec<f64>> = feature_count
            .iter()
            .map(|counts| {
                let total: f64 = counts.iter().sum::<f64>() + alpha * n_features as f64;
                let log_total = total.ln();
                counts
                    .iter()
                    .map(|count| (count + alpha).ln() - log_total)
                    .collect::<Vec<f64>>()
            })
            .collect();

        let n = samples.len() as f64;
        let class_log_prior = if config.fit_prior {
            class_count.iter().map(|&count| (count as f64 / n).ln()).collect()
        } else {
            vec![-(classes.len() as f64).ln(); classes.len()]
        };

        Ok(Self {
            classes,
            class_count,
            class_log_prior,
            feature_log_prob,
            n_features,
        })
    }

    /// Unnormalized log posterior of every class, in class order.
    pub fn joint_log_likelihood(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if let Some(max) = features.max_index()
            && max >= self.n_features
        {
            return Err(ChatterboxError::invalid_model(format!(
                "feature index {max} out of range for {} features",
                self.n_features
            ))
            .into());
        }
        if self.feature_log_prob.len() != self.classes.len()
            || self.class_log_prior.len() != self.classes.len()
        {
            return Err(ChatterboxError::invalid_model("class tables are inconsistent").into());
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| {
                prior
                    + features
                        .iter()
                        .map(|(j, weight)| weight * log_prob[j])
                        .sum::<f64>()
            })
            .collect())
    }

    /// Index of the most probable class.
    pub fn predict_index(&self, features: &SparseVector) -> Result<usize> {
        let scores = self.joint_log_likelihood(features)?;

        let mut best: Option<(usize, f64)> = None;
        for (idx, &score) in scores.iter().enumerate() {
            if !score.is_finite() {
                return Err(ChatterboxError::inference(format!(
                    "non-finite score {score} for class `{}`",
                    self.classes[idx]
                ))
                .into());
            }
            // Strict comparison keeps the earliest class on ties.
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }

        best.map(|(idx, _)| idx)
            .ok_or_else(|| ChatterboxError::invalid_model("classifier has no classes").into())
    }

    /// The most probable class label.
    pub fn predict(&self, features: &SparseVector) -> Result<&str> {
        let idx = self.predict_index(features)?;
        Ok(&self.classes[idx])
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Training examples per class, in class order.
    pub fn class_count(&self) -> &[usize] {
        &self.class_count
    }

    /// Dimension of the input vectors.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(usize, f64)]) -> SparseVector {
        SparseVector::new(entries.to_vec())
    }

    fn weather_model() -> MultinomialNaiveBayes {
        // features: 0=sun 1=rain 2=umbrella
        let samples = [
            vector(&[(0, 1.0)]),
            vector(&[(0, 0.8), (2, 0.2)]),
            vector(&[(0, 1.0)]),
            vector(&[(1, 1.0)]),
            vector(&[(1, 0.7), (2, 0.7)]),
        ];
        let labels = ["sunny", "sunny", "sunny", "rainy", "rainy"];
        MultinomialNaiveBayes::fit(&samples, &labels, 3, &NaiveBayesConfig::default()).unwrap()
    }

    #[test]
    fn test_classes_sorted() {
        let model = weather_model();
        assert_eq!(model.classes(), ["rainy", "sunny"]);
        assert_eq!(model.class_count(), [2, 3]);
    }

    #[test]
    fn test_predict() {
        let model = weather_model();
        assert_eq!(model.predict(&vector(&[(1, 1.0)])).unwrap(), "rainy");
        assert_eq!(model.predict(&vector(&[(0, 1.0)])).unwrap(), "sunny");
    }

    #[test]
    fn test_feature_log_prob_is_a_distribution() {
        let model = weather_model();
        for log_prob in &model.feature_log_prob {
            let total: f64 = log_prob.iter().map(|lp| lp.exp()).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_vector_uses_prior() {
        let model = weather_model();
        assert_eq!(model.predict(&SparseVector::default()).unwrap(), "sunny");
    }

    #[test]
    fn test_ties_go_to_first_class() {
        let samples = [vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let model = MultinomialNaiveBayes::fit(
            &samples,
            &["zulu", "alpha"],
            2,
            &NaiveBayesConfig::default(),
        )
        .unwrap();
        assert_eq!(model.predict(&SparseVector::default()).unwrap(), "alpha");
    }

    #[test]
    fn test_uniform_prior() {
        let config = NaiveBayesConfig {
            fit_prior: false,
            ..NaiveBayesConfig::default()
        };
        let samples = [vector(&[(0, 1.0)]), vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let model = MultinomialNaiveBayes::fit(&samples, &["b", "b", "a"], 2, &config).unwrap();
        let scores = model.joint_log_likelihood(&SparseVector::default()).unwrap();
        assert!((scores[0] - scores[1]).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_feature_is_a_model_defect() {
        let model = weather_model();
        let err = model.predict(&vector(&[(7, 1.0)])).unwrap_err();
        assert!(ChatterboxError::from(err).is_model_defect());
    }

    #[test]
    fn test_non_finite_input_is_an_inference_error() {
        let model = weather_model();
        let err = model.predict(&vector(&[(0, f64::NAN)])).unwrap_err();
        assert!(matches!(
            ChatterboxError::from(err),
            ChatterboxError::Inference(_)
        ));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let config = NaiveBayesConfig::default();
        let samples = [vector(&[(0, 1.0)])];
        assert!(MultinomialNaiveBayes::fit(&samples, &["a", "b"], 1, &config).is_err());
        assert!(MultinomialNaiveBayes::fit::<&str>(&[], &[], 1, &config).is_err());

        let bad_alpha = NaiveBayesConfig {
            alpha: 0.0,
            ..NaiveBayesConfig::default()
        };
        assert!(MultinomialNaiveBayes::fit(&samples, &["a"], 1, &bad_alpha).is_err());
    }
}
