//! Predictive pipeline combining preprocessing and model inference.
//!
//! A [`PredictivePipeline`] holds an unfitted preprocessing [`Pipeline`] and an
//! unfitted model. Fitting it fits the preprocessing on the training features,
//! transforms them, and trains the model on the result. The fitted form applies the
//! same preprocessing before every prediction.

use crate::dataset::{LabeledDataset, Table};
use crate::metrics::{self, MetricsError};
use crate::model::{InferenceModel, ModelError, TrainableModel};
use crate::preprocessing::{
    FittedPipeline, FittedTransformer, Pipeline, PreprocessingError, Transformer,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("preprocessing failed: {0}")]
    Preprocessing(#[from] PreprocessingError),

    #[error("model failed: {0}")]
    Model(#[from] ModelError),

    #[error("scoring failed: {0}")]
    Metrics(#[from] MetricsError),
}

/// Preprocessing plus a terminal classifier, not yet trained.
#[derive(Clone, Debug)]
pub struct PredictivePipeline<M> {
    preprocessor: Pipeline,
    model: M,
}

impl<M> PredictivePipeline<M>
where
    M: TrainableModel,
    M::Fitted: InferenceModel<InputBatch = Table, OutputBatch = Vec<String>>,
{
    pub fn new(preprocessor: Pipeline, model: M) -> Self {
        Self {
            preprocessor,
            model,
        }
    }

    pub fn fit(
        &self,
        data: &LabeledDataset,
    ) -> Result<FittedPredictivePipeline<M::Fitted>, PipelineError> {
        let preprocessor = self.preprocessor.fit(data.features())?;
        let features = preprocessor.transform(data.features())?;
        let model = self.model.fit(&features, data.target())?;

        tracing::info!(
            rows = data.len(),
            features_in = preprocessor.n_features_in(),
            features_out = features.n_columns(),
            "predictive pipeline fitted"
        );

        Ok(FittedPredictivePipeline {
            preprocessor,
            model,
        })
    }
}

/// Trained preprocessing and model, ready for inference.
#[derive(Clone, Debug)]
pub struct FittedPredictivePipeline<F> {
    preprocessor: FittedPipeline,
    model: F,
}

impl<F> FittedPredictivePipeline<F>
where
    F: InferenceModel<InputBatch = Table, OutputBatch = Vec<String>>,
{
    /// Apply the fitted preprocessing to raw features.
    pub fn preprocess(&self, data: &Table) -> Result<Table, PipelineError> {
        Ok(self.preprocessor.transform(data)?)
    }

    pub fn predict(&self, data: &Table) -> Result<Vec<String>, PipelineError> {
        let processed = self.preprocess(data)?;
        Ok(self.model.predict_batch(&processed)?)
    }

    /// Accuracy of the predictions on a labeled dataset.
    pub fn score(&self, data: &LabeledDataset) -> Result<f64, PipelineError> {
        let predictions = self.predict(data.features())?;
        Ok(metrics::accuracy(data.target(), &predictions)?)
    }

    pub fn preprocessor(&self) -> &FittedPipeline {
        &self.preprocessor
    }

    pub fn model(&self) -> &F {
        &self.model
    }
}
