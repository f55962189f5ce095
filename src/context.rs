//! Load-once state for processing survey submissions.

use std::time::Instant;

use crate::algorithm::alignment::{AlignedVector, FeatureEncoder};
use crate::algorithm::demographics::DemographicSummary;
use crate::algorithm::prediction::{PredictionResult, predict};
use crate::config::PredictorConfig;
use crate::error::Result;
use crate::model::{Classifier, load_model};
use crate::reader::ReadOptions;
use crate::record::RawRecord;
use crate::reference::ReferenceTable;
use crate::report::SubmissionReport;
use crate::survey::SurveyResponse;
use crate::utils::{create_spinner, finish_and_clear};

/// The model, reference population and encoder, loaded once and then only
/// read
#[derive(Debug)]
pub struct SurveyContext {
    config: PredictorConfig,
    reference: ReferenceTable,
    encoder: FeatureEncoder,
    model: Box<dyn Classifier>,
}

impl SurveyContext {
    /// Load the model and reference data named in `config`
    pub fn load(config: PredictorConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let spinner = create_spinner(Some("Loading model and reference data"), config.show_progress);

        let loaded = load_model(&config.model_path).and_then(|model| {
            let reference = ReferenceTable::load(
                &config.reference_path,
                ReadOptions::from(&config),
                &config.encoded_columns,
            )?;
            Ok((model, reference))
        });
        finish_and_clear(&spinner);
        let (model, reference) = loaded?;

        let context = Self::from_parts(config, reference, model)?;
        log::info!("Survey context ready in {:?}", start.elapsed());
        Ok(context)
    }

    /// Assemble a context from already loaded parts
    pub fn from_parts(
        config: PredictorConfig,
        reference: ReferenceTable,
        model: Box<dyn Classifier>,
    ) -> Result<Self> {
        let encoder = FeatureEncoder::new(&reference, &config.encoded_columns)?;
        let issues = encoder.audit_schema(model.schema());
        if issues > 0 {
            log::debug!("{issues} column difference(s) between reference data and model");
        }

        Ok(Self {
            config,
            reference,
            encoder,
            model,
        })
    }

    /// Align a raw record to the model's columns
    pub fn align(&self, raw: &RawRecord) -> Result<AlignedVector> {
        self.encoder.align(raw, self.model.schema())
    }

    /// Predict the satisfaction label of a raw record
    pub fn predict_raw(&self, raw: &RawRecord) -> Result<PredictionResult> {
        let vector = self.align(raw)?;
        predict(&vector, self.model.as_ref())
    }

    /// Process one survey submission end to end
    pub fn process(&self, response: &SurveyResponse) -> Result<SubmissionReport> {
        let raw = response.to_validated_record()?;
        let prediction = self.predict_raw(&raw)?;
        let demographics =
            DemographicSummary::for_response(response, &self.reference, &self.config.age_bins)?;

        Ok(SubmissionReport {
            prediction,
            demographics,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    #[must_use]
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    #[must_use]
    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }
}
