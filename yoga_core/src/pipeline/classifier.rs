use yoga_schema::ClassifierWeights;

use super::PoseClassifier;
use crate::error::PipelineError;

/// Single dense layer followed by argmax.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    weights: Vec<Vec<f32>>,
    bias: Vec<f32>,
    input_len: usize,
}

impl LinearClassifier {
    pub fn new(weights: ClassifierWeights) -> Result<Self, PipelineError> {
        let ClassifierWeights { weights, bias, .. } = weights;

        if bias.is_empty() {
            return Err(PipelineError::Classification("classifier has no classes".into()));
        }
        if weights.len() != bias.len() {
            return Err(PipelineError::Classification(format!(
                "{} weight rows for {} classes",
                weights.len(),
                bias.len()
            )));
        }
        let input_len = weights[0].len();
        if let Some(row) = weights.iter().position(|r| r.len() != input_len) {
            return Err(PipelineError::Classification(format!(
                "weight row {row} has {} inputs, expected {input_len}",
                weights[row].len()
            )));
        }

        Ok(Self {
            weights,
            bias,
            input_len,
        })
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn logits(&self, input: &[f32]) -> Result<Vec<f32>, PipelineError> {
        if input.len() != self.input_len {
            return Err(PipelineError::Classification(format!(
                "expected {} inputs, got {}",
                self.input_len,
                input.len()
            )));
        }
        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect())
    }
}

impl PoseClassifier for LinearClassifier {
    fn is_ready(&self) -> bool {
        true
    }

    fn classify(&mut self, input: &[f32]) -> Result<usize, PipelineError> {
        let logits = self.logits(input)?;
        argmax(&logits).ok_or_else(|| PipelineError::Classification("no finite logits".into()))
    }
}

/// Index of the largest value; the first one wins ties. NaN never wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
