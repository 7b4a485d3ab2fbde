//! Wikipedia pretraining preprocessors

use rand::RngCore;

use super::{PreprocessError, Result, TextPreprocessor};
use crate::data::{Example, Feature};

/// Sentinel the masked span is replaced with
pub const SPAN_SENTINEL: &str = "_X_";

/// Mask the first salient span of a sentence.
///
/// Reads `text` and the byte-offset `spans` pairs; the first span is replaced
/// with [`SPAN_SENTINEL`] to form `inputs`, and the span text becomes
/// `targets`. Always masks the first span so the task stays cacheable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskSalientSpans;

impl TextPreprocessor for MaskSalientSpans {
    fn name(&self) -> &'static str {
        "mask_salient_spans"
    }

    fn apply(&self, mut example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let text = example.text("text")?.to_string();
        let spans = example.int_pairs("spans")?;
        let &(start, end) = spans.first().ok_or(PreprocessError::NoSalientSpans)?;

        let valid = start < end
            && end <= text.len()
            && text.is_char_boundary(start)
            && text.is_char_boundary(end);
        if !valid {
            return Err(PreprocessError::InvalidSpan {
                start,
                end,
                len: text.len(),
            });
        }

        let masked = format!("{}{}{}", &text[..start], SPAN_SENTINEL, &text[end..]);
        let span_text = text[start..end].to_string();

        example.set("inputs", Feature::Text(masked));
        example.set("targets", Feature::Text(span_text));
        Ok(example)
    }
}

/// Remap feature keys.
///
/// The output example contains exactly the mapped keys: each `(new, Some(old))`
/// entry copies the old feature under the new name, and `(new, None)` leaves
/// the new key absent. Unmapped features are dropped.
#[derive(Debug, Clone, Default)]
pub struct Rekey {
    key_map: Vec<(String, Option<String>)>,
}

impl Rekey {
    /// Create a rekey transform from a key map
    #[must_use]
    pub fn new(key_map: Vec<(String, Option<String>)>) -> Self {
        Self { key_map }
    }

    /// Map a new key to an existing feature
    #[must_use]
    pub fn map(mut self, new_key: impl Into<String>, old_key: impl Into<String>) -> Self {
        self.key_map.push((new_key.into(), Some(old_key.into())));
        self
    }

    /// Leave a key absent from the output
    #[must_use]
    pub fn drop(mut self, new_key: impl Into<String>) -> Self {
        self.key_map.push((new_key.into(), None));
        self
    }
}

impl TextPreprocessor for Rekey {
    fn name(&self) -> &'static str {
        "rekey"
    }

    fn apply(&self, example: Example, _rng: &mut dyn RngCore) -> Result<Example> {
        let mut out = Example::new();
        for (new_key, old_key) in &self.key_map {
            if let Some(old_key) = old_key {
                let feature = example
                    .get(old_key)
                    .cloned()
                    .ok_or_else(|| crate::data::ExampleError::MissingFeature(old_key.clone()))?;
                out.set(new_key.clone(), feature);
            }
        }
        Ok(out)
    }
}
