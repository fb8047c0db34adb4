// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Image classification seam - cat detection is a black box

use std::path::Path;

use anyhow::Result;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Raw camera frame handed to the classifier
///
/// The engine never looks inside; only a classifier implementation does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraFrame {
    /// Encoded image bytes as captured
    pub data: Vec<u8>,
}

impl CameraFrame {
    /// Wrap captured bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a frame from an image file on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            data: std::fs::read(path)?,
        })
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a frame with no payload
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Boolean cat classifier over a camera frame
///
/// `confidence_threshold` is on a 0..=1 scale; implementations report true
/// when their cat confidence meets it. Takes `&mut self` so implementations
/// may carry state between frames (RNGs, model sessions).
pub trait ImageClassifier {
    /// Does `frame` contain a cat at or above `confidence_threshold`?
    fn contains_cat(&mut self, frame: &CameraFrame, confidence_threshold: f32) -> Result<bool>;
}

/// Stand-in classifier for demo mode
///
/// Draws a uniform confidence per frame and compares it to the threshold,
/// standing in for a real model score when no camera service is wired up.
/// Seedable so demos and tests are reproducible.
pub struct DemoClassifier {
    rng: StdRng,
}

impl DemoClassifier {
    /// Classifier seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Classifier with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DemoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageClassifier for DemoClassifier {
    fn contains_cat(&mut self, _frame: &CameraFrame, confidence_threshold: f32) -> Result<bool> {
        let confidence: f32 = self.rng.gen_range(0.0..1.0);
        Ok(confidence >= confidence_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_extremes() {
        let frame = CameraFrame::default();
        let mut classifier = DemoClassifier::seeded(7);

        for _ in 0..50 {
            assert!(classifier.contains_cat(&frame, 0.0).unwrap());
            assert!(!classifier.contains_cat(&frame, 1.5).unwrap());
        }
    }

    #[test]
    fn test_same_seed_same_verdicts() {
        let frame = CameraFrame::default();
        let mut a = DemoClassifier::seeded(42);
        let mut b = DemoClassifier::seeded(42);

        for _ in 0..20 {
            assert_eq!(
                a.contains_cat(&frame, 0.5).unwrap(),
                b.contains_cat(&frame, 0.5).unwrap()
            );
        }
    }

    #[test]
    fn test_frame_payload_accessors() {
        assert!(CameraFrame::default().is_empty());
        let frame = CameraFrame::new(vec![0u8; 64]);
        assert_eq!(frame.len(), 64);
        assert!(!frame.is_empty());
    }
}
