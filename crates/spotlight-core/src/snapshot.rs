#![forbid(unsafe_code)]

//! Resolved channel values for one progress sample, and frame-to-frame diffs.
//!
//! A [`VisualSnapshot`] has no identity: two snapshots for the same progress
//! and table compare equal bit for bit. [`VisualSnapshot::diff`] lets a
//! renderer skip writes for channels that did not move since the last
//! applied frame.

use serde::{Deserialize, Serialize};

use crate::channel::Channel;

/// Target values for every channel at one progress sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualSnapshot {
    pub image_translate_y_percent: f64,
    pub mask_size_percent: f64,
    pub image_scale: f64,
    /// Revealed flag per header word.
    pub words: Vec<bool>,
}

impl VisualSnapshot {
    /// Scalar value of a channel, `None` for channels not carried here.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> Option<f64> {
        match channel {
            Channel::ImageTranslateY => Some(self.image_translate_y_percent),
            Channel::MaskSize => Some(self.mask_size_percent),
            Channel::ImageScale => Some(self.image_scale),
            Channel::OverlayTranslateY => None,
        }
    }

    /// Opacity (0.0 or 1.0) for a word, `None` when out of range.
    #[must_use]
    pub fn word_opacity(&self, index: usize) -> Option<f64> {
        self.words
            .get(index)
            .map(|&shown| if shown { 1.0 } else { 0.0 })
    }

    #[must_use]
    pub fn revealed_words(&self) -> usize {
        self.words.iter().filter(|&&shown| shown).count()
    }

    /// Channels and words that differ from `previous`.
    ///
    /// With no previous snapshot every channel and word is reported.
    #[must_use]
    pub fn diff(&self, previous: Option<&VisualSnapshot>) -> SnapshotDelta {
        let Some(prev) = previous else {
            return SnapshotDelta {
                scalars: Channel::SCALAR
                    .iter()
                    .filter_map(|&c| self.channel(c).map(|v| (c, v)))
                    .collect(),
                words: self.words.iter().copied().enumerate().collect(),
            };
        };

        let scalars = Channel::SCALAR
            .iter()
            .filter_map(|&c| {
                let now = self.channel(c)?;
                let before = prev.channel(c)?;
                (now.to_bits() != before.to_bits()).then_some((c, now))
            })
            .collect();

        let words = self
            .words
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, shown)| prev.words.get(i) != Some(&shown))
            .collect();

        SnapshotDelta { scalars, words }
    }
}

/// Changed channels between two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotDelta {
    /// Scalar channels whose value changed, with the new value.
    pub scalars: Vec<(Channel, f64)>,
    /// Words whose revealed flag changed, with the new flag.
    pub words: Vec<(usize, bool)>,
}

impl SnapshotDelta {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.words.is_empty()
    }

    #[must_use]
    pub fn scalar(&self, channel: Channel) -> Option<f64> {
        self.scalars
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|&(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(y: f64, mask: f64, scale: f64, words: &[bool]) -> VisualSnapshot {
        VisualSnapshot {
            image_translate_y_percent: y,
            mask_size_percent: mask,
            image_scale: scale,
            words: words.to_vec(),
        }
    }

    #[test]
    fn full_delta_without_previous() {
        let s = snapshot(-10.0, 0.0, 1.5, &[false, false]);
        let delta = s.diff(None);
        assert_eq!(
            delta.scalars,
            vec![
                (Channel::ImageTranslateY, -10.0),
                (Channel::MaskSize, 0.0),
                (Channel::ImageScale, 1.5)
            ]
        );
        assert_eq!(delta.words, vec![(0, false), (1, false)]);
    }

    #[test]
    fn identical_snapshots_have_empty_delta() {
        let s = snapshot(-10.0, 20.0, 1.4, &[true, false]);
        assert!(s.diff(Some(&s.clone())).is_empty());
    }

    #[test]
    fn only_changed_channels_reported() {
        let before = snapshot(-10.0, 20.0, 1.4, &[true, false, false]);
        let after = snapshot(-10.0, 30.0, 1.4, &[true, true, false]);
        let delta = after.diff(Some(&before));
        assert_eq!(delta.scalars, vec![(Channel::MaskSize, 30.0)]);
        assert_eq!(delta.words, vec![(1, true)]);
        assert_eq!(delta.scalar(Channel::MaskSize), Some(30.0));
        assert_eq!(delta.scalar(Channel::ImageScale), None);
    }

    #[test]
    fn word_opacity_lookup() {
        let s = snapshot(0.0, 0.0, 1.0, &[true, false]);
        assert_eq!(s.word_opacity(0), Some(1.0));
        assert_eq!(s.word_opacity(1), Some(0.0));
        assert_eq!(s.word_opacity(2), None);
        assert_eq!(s.revealed_words(), 1);
    }

    #[test]
    fn overlay_is_not_a_snapshot_channel() {
        let s = snapshot(0.0, 0.0, 1.0, &[]);
        assert_eq!(s.channel(Channel::OverlayTranslateY), None);
    }
}
