//! Buffer provisioning: zero-initialized per-channel sample storage.
//!
//! A [`BufferSet`] owns one contiguous `Vec<f32>` per channel, all of the
//! same length. Units never see the storage itself, only per-call slice
//! views over a frame window:
//!
//! - `views(range)` yields `&[f32]` per channel (inputs)
//! - `views_mut(range)` yields `&mut [f32]` per channel (outputs)
//!
//! A direction with zero channels yields an empty view list, which units
//! must treat the same as having no buffers at all.

use crate::invariant_ppt::{assert_invariant, BUFFER_ZERO_INIT, VIEW_SHAPE};
use std::ops::Range;

/// Per-channel sample storage for one direction of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSet {
    channels: Vec<Vec<f32>>,
    frames: usize,
}

impl BufferSet {
    /// Allocate `channel_count` channels of `frames` zeroed samples.
    pub fn new(channel_count: usize, frames: usize) -> Self {
        let channels = vec![vec![0.0; frames]; channel_count];
        assert_invariant(
            BUFFER_ZERO_INIT,
            channels.iter().all(|c| c.len() == frames && c.iter().all(|&s| s == 0.0)),
            "fresh buffers must be zeroed and frame-sized",
            None,
        );
        Self { channels, frames }
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames per channel.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Samples of channel `index`, or `None` past the last channel.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    /// All channels, in channel order.
    pub fn channels(&self) -> impl ExactSizeIterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Read-only views over `window`, one per channel.
    ///
    /// `window` is clamped to the frame count.
    pub fn views(&self, window: Range<usize>) -> Vec<&[f32]> {
        let window = self.clamp(window);
        let views: Vec<&[f32]> = self.channels.iter().map(|c| &c[window.clone()]).collect();
        assert_invariant(
            VIEW_SHAPE,
            views.len() == self.channels.len() && views.iter().all(|v| v.len() == window.len()),
            "one view per channel, each spanning the window",
            None,
        );
        views
    }

    /// Writable views over `window`, one per channel.
    ///
    /// `window` is clamped to the frame count.
    pub fn views_mut(&mut self, window: Range<usize>) -> Vec<&mut [f32]> {
        let window = self.clamp(window);
        let expected = self.channels.len();
        let views: Vec<&mut [f32]> = self
            .channels
            .iter_mut()
            .map(|c| &mut c[window.clone()])
            .collect();
        assert_invariant(
            VIEW_SHAPE,
            views.len() == expected && views.iter().all(|v| v.len() == window.len()),
            "one view per channel, each spanning the window",
            None,
        );
        views
    }

    fn clamp(&self, window: Range<usize>) -> Range<usize> {
        let end = window.end.min(self.frames);
        window.start.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_zeroed() {
        let set = BufferSet::new(3, 16);
        assert_eq!(set.channel_count(), 3);
        assert_eq!(set.frames(), 16);
        assert!(set.channels().all(|c| c.len() == 16 && c.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn zero_channels_give_empty_views() {
        let mut set = BufferSet::new(0, 64);
        assert!(set.is_empty());
        assert!(set.views(0..64).is_empty());
        assert!(set.views_mut(0..64).is_empty());
    }

    #[test]
    fn views_cover_window() {
        let mut set = BufferSet::new(2, 50);
        {
            let mut out = set.views_mut(32..50);
            assert_eq!(out.len(), 2);
            assert_eq!(out[0].len(), 18);
            out[1][0] = 0.5;
        }
        assert_eq!(set.channel(1).map(|c| c[32]), Some(0.5));
        assert_eq!(set.channel(1).map(|c| c[31]), Some(0.0));
    }

    #[test]
    fn window_is_clamped_to_frames() {
        let set = BufferSet::new(1, 10);
        assert_eq!(set.views(0..32)[0].len(), 10);
        assert_eq!(set.views(32..10)[0].len(), 0);
        assert_eq!(set.views(12..40)[0].len(), 0);
    }

    #[test]
    fn channel_out_of_range_is_none() {
        let mut set = BufferSet::new(1, 4);
        assert!(set.channel(1).is_none());
        assert!(set.channel_mut(1).is_none());
    }
}
