//! Hero carousel.
//!
//! [`Carousel`] is the slide state: a wrapping index over a fixed number of
//! slides. It has no terminal state; every transition is available from
//! every state. [`AutoplayTimer`] is the running/paused machine and owns the
//! only timer task. [`CarouselPlayer`] pairs the two, advancing the slides on
//! each tick.

mod autoplay;

pub use autoplay::{AutoplayError, AutoplayTimer, CarouselPlayer};

/// Whether autoplay is advancing slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    Running,
    /// Pointer is over the carousel, or autoplay was never started.
    Paused,
}

/// One indicator dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dot {
    pub index: usize,
    pub active: bool,
}

/// Slide position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    slide_count: usize,
}

impl Carousel {
    /// A carousel on its first slide.
    ///
    /// Returns `None` when there are no slides.
    #[must_use]
    pub const fn new(slide_count: usize) -> Option<Self> {
        if slide_count == 0 {
            return None;
        }
        Some(Self {
            index: 0,
            slide_count,
        })
    }

    /// Current slide, 0-based.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Jump to slide `index`, wrapping past the end.
    pub const fn go_to(&mut self, index: usize) {
        self.index = index % self.slide_count;
    }

    /// Advance one slide, wrapping to the first.
    pub const fn next(&mut self) {
        self.go_to(self.index + 1);
    }

    /// Go back one slide, wrapping to the last.
    pub const fn prev(&mut self) {
        self.go_to(self.index + self.slide_count - 1);
    }

    /// Horizontal track offset in percent of one slide width.
    #[must_use]
    pub fn offset_percent(&self) -> i64 {
        i64::try_from(self.index)
            .unwrap_or(i64::MAX)
            .saturating_mul(-100)
    }

    /// CSS transform for the slide track.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translateX({}%)", self.offset_percent())
    }

    /// One dot per slide, with the current slide's dot active.
    #[must_use]
    pub fn dots(&self) -> Vec<Dot> {
        (0..self.slide_count)
            .map(|index| Dot {
                index,
                active: index == self.index,
            })
            .collect()
    }
}
