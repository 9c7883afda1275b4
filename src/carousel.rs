//! Index-based carousel over a fixed snapshot of items.
//!
//! Used by the gallery lightbox and the testimonial slider. The snapshot is
//! taken at [`Carousel::open`] and does not follow later category changes.

use std::sync::Arc;

use crate::error::SiteError;

#[derive(Debug, Clone)]
enum State<T> {
    Closed,
    Open { items: Arc<[T]>, index: usize },
}

/// Open/closed carousel with modular wraparound navigation.
///
/// While open, `index < len` always holds.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    state: State<T>,
}

impl<T> Default for Carousel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Carousel<T> {
    /// A closed carousel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: State::Closed,
        }
    }

    /// Open on `items` at `start`.
    ///
    /// On error the carousel is left closed, whatever it showed before.
    ///
    /// # Errors
    ///
    /// [`SiteError::EmptyCollection`] when `items` is empty,
    /// [`SiteError::IndexOutOfRange`] when `start >= items.len()`.
    pub fn open(&mut self, items: Arc<[T]>, start: usize) -> Result<(), SiteError> {
        let len = items.len();
        if len == 0 {
            self.state = State::Closed;
            return Err(SiteError::EmptyCollection);
        }
        if start >= len {
            self.state = State::Closed;
            return Err(SiteError::IndexOutOfRange { index: start, len });
        }
        self.state = State::Open {
            items,
            index: start,
        };
        Ok(())
    }

    /// Advance one item, wrapping from last to first. `None` when closed.
    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Go back one item, wrapping from first to last. `None` when closed.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.len();
        self.step(len.saturating_sub(1))
    }

    fn step(&mut self, by: usize) -> Option<usize> {
        match &mut self.state {
            State::Closed => None,
            State::Open { items, index } => {
                *index = (*index + by) % items.len();
                Some(*index)
            }
        }
    }

    /// Jump straight to `index`.
    ///
    /// # Errors
    ///
    /// [`SiteError::EmptyCollection`] when closed,
    /// [`SiteError::IndexOutOfRange`] when `index` is past the end. The
    /// current position is kept on error.
    pub fn select(&mut self, index: usize) -> Result<(), SiteError> {
        match &mut self.state {
            State::Closed => Err(SiteError::EmptyCollection),
            State::Open { items, index: current } => {
                if index >= items.len() {
                    return Err(SiteError::IndexOutOfRange {
                        index,
                        len: items.len(),
                    });
                }
                *current = index;
                Ok(())
            }
        }
    }

    /// Close and drop the snapshot. No-op when already closed.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    /// Whether the carousel is showing an item.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// Position of the shown item.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self.state {
            State::Closed => None,
            State::Open { index, .. } => Some(index),
        }
    }

    /// The shown item.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        match &self.state {
            State::Closed => None,
            State::Open { items, index } => items.get(*index),
        }
    }

    /// Snapshot length; 0 when closed.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.state {
            State::Closed => 0,
            State::Open { items, .. } => items.len(),
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The whole snapshot (for thumbnail strips). Empty when closed.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match &self.state {
            State::Closed => &[],
            State::Open { items, .. } => items,
        }
    }

    /// One-based counter text, e.g. `"3 / 6"`.
    #[must_use]
    pub fn position_label(&self) -> Option<String> {
        self.index().map(|i| format!("{} / {}", i + 1, self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six() -> Arc<[u32]> {
        (1..=6).collect::<Vec<_>>().into()
    }

    #[test]
    fn test_scenario_b_wraps_forward_and_back() {
        let mut lb = Carousel::new();
        lb.open(six(), 5).unwrap();
        assert_eq!(lb.current(), Some(&6));

        assert_eq!(lb.next(), Some(0));
        assert_eq!(lb.current(), Some(&1));
        assert_eq!(lb.previous(), Some(5));
        assert_eq!(lb.current(), Some(&6));
        assert_eq!(lb.position_label().as_deref(), Some("6 / 6"));
    }

    #[test]
    fn test_n_steps_return_to_start() {
        let mut lb = Carousel::new();
        for start in 0..6 {
            lb.open(six(), start).unwrap();
            for _ in 0..6 {
                let _ = lb.next();
            }
            assert_eq!(lb.index(), Some(start));
            for _ in 0..6 {
                let _ = lb.previous();
            }
            assert_eq!(lb.index(), Some(start));
        }
    }

    #[test]
    fn test_steps_wrap_modulo_len() {
        let mut lb = Carousel::new();
        for len in 1..=8_usize {
            let items: Arc<[usize]> = (0..len).collect::<Vec<_>>().into();
            for start in 0..len {
                for n in 0..30 {
                    lb.open(Arc::clone(&items), start).unwrap();
                    for _ in 0..n {
                        let _ = lb.next();
                    }
                    assert_eq!(lb.index(), Some((start + n) % len), "len {len} next x{n}");

                    lb.open(Arc::clone(&items), start).unwrap();
                    for _ in 0..n {
                        let _ = lb.previous();
                    }
                    assert_eq!(
                        lb.index(),
                        Some((start + len - n % len) % len),
                        "len {len} previous x{n}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_next_then_previous_is_identity() {
        let mut lb = Carousel::new();
        lb.open(six(), 2).unwrap();
        let _ = lb.next();
        let _ = lb.previous();
        assert_eq!(lb.index(), Some(2));
        let _ = lb.previous();
        let _ = lb.next();
        assert_eq!(lb.index(), Some(2));
    }

    #[test]
    fn test_single_item_wraps_onto_itself() {
        let mut lb = Carousel::new();
        lb.open(Arc::from([42_u32]), 0).unwrap();
        assert_eq!(lb.next(), Some(0));
        assert_eq!(lb.previous(), Some(0));
        assert_eq!(lb.current(), Some(&42));
    }

    #[test]
    fn test_open_out_of_range_stays_closed() {
        let mut lb = Carousel::new();
        lb.open(six(), 1).unwrap();

        let err = lb.open(six(), 6);
        assert!(matches!(
            err,
            Err(SiteError::IndexOutOfRange { index: 6, len: 6 })
        ));
        assert!(!lb.is_open());

        let empty: Arc<[u32]> = Arc::from(Vec::new());
        assert!(matches!(lb.open(empty, 0), Err(SiteError::EmptyCollection)));
        assert!(!lb.is_open());
    }

    #[test]
    fn test_navigation_while_closed_is_inert() {
        let mut lb: Carousel<u32> = Carousel::new();
        assert_eq!(lb.next(), None);
        assert_eq!(lb.previous(), None);
        assert_eq!(lb.current(), None);
        assert_eq!(lb.position_label(), None);
        assert!(lb.items().is_empty());
        lb.close();
        assert!(!lb.is_open());
    }

    #[test]
    fn test_select_keeps_position_on_error() {
        let mut lb = Carousel::new();
        lb.open(six(), 0).unwrap();
        lb.select(3).unwrap();
        assert_eq!(lb.current(), Some(&4));
        assert!(lb.select(9).is_err());
        assert_eq!(lb.index(), Some(3));

        lb.close();
        assert!(matches!(lb.select(0), Err(SiteError::EmptyCollection)));
    }

    #[test]
    fn test_snapshot_outlives_source() {
        let mut lb = Carousel::new();
        let mut source = vec![1_u32, 2, 3];
        lb.open(Arc::from(source.clone()), 0).unwrap();
        source.clear();
        assert_eq!(lb.len(), 3);
        assert_eq!(lb.items(), [1, 2, 3]);
    }
}
