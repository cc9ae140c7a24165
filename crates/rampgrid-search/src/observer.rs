//! Search events and the [`SearchObserver`] trait.

use rampgrid_core::Coord;

/// Receives the events of a search run.
///
/// All methods default to doing nothing and none can fail, so an observer
/// can never abort or corrupt the search it is watching. Implementations may
/// block (for example to pace an animation); the search simply resumes when
/// they return.
pub trait SearchObserver {
    /// A coordinate was popped and marked visited for the first time.
    fn on_visit(&mut self, _p: Coord) {}

    /// The goal was reached; `path` runs from start to goal.
    fn on_path_found(&mut self, _path: &[Coord]) {}

    /// The frontier emptied without reaching the goal.
    fn on_exhausted(&mut self) {}
}

/// The no-op observer.
impl SearchObserver for () {}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    #[inline]
    fn on_visit(&mut self, p: Coord) {
        (**self).on_visit(p);
    }

    #[inline]
    fn on_path_found(&mut self, path: &[Coord]) {
        (**self).on_path_found(path);
    }

    #[inline]
    fn on_exhausted(&mut self) {
        (**self).on_exhausted();
    }
}

/// Forwards every event to both observers, first `A` then `B`.
impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn on_visit(&mut self, p: Coord) {
        self.0.on_visit(p);
        self.1.on_visit(p);
    }

    fn on_path_found(&mut self, path: &[Coord]) {
        self.0.on_path_found(path);
        self.1.on_path_found(path);
    }

    fn on_exhausted(&mut self) {
        self.0.on_exhausted();
        self.1.on_exhausted();
    }
}

/// One recorded search event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", content = "data", rename_all = "snake_case"))]
pub enum SearchEvent {
    Visited(Coord),
    PathFound(Vec<Coord>),
    Exhausted,
}

/// An observer that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub events: Vec<SearchEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visited coordinates, in visit order.
    pub fn visits(&self) -> Vec<Coord> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Visited(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// The reported path, if the run found one.
    pub fn path(&self) -> Option<&[Coord]> {
        self.events.iter().find_map(|e| match e {
            SearchEvent::PathFound(p) => Some(p.as_slice()),
            _ => None,
        })
    }

    /// Whether the run reported exhaustion.
    pub fn exhausted(&self) -> bool {
        self.events.contains(&SearchEvent::Exhausted)
    }
}

impl SearchObserver for Recorder {
    fn on_visit(&mut self, p: Coord) {
        self.events.push(SearchEvent::Visited(p));
    }

    fn on_path_found(&mut self, path: &[Coord]) {
        self.events.push(SearchEvent::PathFound(path.to_vec()));
    }

    fn on_exhausted(&mut self) {
        self.events.push(SearchEvent::Exhausted);
    }
}
