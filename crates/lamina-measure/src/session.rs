//! Measurement session state
//!
//! The host UI owns one session per analysis panel and threads it through
//! each run, instead of stashing the latest results in process-wide state.
//! The session only remembers the most recent table; recomputation always
//! replaces it wholesale.

use crate::regionprops::ResultsTable;

/// Holds the latest measurement results for one analysis panel
#[derive(Debug, Default)]
pub struct MeasureSession {
    results: Option<ResultsTable>,
}

impl MeasureSession {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session's results with a fresh table
    pub fn set_results(&mut self, table: ResultsTable) {
        self.results = Some(table);
    }

    /// The latest results, if any run has completed
    pub fn results(&self) -> Option<&ResultsTable> {
        self.results.as_ref()
    }

    /// Remove and return the latest results
    pub fn take(&mut self) -> Option<ResultsTable> {
        self.results.take()
    }

    /// Discard the latest results
    pub fn clear(&mut self) {
        self.results = None;
    }
}

/// Keep the still-valid part of a prior property selection
///
/// When the selectable choices repopulate after a layer change, the host UI
/// passes the previous selection through here so the user does not lose
/// picks that are still offered.
pub fn retain_selection(previous: &[String], available: &[&str]) -> Vec<String> {
    previous
        .iter()
        .filter(|name| available.contains(&name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regionprops::regionprops_table;
    use lamina_core::{LabelStack, Shape};

    fn small_table() -> ResultsTable {
        let shape = Shape::new(&[1, 3]).unwrap();
        let labels = LabelStack::from_vec(shape, vec![1, 0, 2]).unwrap();
        regionprops_table(&labels, None, &["label"]).unwrap()
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = MeasureSession::new();
        assert!(session.results().is_none());

        session.set_results(small_table());
        assert_eq!(session.results().unwrap().n_rows(), 2);

        // A second run replaces the first wholesale
        session.set_results(small_table());
        assert_eq!(session.results().unwrap().n_rows(), 2);

        session.clear();
        assert!(session.results().is_none());
    }

    #[test]
    fn test_take_empties_session() {
        let mut session = MeasureSession::new();
        session.set_results(small_table());
        assert!(session.take().is_some());
        assert!(session.take().is_none());
    }

    #[test]
    fn test_retain_selection() {
        let previous = vec![
            "area".to_string(),
            "perimeter".to_string(),
            "intensity_mean".to_string(),
        ];
        let available = vec!["area", "centroid", "intensity_mean"];
        let kept = retain_selection(&previous, &available);
        assert_eq!(kept, vec!["area".to_string(), "intensity_mean".to_string()]);
    }

    #[test]
    fn test_retain_selection_empty_choices() {
        let previous = vec!["area".to_string()];
        assert!(retain_selection(&previous, &[]).is_empty());
    }
}
