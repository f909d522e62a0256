use bevy::prelude::*;

use super::overlay_manifest::ModelEntry;
use crate::error::OverlayError;

/// Navigation over the manifest's models. Selection wraps at both ends.
#[derive(Resource, Debug, Clone, Default)]
pub struct ModelCatalogue {
    entries: Vec<ModelEntry>,
    selected: Option<usize>,
}

impl ModelCatalogue {
    pub fn new(entries: Vec<ModelEntry>) -> Self {
        Self {
            entries,
            selected: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn entry(&self, index: usize) -> Option<&ModelEntry> {
        self.entries.get(index)
    }

    pub fn select(&mut self, index: usize) -> Result<usize, OverlayError> {
        if index >= self.entries.len() {
            return Err(OverlayError::ModelIndexOutOfRange(index));
        }
        self.selected = Some(index);
        Ok(index)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn previous(&mut self) -> Option<usize> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<usize> {
        let len = self.entries.len() as isize;
        if len == 0 {
            return None;
        }
        let index = match self.selected {
            Some(current) => (current as isize + delta).rem_euclid(len) as usize,
            None => 0,
        };
        self.selected = Some(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue(n: usize) -> ModelCatalogue {
        ModelCatalogue::new(
            (0..n)
                .map(|i| ModelEntry {
                    name: format!("model {i}"),
                    path: format!("models/{i}.glb"),
                    style: None,
                })
                .collect(),
        )
    }

    #[test]
    fn navigation_wraps() {
        let mut c = catalogue(3);
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.previous(), Some(2));
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.next(), Some(1));
    }

    #[test]
    fn empty_catalogue_has_nothing_to_select() {
        let mut c = catalogue(0);
        assert_eq!(c.next(), None);
        assert_eq!(c.previous(), None);
        assert!(c.select(0).is_err());
    }

    #[test]
    fn select_checks_range() {
        let mut c = catalogue(2);
        assert_eq!(c.select(1).unwrap(), 1);
        assert!(matches!(c.select(2), Err(OverlayError::ModelIndexOutOfRange(2))));
        assert_eq!(c.selected(), Some(1));
    }
}
