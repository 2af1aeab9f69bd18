//! Label table

use indexmap::IndexMap;

use crate::error::ErrorKind;

/// Label name -> address, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: IndexMap<String, u16>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `addr`. A name may only be bound once.
    pub fn define(&mut self, name: &str, addr: u16) -> Result<(), ErrorKind> {
        if self.labels.contains_key(name) {
            return Err(ErrorKind::DuplicateLabel(name.to_string()));
        }
        self.labels.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
