use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use regex::Regex;

/// Compiled `pattern` rule parameters, keyed by regex source.
///
/// Shared by a model and every model derived from it.
#[derive(Default)]
pub(crate) struct PatternCache {
    cache: RwLock<HashMap<String, Regex>>,
}

impl PatternCache {
    fn read_cache(&self) -> RwLockReadGuard<'_, HashMap<String, Regex>> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, HashMap<String, Regex>> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load a compiled regex or compile and cache a new one.
    pub fn load_or_compile(&self, source: &str) -> Result<Regex, regex::Error> {
        if let Some(re) = self.read_cache().get(source) {
            return Ok(re.clone());
        }

        let re = Regex::new(source)?;
        self.write_cache()
            .entry(source.to_string())
            .or_insert_with(|| re.clone());
        Ok(re)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.read_cache().len()
    }
}
