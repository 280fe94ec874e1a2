//! Resolving the generation API key.
//!
//! Order: configured key, stored key, then one prompt. A prompted key is
//! persisted for reuse; declining the prompt yields no key.

use lab_store::{CredentialStore, StoreError};

/// Asks the user for an API key.
pub trait CredentialPrompt {
    /// `None` when the user declines.
    fn request(&mut self) -> Option<String>;
}

/// Prompt that always answers the same way.
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt {
    answer: Option<String>,
    asked: usize,
}

impl FixedPrompt {
    #[must_use]
    pub fn answering(key: impl Into<String>) -> Self {
        Self {
            answer: Some(key.into()),
            asked: 0,
        }
    }

    #[must_use]
    pub const fn declining() -> Self {
        Self {
            answer: None,
            asked: 0,
        }
    }

    #[must_use]
    pub const fn times_asked(&self) -> usize {
        self.asked
    }
}

impl CredentialPrompt for FixedPrompt {
    fn request(&mut self) -> Option<String> {
        self.asked += 1;
        self.answer.clone()
    }
}

/// Key lookup over configuration and a [`CredentialStore`].
pub struct KeyResolver<'a> {
    configured: Option<&'a str>,
    store: &'a dyn CredentialStore,
}

impl<'a> KeyResolver<'a> {
    /// `configured` is ignored when blank.
    #[must_use]
    pub fn new(configured: Option<&'a str>, store: &'a dyn CredentialStore) -> Self {
        Self {
            configured: configured.map(str::trim).filter(|k| !k.is_empty()),
            store,
        }
    }

    /// Find a key, prompting once if none is configured or stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credential`] if a prompted key cannot be stored.
    pub fn resolve(&self, prompt: &mut dyn CredentialPrompt) -> Result<Option<String>, StoreError> {
        if let Some(key) = self.configured {
            return Ok(Some(key.to_string()));
        }
        if let Some(key) = self.store.load() {
            return Ok(Some(key));
        }
        let Some(key) = prompt
            .request()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
        else {
            return Ok(None);
        };
        self.store.store(&key)?;
        Ok(Some(key))
    }

    /// Discard the stored key after the service rejected it. A configured key
    /// lives outside the store and is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Credential`] if the store cannot delete it.
    pub fn discard(&self) -> Result<(), StoreError> {
        if self.configured.is_some() {
            tracing::warn!("configured API key was rejected; update the configuration");
            return Ok(());
        }
        self.store.delete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_store::MemoryCredentialStore;

    #[test]
    fn configured_key_wins_without_prompting() {
        let store = MemoryCredentialStore::with_secret("stored");
        let mut prompt = FixedPrompt::answering("typed");
        let key = KeyResolver::new(Some("configured"), &store)
            .resolve(&mut prompt)
            .unwrap();
        assert_eq!(key.as_deref(), Some("configured"));
        assert_eq!(prompt.times_asked(), 0);
    }

    #[test]
    fn blank_configured_key_defers_to_store() {
        let store = MemoryCredentialStore::with_secret("stored");
        let key = KeyResolver::new(Some("  "), &store)
            .resolve(&mut FixedPrompt::declining())
            .unwrap();
        assert_eq!(key.as_deref(), Some("stored"));
    }

    #[test]
    fn prompted_key_is_trimmed_and_persisted() {
        let store = MemoryCredentialStore::default();
        let mut prompt = FixedPrompt::answering("  typed \n");
        let resolver = KeyResolver::new(None, &store);
        assert_eq!(resolver.resolve(&mut prompt).unwrap().as_deref(), Some("typed"));
        assert_eq!(store.load().as_deref(), Some("typed"));

        // Second lookup reuses the stored key.
        assert_eq!(resolver.resolve(&mut prompt).unwrap().as_deref(), Some("typed"));
        assert_eq!(prompt.times_asked(), 1);
    }

    #[test]
    fn declined_or_blank_prompt_yields_none() {
        let store = MemoryCredentialStore::default();
        let resolver = KeyResolver::new(None, &store);
        assert!(resolver.resolve(&mut FixedPrompt::declining()).unwrap().is_none());
        assert!(resolver.resolve(&mut FixedPrompt::answering("   ")).unwrap().is_none());
        assert!(store.load().is_none());
    }

    #[test]
    fn discard_only_touches_the_store() {
        let store = MemoryCredentialStore::with_secret("stored");
        KeyResolver::new(Some("configured"), &store).discard().unwrap();
        assert_eq!(store.load().as_deref(), Some("stored"));
        KeyResolver::new(None, &store).discard().unwrap();
        assert!(store.load().is_none());
    }
}
