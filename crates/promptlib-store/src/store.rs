use std::collections::HashSet;

use chrono::Utc;

use crate::error::StoreError;
use crate::storage::KeyValueStorage;
use crate::types::{NewSavedPrompt, SavedPrompt, SavedPromptUpdate};

/// Storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "promptlib:saved-prompts";

/// The value produced by a mutating operation, plus the outcome of writing
/// the collection back to storage.
///
/// A failed write does not undo the in-memory change.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub write: Result<(), StoreError>,
}

impl<T> Persisted<T> {
    fn new(value: T, write: Result<(), StoreError>) -> Self {
        Self { value, write }
    }

    /// Whether the change reached storage.
    pub fn is_durable(&self) -> bool {
        self.write.is_ok()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// The user's saved prompts, most recent first.
///
/// The store owns the collection and is the only writer of [`STORAGE_KEY`].
pub struct SavedPromptStore<S: KeyValueStorage> {
    storage: S,
    prompts: Vec<SavedPrompt>,
    load_error: Option<StoreError>,
}

impl<S: KeyValueStorage> SavedPromptStore<S> {
    /// Open the store, adopting whatever collection `storage` holds.
    ///
    /// An unreadable or malformed slot yields an empty store; the reason is
    /// kept in [`load_error`](Self::load_error).
    pub fn open(storage: S) -> Self {
        let (prompts, load_error) = match Self::load(&storage) {
            Ok(prompts) => (prompts, None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load saved prompts, starting empty");
                (Vec::new(), Some(e))
            }
        };

        tracing::debug!(count = prompts.len(), "Opened saved prompt store");

        Self {
            storage,
            prompts,
            load_error,
        }
    }

    fn load(storage: &S) -> Result<Vec<SavedPrompt>, StoreError> {
        match storage.get_item(STORAGE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Why the initial load fell back to an empty collection, if it did.
    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Save a new prompt at the front of the collection.
    pub fn add(&mut self, new: NewSavedPrompt) -> Persisted<SavedPrompt> {
        let prompt = SavedPrompt {
            id: uuid::Uuid::new_v4().to_string(),
            name: new.name,
            prompt: new.prompt,
            negative_prompt: new.negative_prompt,
            aspect_ratio: new.aspect_ratio,
            category: new.category,
            timestamp: Utc::now().timestamp_millis(),
        };

        self.prompts.insert(0, prompt.clone());
        tracing::debug!(id = %prompt.id, "Saved prompt added");

        Persisted::new(prompt, self.persist())
    }

    /// Snapshot of every saved prompt in current order.
    pub fn get_all(&self) -> Vec<SavedPrompt> {
        self.prompts.clone()
    }

    pub fn get(&self, id: &str) -> Option<SavedPrompt> {
        self.prompts.iter().find(|p| p.id == id).cloned()
    }

    /// Prompts whose category is exactly `category`.
    pub fn get_by_category(&self, category: &str) -> Vec<SavedPrompt> {
        self.prompts
            .iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .cloned()
            .collect()
    }

    /// Remove the prompt with `id`. Storage is only written when something
    /// was removed.
    pub fn delete(&mut self, id: &str) -> Persisted<bool> {
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);

        if self.prompts.len() == before {
            return Persisted::new(false, Ok(()));
        }

        tracing::debug!(id = %id, "Saved prompt deleted");
        Persisted::new(true, self.persist())
    }

    /// Merge `changes` into the prompt with `id`.
    pub fn update(
        &mut self,
        id: &str,
        changes: SavedPromptUpdate,
    ) -> Result<Persisted<SavedPrompt>, StoreError> {
        let Some(prompt) = self.prompts.iter_mut().find(|p| p.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        changes.apply_to(prompt);
        let updated = prompt.clone();
        tracing::debug!(id = %id, "Saved prompt updated");

        Ok(Persisted::new(updated, self.persist()))
    }

    /// Remove every saved prompt.
    pub fn clear(&mut self) -> Persisted<()> {
        self.prompts.clear();
        tracing::debug!("Saved prompts cleared");
        Persisted::new((), self.persist())
    }

    /// Case-insensitive match on name, prompt text, or category.
    ///
    /// An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<SavedPrompt> {
        let needle = query.to_lowercase();

        self.prompts
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.prompt.to_lowercase().contains(&needle)
                    || p
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Pretty-printed JSON of the whole collection.
    pub fn export(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.prompts)?)
    }

    /// Prepend the prompts in a JSON array to the collection.
    ///
    /// Anything other than a JSON array of saved prompts is rejected without
    /// touching the collection. An imported prompt whose id is already taken
    /// gets a fresh id and keeps its other fields. Returns the number of
    /// imported prompts.
    pub fn import(&mut self, payload: &str) -> Result<Persisted<usize>, StoreError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        if !value.is_array() {
            return Err(StoreError::NotAList);
        }
        let mut imported: Vec<SavedPrompt> = serde_json::from_value(value)?;
        let count = imported.len();

        let mut taken: HashSet<String> = self.prompts.iter().map(|p| p.id.clone()).collect();
        let mut reassigned = 0;
        for prompt in imported.iter_mut() {
            if !taken.insert(prompt.id.clone()) {
                prompt.id = uuid::Uuid::new_v4().to_string();
                taken.insert(prompt.id.clone());
                reassigned += 1;
            }
        }
        if reassigned > 0 {
            tracing::debug!(reassigned = reassigned, "Reassigned colliding ids on import");
        }

        imported.append(&mut self.prompts);
        self.prompts = imported;
        tracing::info!(count = count, total = self.prompts.len(), "Imported saved prompts");

        Ok(Persisted::new(count, self.persist()))
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let result = serde_json::to_string(&self.prompts)
            .map_err(StoreError::from)
            .and_then(|raw| {
                self.storage
                    .set_item(STORAGE_KEY, &raw)
                    .map_err(StoreError::from)
            });

        if let Err(ref e) = result {
            tracing::warn!(
                error = %e,
                count = self.prompts.len(),
                "Failed to persist saved prompts"
            );
        }

        result
    }
}
