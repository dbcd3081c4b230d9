//! The seed set lifecycle engine.
//!
//! A [`SeedSet`] owns an ordered list of seeds and one value slot per seed.
//! Seeds are created and removed one at a time, in index order, and the first
//! failure stops a whole-set operation. Producers inside a seed definition are
//! resolved right before that seed is created, so they can read the values of
//! seeds created earlier in the same pass.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::node::{ProducerContext, SeedNode};
use crate::path::{self, SeedPath};
use crate::resolver;
use crate::seed::{Seed, SeedAction, SeedState};
use crate::{SeedError, SeedResult};
use seeds_endpoint::SeedTransport;

#[cfg(test)]
#[path = "seed_set_tests.rs"]
mod tests;

/// Notification emitted after each seed of a whole-set operation succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SeedProgress<'a> {
    /// Index of the seed that just completed
    pub index: usize,

    /// What was done to it
    pub action: SeedAction,

    /// Value returned by the seeds API
    pub value: &'a Value,
}

/// An ordered set of seeds bound to a transport.
///
/// # Examples
///
/// ```rust,no_run
/// use seeds_core::{SeedNode, SeedSet};
/// use seeds_endpoint::{EndpointConfig, HttpSeedEndpoint};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let endpoint = HttpSeedEndpoint::connect(&EndpointConfig::new("http://localhost:3000/seeds")).await?;
/// let mut set = SeedSet::new(
///     "blog",
///     vec![
///         SeedNode::from(json!({ "type": "user", "data": { "name": "alice" } })),
///         SeedNode::object([
///             ("type", SeedNode::from("post")),
///             ("data", SeedNode::object([("author", SeedNode::reference(0, "id"))])),
///         ]),
///     ],
///     Arc::new(endpoint),
/// );
///
/// set.create_all().await?;
/// let author_id = set.parse(0, "id")?.clone();
/// set.remove_all().await?;
/// # let _ = author_id;
/// # Ok(())
/// # }
/// ```
pub struct SeedSet {
    name: String,
    seeds: Vec<Seed>,
    values: Vec<Option<Value>>,
    transport: Arc<dyn SeedTransport>,
}

impl SeedSet {
    /// Creates a set from definitions. Nothing is resolved or sent yet.
    pub fn new(
        name: impl Into<String>,
        definitions: Vec<SeedNode>,
        transport: Arc<dyn SeedTransport>,
    ) -> Self {
        let seeds: Vec<Seed> = definitions
            .into_iter()
            .enumerate()
            .map(|(index, definition)| Seed::new(index, definition))
            .collect();
        let values = vec![None; seeds.len()];

        Self {
            name: name.into(),
            seeds,
            values,
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn seed(&self, index: usize) -> Option<&Seed> {
        self.seeds.get(index)
    }

    pub fn seeds(&self) -> &[Seed] {
        &self.seeds
    }

    /// Lifecycle state of the seed at `index`.
    pub fn state(&self, index: usize) -> Option<SeedState> {
        self.seeds.get(index).map(Seed::state)
    }

    /// One slot per seed, `None` until that seed has been created.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// Materialized value of the seed at `index`.
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Current definitions, with producers of already created seeds resolved.
    pub fn definitions(&self) -> Vec<SeedNode> {
        self.seeds.iter().map(|s| s.definition().clone()).collect()
    }

    fn check_index(&self, index: usize) -> SeedResult<()> {
        if index >= self.seeds.len() {
            warn!(set = %self.name, index, len = self.seeds.len(), "Unknown seed index");
            return Err(SeedError::seed_index(index));
        }
        Ok(())
    }

    /// Creates the seed at `index`.
    ///
    /// Resolves the seed's producers against the current values, replaces the
    /// stored definition with the resolved tree, then posts
    /// `{ data, value, config }` to `<type>/create`. The returned value is
    /// stored in the seed's slot and returned unchanged.
    ///
    /// # Errors
    ///
    /// - `SeedError::NotFound` if `index` is out of range
    /// - any error raised by a producer
    /// - `SeedError::InvalidOperation` if the definition has no `type`
    /// - `SeedError::Transport` if the seeds API call fails
    pub async fn create(&mut self, index: usize) -> SeedResult<Value> {
        self.check_index(index)?;
        self.seeds[index].set_state(SeedState::Creating);

        match self.try_create(index).await {
            Ok(value) => {
                self.seeds[index].set_state(SeedState::Created);
                Ok(value)
            }
            Err(e) => {
                self.seeds[index].set_state(SeedState::Failed);
                error!(set = %self.name, index, error = %e, "Failed to create seed");
                Err(e)
            }
        }
    }

    async fn try_create(&mut self, index: usize) -> SeedResult<Value> {
        let resolved = {
            let ctx = ProducerContext {
                index,
                values: &self.values,
                seeds: &self.seeds,
            };
            resolver::resolve(self.seeds[index].definition(), &ctx)?
        };
        self.seeds[index].set_definition(resolved);
        debug!(set = %self.name, index, "Resolved seed definition");

        let seed = &self.seeds[index];
        let path = seed.request_path(SeedAction::Create)?;
        let payload = seed.payload(self.values[index].as_ref())?;

        info!(set = %self.name, index, path = %path, "Creating seed");
        let value = self.transport.request(&path, &payload).await?;

        self.values[index] = Some(value.clone());
        Ok(value)
    }

    /// Creates every seed, in index order, one at a time.
    ///
    /// # Errors
    ///
    /// Returns the error of the first seed that fails; later seeds are not
    /// attempted and earlier seeds are left in place.
    pub async fn create_all(&mut self) -> SeedResult<Vec<Value>> {
        self.create_all_with_progress(|_| {}).await
    }

    /// Same as [`SeedSet::create_all`], calling `on_progress` as soon as
    /// each seed has been created.
    ///
    /// # Errors
    ///
    /// See [`SeedSet::create_all`].
    pub async fn create_all_with_progress<F>(&mut self, mut on_progress: F) -> SeedResult<Vec<Value>>
    where
        F: FnMut(SeedProgress<'_>),
    {
        info!(set = %self.name, count = self.seeds.len(), "Creating all seeds");

        let mut created = Vec::with_capacity(self.seeds.len());
        for index in 0..self.seeds.len() {
            let value = self.create(index).await?;
            on_progress(SeedProgress {
                index,
                action: SeedAction::Create,
                value: &value,
            });
            created.push(value);
        }

        info!(set = %self.name, count = created.len(), "All seeds created");
        Ok(created)
    }

    /// Removes the seed at `index`.
    ///
    /// Posts `{ data, value, config }` to `<type>/remove`. The value slot is
    /// left as it is. Producers that were never resolved, e.g. on seeds after
    /// a failed `create_all`, are left out of the request.
    ///
    /// # Errors
    ///
    /// - `SeedError::NotFound` if `index` is out of range
    /// - `SeedError::InvalidOperation` if the definition has no `type`
    /// - `SeedError::Transport` if the seeds API call fails
    pub async fn remove(&mut self, index: usize) -> SeedResult<Value> {
        self.check_index(index)?;

        let seed = &self.seeds[index];
        let path = seed.request_path(SeedAction::Remove)?;
        let payload = seed.remove_payload(self.values[index].as_ref());

        info!(set = %self.name, index, path = %path, "Removing seed");
        let result = self.transport.request(&path, &payload).await.map_err(|e| {
            error!(set = %self.name, index, error = %e, "Failed to remove seed");
            SeedError::from(e)
        })?;

        if self.seeds[index].state() == SeedState::Created {
            self.seeds[index].set_state(SeedState::Removed);
        }
        Ok(result)
    }

    /// Removes every seed, in the same forward order used for creation.
    ///
    /// # Errors
    ///
    /// Returns the error of the first seed that fails; later seeds are not
    /// attempted.
    pub async fn remove_all(&mut self) -> SeedResult<Vec<Value>> {
        self.remove_all_with_progress(|_| {}).await
    }

    /// Same as [`SeedSet::remove_all`], calling `on_progress` after each seed.
    ///
    /// # Errors
    ///
    /// See [`SeedSet::remove_all`].
    pub async fn remove_all_with_progress<F>(&mut self, mut on_progress: F) -> SeedResult<Vec<Value>>
    where
        F: FnMut(SeedProgress<'_>),
    {
        info!(set = %self.name, count = self.seeds.len(), "Removing all seeds");

        let mut removed = Vec::with_capacity(self.seeds.len());
        for index in 0..self.seeds.len() {
            let result = self.remove(index).await?;
            on_progress(SeedProgress {
                index,
                action: SeedAction::Remove,
                value: &result,
            });
            removed.push(result);
        }

        info!(set = %self.name, count = removed.len(), "All seeds removed");
        Ok(removed)
    }

    /// Reads a deep value out of the materialized value of seed `index`.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::NotFound` if the seed has not been created or the
    /// path does not exist in its value.
    pub fn parse(&self, index: usize, path: impl Into<SeedPath>) -> SeedResult<&Value> {
        let value = self.value(index).ok_or_else(|| SeedError::seed_index(index))?;
        path::extract(value, &path.into())
    }

    /// Clears every value slot and returns every seed to `Uncreated`.
    ///
    /// Definitions keep whatever producers were already resolved.
    pub fn reset(&mut self) {
        debug!(set = %self.name, "Resetting seed values");
        for slot in &mut self.values {
            *slot = None;
        }
        for seed in &mut self.seeds {
            seed.set_state(SeedState::Uncreated);
        }
    }
}

impl fmt::Debug for SeedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedSet")
            .field("name", &self.name)
            .field("seeds", &self.seeds)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a live [`SeedSet`].
///
/// Handles are what the registry stores and what test hooks capture. All
/// operations on one set are serialized through its lock.
#[derive(Clone)]
pub struct SeedSetHandle {
    name: Arc<str>,
    inner: Arc<Mutex<SeedSet>>,
}

impl SeedSetHandle {
    pub fn new(set: SeedSet) -> Self {
        Self {
            name: Arc::from(set.name()),
            inner: Arc::new(Mutex::new(set)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locks the set for direct access, e.g. for progress callbacks.
    pub async fn lock(&self) -> MutexGuard<'_, SeedSet> {
        self.inner.lock().await
    }

    /// Whether both handles point at the same set.
    pub fn same_set(&self, other: &SeedSetHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// See [`SeedSet::create`].
    ///
    /// # Errors
    ///
    /// See [`SeedSet::create`].
    pub async fn create(&self, index: usize) -> SeedResult<Value> {
        self.inner.lock().await.create(index).await
    }

    /// See [`SeedSet::create_all`].
    ///
    /// # Errors
    ///
    /// See [`SeedSet::create_all`].
    pub async fn create_all(&self) -> SeedResult<Vec<Value>> {
        self.inner.lock().await.create_all().await
    }

    /// See [`SeedSet::remove`].
    ///
    /// # Errors
    ///
    /// See [`SeedSet::remove`].
    pub async fn remove(&self, index: usize) -> SeedResult<Value> {
        self.inner.lock().await.remove(index).await
    }

    /// See [`SeedSet::remove_all`].
    ///
    /// # Errors
    ///
    /// See [`SeedSet::remove_all`].
    pub async fn remove_all(&self) -> SeedResult<Vec<Value>> {
        self.inner.lock().await.remove_all().await
    }

    /// Owned copy of a deep value; see [`SeedSet::parse`].
    ///
    /// # Errors
    ///
    /// See [`SeedSet::parse`].
    pub async fn parse(&self, index: usize, path: impl Into<SeedPath>) -> SeedResult<Value> {
        self.inner.lock().await.parse(index, path).cloned()
    }

    /// Snapshot of every value slot.
    pub async fn values(&self) -> Vec<Option<Value>> {
        self.inner.lock().await.values().to_vec()
    }

    /// Snapshot of every definition.
    pub async fn definitions(&self) -> Vec<SeedNode> {
        self.inner.lock().await.definitions()
    }
}

impl fmt::Debug for SeedSetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedSetHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
