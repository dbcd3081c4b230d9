//! Wiring seed sets into test flow.
//!
//! [`SeedSetHandle::attach`] registers create-all/remove-all as suite level
//! hooks of whatever harness implements [`LifecycleHooks`].
//! [`SeedSetHandle::with`] scopes a body between create-all and remove-all.

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::fmt;
use std::future::Future;
use tracing::{debug, info};

use crate::node::SeedNode;
use crate::seed_set::SeedSetHandle;
use crate::SeedResult;

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;

/// A suite level hook.
pub type Hook = Box<dyn FnOnce() -> BoxFuture<'static, SeedResult<()>> + Send>;

/// Suite level hook registration of a test harness.
///
/// Both methods default to dropping the hook, for harnesses that lack the
/// corresponding hook.
pub trait LifecycleHooks {
    /// Registers `hook` to run once before the suite.
    fn before_all(&mut self, hook: Hook) {
        drop(hook);
    }

    /// Registers `hook` to run once after the suite.
    fn after_all(&mut self, hook: Hook) {
        drop(hook);
    }
}

/// Collects hooks and runs them on demand.
///
/// Useful for harnesses without native suite hooks: attach sets to a queue,
/// then call [`HookQueue::run_before_all`] and [`HookQueue::run_after_all`]
/// around the suite.
#[derive(Default)]
pub struct HookQueue {
    before: Vec<Hook>,
    after: Vec<Hook>,
}

impl HookQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_count(&self) -> usize {
        self.before.len()
    }

    pub fn after_count(&self) -> usize {
        self.after.len()
    }

    /// Runs every before-all hook in registration order, stopping at the
    /// first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing hook.
    pub async fn run_before_all(&mut self) -> SeedResult<()> {
        for hook in self.before.drain(..) {
            hook().await?;
        }
        Ok(())
    }

    /// Runs every after-all hook in registration order, stopping at the
    /// first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing hook.
    pub async fn run_after_all(&mut self) -> SeedResult<()> {
        for hook in self.after.drain(..) {
            hook().await?;
        }
        Ok(())
    }
}

impl LifecycleHooks for HookQueue {
    fn before_all(&mut self, hook: Hook) {
        self.before.push(hook);
    }

    fn after_all(&mut self, hook: Hook) {
        self.after.push(hook);
    }
}

impl fmt::Debug for HookQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookQueue")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

/// Removes a set's seeds when the body of [`SeedSetHandle::with_teardown`]
/// decides to.
#[derive(Debug, Clone)]
pub struct Teardown {
    set: SeedSetHandle,
}

impl Teardown {
    /// Runs remove-all on the set.
    ///
    /// # Errors
    ///
    /// See [`crate::SeedSet::remove_all`].
    pub async fn run(self) -> SeedResult<Vec<Value>> {
        self.set.remove_all().await
    }
}

impl SeedSetHandle {
    /// Registers create-all as a before-all hook and remove-all as an
    /// after-all hook. Returns `self` for chaining.
    pub fn attach<H>(&self, hooks: &mut H) -> &Self
    where
        H: LifecycleHooks + ?Sized,
    {
        let set = self.clone();
        hooks.before_all(Box::new(move || {
            async move { set.create_all().await.map(|_| ()) }.boxed()
        }));

        let set = self.clone();
        hooks.after_all(Box::new(move || {
            async move { set.remove_all().await.map(|_| ()) }.boxed()
        }));

        debug!(set = %self.name(), "Attached seed set to suite hooks");
        self
    }

    /// Creates every seed, runs `body` with the materialized values and the
    /// resolved definitions, then removes every seed once `body` settles.
    ///
    /// # Errors
    ///
    /// Returns the create-all error (the body does not run) or the
    /// remove-all error (the body's output is lost).
    pub async fn with<F, Fut, T>(&self, body: F) -> SeedResult<T>
    where
        F: FnOnce(Vec<Value>, Vec<SeedNode>) -> Fut,
        Fut: Future<Output = T>,
    {
        let values = self.create_all().await?;
        let definitions = self.definitions().await;

        info!(set = %self.name(), "Running body with created seeds");
        let output = body(values, definitions).await;

        self.remove_all().await?;
        Ok(output)
    }

    /// Like [`SeedSetHandle::with`], but hands `body` a [`Teardown`] and
    /// leaves removal to it.
    ///
    /// # Errors
    ///
    /// Returns the create-all error; the body does not run.
    pub async fn with_teardown<F, Fut, T>(&self, body: F) -> SeedResult<T>
    where
        F: FnOnce(Vec<Value>, Vec<SeedNode>, Teardown) -> Fut,
        Fut: Future<Output = T>,
    {
        let values = self.create_all().await?;
        let definitions = self.definitions().await;
        let teardown = Teardown { set: self.clone() };

        Ok(body(values, definitions, teardown).await)
    }
}
