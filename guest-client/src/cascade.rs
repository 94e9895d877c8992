//! Cascading dependent-selector protocol
//!
//! One chain drives every dependent-dropdown occurrence (branch → area →
//! table in the QR and request dialogs, category → subcategory in the
//! product dialogs). Invariant: picking a value at level k clears every
//! deeper level's value and options before any refetch resolves, and a
//! level's control is disabled until its parent has a value.
//!
//! Each link carries an epoch counter; a reset or a newer fetch bumps it,
//! and a resolving fetch applies its result only if the epoch it captured
//! is still current. Stale responses are discarded silently.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::SelectOption;

use crate::notify::{Notifier, TracingNotifier};
use crate::ClientResult;

/// Scoped option lookup for one chain level.
///
/// `parent` is the selected value of the level above, `None` for the root
/// level. Implemented by the API adapters (areas by branch, units by area,
/// subcategories by category).
#[async_trait]
pub trait OptionSource: Send + Sync {
    async fn fetch(&self, parent: Option<&str>) -> ClientResult<Vec<SelectOption>>;
}

/// State of one chain level
#[derive(Debug, Clone, Default)]
pub struct ChainLink {
    pub value: Option<String>,
    pub options: Vec<SelectOption>,
    pub loading: bool,
    epoch: u64,
}

struct ChainInner {
    links: RwLock<Vec<ChainLink>>,
    sources: Vec<Arc<dyn OptionSource>>,
    notifier: Arc<dyn Notifier>,
}

/// A chain of dependent select controls; clones share state
#[derive(Clone)]
pub struct SelectChain {
    inner: Arc<ChainInner>,
}

impl SelectChain {
    /// Build a chain from ordered sources, root level first
    pub fn new(sources: Vec<Arc<dyn OptionSource>>) -> Self {
        Self::with_notifier(sources, Arc::new(TracingNotifier))
    }

    pub fn with_notifier(sources: Vec<Arc<dyn OptionSource>>, notifier: Arc<dyn Notifier>) -> Self {
        let links = sources.iter().map(|_| ChainLink::default()).collect();
        Self {
            inner: Arc::new(ChainInner {
                links: RwLock::new(links),
                sources,
                notifier,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.sources.is_empty()
    }

    /// Snapshot of one level's state
    pub fn link(&self, level: usize) -> Option<ChainLink> {
        self.inner.links.read().get(level).cloned()
    }

    /// Selected value at a level
    pub fn value(&self, level: usize) -> Option<String> {
        self.inner.links.read().get(level).and_then(|l| l.value.clone())
    }

    /// A control is enabled when its parent has a value (root is always
    /// enabled). Disabled, not merely empty: a table cannot be picked
    /// without an area.
    pub fn is_enabled(&self, level: usize) -> bool {
        if level == 0 {
            return true;
        }
        self.inner
            .links
            .read()
            .get(level - 1)
            .is_some_and(|parent| parent.value.is_some())
    }

    /// Record a selection (or a clear, with `None`) at a level and reset
    /// everything below it. Runs synchronously: the cascade reset is
    /// observable before any refetch resolves.
    pub fn set_value(&self, level: usize, value: Option<String>) {
        let mut links = self.inner.links.write();
        if level >= links.len() {
            return;
        }
        links[level].value = value;
        for link in links.iter_mut().skip(level + 1) {
            link.value = None;
            link.options.clear();
            link.loading = false;
            link.epoch += 1;
        }
    }

    /// Select a value at a level
    pub fn select(&self, level: usize, value: impl Into<String>) {
        self.set_value(level, Some(value.into()));
    }

    /// Clear a level's selection; descendants become disabled
    pub fn clear(&self, level: usize) {
        self.set_value(level, None);
    }

    /// Fetch options for one level, scoped to the current parent value.
    ///
    /// Does nothing while the control is disabled. A result is applied only
    /// if no reset or newer load happened in the meantime; stale responses
    /// are dropped without any user-visible effect. Fetch failures leave the
    /// options empty, surface a notification, and propagate the error; the
    /// user retries by re-selecting the parent.
    pub async fn load_options(&self, level: usize) -> ClientResult<()> {
        let (parent, epoch) = {
            let mut links = self.inner.links.write();
            if level >= links.len() {
                return Ok(());
            }
            let parent = if level == 0 {
                None
            } else {
                match links[level - 1].value.clone() {
                    Some(v) => Some(v),
                    // parent not chosen yet: control stays disabled
                    None => return Ok(()),
                }
            };
            links[level].epoch += 1;
            links[level].options.clear();
            links[level].loading = true;
            (parent, links[level].epoch)
        };

        let result = self.inner.sources[level].fetch(parent.as_deref()).await;

        let mut links = self.inner.links.write();
        if links[level].epoch != epoch {
            // A reset or newer load superseded this fetch
            tracing::debug!(level, "discarding stale option fetch");
            return Ok(());
        }
        links[level].loading = false;

        match result {
            Ok(options) => {
                links[level].options = options;
                Ok(())
            }
            Err(e) => {
                drop(links);
                self.inner
                    .notifier
                    .notify("Failed to load options", &e.to_string());
                Err(e)
            }
        }
    }

    /// Full parent-change transition: record the new value, reset the
    /// descendants, then refetch the immediate child's options.
    pub async fn change(&self, level: usize, value: impl Into<String>) -> ClientResult<()> {
        self.select(level, value);
        if level + 1 < self.len() {
            self.load_options(level + 1).await?;
        }
        Ok(())
    }

    /// Inline-create support: append a freshly created entity to a level's
    /// options and select it without a refetch (no flicker), cascading the
    /// reset below as any selection does. Supersedes any fetch still in
    /// flight for this level, so a late response cannot erase the entry.
    pub fn append_and_select(&self, level: usize, option: SelectOption) {
        {
            let mut links = self.inner.links.write();
            if level >= links.len() {
                return;
            }
            links[level].options.push(option.clone());
            links[level].epoch += 1;
            links[level].loading = false;
        }
        self.set_value(level, Some(option.value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use shared::RemoteFailure;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Source serving canned options per parent, with optional per-parent delay
    struct StubSource {
        by_parent: HashMap<Option<String>, Vec<SelectOption>>,
        delays: HashMap<String, Duration>,
        fail: bool,
    }

    impl StubSource {
        fn new(entries: &[(Option<&str>, &[(&str, &str)])]) -> Self {
            let by_parent = entries
                .iter()
                .map(|(parent, opts)| {
                    (
                        parent.map(|s| s.to_string()),
                        opts.iter()
                            .map(|(v, l)| SelectOption::new(*v, *l))
                            .collect(),
                    )
                })
                .collect();
            Self {
                by_parent,
                delays: HashMap::new(),
                fail: false,
            }
        }

        fn with_delay(mut self, parent: &str, delay: Duration) -> Self {
            self.delays.insert(parent.to_string(), delay);
            self
        }

        fn failing() -> Self {
            Self {
                by_parent: HashMap::new(),
                delays: HashMap::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl OptionSource for StubSource {
        async fn fetch(&self, parent: Option<&str>) -> ClientResult<Vec<SelectOption>> {
            if let Some(delay) = parent.and_then(|p| self.delays.get(p)) {
                tokio::time::sleep(*delay).await;
            }
            if self.fail {
                return Err(ClientError::Remote(RemoteFailure::new(
                    500,
                    "INTERNAL",
                    "option fetch failed",
                )));
            }
            Ok(self
                .by_parent
                .get(&parent.map(|s| s.to_string()))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn branch_area_table_chain() -> SelectChain {
        let branches = StubSource::new(&[(None, &[("b1", "Main"), ("b2", "North")])]);
        let areas = StubSource::new(&[
            (Some("b1"), &[("a1", "Hall"), ("a2", "Terrace")]),
            (Some("b2"), &[("a3", "Rooftop")]),
        ]);
        let tables = StubSource::new(&[
            (Some("a1"), &[("t1", "Table 1")]),
            (Some("a3"), &[("t9", "Table 9")]),
        ]);
        SelectChain::new(vec![
            Arc::new(branches),
            Arc::new(areas),
            Arc::new(tables),
        ])
    }

    #[tokio::test]
    async fn test_enable_follows_parent_value() {
        let chain = branch_area_table_chain();
        assert!(chain.is_enabled(0));
        assert!(!chain.is_enabled(1));
        assert!(!chain.is_enabled(2));

        chain.select(0, "b1");
        assert!(chain.is_enabled(1));
        assert!(!chain.is_enabled(2));
    }

    #[tokio::test]
    async fn test_parent_change_resets_descendants_before_refetch() {
        let chain = branch_area_table_chain();
        chain.change(0, "b1").await.unwrap();
        chain.change(1, "a1").await.unwrap();
        chain.select(2, "t1");

        assert_eq!(chain.value(2).as_deref(), Some("t1"));
        assert_eq!(chain.link(2).unwrap().options.len(), 1);

        // Reset must be observable synchronously, before any refetch
        chain.select(0, "b2");
        assert_eq!(chain.value(1), None);
        assert_eq!(chain.value(2), None);
        assert!(chain.link(1).unwrap().options.is_empty());
        assert!(chain.link(2).unwrap().options.is_empty());
        assert!(!chain.is_enabled(2));
    }

    #[tokio::test]
    async fn test_clearing_parent_disables_descendants() {
        let chain = branch_area_table_chain();
        chain.change(0, "b1").await.unwrap();
        chain.change(1, "a1").await.unwrap();

        chain.clear(0);
        assert!(!chain.is_enabled(1));
        assert!(!chain.is_enabled(2));
        assert!(chain.link(1).unwrap().options.is_empty());
    }

    #[tokio::test]
    async fn test_load_options_without_parent_is_noop() {
        let chain = branch_area_table_chain();
        chain.load_options(1).await.unwrap();
        assert!(chain.link(1).unwrap().options.is_empty());
        assert!(!chain.link(1).unwrap().loading);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let branches = StubSource::new(&[(None, &[("P1", "One"), ("P2", "Two")])]);
        let areas = StubSource::new(&[
            (Some("P1"), &[("old1", "Old 1")]),
            (Some("P2"), &[("new1", "New 1"), ("new2", "New 2")]),
        ])
        .with_delay("P1", Duration::from_millis(80))
        .with_delay("P2", Duration::from_millis(10));
        let chain = SelectChain::new(vec![Arc::new(branches), Arc::new(areas)]);

        chain.select(0, "P1");
        let slow = {
            let chain = chain.clone();
            tokio::spawn(async move { chain.load_options(1).await })
        };
        // Let the P1 fetch get in flight, then switch the parent
        tokio::time::sleep(Duration::from_millis(20)).await;
        chain.select(0, "P2");
        chain.load_options(1).await.unwrap();
        slow.await.unwrap().unwrap();

        let options = chain.link(1).unwrap().options;
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["new1", "new2"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_options_empty_and_notifies() {
        #[derive(Default)]
        struct RecordingNotifier {
            messages: Mutex<Vec<(String, String)>>,
        }
        impl Notifier for RecordingNotifier {
            fn notify(&self, title: &str, description: &str) {
                self.messages
                    .lock()
                    .unwrap()
                    .push((title.to_string(), description.to_string()));
            }
        }

        let notifier = Arc::new(RecordingNotifier::default());
        let chain = SelectChain::with_notifier(
            vec![Arc::new(StubSource::failing())],
            notifier.clone(),
        );

        let result = chain.load_options(0).await;
        assert!(result.is_err());

        let link = chain.link(0).unwrap();
        assert!(link.options.is_empty());
        assert!(!link.loading);
        assert_eq!(notifier.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_inline_create_supersedes_in_flight_fetch() {
        let branches = StubSource::new(&[(None, &[("b1", "Main")])]);
        let areas = StubSource::new(&[(Some("b1"), &[("a1", "Hall")])])
            .with_delay("b1", Duration::from_millis(60));
        let chain = SelectChain::new(vec![Arc::new(branches), Arc::new(areas)]);

        chain.select(0, "b1");
        let in_flight = {
            let chain = chain.clone();
            tokio::spawn(async move { chain.load_options(1).await })
        };
        // Fetch is pending when the operator completes the inline create
        tokio::time::sleep(Duration::from_millis(20)).await;
        chain.append_and_select(1, SelectOption::new("a-new", "Patio"));
        in_flight.await.unwrap().unwrap();

        // The late response must not erase the created, selected entry
        let link = chain.link(1).unwrap();
        assert_eq!(link.value.as_deref(), Some("a-new"));
        assert!(
            link.options.iter().any(|o| o.value == "a-new"),
            "selected value missing from options: {:?}",
            link.options
        );
        assert!(!link.loading);
    }

    #[tokio::test]
    async fn test_append_and_select_after_inline_create() {
        let chain = branch_area_table_chain();
        chain.change(0, "b1").await.unwrap();
        chain.change(1, "a1").await.unwrap();
        chain.select(2, "t1");

        // Inline "new area" creation: appended and selected without refetch
        chain.append_and_select(1, SelectOption::new("a-new", "Patio"));

        let link = chain.link(1).unwrap();
        assert_eq!(link.value.as_deref(), Some("a-new"));
        assert_eq!(link.options.len(), 3);
        // Selection cascades: the table picked under the old area is gone
        assert_eq!(chain.value(2), None);
        assert!(chain.link(2).unwrap().options.is_empty());
    }
}
