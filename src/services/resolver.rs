use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread;

use tracing::{debug, warn};

use crate::domain::{DisplayItem, ItemId, RankedItem};
use crate::sources::ItemSource;

/// Fans item lookups out over scoped worker threads and collects the
/// stories among them. Every lookup runs to completion before `resolve`
/// returns. The calling thread is one of the workers, so a run still
/// completes when the OS refuses to start more threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    concurrency: Option<NonZeroUsize>,
}

impl Resolver {
    pub fn new(concurrency: Option<NonZeroUsize>) -> Self {
        Self { concurrency }
    }

    /// One worker per candidate. A full Hacker News listing is about 500
    /// ids, hence as many threads per refresh; cap it with [`Resolver::new`]
    /// where that is too many.
    pub fn unbounded() -> Self {
        Self { concurrency: None }
    }

    fn worker_count(&self, tasks: usize) -> usize {
        match self.concurrency {
            Some(limit) => limit.get().min(tasks),
            None => tasks,
        }
    }

    /// Resolve every id and return the ranked stories in completion order.
    pub fn resolve<I>(
        &self,
        source: &I,
        ids: &[ItemId],
        order: &HashMap<ItemId, usize>,
    ) -> Vec<RankedItem>
    where
        I: ItemSource + ?Sized,
    {
        if ids.is_empty() {
            return Vec::new();
        }

        let workers = self.worker_count(ids.len());
        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();

        debug!(tasks = ids.len(), workers, "resolving items");

        thread::scope(|scope| {
            let next = &next;
            let mut spawned = 0;

            for n in 1..workers {
                let tx = tx.clone();
                let result = thread::Builder::new()
                    .name(format!("resolver-{}", n))
                    .spawn_scoped(scope, move || drain(source, ids, order, next, tx));

                match result {
                    Ok(_) => spawned += 1,
                    Err(e) => {
                        warn!(error = %e, spawned, "could not start resolver worker");
                        break;
                    }
                }
            }

            drain(source, ids, order, next, tx.clone());
        });
        drop(tx);

        rx.iter().take(ids.len()).flatten().collect()
    }
}

/// Claim candidates from the shared cursor until none are left.
fn drain<I>(
    source: &I,
    ids: &[ItemId],
    order: &HashMap<ItemId, usize>,
    next: &AtomicUsize,
    tx: Sender<Option<RankedItem>>,
) where
    I: ItemSource + ?Sized,
{
    loop {
        let index = next.fetch_add(1, Ordering::Relaxed);
        let Some(&id) = ids.get(index) else {
            break;
        };
        // One message per task, even when it yields nothing
        if tx.send(resolve_one(source, id, order)).is_err() {
            break;
        }
    }
}

fn resolve_one<I>(source: &I, id: ItemId, order: &HashMap<ItemId, usize>) -> Option<RankedItem>
where
    I: ItemSource + ?Sized,
{
    let raw = match source.get_item(id) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(%id, error = %e, "dropping item");
            return None;
        }
    };

    let item = DisplayItem::from(raw);
    if !item.is_story_link() {
        return None;
    }

    let rank = *order.get(&id)?;
    Some(RankedItem::new(item, rank))
}
