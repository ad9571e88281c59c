//! Route directory watcher for live route table previews.

use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::FileRouterOptions;
use crate::routing::assembler::plan_routes;
use crate::routing::plan::RouteTable;

/// A watcher that re-plans the route table when route files appear,
/// disappear, or move.
///
/// It only reports tables; mounted routers are never touched.
pub struct RouteTableWatcher {
    options: FileRouterOptions,
    update_tx: mpsc::UnboundedSender<RouteTable>,
}

impl RouteTableWatcher {
    /// Create a new RouteTableWatcher.
    ///
    /// Returns the watcher and a receiver for re-planned tables.
    pub fn new(options: FileRouterOptions) -> (Self, mpsc::UnboundedReceiver<RouteTable>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (Self { options, update_tx }, update_rx)
    }

    /// Watch the base directory recursively and send a freshly planned table
    /// whenever the set of route files changes.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { options, update_tx } = self;
        let base = options.base_dir();
        let mut last = plan_routes(&options).ok();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !changes_route_set(&event.kind) {
                        return;
                    }
                    match plan_routes(&options) {
                        Ok(table) => {
                            if last.as_ref() == Some(&table) {
                                return;
                            }
                            tracing::info!(routes = table.len(), "Route files changed, table re-planned");
                            last = Some(table.clone());
                            let _ = update_tx.send(table);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to re-plan routes. Keeping current table.");
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&base, RecursiveMode::Recursive)?;

        tracing::info!(path = ?base, "Route watcher started");
        Ok(watcher)
    }
}

/// Content edits never change the table; only the set of paths does.
fn changes_route_set(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    )
}
