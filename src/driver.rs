//! Real-time driver: maps the page's virtual clock onto tokio time.
//!
//! The page never sleeps on its own. These functions sleep until the next
//! timer deadline and advance the page clock to match, interleaving host
//! events as they arrive. Under a paused tokio clock (`start_paused`) they
//! run instantly and deterministically.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::event::command::HostCommand;
use crate::event::input::PageEvent;
use crate::page::Page;

/// Counters reported when a driver loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub events: usize,
    pub task_runs: usize,
    pub commands: usize,
}

/// Maps tokio instants to page time, anchored when the driver starts.
#[derive(Debug, Clone, Copy)]
struct Clock {
    origin: Instant,
    base: Duration,
}

impl Clock {
    fn start(page: &Page) -> Self {
        Self {
            origin: Instant::now(),
            base: page.now(),
        }
    }

    fn page_now(&self) -> Duration {
        self.base + self.origin.elapsed()
    }

    fn instant_for(&self, page_time: Duration) -> Instant {
        self.origin + page_time.saturating_sub(self.base)
    }
}

/// Run the page's timers for `span` of real time.
pub async fn run_for(page: &mut Page, span: Duration) -> DriverStats {
    let clock = Clock::start(page);
    let end = clock.base + span;
    let mut stats = DriverStats::default();

    while let Some(due) = page.next_deadline().filter(|&d| d <= end) {
        sleep_until(clock.instant_for(due)).await;
        stats.task_runs += page.advance_to(due);
    }
    sleep_until(clock.instant_for(end)).await;
    stats.task_runs += page.advance_to(end);
    stats
}

/// Drive the page from a stream of host events until the sender side closes.
///
/// Timers fire in real time between events. Host commands are forwarded to
/// `commands` after each event.
pub async fn run(
    page: &mut Page,
    mut events: mpsc::Receiver<PageEvent>,
    commands: mpsc::Sender<HostCommand>,
) -> DriverStats {
    let clock = Clock::start(page);
    let mut stats = DriverStats::default();

    loop {
        let deadline = page.next_deadline().map(|d| clock.instant_for(d));
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                stats.task_runs += page.advance_to(clock.page_now());
                page.handle_event(event);
                stats.events += 1;

                for command in page.drain_commands() {
                    if commands.send(command).await.is_err() {
                        warn!(?command, "host command receiver closed");
                        continue;
                    }
                    stats.commands += 1;
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                stats.task_runs += page.advance_to(clock.page_now());
            }
        }
    }

    debug!(?stats, "driver stopped");
    stats
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::NodeData;
    use crate::dom::tree::Dom;
    use crate::geometry::Rect;

    fn counter_page() -> (Page, crate::dom::node::NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body").with_rect(Rect::block(0.0, 2000.0)));
        let counter = dom.insert_child(
            body,
            NodeData::new("span")
                .with_class("counter")
                .with_data("count", "80")
                .with_rect(Rect::block(100.0, 40.0)),
        );
        let mut page = Page::new(dom).unwrap();
        page.mount().unwrap();
        (page, counter)
    }

    #[tokio::test(start_paused = true)]
    async fn run_for_plays_counter_in_real_time() {
        let (mut page, counter) = counter_page();
        let started = Instant::now();

        let stats = run_for(&mut page, Duration::from_millis(1000)).await;
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(page.now(), Duration::from_millis(1000));
        assert_eq!(stats.task_runs, 25);
        assert_eq!(page.dom().get(counter).unwrap().text, "40");

        run_for(&mut page, Duration::from_millis(1000)).await;
        assert_eq!(page.dom().get(counter).unwrap().text, "80");
        assert_eq!(page.pending_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_handles_events_and_forwards_commands() {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let link = dom.insert_child(body, NodeData::new("a").with_href("#work"));
        dom.insert_child(
            body,
            NodeData::new("section")
                .with_id("work")
                .with_rect(Rect::block(1200.0, 600.0)),
        );
        let mut page = Page::new(dom).unwrap();
        page.mount().unwrap();

        let (event_tx, event_rx) = mpsc::channel(8);
        let (command_tx, mut command_rx) = mpsc::channel(8);

        let producer = async move {
            event_tx.send(PageEvent::Click { target: link }).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            event_tx.send(PageEvent::Idle).await.unwrap();
        };
        let (stats, ()) = tokio::join!(run(&mut page, event_rx, command_tx), producer);

        assert_eq!(stats.events, 2);
        assert_eq!(stats.commands, 1);
        assert_eq!(
            command_rx.recv().await,
            Some(HostCommand::ScrollTo {
                top: 1130.0,
                smooth: true
            })
        );
    }
}
