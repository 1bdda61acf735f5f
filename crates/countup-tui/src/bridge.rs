//! Bridge between counter observations and TUI messages.

use crossbeam_channel::Sender;

use countup_core::format::format_value;
use countup_core::{CounterObserver, CounterUpdate, RunEvent};

use crate::messages::TuiMessage;

/// Observer that forwards counter updates and lifecycle events to the TUI
/// channel. Sends never block; a full channel drops the message.
pub struct TuiBridgeObserver {
    tx: Sender<TuiMessage>,
}

impl TuiBridgeObserver {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }

    fn send(&self, msg: TuiMessage) {
        let _ = self.tx.try_send(msg);
    }
}

impl CounterObserver for TuiBridgeObserver {
    fn on_update(&self, update: &CounterUpdate) {
        self.send(TuiMessage::Value {
            index: update.run_index,
            value: update.value,
            fraction: update.fraction,
        });
    }

    fn on_event(&self, event: &RunEvent) {
        match event {
            RunEvent::Started {
                run_index,
                label,
                start,
                end,
            } => {
                self.send(TuiMessage::Started {
                    index: *run_index,
                    label: label.clone(),
                    target: *end,
                });
                self.send(TuiMessage::Log(format!(
                    "{label}: counting {} -> {}",
                    format_value(*start),
                    format_value(*end)
                )));
            }
            RunEvent::Completed { run_index, label } => {
                self.send(TuiMessage::Completed { index: *run_index });
                self.send(TuiMessage::Log(format!("{label}: done")));
            }
            RunEvent::Cancelled {
                run_index,
                label,
                last_value,
            } => {
                self.send(TuiMessage::Stopped {
                    index: *run_index,
                    last_value: *last_value,
                });
                self.send(TuiMessage::Log(format!(
                    "[WARN] {label}: stopped at {}",
                    format_value(*last_value)
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn update_becomes_value_message() {
        let (tx, rx) = unbounded();
        let bridge = TuiBridgeObserver::new(tx);
        bridge.on_update(&CounterUpdate {
            run_index: 1,
            label: "Happy Families".into(),
            value: 2500.0,
            fraction: 0.5,
            done: false,
        });
        assert_eq!(
            rx.try_recv().unwrap(),
            TuiMessage::Value {
                index: 1,
                value: 2500.0,
                fraction: 0.5
            }
        );
    }

    #[test]
    fn events_also_log() {
        let (tx, rx) = unbounded();
        let bridge = TuiBridgeObserver::new(tx);
        bridge.on_event(&RunEvent::Started {
            run_index: 0,
            label: "Prizes Won".into(),
            start: 0.0,
            end: 12000.0,
        });
        bridge.on_event(&RunEvent::Cancelled {
            run_index: 0,
            label: "Prizes Won".into(),
            last_value: 600.0,
        });
        let msgs: Vec<TuiMessage> = rx.try_iter().collect();
        assert_eq!(msgs.len(), 4);
        assert!(matches!(msgs[0], TuiMessage::Started { target, .. } if target == 12000.0));
        assert_eq!(msgs[1], TuiMessage::Log("Prizes Won: counting 0 -> 12,000".into()));
        assert_eq!(
            msgs[2],
            TuiMessage::Stopped {
                index: 0,
                last_value: 600.0
            }
        );
        assert_eq!(msgs[3], TuiMessage::Log("[WARN] Prizes Won: stopped at 600".into()));
    }

    #[test]
    fn disconnected_channel_is_ignored() {
        let (tx, rx) = unbounded();
        drop(rx);
        let bridge = TuiBridgeObserver::new(tx);
        bridge.on_event(&RunEvent::Completed {
            run_index: 0,
            label: "x".into(),
        });
    }
}
