//! Scoped event subscriptions with guaranteed deregistration.

use super::widget::{EventHandler, MapWidget, SharedWidget, SubscriptionId, WidgetEvent, WidgetNotice};
use crate::{MapError, Result};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::oneshot;

/// RAII listener registration: dropping the guard removes the listener.
/// Holds only a weak reference, so a disposed widget never outlives its
/// subscriptions.
pub struct ScopedSubscription {
    widget: Weak<Mutex<dyn MapWidget>>,
    id: Option<SubscriptionId>,
}

impl ScopedSubscription {
    pub fn subscribe(widget: &SharedWidget, event: WidgetEvent, handler: EventHandler) -> Self {
        let id = widget.lock().unwrap().on(event, handler);
        Self {
            widget: Arc::downgrade(widget),
            id: Some(id),
        }
    }

    /// Remove the listener now instead of at drop time.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(widget) = self.widget.upgrade() {
                widget.lock().unwrap().off(id);
            }
        }
    }
}

impl Drop for ScopedSubscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Two-phase completion for asynchronous widget operations.
///
/// Listen first, then mutate the widget, then await: the first of the
/// ok/error events resolves the signal, and both listeners are released
/// when it is consumed, so a settle is handled exactly once.
pub struct SettleSignal {
    rx: oneshot::Receiver<Result<()>>,
    _ok: ScopedSubscription,
    _err: ScopedSubscription,
}

impl SettleSignal {
    pub fn listen(widget: &SharedWidget, ok_event: WidgetEvent) -> Self {
        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));

        let ok_tx = Arc::clone(&tx);
        let ok = ScopedSubscription::subscribe(
            widget,
            ok_event,
            Box::new(move |_notice| {
                if let Some(tx) = ok_tx.lock().unwrap().take() {
                    let _ = tx.send(Ok(()));
                }
            }),
        );

        let err_tx = tx;
        let err = ScopedSubscription::subscribe(
            widget,
            WidgetEvent::Error,
            Box::new(move |notice| {
                let message = match notice {
                    WidgetNotice::Error(message) => message.clone(),
                    _ => "widget error".to_string(),
                };
                if let Some(tx) = err_tx.lock().unwrap().take() {
                    let _ = tx.send(Err(MapError::Render(message)));
                }
            }),
        );

        Self {
            rx,
            _ok: ok,
            _err: err,
        }
    }

    /// Wait for the widget to settle. Consumes the signal; the listeners
    /// are removed on return.
    pub async fn settled(self) -> Result<()> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(MapError::Render(
                "widget went away before settling".to_string(),
            )),
        }
    }
}
