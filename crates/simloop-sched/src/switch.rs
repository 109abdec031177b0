//! The suspension primitive.
//!
//! [`switch`] yields control back to the run loop exactly once.  It makes no
//! scheduling decision of its own: whatever the caller did before awaiting it
//! (parking in the sleep set, a queue, an event, or nothing) decides when the
//! task is resumed.  Awaited on its own it is a plain round-robin yield.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`switch`].  Pending on the first poll, ready on the
/// second.
#[derive(Debug, Default)]
#[must_use = "futures do nothing unless awaited"]
pub struct Switch {
    yielded: bool,
}

/// Hand control back to the scheduler once.
pub fn switch() -> Switch {
    Switch::default()
}

impl Future for Switch {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            Poll::Pending
        }
    }
}
