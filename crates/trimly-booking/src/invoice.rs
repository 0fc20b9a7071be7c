//! # Invoice Trigger
//!
//! The seam between settlement and invoice generation. Invoicing itself
//! (document rendering, numbering, delivery) is an external collaborator;
//! the settlement engine only *notifies* it after a settlement commits.
//!
//! The notification is fire-and-forget: by the time it is sent, the payment
//! and the status flip are durable, so a failing invoice pipeline must not
//! (and cannot) roll them back. Implementations own their error handling -
//! typically spawn, queue or log.

use tracing::debug;

/// What the invoice collaborator needs to know about a settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceNotice {
    /// The settled booking.
    pub booking_id: String,
    /// Amount paid, in cents.
    pub amount_cents: i64,
}

/// Collaborator notified after each successful settlement.
///
/// Implementations must be cheap and non-blocking from the caller's point of
/// view; anything slow belongs behind a channel or a spawned task inside the
/// implementation.
pub trait InvoiceTrigger: Send + Sync {
    /// Called once per committed settlement.
    fn booking_settled(&self, notice: InvoiceNotice);
}

/// Default trigger for deployments without an invoice pipeline: logs and
/// drops the notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInvoiceTrigger;

impl InvoiceTrigger for NullInvoiceTrigger {
    fn booking_settled(&self, notice: InvoiceNotice) {
        debug!(
            booking_id = %notice.booking_id,
            amount_cents = notice.amount_cents,
            "Settlement notice dropped (no invoice pipeline configured)"
        );
    }
}
