//! Lookup framing metrics

use metrics::Counter;

/// Per-codec framing counters, labelled with the batch kind
/// (`requests` or `responses`).
#[derive(Clone, Debug)]
pub(crate) struct LookupMetrics {
    /// Number of batches written to a frame
    pub(crate) batches_encoded_total: Counter,
    /// Number of entries in encoded batches
    pub(crate) entries_encoded_total: Counter,
    /// Number of batches read from a frame
    pub(crate) batches_decoded_total: Counter,
    /// Number of entries in decoded batches
    pub(crate) entries_decoded_total: Counter,
    /// Number of batches refused for exceeding the batch limit
    pub(crate) batches_rejected_total: Counter,
}

impl LookupMetrics {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            batches_encoded_total: metrics::counter!(
                "lookup.codec.batches_encoded_total",
                "kind" => kind
            ),
            entries_encoded_total: metrics::counter!(
                "lookup.codec.entries_encoded_total",
                "kind" => kind
            ),
            batches_decoded_total: metrics::counter!(
                "lookup.codec.batches_decoded_total",
                "kind" => kind
            ),
            entries_decoded_total: metrics::counter!(
                "lookup.codec.entries_decoded_total",
                "kind" => kind
            ),
            batches_rejected_total: metrics::counter!(
                "lookup.codec.batches_rejected_total",
                "kind" => kind
            ),
        }
    }

    /// Records one encoded batch of `len` entries.
    pub(crate) fn inc_encoded(&self, len: usize) {
        self.batches_encoded_total.increment(1);
        self.entries_encoded_total.increment(len as u64);
    }

    /// Records one decoded batch of `len` entries.
    pub(crate) fn inc_decoded(&self, len: usize) {
        self.batches_decoded_total.increment(1);
        self.entries_decoded_total.increment(len as u64);
    }

    pub(crate) fn inc_rejected(&self) {
        self.batches_rejected_total.increment(1);
    }
}
