// Report assembly and delivery. Consumes finished MatchResults; never feeds
// back into scoring.

pub mod assembler;
pub mod sinks;

pub use assembler::{
    learn_more_links, render_csv, render_summary, suggestions, LearnMoreLink, DEFAULT_TOP_MISSING,
};
pub use sinks::{dispatch, DeliveryOutcome, FileSink, LogSink, ReportDelivery, ReportSink, WebhookSink};
