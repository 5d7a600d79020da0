// Analysis pipeline: multipart intake → concurrent extraction → matching → report.
// Handlers stay thin; batch.rs owns the per-resume fan-out.

pub mod batch;
pub mod form;
pub mod handlers;
