//! HTTP adapter for the remote drafts service.

mod draft_service;

pub use draft_service::HttpDraftService;
