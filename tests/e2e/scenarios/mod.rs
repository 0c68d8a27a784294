mod assertion_chain;
mod content_roundtrip;
mod performance;
