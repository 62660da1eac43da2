pub mod filter_session;

pub use filter_session::FilterSession;
