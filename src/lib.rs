//! multiwatch — session state engine for a grid of embedded video streams.
//!
//! The engine keeps an ordered list of stream identifiers and a parallel
//! grid layout, mirrors every change into a shareable percent-encoded
//! address fragment, and manages the lifecycle of embedded player handles.
//! The rendering surface and the real player capability live behind the
//! [`host::Host`] and [`players::PlayerApi`] traits.

pub mod host;
pub mod keys;
pub mod parser;
pub mod persist;
pub mod players;
pub mod session;
pub mod store;
