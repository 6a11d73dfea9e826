//! Game logic and HTTP service for the Crack the Lock word puzzle.
//!
//! The pure core lives in [`services`]: ring generation, guess scoring,
//! progress tracking, client projection and difficulty policy. Everything
//! stateful goes through the collaborator traits in [`store`].

pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;
