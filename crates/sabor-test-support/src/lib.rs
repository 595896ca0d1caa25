//! Shared test mocks and utilities for the Sabor Digital services.

mod client;
mod clock;
mod repository;

pub use client::{FailingEntityClient, StubEntityClient};
pub use clock::{FixedClock, fixed_now};
pub use repository::{FailingRepository, InMemoryRepository};
