//! Ports (trait boundaries) between the game core and its collaborators.
//!
//! Anything that picks moves implements [`Learner`]; anything that watches a
//! run of games implements [`Observer`].

pub mod learner;
pub mod observer;

pub use learner::Learner;
pub use observer::Observer;
