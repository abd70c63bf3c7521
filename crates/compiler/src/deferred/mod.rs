//! Deferred-ready components.
//!
//! A component created before its configuration is complete hands out accessors that block
//! until initialization finishes. The gate is a one-shot result cell: it settles exactly
//! once, on success or on failure, and every blocked or later caller observes the same
//! outcome. An [`Initializer`] that is dropped without settling fails the cell, so no
//! caller is left waiting on an initialization that will never happen. A [`Canceller`]
//! settles the cell with [`DeferredAccessError::Cancelled`] from any thread and wakes every
//! waiter at once.

mod cache;
mod wiring;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

pub use self::cache::{BackTier, BackingResource, CacheHandle, CacheInit, DeferredCache};
pub use self::wiring::{CacheWiring, WiringCanceller};

/// Failure observed by accessors of a deferred component.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeferredAccessError {
	/// The supplied backing resource is not a map, map provider or backing map provider.
	#[error("cache '{cache}': backing resource '{resource}' of kind {kind} is not a map or map provider")]
	InvalidBackingResource {
		cache: String,
		resource: String,
		kind: String,
	},

	#[error("cache '{cache}': no service configured")]
	MissingService { cache: String },

	/// The initializer was dropped before it settled the gate.
	#[error("initialization abandoned before completion")]
	Abandoned,

	#[error("initialization cancelled")]
	Cancelled,

	#[error("cache '{cache}': back tier '{name}' not found")]
	BackingNotFound { cache: String, name: String },

	#[error("cache '{cache}' has no back tier")]
	NoBackingMap { cache: String },

	#[error("timed out waiting for initialization")]
	TimedOut,
}

/// Outcome of a deferred access.
pub type AccessResult<T> = std::result::Result<T, DeferredAccessError>;

enum State<T> {
	Pending,
	Ready(Arc<T>),
	Failed(DeferredAccessError),
}

impl<T> State<T> {
	fn outcome(&self) -> Option<AccessResult<Arc<T>>> {
		match self {
			State::Pending => None,
			State::Ready(value) => Some(Ok(Arc::clone(value))),
			State::Failed(error) => Some(Err(error.clone())),
		}
	}
}

/// One-shot result cell. Waiters block on a condition variable, never spin.
pub struct ReadyCell<T> {
	state: Mutex<State<T>>,
	settled: Condvar,
}

impl<T> ReadyCell<T> {
	/// Creates a pending cell and the only handle able to open it.
	pub fn pending() -> (Arc<Self>, Initializer<T>) {
		let cell = Arc::new(Self {
			state: Mutex::new(State::Pending),
			settled: Condvar::new(),
		});
		let init = Initializer {
			cell: Some(Arc::clone(&cell)),
		};
		(cell, init)
	}

	/// Blocks until the cell settles.
	pub fn wait(&self) -> AccessResult<Arc<T>> {
		let mut state = self.state.lock();
		loop {
			if let Some(outcome) = state.outcome() {
				return outcome;
			}
			self.settled.wait(&mut state);
		}
	}

	/// Blocks until the cell settles or `timeout` elapses. A timeout too large to express
	/// as a deadline waits without one.
	pub fn wait_timeout(&self, timeout: Duration) -> AccessResult<Arc<T>> {
		let Some(deadline) = Instant::now().checked_add(timeout) else {
			return self.wait();
		};
		let mut state = self.state.lock();
		loop {
			if let Some(outcome) = state.outcome() {
				return outcome;
			}
			if self.settled.wait_until(&mut state, deadline).timed_out() {
				return state.outcome().unwrap_or(Err(DeferredAccessError::TimedOut));
			}
		}
	}

	/// The outcome if the cell already settled.
	pub fn try_get(&self) -> Option<AccessResult<Arc<T>>> {
		self.state.lock().outcome()
	}

	pub fn is_terminal(&self) -> bool {
		!matches!(*self.state.lock(), State::Pending)
	}

	/// Stores `outcome` unless already settled. Returns whether this call settled the cell.
	fn settle(&self, outcome: State<T>) -> bool {
		let mut state = self.state.lock();
		if !matches!(*state, State::Pending) {
			return false;
		}
		*state = outcome;
		self.settled.notify_all();
		true
	}

	fn is_cancelled(&self) -> bool {
		matches!(*self.state.lock(), State::Failed(DeferredAccessError::Cancelled))
	}
}

impl<T> fmt::Debug for ReadyCell<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = match &*self.state.lock() {
			State::Pending => "pending",
			State::Ready(_) => "ready",
			State::Failed(_) => "failed",
		};
		f.debug_struct("ReadyCell").field("state", &state).finish()
	}
}

/// Settles a [`ReadyCell`]. Dropping it unsettled fails the cell with
/// [`DeferredAccessError::Abandoned`].
pub struct Initializer<T> {
	cell: Option<Arc<ReadyCell<T>>>,
}

impl<T> Initializer<T> {
	pub fn open(mut self, value: T) {
		self.settle(State::Ready(Arc::new(value)));
	}

	pub fn fail(mut self, error: DeferredAccessError) {
		self.settle(State::Failed(error));
	}

	pub fn cancel(mut self) {
		self.settle(State::Failed(DeferredAccessError::Cancelled));
	}

	/// Whether a [`Canceller`] already settled the cell.
	pub fn is_cancelled(&self) -> bool {
		self.cell.as_ref().is_some_and(|cell| cell.is_cancelled())
	}

	/// A shareable handle that cancels the cell while it is still pending.
	pub fn canceller(&self) -> Canceller<T> {
		Canceller { cell: self.cell.clone() }
	}

	fn settle(&mut self, outcome: State<T>) {
		if let Some(cell) = self.cell.take() {
			cell.settle(outcome);
		}
	}
}

impl<T> Drop for Initializer<T> {
	fn drop(&mut self) {
		self.settle(State::Failed(DeferredAccessError::Abandoned));
	}
}

impl<T> fmt::Debug for Initializer<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Initializer")
			.field("settled", &self.cell.is_none())
			.finish()
	}
}

/// Cancels a pending [`ReadyCell`] from outside its initializer.
pub struct Canceller<T> {
	cell: Option<Arc<ReadyCell<T>>>,
}

impl<T> Canceller<T> {
	/// Settles the cell with [`DeferredAccessError::Cancelled`] and wakes its waiters.
	/// Returns `false` if the cell had already settled.
	pub fn cancel(&self) -> bool {
		self.cell
			.as_ref()
			.is_some_and(|cell| cell.settle(State::Failed(DeferredAccessError::Cancelled)))
	}

	pub fn is_cancelled(&self) -> bool {
		self.cell.as_ref().is_some_and(|cell| cell.is_cancelled())
	}
}

impl<T> Clone for Canceller<T> {
	fn clone(&self) -> Self {
		Self { cell: self.cell.clone() }
	}
}

impl<T> fmt::Debug for Canceller<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Canceller")
			.field("cancelled", &self.is_cancelled())
			.finish()
	}
}

#[cfg(test)]
mod tests;
