//! Mediator/observer notification framework.
//!
//! Three registries cooperate behind a [`Facade`]:
//! - the [`View`] maps mediator names to [`Mediator`]s and notification names
//!   to ordered [`Observer`] lists, and dispatches [`Notification`]s,
//! - the [`Model`] maps proxy names to [`Proxy`] data holders,
//! - the [`Controller`] maps notification names to [`Command`] factories.
//!
//! Everything is single-threaded (`Rc` + `RefCell`). Dispatch is synchronous
//! and depth-first; handlers may send further notifications or (un)register
//! mediators while a dispatch is in progress.

pub use command::*;
pub use controller::*;
pub use error::*;
pub use facade::*;
pub use mediator::*;
pub use model::*;
pub use notification::*;
pub use notifier::*;
pub use observer::*;
pub use proxy::*;
pub use view::*;

mod command;
mod controller;
pub mod error;
mod facade;
mod mediator;
mod model;
mod notification;
mod notifier;
mod observer;
mod proxy;
mod view;
