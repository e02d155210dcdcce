use std::cell::{Cell, RefCell};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::rc::Rc;
use log::warn;

type Hasher = BuildHasherDefault<NoHashHasher<u64>>;

static NEXT_BUS: AtomicU64 = AtomicU64::new(0);

/// Marker trait for types that can be sent through the [EventBus].
///
/// Automatically implemented for all `'static` types.
pub trait Event: 'static {}

impl<T: 'static> Event for T {}

/// Handle returned by [EventBus::subscribe], used to revoke the subscription.
///
/// Only the bus that issued it accepts it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SubscriptionId {
	bus: u64,
	event: TypeId,
	serial: u64,
}

struct Subscriber<E> {
	serial: u64,
	active: Cell<bool>,
	callback: RefCell<Box<dyn FnMut(&E)>>,
}

/// Per-event-type subscriber list with the concrete event type erased.
trait SubscriberList {
	fn revoke(&mut self, serial: u64) -> bool;

	fn len(&self) -> usize;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> SubscriberList for Vec<Rc<Subscriber<E>>> {
	fn revoke(&mut self, serial: u64) -> bool {
		match self.iter().position(|s| s.serial == serial) {
			Some(index) => {
				self.remove(index).active.set(false);
				true
			},
			None => false,
		}
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Dispatches events to the callbacks subscribed to their exact type, in subscription order.
///
/// All operations take `&self` so that a callback may subscribe, unsubscribe or notify while
/// a notification is in flight. Subscribers added during a notification are not called for it;
/// subscribers revoked during a notification are skipped if they have not run yet.
pub struct EventBus {
	id: u64,
	next_serial: Cell<u64>,
	subscribers: RefCell<HashMap<TypeId, Box<dyn SubscriberList>, Hasher>>,
}

impl Default for EventBus {
	fn default() -> Self {
		Self {
			id: NEXT_BUS.fetch_add(1, Ordering::Relaxed),
			next_serial: Cell::new(0),
			subscribers: RefCell::new(HashMap::default()),
		}
	}
}

impl EventBus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `callback` for every future event of type `E`.
	pub fn subscribe<E: Event>(&self, callback: impl FnMut(&E) + 'static) -> SubscriptionId {
		let serial = self.next_serial.get();
		self.next_serial.set(serial + 1);

		let subscriber = Rc::new(Subscriber {
			serial,
			active: Cell::new(true),
			callback: RefCell::new(Box::new(callback) as Box<dyn FnMut(&E)>),
		});

		let mut subscribers = self.subscribers.borrow_mut();
		let list = subscribers
			.entry(TypeId::of::<E>())
			.or_insert_with(|| Box::new(Vec::<Rc<Subscriber<E>>>::new()));

		match list.as_any_mut().downcast_mut::<Vec<Rc<Subscriber<E>>>>() {
			Some(list) => list.push(subscriber),
			None => unreachable!("subscriber list of {} has the wrong type", std::any::type_name::<E>()),
		}

		SubscriptionId {
			bus: self.id,
			event: TypeId::of::<E>(),
			serial,
		}
	}

	/// Revoke a subscription. Returns `false` if it was already revoked or belongs to another bus.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		if id.bus != self.id {
			return false;
		}
		match self.subscribers.borrow_mut().get_mut(&id.event) {
			Some(list) => list.revoke(id.serial),
			None => false,
		}
	}

	/// Invoke every callback subscribed to `E`.
	///
	/// A callback that is already running further up the stack is skipped.
	pub fn notify<E: Event>(&self, event: &E) {
		let snapshot: Vec<Rc<Subscriber<E>>> = {
			let subscribers = self.subscribers.borrow();
			match subscribers
				.get(&TypeId::of::<E>())
				.and_then(|list| list.as_any().downcast_ref::<Vec<Rc<Subscriber<E>>>>())
			{
				Some(list) => list.clone(),
				None => return,
			}
		};

		for subscriber in snapshot {
			if !subscriber.active.get() {
				continue;
			}

			match subscriber.callback.try_borrow_mut() {
				Ok(mut callback) => (*callback)(event),
				Err(_) => warn!(
					"skipping re-entrant notification of {} for subscription {}",
					std::any::type_name::<E>(),
					subscriber.serial
				),
			}
		}
	}

	/// Number of live subscriptions for `E`.
	pub fn subscriber_count<E: Event>(&self) -> usize {
		self.subscribers.borrow().get(&TypeId::of::<E>()).map(|list| list.len()).unwrap_or(0)
	}
}
