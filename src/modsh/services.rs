//! Typed service container used by modules to hand their state to command
//! handlers.
//!
//! Registration happens on a [`ServiceRegistry`]; [`ServiceRegistry::build`]
//! freezes it into a [`ServiceResolver`]. Every registration is a singleton:
//! factories run at most once, on first resolution, and every later
//! resolution shares the same `Rc`. Dropping the resolver drops each
//! singleton it owns exactly once.

use crate::error::{Result, ShellError};
use once_cell::unsync::OnceCell;
use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Factory = Box<dyn FnOnce() -> Rc<dyn Any>>;

struct Slot {
    name: &'static str,
    factory: RefCell<Option<Factory>>,
    instance: OnceCell<Rc<dyn Any>>,
}

impl Slot {
    fn ready(name: &'static str, instance: Rc<dyn Any>) -> Self {
        Self {
            name,
            factory: RefCell::new(None),
            instance: OnceCell::with_value(instance),
        }
    }

    fn deferred(name: &'static str, factory: Factory) -> Self {
        Self {
            name,
            factory: RefCell::new(Some(factory)),
            instance: OnceCell::new(),
        }
    }

    fn get(&self) -> Option<Rc<dyn Any>> {
        self.instance
            .get_or_try_init(|| {
                let factory = self.factory.borrow_mut().take();
                factory.map(|f| f()).ok_or(())
            })
            .ok()
            .cloned()
    }
}

#[derive(Default)]
pub struct ServiceRegistry {
    slots: HashMap<TypeId, Slot>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, constructed with `Default` on first use.
    pub fn register<T: Default + 'static>(&mut self) -> &mut Self {
        self.register_factory(T::default)
    }

    pub fn register_instance<T: 'static>(&mut self, instance: T) -> &mut Self {
        self.register_shared(Rc::new(instance))
    }

    /// Register an instance the caller keeps a handle to.
    pub fn register_shared<T: 'static>(&mut self, instance: Rc<T>) -> &mut Self {
        self.slots
            .insert(TypeId::of::<T>(), Slot::ready(type_name::<T>(), instance));
        self
    }

    pub fn register_factory<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: 'static,
        F: FnOnce() -> T + 'static,
    {
        let factory: Factory = Box::new(move || Rc::new(factory()) as Rc<dyn Any>);
        self.slots
            .insert(TypeId::of::<T>(), Slot::deferred(type_name::<T>(), factory));
        self
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<T>())
    }

    pub fn build(self) -> ServiceResolver {
        ServiceResolver { slots: self.slots }
    }
}

pub struct ServiceResolver {
    slots: HashMap<TypeId, Slot>,
}

impl ServiceResolver {
    /// Resolve a registered service. Unregistered types yield None.
    pub fn resolve<T: 'static>(&self) -> Option<Rc<T>> {
        let slot = self.slots.get(&TypeId::of::<T>())?;
        slot.get()?.downcast::<T>().ok()
    }

    pub fn require<T: 'static>(&self) -> Result<Rc<T>> {
        self.resolve::<T>()
            .ok_or(ShellError::MissingService(type_name::<T>()))
    }
}

impl fmt::Debug for ServiceResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.slots.values().map(|s| s.name).collect();
        names.sort_unstable();
        f.debug_struct("ServiceResolver")
            .field("services", &names)
            .finish()
    }
}
