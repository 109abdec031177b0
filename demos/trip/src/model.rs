//! People, vehicles, trailers and gear moving between named places.
//!
//! Everything that can be carried is a [`Thing`].  A thing is either at a
//! location, aboard a named carrier, or (for a vehicle) in transit.  Vehicles
//! and trailers hold a payload; loading checks that the item is where the
//! carrier is, and unloading puts it down wherever the carrier now stands.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use anyhow::{Result, bail};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Location(pub &'static str);

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Place {
    At(Location),
    InTransit,
    Aboard(&'static str),
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::At(location) => f.write_str(location.0),
            Place::InTransit => f.write_str("In Transit"),
            Place::Aboard(carrier) => f.write_str(carrier),
        }
    }
}

/// Shared handle; both camp tasks move the same things around.
pub type Handle = Rc<Thing>;

pub struct Thing {
    name:    &'static str,
    place:   Cell<Place>,
    payload: RefCell<Vec<Handle>>,
}

impl Thing {
    pub fn new(name: &'static str, at: Location) -> Handle {
        Rc::new(Thing {
            name,
            place:   Cell::new(Place::At(at)),
            payload: RefCell::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn place(&self) -> Place {
        self.place.get()
    }

    pub(crate) fn set_place(&self, place: Place) {
        self.place.set(place);
    }

    /// Take `items` aboard.  Each must be where this carrier is.
    pub fn pick_up(&self, items: &[Handle]) -> Result<()> {
        for item in items {
            if item.place() != self.place() {
                bail!(
                    "{} needs to be at {}, not {}",
                    item.name,
                    self.place(),
                    item.place()
                );
            }
            item.set_place(Place::Aboard(self.name));
            self.payload.borrow_mut().push(Rc::clone(item));
        }
        Ok(())
    }

    /// Put `items` down at this carrier's current place.
    pub fn drop_off(&self, items: &[Handle]) -> Result<()> {
        for item in items {
            let mut payload = self.payload.borrow_mut();
            let Some(index) = payload.iter().position(|held| Rc::ptr_eq(held, item)) else {
                bail!("{} is not aboard {}", item.name, self.name);
            };
            payload.remove(index);
            item.set_place(self.place());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carries(carrier: &Thing, item: &Handle) -> bool {
        carrier.payload.borrow().iter().any(|held| Rc::ptr_eq(held, item))
    }

    const HOME: Location = Location("Home");
    const CAMP: Location = Location("Camp");

    #[test]
    fn pick_up_requires_same_place() {
        let truck = Thing::new("Truck", HOME);
        let tent = Thing::new("Tent", CAMP);
        let err = truck.pick_up(&[tent.clone()]).unwrap_err();
        assert_eq!(err.to_string(), "Tent needs to be at Home, not Camp");
        assert!(!carries(&truck, &tent));
    }

    #[test]
    fn drop_off_lands_at_carrier_place() {
        let truck = Thing::new("Truck", HOME);
        let tent = Thing::new("Tent", HOME);
        truck.pick_up(&[tent.clone()]).unwrap();
        assert_eq!(tent.place(), Place::Aboard("Truck"));

        truck.set_place(Place::At(CAMP));
        truck.drop_off(&[tent.clone()]).unwrap();
        assert_eq!(tent.place(), Place::At(CAMP));
        assert!(!carries(&truck, &tent));
    }

    #[test]
    fn drop_off_rejects_strangers() {
        let truck = Thing::new("Truck", HOME);
        let tent = Thing::new("Tent", HOME);
        assert!(truck.drop_off(&[tent]).is_err());
    }
}
