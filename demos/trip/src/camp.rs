//! The camping weekend: who drives what where, and when.

use std::rc::Rc;

use anyhow::{Result, bail};
use simloop_core::TimeDelta;
use simloop_sched::Scheduler;
use simloop_trace::Trace;

use crate::model::{Handle, Location, Place, Thing};

// ── Places ────────────────────────────────────────────────────────────────────

pub const HOME:          Location = Location("Home");
pub const WATERTON:      Location = Location("Waterton");
pub const MOUNTAIN_VIEW: Location = Location("Mountain View");
pub const SLOAN_CABIN:   Location = Location("Sloan Cabin");
pub const KIMBALL:       Location = Location("Kimball");

/// Every leg takes the same time for now.
const TRANSIT_MINUTES: i64 = 30;

fn minutes(n: i64) -> TimeDelta {
    TimeDelta::minutes(n)
}

// ── Cast ──────────────────────────────────────────────────────────────────────

pub struct Cast {
    pub aaron:    Handle,
    pub jm:       Handle,
    pub logan:    Handle,
    pub bridget:  Handle,
    pub severus:  Handle,
    pub stephano: Handle,
    pub bucky:    Handle,
    pub ralph:    Handle,
    pub gear:     Handle,
}

impl Cast {
    /// Everyone at home, except Bucky parked at Mountain View with the
    /// camping gear aboard.
    pub fn assemble() -> Result<Cast> {
        let bucky = Thing::new("Bucky", MOUNTAIN_VIEW);
        let gear = Thing::new("Camping Stuff", MOUNTAIN_VIEW);
        bucky.pick_up(&[gear.clone()])?;

        Ok(Cast {
            aaron:    Thing::new("Aaron", HOME),
            jm:       Thing::new("JM", HOME),
            logan:    Thing::new("Logan", HOME),
            bridget:  Thing::new("Bridget", HOME),
            severus:  Thing::new("Severus", HOME),
            stephano: Thing::new("Stephano", HOME),
            bucky,
            ralph:    Thing::new("Ralph", HOME),
            gear,
        })
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

/// Traced actions on the shared clock.  Cheap to clone into each task.
#[derive(Clone)]
pub struct Trip {
    pub sched: Scheduler,
    pub trace: Trace,
}

impl Trip {
    pub fn new(sched: &Scheduler) -> Self {
        Self {
            sched: sched.clone(),
            trace: Trace::new(sched),
        }
    }

    /// `driver` takes `vehicle` to `to`, bringing `passengers` along.
    pub async fn drive(
        &self,
        driver:     &Handle,
        vehicle:    &Handle,
        to:         Location,
        passengers: &[Handle],
    ) -> Result<()> {
        if vehicle.place() != driver.place() {
            bail!(
                "{}@{} and {}@{} are in different locations",
                driver.name(),
                driver.place(),
                vehicle.name(),
                vehicle.place()
            );
        }

        let description = format!("{} drives {} to {}", driver.name(), vehicle.name(), to.0);
        self.trace
            .scope(description, async {
                let mut cargo = passengers.to_vec();
                cargo.push(driver.clone());

                vehicle.pick_up(&cargo)?;
                self.move_vehicle(vehicle, to).await;
                vehicle.drop_off(&cargo)
            })
            .await
    }

    async fn move_vehicle(&self, vehicle: &Handle, to: Location) {
        vehicle.set_place(Place::InTransit);
        self.sched.sleep(minutes(TRANSIT_MINUTES)).await;
        vehicle.set_place(Place::At(to));
    }

    pub async fn load(
        &self,
        person: &Handle,
        item:   &Handle,
        into:   &Handle,
        period: Option<TimeDelta>,
    ) -> Result<()> {
        let description = format!("{} loads {} to {}", person.name(), item.name(), into.name());
        self.trace
            .scope(description, async {
                if let Some(period) = period {
                    self.sched.sleep(period).await;
                }
                into.pick_up(&[item.clone()])
            })
            .await
    }

    pub async fn unload(
        &self,
        person: &Handle,
        item:   &Handle,
        from:   &Handle,
        period: Option<TimeDelta>,
    ) -> Result<()> {
        let description = format!("{} unloads {} from {}", person.name(), item.name(), from.name());
        self.trace
            .scope(description, async {
                if let Some(period) = period {
                    self.sched.sleep(period).await;
                }
                from.drop_off(&[item.clone()])
            })
            .await
    }

    /// Wrap a fallible step in a named activity.
    async fn step<F>(&self, description: &str, body: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        self.trace.scope(description, body).await
    }
}

// ── Itineraries ───────────────────────────────────────────────────────────────

pub async fn jm_camp(trip: Trip, cast: Rc<Cast>) -> Result<()> {
    let Cast { jm, bridget, stephano, severus, bucky, gear, .. } = &*cast;
    let sched = &trip.sched;

    sched.sleep_until("2022-07-14T09:00:00").await?;
    trip.step("JM drive to Kimball", async {
        trip.drive(jm, stephano, KIMBALL, &[bridget.clone()]).await
    })
    .await?;

    trip.step("Stay at Perretts with YW camp", async {
        Ok(sched.sleep_until("2022-07-15T09:00").await?)
    })
    .await?;

    trip.step("Drive into Waterton", async {
        trip.drive(jm, stephano, WATERTON, &[bridget.clone()]).await
    })
    .await?;

    trip.step("Wait for Bridget and car", async {
        sched.sleep(TimeDelta::hours(5)).await;
        Ok(())
    })
    .await?;

    trip.step("Set up camp", async {
        trip.unload(jm, bucky, severus, Some(minutes(20))).await?;
        trip.unload(jm, gear, bucky, Some(minutes(90))).await
    })
    .await
}

pub async fn aaron_camp(trip: Trip, cast: Rc<Cast>) -> Result<()> {
    let Cast { aaron, logan, severus, stephano, bucky, ralph, .. } = &*cast;
    let sched = &trip.sched;
    let with_logan = [logan.clone()];

    sched.sleep_until("2022-07-14T09:00:00").await?;
    trip.step("Pick up and load ralph", async {
        trip.load(aaron, ralph, severus, Some(minutes(15))).await
    })
    .await?;

    trip.step("Drive out to YM camp", async {
        trip.drive(aaron, severus, KIMBALL, &with_logan).await?;
        trip.unload(aaron, ralph, severus, Some(minutes(15))).await?;
        trip.drive(aaron, severus, MOUNTAIN_VIEW, &with_logan).await?;

        trip.step("Grab camp stuff from Bucky", async {
            sched.sleep(minutes(10)).await;
            Ok(())
        })
        .await?;

        trip.drive(aaron, severus, SLOAN_CABIN, &with_logan).await
    })
    .await?;

    trip.step("Hang out at YM camp", async {
        Ok(sched.sleep_until("2022-07-15T09:00:00").await?)
    })
    .await?;

    trip.step("Go into Waterton for the hike", async {
        trip.step("Go pick up Bucky", async {
            let Place::At(trailer_park) = bucky.place() else {
                bail!("{} is not parked anywhere", bucky.name());
            };
            trip.drive(aaron, severus, trailer_park, &with_logan).await?;
            trip.load(aaron, bucky, severus, Some(minutes(15))).await
        })
        .await?;

        trip.drive(aaron, severus, WATERTON, &with_logan).await?;

        trip.step("Hike", async {
            sched.sleep_until("2022-07-15T10:00:00").await?;
            sched.sleep(TimeDelta::hours(8)).await;
            Ok(())
        })
        .await?;

        trip.drive(aaron, stephano, SLOAN_CABIN, &with_logan).await
    })
    .await?;

    trip.step("Finish YM camp", async {
        sched.sleep_until("2022-07-15T12:00:00").await?;
        trip.drive(aaron, stephano, WATERTON, &with_logan).await
    })
    .await?;

    trip.step("Stay in Waterton", async {
        // Until Monday week.
        Ok(sched.sleep_until("2022-07-24T10:00:00").await?)
    })
    .await?;

    trip.step("Pick up ralph", async {
        trip.drive(aaron, severus, KIMBALL, &[]).await?;
        trip.load(aaron, ralph, severus, Some(minutes(15))).await?;
        trip.drive(aaron, severus, WATERTON, &[]).await?;
        trip.unload(aaron, ralph, severus, None).await
    })
    .await
}
