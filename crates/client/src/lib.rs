//! Scripted duel driver.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ SimConfig     (environment)
//!   ├─→ roster        (built-in combatants and abilities)
//!   ├─→ EventPrinter  (listener writing notifications to stdout)
//!   └─→ Simulation    (fixed rotation until victory or the turn cap)
//! ```
//!
//! The driver makes no decisions beyond a fixed rotation: every turn it tries
//! the owner's ability cards in slot order and falls back to a normal attack.

pub mod config;
pub mod printer;
pub mod roster;
pub mod sim;

pub use config::{EventFormat, SimConfig};
pub use printer::EventPrinter;
pub use sim::{Outcome, Simulation};
