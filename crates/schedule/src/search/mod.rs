//! Carry-propagating ceiling/floor search over calendar fields.
//!
//! The search walks a minute-resolution [`cursor`](self::cursor::Cursor)
//! coarse-to-fine (month, day, hour, minute). Whenever a coarser field has
//! to move, every finer field resets: to its minimum going forward, to its
//! maximum for the new context going backward. The checks then restart from
//! the month, since a day rollover can cross a month boundary. A horizon of
//! a few years bounds the walk so jointly-impossible schedules terminate
//! with an error instead of scanning forever.

mod core;
mod cursor;


pub(crate) use self::core::{ceiling, floor, HORIZON_YEARS};
